//! Structural Mapper
//!
//! Walks the generic input tree along the fixed transaction schema and
//! assembles a [`CanonicalRecord`].
//!
//! ## Traversal
//!
//! ```text
//! root ─┬─► feePayer ─► body
//!       ├─► accountUpdates ─► [i] ─► body ─┬─► update
//!       │     (input order)                ├─► balanceChange, events, actions
//!       │                                  └─► preconditions ─┬─► network ─► epoch data ×2
//!       │                                                     └─► account
//!       └─► memo
//! ```
//!
//! The shape is fixed: extra keys are ignored (logged at debug level),
//! missing required keys fail at once with the path of the node that lacks
//! them. The whole document succeeds or the whole document fails.
//!
//! Label fallbacks never fail. They are logged and returned alongside the
//! record as [`Diagnostic`]s.

mod account_update;
mod command;
pub mod node;
mod preconditions;
mod update;

use std::fmt;

use tracing::warn;

use crate::config::TranscodeConfig;
use crate::core::path::FieldPath;
use crate::encode::LeafError;
use crate::input::{parse_lenient, NotationError, Tree};
use crate::model::command::CanonicalRecord;

pub use node::{MapContext, Node};

/// Why a document could not be transcoded.
#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    /// The input text is not valid lenient notation.
    #[error(transparent)]
    Notation(#[from] NotationError),

    /// A required key is absent.
    #[error("{path}: missing required field '{field}'")]
    MissingField {
        /// Node lacking the key.
        path: FieldPath,
        /// Missing key.
        field: &'static str,
    },

    /// A structural node has the wrong kind.
    #[error("{path}: expected {expected}, found {found}")]
    WrongShape {
        /// Offending node.
        path: FieldPath,
        /// Kind the schema requires.
        expected: &'static str,
        /// Kind present in the input.
        found: &'static str,
    },

    /// A leaf value could not be encoded.
    #[error("{path}: {source}")]
    Leaf {
        /// Offending leaf.
        path: FieldPath,
        /// Encoder error.
        #[source]
        source: LeafError,
    },

    /// A fixed-size slot array carries non-null values past its end.
    #[error("{path}: {len} slots given, at most {max} allowed")]
    TooManySlots {
        /// Offending array.
        path: FieldPath,
        /// Slots in the input.
        len: usize,
        /// Fixed slot count.
        max: usize,
    },
}

impl TranscodeError {
    /// Path of the offending node, if the error has one.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Self::Notation(_) => None,
            Self::MissingField { path, .. }
            | Self::WrongShape { path, .. }
            | Self::Leaf { path, .. }
            | Self::TooManySlots { path, .. } => Some(path),
        }
    }
}

/// What kind of fallback a diagnostic reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Unknown or empty auth-requirement label, resolved to `None`.
    AuthFallback {
        /// Source label.
        label: String,
    },
    /// Sign label other than `Positive`/`Negative`, resolved to -1.
    SignFallback {
        /// Source label.
        label: String,
    },
}

/// A non-fatal fallback taken during a transcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Where the fallback happened.
    pub path: FieldPath,
    /// What happened.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Log this diagnostic at warn level.
    pub(crate) fn log(&self) {
        match &self.kind {
            DiagnosticKind::AuthFallback { label } => {
                warn!(path = %self.path, label = %label, "unrecognised auth requirement, using None");
            }
            DiagnosticKind::SignFallback { label } => {
                warn!(path = %self.path, label = %label, "unrecognised sign label, using -1");
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::AuthFallback { label } => {
                write!(f, "{}: auth requirement '{label}' not recognised, using None", self.path)
            }
            DiagnosticKind::SignFallback { label } => {
                write!(f, "{}: sign label '{label}' not recognised, using -1", self.path)
            }
        }
    }
}

/// A transcoded document with the fallbacks taken while building it.
#[derive(Debug, Clone)]
pub struct Transcoded {
    /// The canonical record.
    pub record: CanonicalRecord,
    /// Non-fatal fallbacks, in traversal order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Transcode a generic tree into a canonical record.
pub fn transcode(tree: &Tree, config: &TranscodeConfig) -> Result<Transcoded, TranscodeError> {
    let mut cx = MapContext::new(config);
    let record = command::map_record(&mut cx, &Node::root(tree))?;
    Ok(Transcoded {
        record,
        diagnostics: cx.into_diagnostics(),
    })
}

/// Parse lenient notation and transcode it.
pub fn transcode_str(text: &str, config: &TranscodeConfig) -> Result<Transcoded, TranscodeError> {
    let tree = parse_lenient(text)?;
    transcode(&tree, config)
}
