//! Witness Comparator
//!
//! Cross-checks a flat primitive witness dump against a reference sequence.
//!
//! ```text
//! "BOOL{val:true}U32{val:3}"  ──decode──►  [(1,1), (3,32)]  ─┐
//!                                                          ├─► ComparisonReport
//! [[1,1],[3,32n]]             ──parse───►  [(1,1), (3,32)]  ─┘
//! ```
//!
//! Both sides are normalised to (value, bit width) pairs. Equality is exact
//! on both components.

pub mod compare;
pub mod token;

use std::fmt;

use num_bigint::BigUint;

pub use compare::{compare, parse_reference, ComparisonReport, Mismatch};
pub use token::decode_witness;

/// One primitive: an unsigned value and its declared bit width.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Primitive {
    /// Unsigned value.
    pub value: BigUint,
    /// Declared bit width.
    pub width: u32,
}

impl Primitive {
    /// Build a primitive.
    pub fn new(value: impl Into<BigUint>, width: u32) -> Self {
        Self { value: value.into(), width }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.value, self.width)
    }
}

/// Witness decoding and reference parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WitnessError {
    /// Text between tokens that is not whitespace, or a malformed token.
    #[error("unexpected input at offset {offset}: '{snippet}'")]
    Grammar {
        /// Byte offset into the witness text.
        offset: usize,
        /// Start of the offending text.
        snippet: String,
    },

    /// Token value that its tag cannot hold.
    #[error("{tag} cannot hold '{value}'")]
    ValueOutOfRange {
        /// Token tag.
        tag: &'static str,
        /// Value as written.
        value: String,
    },

    /// Byte-array entry outside 0..=255.
    #[error("byte entry '{value}' at offset {offset} is not in 0..=255")]
    ByteOutOfRange {
        /// Byte offset of the token.
        offset: usize,
        /// Entry as written.
        value: String,
    },

    /// Malformed reference entry.
    #[error("reference entry {index}: {reason}")]
    Reference {
        /// Entry index.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },
}
