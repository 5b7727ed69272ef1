//! # zkApp Transcoder
//!
//! Schema-driven transcoder from loosely-typed zkApp command documents to a
//! canonical, strongly-typed record, plus a comparator for primitive witness
//! dumps.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ZKAPP TRANSCODER                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Exact primitives                          │
//! │  ├── field.rs    - Pallas base-field elements                │
//! │  ├── base58.rs   - Base58check codec                         │
//! │  ├── path.rs     - Dotted/indexed document paths             │
//! │  └── fingerprint.rs - SHA-256 digest of a record             │
//! │                                                              │
//! │  input/          - Lenient notation → generic tree           │
//! │  model/          - Canonical record types                    │
//! │  encode/         - Leaf encoders, optional-value shapes      │
//! │  mapper/         - Schema-driven tree → record mapping       │
//! │  render/         - Record → JSON / Rust literal text         │
//! │  witness/        - Primitive witness decode and compare      │
//! │  config.rs       - Run configuration                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! text ─► parse_lenient ─► Tree ─► transcode ─► CanonicalRecord ─► Renderer
//! ```
//!
//! ## Exactness
//!
//! No value passes through floating point. Integers are read from their
//! literal digits; field elements are arbitrary-precision and checked
//! against the field modulus. Transcoding is a pure function of the input
//! tree and its configuration, so equal inputs give byte-identical records.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod encode;
pub mod input;
pub mod mapper;
pub mod model;
pub mod render;
pub mod witness;

// Re-export commonly used types
pub use config::{SchemaVariant, TranscodeConfig};
pub use crate::core::field::FieldElement;
pub use crate::core::fingerprint::fingerprint;
pub use encode::OptionalShape;
pub use input::{parse_lenient, Tree};
pub use mapper::{transcode, transcode_str, Diagnostic, TranscodeError, Transcoded};
pub use model::command::CanonicalRecord;
pub use render::{JsonRenderer, Renderer, RustLiteralRenderer};
pub use witness::{compare, decode_witness, parse_reference, ComparisonReport, Primitive};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
