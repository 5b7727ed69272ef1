//! Core primitives.
//!
//! Exact-integer building blocks shared by the transcoder and the witness
//! comparator. Nothing here touches floating point.

pub mod field;
pub mod base58;
pub mod path;
pub mod fingerprint;

// Re-export core types
pub use field::{FieldElement, FieldError, FIELD_MODULUS};
pub use base58::{decode_check, encode_check, Base58Error};
pub use path::FieldPath;
pub use fingerprint::fingerprint;
