//! Input front-end.
//!
//! Relaxed object-literal text in, generic tree out. The generic tree is a
//! `serde_json::Value` built with `arbitrary_precision` and `preserve_order`:
//! numbers keep their exact digits and maps keep insertion order.

pub mod notation;

pub use notation::{normalise, parse_lenient, NotationError};

/// The generic input tree consumed by the structural mapper.
pub type Tree = serde_json::Value;

/// Short name of a tree node's kind, for error messages.
pub fn kind_name(value: &Tree) -> &'static str {
    match value {
        Tree::Null => "null",
        Tree::Bool(_) => "boolean",
        Tree::Number(_) => "number",
        Tree::String(_) => "string",
        Tree::Array(_) => "list",
        Tree::Object(_) => "mapping",
    }
}
