//! Record renderers.
//!
//! A [`CanonicalRecord`] is plain data; turning it into text is the job of a
//! [`Renderer`]. Two are provided:
//!
//! - [`JsonRenderer`]: structured JSON, field elements as decimal strings
//! - [`RustLiteralRenderer`]: a `ZkAppTestVector { .. }` struct literal

pub mod json;
pub mod rust_literal;

use crate::model::command::CanonicalRecord;

pub use json::JsonRenderer;
pub use rust_literal::RustLiteralRenderer;

/// Rendering failures.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Serialization failed.
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Turns a canonical record into text.
pub trait Renderer {
    /// Render one record.
    fn render(&self, record: &CanonicalRecord) -> Result<String, RenderError>;
}
