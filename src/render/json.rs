//! JSON renderer.

use crate::model::command::CanonicalRecord;

use super::{RenderError, Renderer};

/// Renders records as JSON.
///
/// 64-bit integers stay exact JSON integers; field elements are decimal
/// strings.
#[derive(Clone, Copy, Debug)]
pub struct JsonRenderer {
    /// Indent output.
    pub pretty: bool,
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, record: &CanonicalRecord) -> Result<String, RenderError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(record)?
        } else {
            serde_json::to_string(record)?
        };
        Ok(text)
    }
}
