//! JSON rendering of the view model.

use crate::error::{Error, Result};

use super::compose::View;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a view to JSON.
pub fn to_json(view: &View, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(view),
        JsonFormat::Compact => serde_json::to_string(view),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
