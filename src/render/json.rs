//! JSON rendering for analysis results.

use serde::Serialize;

use crate::analysis::DocumentAnalysis;
use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an analysis to JSON.
pub fn to_json(analysis: &DocumentAnalysis, format: JsonFormat) -> Result<String> {
    value_to_json(analysis, format)
}

/// Serialize any result record (metrics, placements, conversions).
pub fn value_to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
