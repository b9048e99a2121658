//! JSON output formatting.

use std::fmt::Display;

use serde::Serialize;
use serde_json::json;

/// Format a value as compact JSON.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format_error(&e))
}

/// Format an error as `{"error": "..."}`.
pub fn format_error(error: &dyn Display) -> String {
    json!({ "error": error.to_string() }).to_string()
}
