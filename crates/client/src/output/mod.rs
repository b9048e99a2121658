//! Output formatting functions.

pub mod json;
pub mod pretty;

use serde::Serialize;

use crate::cli::OutputFormat;

/// Renders `value` as JSON, or with the given pretty formatter.
pub fn render<T: Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
    pretty: impl FnOnce(&T) -> String,
) -> String {
    match format {
        OutputFormat::Json => json::format_json(value),
        OutputFormat::Pretty => pretty(value),
    }
}

/// Renders a one-line status message.
pub fn render_message(message: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_json(&serde_json::json!({ "message": message })),
        OutputFormat::Pretty => message.to_string(),
    }
}
