use once_cell::sync::Lazy;
use serde_json::Value;

use crate::errors::{AppError, AppResult};

static JSON_FENCE_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"(?s)```json[ \t]*\r?\n(.*?)\r?\n[ \t]*```")
        .expect("JSON_FENCE_REGEX is a valid regex pattern")
});

/// Recovers the JSON payload from model output.
///
/// The body of the first ```` ```json ```` fenced block wins; without one the whole text
/// is parsed. No repair is attempted on invalid JSON.
pub fn extract_json(raw_text: &str) -> AppResult<Value> {
    let candidate = JSON_FENCE_REGEX
        .captures(raw_text)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str())
        .unwrap_or(raw_text);

    serde_json::from_str(candidate).map_err(|e| {
        log::warn!("Model response was not valid JSON: {}", e);
        AppError::MalformedResponse(e.to_string())
    })
}
