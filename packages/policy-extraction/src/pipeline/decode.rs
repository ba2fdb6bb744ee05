//! Response cleaning: fence stripping and payload decoding.
//!
//! The extraction service is asked for JSON, but responses sometimes arrive
//! wrapped in fenced code markers. Stripping happens before decoding; a
//! payload that still fails to decode becomes a recovered
//! `MalformedResponse` failure, never an error.

use crate::types::{ExtractionResult, FailureKind};

/// Remove a leading/trailing markdown code fence (with optional `json` tag).
///
/// Text without fences passes through unchanged.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);

    rest.trim()
}

/// Decode a raw service response into an [`ExtractionResult`].
pub fn decode_response(text: &str) -> ExtractionResult {
    let clean = strip_code_fences(text);

    match serde_json::from_str(clean) {
        Ok(payload) => ExtractionResult::Success(payload),
        Err(e) => ExtractionResult::failure(
            FailureKind::MalformedResponse,
            format!("response did not decode as JSON: {}", e),
        ),
    }
}
