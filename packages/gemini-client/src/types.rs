//! Request and response types for the Gemini `generateContent` API.

use serde::{Deserialize, Serialize};

/// A request to the `generateContent` endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Ordered conversation contents (a single user turn for extraction).
    pub contents: Vec<Content>,

    /// Decoding configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateRequest {
    /// Build a single-turn request from a list of parts.
    pub fn new(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content { parts }],
            generation_config: None,
        }
    }

    /// Set the generation config.
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// One part of a turn: either text or inline binary data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    /// Plain text (prompts, instructions).
    Text(String),

    /// Inline base64-encoded document data.
    InlineData(InlineData),
}

impl Part {
    /// Create a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create an inline data part from raw bytes.
    pub fn inline_data(mime_type: impl Into<String>, data: &[u8]) -> Self {
        use base64::Engine;
        Self::InlineData(InlineData {
            mime_type: mime_type.into(),
            data: base64::engine::general_purpose::STANDARD.encode(data),
        })
    }
}

/// Base64-encoded binary payload with its MIME type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Decoding configuration for a request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature (0.0 = deterministic decoding).
    pub temperature: f32,

    /// Response MIME type (e.g. `application/json`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

impl GenerationConfig {
    /// Deterministic JSON output: temperature 0, `application/json` responses.
    pub fn deterministic_json() -> Self {
        Self {
            temperature: 0.0,
            response_mime_type: Some("application/json".to_string()),
        }
    }
}

/// Raw response from `generateContent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate's parts.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// One generated candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: CandidateContent,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Content of a candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

/// One part of a candidate (only text parts are expected back).
#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Token accounting returned with the response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,

    #[serde(default)]
    pub candidates_token_count: u32,

    #[serde(default)]
    pub total_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateRequest::new(vec![
            Part::text("Extract the fields."),
            Part::inline_data("application/pdf", b"%PDF-1.4"),
        ])
        .with_config(GenerationConfig::deterministic_json());

        let json = serde_json::to_value(&request).unwrap();
        let parts = &json["contents"][0]["parts"];

        assert_eq!(parts[0]["text"], "Extract the fields.");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "application/pdf");
        assert_eq!(json["generationConfig"]["temperature"], 0.0);
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "{\"a\":"}, {"text": " 1}"}]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
        });

        let response: GenerateResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"a\": 1}"));
        assert_eq!(response.usage_metadata.unwrap().total_token_count, 15);
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.text().is_none());
    }
}
