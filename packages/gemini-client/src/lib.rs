//! Pure Gemini REST API client
//!
//! A clean, minimal client for the Gemini `generateContent` API with no
//! domain-specific logic. Supports multimodal requests (text instructions
//! plus inline binary documents) with deterministic JSON decoding.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, GenerateRequest, GenerationConfig, Part};
//!
//! let client = GeminiClient::from_env()?;
//!
//! // Send a PDF with an extraction instruction
//! let text = client
//!     .generate_document("Extract the policy fields as JSON.", &pdf_bytes, "application/pdf")
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::*;

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout: None,
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set the model (default: gemini-2.5-flash).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies, regional endpoints, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Raw `generateContent` call.
    pub async fn generate_content(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let start = std::time::Instant::now();

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );

        let mut builder = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Gemini request failed");
            GeminiError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(GeminiError::Api(format!("Gemini API error: {}", error_text)));
        }

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini generateContent"
        );

        Ok(generate_response)
    }

    /// Send an instruction plus an inline document, deterministically decoded
    /// as JSON, and return the response text.
    pub async fn generate_document(
        &self,
        instruction: &str,
        document: &[u8],
        mime_type: &str,
    ) -> Result<String> {
        let request = GenerateRequest::new(vec![
            Part::text(instruction),
            Part::inline_data(mime_type, document),
        ])
        .with_config(GenerationConfig::deterministic_json());

        let response = self.generate_content(request).await?;

        response
            .text()
            .ok_or_else(|| GeminiError::Api("No response from Gemini".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = GeminiClient::new("test-key")
            .with_model("gemini-2.0-pro")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.model(), "gemini-2.0-pro");
        assert_eq!(client.base_url(), "https://custom.api.com");
        assert_eq!(client.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_from_env_missing_key() {
        std::env::remove_var("GEMINI_API_KEY");
        assert!(matches!(
            GeminiClient::from_env(),
            Err(GeminiError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_network_error_surfaces() {
        // Nothing listens on the discard port; the request fails fast.
        let client = GeminiClient::new("test-key").with_base_url("http://127.0.0.1:9");

        let err = client
            .generate_document("extract", b"%PDF-1.4", "application/pdf")
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::Network(_)));
    }
}
