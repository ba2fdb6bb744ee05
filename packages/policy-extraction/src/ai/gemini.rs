//! Gemini-backed extraction service adapter.
//!
//! Wraps the pure `gemini-client` crate behind [`DocumentExtractor`]. Every
//! outcome of a call is an [`ExtractionResult`]: validation rejections,
//! transport errors and undecodable responses are all recovered per task.

use async_trait::async_trait;
use gemini_client::GeminiClient;
use tracing::warn;

use crate::pipeline::decode::decode_response;
use crate::security::SecretString;
use crate::traits::DocumentExtractor;
use crate::types::{ExtractionResult, FailureKind, PipelineConfig};
use crate::validate::validate_pdf_bytes;

/// [`DocumentExtractor`] backed by the Gemini `generateContent` API.
pub struct GeminiExtractor {
    client: GeminiClient,
    max_document_bytes: usize,
}

impl GeminiExtractor {
    /// Build an extractor from an API key and the pipeline config.
    pub fn new(api_key: SecretString, config: &PipelineConfig) -> Self {
        let client = GeminiClient::new(api_key.expose()).with_timeout(config.request_timeout);

        Self {
            client,
            max_document_bytes: config.max_document_bytes,
        }
    }

    /// Build an extractor from `GEMINI_API_KEY`.
    pub fn from_env(config: &PipelineConfig) -> Result<Self, gemini_client::GeminiError> {
        let client = GeminiClient::from_env()?.with_timeout(config.request_timeout);

        Ok(Self {
            client,
            max_document_bytes: config.max_document_bytes,
        })
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.client = self.client.with_model(model);
        self
    }
}

#[async_trait]
impl DocumentExtractor for GeminiExtractor {
    async fn extract(&self, document: &[u8], instruction: &str) -> ExtractionResult {
        if let Err(reason) = validate_pdf_bytes(document, self.max_document_bytes) {
            warn!(reason = %reason, "document rejected before the service call");
            return ExtractionResult::failure(FailureKind::InvalidDocument, reason);
        }

        let text = match self
            .client
            .generate_document(instruction, document, "application/pdf")
            .await
        {
            Ok(text) => text,
            Err(e) => {
                return ExtractionResult::failure(FailureKind::ServiceError, e.to_string());
            }
        };

        decode_response(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> GeminiExtractor {
        GeminiExtractor::new(SecretString::new("test-key"), &PipelineConfig::default())
    }

    #[tokio::test]
    async fn test_empty_document_is_rejected_without_a_call() {
        let result = extractor().extract(b"", "extract").await;
        assert_eq!(
            result.as_failure().unwrap().kind,
            FailureKind::InvalidDocument
        );
    }

    #[tokio::test]
    async fn test_non_pdf_document_is_rejected() {
        let result = extractor().extract(b"plain text, not a pdf", "extract").await;
        assert_eq!(
            result.as_failure().unwrap().kind,
            FailureKind::InvalidDocument
        );
    }

    #[tokio::test]
    async fn test_oversized_document_is_rejected() {
        let config = PipelineConfig::default().with_max_document_bytes(8);
        let extractor = GeminiExtractor::new(SecretString::new("test-key"), &config);

        let result = extractor.extract(b"%PDF-1.4 too large", "extract").await;
        assert_eq!(
            result.as_failure().unwrap().kind,
            FailureKind::InvalidDocument
        );
    }
}
