//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the pipeline without
//! making real extraction service or database calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::traits::DocumentExtractor;
use crate::types::{ExtractionResult, FailureKind};

/// A mock extraction service for testing.
///
/// Returns deterministic, configurable payloads keyed by instruction text,
/// with failure injection and call tracking for assertions.
#[derive(Default)]
pub struct MockExtractor {
    /// Predefined payloads by instruction
    payloads: Arc<RwLock<HashMap<String, serde_json::Value>>>,

    /// Instructions that should fail, with their failure
    failures: Arc<RwLock<HashMap<String, (FailureKind, String)>>>,

    /// Payload for instructions with no predefined entry
    default_payload: Arc<RwLock<Option<serde_json::Value>>>,

    /// Artificial per-call latency
    call_delay: Arc<RwLock<Option<Duration>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockExtractorCall>>>,

    /// Concurrency tracking
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

/// Record of a call made to the mock extractor.
#[derive(Debug, Clone)]
pub struct MockExtractorCall {
    pub instruction: String,
    pub document_len: usize,
}

impl MockExtractor {
    /// Create a new mock extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predefined payload for an instruction.
    pub fn with_payload(self, instruction: impl Into<String>, payload: serde_json::Value) -> Self {
        self.payloads
            .write()
            .unwrap()
            .insert(instruction.into(), payload);
        self
    }

    /// Set the payload returned for unknown instructions.
    pub fn with_default_payload(self, payload: serde_json::Value) -> Self {
        *self.default_payload.write().unwrap() = Some(payload);
        self
    }

    /// Make an instruction fail with the given kind and message.
    pub fn failing_instruction(
        self,
        instruction: impl Into<String>,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(instruction.into(), (kind, message.into()));
        self
    }

    /// Add artificial latency to every call.
    pub fn with_call_delay(self, delay: Duration) -> Self {
        *self.call_delay.write().unwrap() = Some(delay);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockExtractorCall> {
        self.calls.read().unwrap().clone()
    }

    /// Highest number of calls observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentExtractor for MockExtractor {
    async fn extract(&self, document: &[u8], instruction: &str) -> ExtractionResult {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        self.calls.write().unwrap().push(MockExtractorCall {
            instruction: instruction.to_string(),
            document_len: document.len(),
        });

        let delay = *self.call_delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let result = if let Some((kind, message)) =
            self.failures.read().unwrap().get(instruction).cloned()
        {
            ExtractionResult::failure(kind, message)
        } else if let Some(payload) = self.payloads.read().unwrap().get(instruction).cloned() {
            ExtractionResult::Success(payload)
        } else if let Some(payload) = self.default_payload.read().unwrap().clone() {
            ExtractionResult::Success(payload)
        } else {
            ExtractionResult::failure(
                FailureKind::ServiceError,
                format!("no mock payload for instruction: {}", instruction),
            )
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_returns_predefined_payload() {
        let extractor = MockExtractor::new().with_payload("extract header", json!({"a": 1}));

        let result = extractor.extract(b"%PDF", "extract header").await;
        assert_eq!(result.payload().unwrap()["a"], 1);

        let calls = extractor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].instruction, "extract header");
        assert_eq!(calls[0].document_len, 4);
    }

    #[tokio::test]
    async fn test_mock_failure_injection() {
        let extractor = MockExtractor::new().failing_instruction(
            "bad task",
            FailureKind::MalformedResponse,
            "not json",
        );

        let result = extractor.extract(b"%PDF", "bad task").await;
        assert_eq!(
            result.as_failure().unwrap().kind,
            FailureKind::MalformedResponse
        );
    }

    #[tokio::test]
    async fn test_mock_without_payload_fails() {
        let extractor = MockExtractor::new();
        let result = extractor.extract(b"%PDF", "unknown").await;
        assert!(!result.is_success());
    }
}
