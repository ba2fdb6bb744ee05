//! Pipeline configuration.

use std::time::Duration;

use crate::validate::DEFAULT_MAX_DOCUMENT_BYTES;

/// Configuration for the extraction pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Fixed size of the extraction worker pool.
    ///
    /// Default: 4 (one permit per policy task).
    pub concurrency: usize,

    /// Retry budget for the attachment lookup.
    ///
    /// Default: 3 attempts, no backoff.
    pub max_fetch_attempts: usize,

    /// Per-call timeout for the extraction service.
    ///
    /// Owned by the client adapter, not the orchestrator. A slow task is
    /// bounded here, never cancelled by its siblings. Default: 600s.
    pub request_timeout: Duration,

    /// Size ceiling for a single document. Default: 50 MB.
    pub max_document_bytes: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            max_fetch_attempts: 3,
            request_timeout: Duration::from_secs(600),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker pool size.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the attachment fetch retry budget.
    pub fn with_max_fetch_attempts(mut self, attempts: usize) -> Self {
        self.max_fetch_attempts = attempts;
        self
    }

    /// Set the per-call service timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the document size ceiling.
    pub fn with_max_document_bytes(mut self, max: usize) -> Self {
        self.max_document_bytes = max;
        self
    }
}
