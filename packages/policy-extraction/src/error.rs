//! Typed errors for the policy extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Per-task extraction failures are deliberately *not* here: they are
//! recovered values carried inside `ExtractionResult::Failure`, so a failing
//! task can never abort its siblings or the pipeline.

use thiserror::Error;

/// Boxed error produced by a single attachment store attempt.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can end a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// One or both required source documents are absent
    #[error("required documents missing (policy: {policy_found}, specification: {specification_found})")]
    MissingDocuments {
        policy_found: bool,
        specification_found: bool,
    },

    /// Attachment lookup exhausted its retry budget
    #[error("attachment fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Writing the consolidated record to disk failed
    #[error("failed to persist record: {0}")]
    Persist(#[source] std::io::Error),

    /// Record serialization failed
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Attachment lookup failure after the retry budget is spent.
///
/// Carries the most recent underlying error; earlier attempts are only
/// logged.
#[derive(Debug, Error)]
#[error("attachment query failed after {attempts} attempts: {source}")]
pub struct FetchError {
    /// Number of attempts made
    pub attempts: usize,

    /// The error from the final attempt
    #[source]
    pub source: StoreError,
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
