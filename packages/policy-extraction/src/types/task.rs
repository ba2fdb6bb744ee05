//! Extraction task and result types.
//!
//! A task pairs one document with one instruction; its result is a tagged
//! success/failure value. Failures are data, not errors: the orchestrator
//! never raises because a task failed.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One extraction unit of work: a named instruction over a document.
///
/// Immutable once created. The document handle is a [`Bytes`] view, so
/// handing the same source content to several concurrent tasks never shares
/// a read cursor: each task sees an independent, immutable slice.
#[derive(Debug, Clone)]
pub struct ExtractionTask {
    /// Identifier the result will be keyed by.
    pub name: String,

    /// Document content.
    pub document: Bytes,

    /// Instruction text sent alongside the document.
    pub instruction: String,
}

impl ExtractionTask {
    /// Create a new task.
    pub fn new(
        name: impl Into<String>,
        document: Bytes,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            document,
            instruction: instruction.into(),
        }
    }
}

/// Outcome of one extraction task: exactly one of payload or failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExtractionResult {
    /// Structured payload decoded from the service response.
    Success(serde_json::Value),

    /// Recovered per-task failure.
    Failure(TaskFailure),
}

impl ExtractionResult {
    /// Build a failure result.
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure(TaskFailure {
            kind,
            message: message.into(),
        })
    }

    /// Whether this result carries a payload.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The payload, if any.
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The failure, if any.
    pub fn as_failure(&self) -> Option<&TaskFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

/// A recovered extraction failure, surfaced as a result entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// What went wrong inside one extraction call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// The document failed validation; the service was never called.
    InvalidDocument,

    /// Transport or service error while calling the extraction service.
    ServiceError,

    /// The service responded, but the payload did not decode as JSON.
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidDocument => "invalid document",
            Self::ServiceError => "service error",
            Self::MalformedResponse => "malformed response",
        };
        f.write_str(name)
    }
}

/// Results of a task batch, keyed by task name.
///
/// Unordered: task identity carries the meaning, never arrival order.
#[derive(Debug, Clone, Default)]
pub struct TaskResultSet(HashMap<String, ExtractionResult>);

impl TaskResultSet {
    /// Create an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a result under its task name.
    pub fn insert(&mut self, name: impl Into<String>, result: ExtractionResult) {
        self.0.insert(name.into(), result);
    }

    /// Look up a task's result by name.
    pub fn get(&self, name: &str) -> Option<&ExtractionResult> {
        self.0.get(name)
    }

    /// The successful payload for a task, if present.
    pub fn payload(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name).and_then(ExtractionResult::payload)
    }

    /// Number of collected results.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no results were collected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Count of successful entries.
    pub fn success_count(&self) -> usize {
        self.0.values().filter(|r| r.is_success()).count()
    }

    /// Count of failed entries.
    pub fn failure_count(&self) -> usize {
        self.0.values().filter(|r| !r.is_success()).count()
    }

    /// Iterate over (name, result) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ExtractionResult)> {
        self.0.iter()
    }
}

impl FromIterator<(String, ExtractionResult)> for TaskResultSet {
    fn from_iter<I: IntoIterator<Item = (String, ExtractionResult)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_is_exactly_one_state() {
        let ok = ExtractionResult::Success(json!({"a": 1}));
        assert!(ok.is_success());
        assert!(ok.payload().is_some());
        assert!(ok.as_failure().is_none());

        let failed = ExtractionResult::failure(FailureKind::ServiceError, "timed out");
        assert!(!failed.is_success());
        assert!(failed.payload().is_none());
        assert_eq!(failed.as_failure().unwrap().kind, FailureKind::ServiceError);
    }

    #[test]
    fn test_result_set_counts() {
        let set: TaskResultSet = [
            ("master".to_string(), ExtractionResult::Success(json!({}))),
            (
                "locations".to_string(),
                ExtractionResult::failure(FailureKind::MalformedResponse, "bad json"),
            ),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
        assert_eq!(set.success_count(), 1);
        assert_eq!(set.failure_count(), 1);
        assert!(set.payload("master").is_some());
        assert!(set.payload("locations").is_none());
        assert!(set.get("coverages").is_none());
    }

    #[test]
    fn test_document_views_are_independent() {
        let source = Bytes::from_static(b"%PDF-1.4 content");
        let a = ExtractionTask::new("a", source.clone(), "first");
        let b = ExtractionTask::new("b", source.clone(), "second");

        // Same underlying content, separate handles, no shared cursor.
        assert_eq!(a.document, b.document);
    }
}
