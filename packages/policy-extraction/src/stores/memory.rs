//! In-memory attachment store.
//!
//! Useful for tests and local development: rows are held in a map keyed by
//! request id, and transient failures can be injected to exercise the
//! retry path.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::StoreError;
use crate::traits::{AttachmentRow, AttachmentStore};

/// Attachment store backed by a map.
#[derive(Default)]
pub struct MemoryAttachmentStore {
    rows: Arc<RwLock<HashMap<i64, Vec<AttachmentRow>>>>,

    /// Number of leading attempts that should fail.
    fail_remaining: Arc<AtomicUsize>,

    /// Total query attempts observed.
    attempts: Arc<AtomicUsize>,
}

impl MemoryAttachmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed rows for a request.
    pub fn with_rows(self, request_id: i64, rows: Vec<AttachmentRow>) -> Self {
        self.rows.write().unwrap().insert(request_id, rows);
        self
    }

    /// Make the next `n` query attempts fail with a transient error.
    pub fn failing_first(self, n: usize) -> Self {
        self.fail_remaining.store(n, Ordering::SeqCst);
        self
    }

    /// Number of query attempts made against this store.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AttachmentStore for MemoryAttachmentStore {
    async fn query_attachments(&self, request_id: i64) -> Result<Vec<AttachmentRow>, StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if self
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err("injected transient failure".into());
        }

        Ok(self
            .rows
            .read()
            .unwrap()
            .get(&request_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_seeded_rows() {
        let store = MemoryAttachmentStore::new()
            .with_rows(42, vec![AttachmentRow::new("a.pdf", 1, "QUJD")]);

        let rows = store.query_attachments(42).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].file_name, "a.pdf");

        let empty = store.query_attachments(99).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_injected_failures_run_out() {
        let store = MemoryAttachmentStore::new().failing_first(1);

        assert!(store.query_attachments(1).await.is_err());
        assert!(store.query_attachments(1).await.is_ok());
        assert_eq!(store.attempts(), 2);
    }
}
