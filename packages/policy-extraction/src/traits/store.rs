//! The attachment store seam.

use async_trait::async_trait;

use crate::error::StoreError;

/// One stored attachment row for a request.
#[derive(Debug, Clone)]
pub struct AttachmentRow {
    /// Original filename as stored.
    pub file_name: String,

    /// Position within the request's attachment list.
    pub sequence: i32,

    /// Base64-encoded file content.
    pub payload_base64: String,
}

impl AttachmentRow {
    /// Create a row.
    pub fn new(
        file_name: impl Into<String>,
        sequence: i32,
        payload_base64: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            sequence,
            payload_base64: payload_base64.into(),
        }
    }
}

/// A single attempt at looking up the attachments of a request.
///
/// Implementations return the rows of the newest revision of the request,
/// ordered by sequence, and must open and release their own connection
/// scope per call; retrying is the caller's concern (see
/// [`crate::attachments::fetch_rows`]), so no state may leak across
/// attempts.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Query the attachment rows for one request.
    async fn query_attachments(&self, request_id: i64) -> Result<Vec<AttachmentRow>, StoreError>;
}
