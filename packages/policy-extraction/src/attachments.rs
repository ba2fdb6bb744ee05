//! Attachment retrieval: bounded-retry row fetch, base64 decoding and
//! filename classification of the two source documents.

use base64::Engine;
use bytes::Bytes;
use tracing::{info, warn};

use crate::error::FetchError;
use crate::traits::{AttachmentRow, AttachmentStore};

/// A decoded attachment with its stored filename.
#[derive(Debug, Clone)]
pub struct NamedDocument {
    pub name: String,
    pub bytes: Bytes,
}

/// Run the store lookup up to `max_attempts` times.
///
/// Retries are immediate (no backoff) and strictly sequential. Each attempt
/// opens its own connection scope inside the store. Failed attempts are
/// logged; after the last one the most recent error is surfaced, not
/// swallowed.
pub async fn fetch_rows<S: AttachmentStore + ?Sized>(
    store: &S,
    request_id: i64,
    max_attempts: usize,
) -> Result<Vec<AttachmentRow>, FetchError> {
    let max_attempts = max_attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match store.query_attachments(request_id).await {
            Ok(rows) => return Ok(rows),
            Err(e) => {
                warn!(
                    attempt,
                    max_attempts,
                    request_id,
                    error = %e,
                    "attachment query attempt failed"
                );
                last_error = Some(e);
            }
        }
    }

    Err(FetchError {
        attempts: max_attempts,
        source: last_error.unwrap_or_else(|| "no attempts made".into()),
    })
}

/// Source of the two classified documents of a request.
///
/// Wraps an [`AttachmentStore`] with the retry policy and the filename
/// heuristic that tells the policy apart from the financial specification.
pub struct AttachmentSource<S> {
    store: S,
    max_attempts: usize,
}

impl<S: AttachmentStore> AttachmentSource<S> {
    /// Create a source with the given retry budget.
    pub fn new(store: S, max_attempts: usize) -> Self {
        Self {
            store,
            max_attempts,
        }
    }

    /// Fetch and classify the request's attachments.
    ///
    /// Returns `(policy, specification)`; either may be absent. Rows whose
    /// base64 payload does not decode are skipped with a log line and
    /// processing continues; a single bad attachment never fails the
    /// lookup. First match wins per category.
    pub async fn fetch_attachments(
        &self,
        request_id: i64,
    ) -> Result<(Option<NamedDocument>, Option<NamedDocument>), FetchError> {
        info!(request_id, "querying attachments");

        let rows = fetch_rows(&self.store, request_id, self.max_attempts).await?;
        info!(request_id, rows = rows.len(), "attachments returned");

        let mut policy = None;
        let mut specification = None;

        for row in rows {
            if row.payload_base64.is_empty() {
                continue;
            }

            let name = row.file_name.to_uppercase();

            let bytes = match base64::engine::general_purpose::STANDARD
                .decode(row.payload_base64.as_bytes())
            {
                Ok(decoded) => Bytes::from(decoded),
                Err(e) => {
                    warn!(file = %name, error = %e, "base64 decode failed; skipping attachment");
                    continue;
                }
            };

            let document = NamedDocument {
                name: if name.is_empty() {
                    "anexo.pdf".to_string()
                } else {
                    name.clone()
                },
                bytes,
            };

            if is_specification_name(&name) && specification.is_none() {
                info!(file = %name, "specification found");
                specification = Some(document);
            } else if is_policy_name(&name) && policy.is_none() {
                info!(file = %name, "policy found");
                policy = Some(document);
            }
        }

        Ok((policy, specification))
    }
}

/// Filename heuristic for the financial specification document.
fn is_specification_name(upper: &str) -> bool {
    upper.contains("ESPEC")
}

/// Filename heuristic for the policy document.
///
/// Matches "APÓLICE"-style names regardless of how the accented letter
/// survived storage, plus "FRONT" sheets.
fn is_policy_name(upper: &str) -> bool {
    (upper.contains("AP") && upper.contains("LICE") && upper.ends_with(".PDF"))
        || upper.contains("FRONT")
}
