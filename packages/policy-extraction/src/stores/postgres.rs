//! Postgres attachment store (requires the `postgres` feature).

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;
use tracing::{debug, instrument};

use crate::error::StoreError;
use crate::traits::{AttachmentRow, AttachmentStore};

/// Attachment store backed by a Postgres pool.
///
/// Each query checks a connection out of the pool and returns it when the
/// call completes, so every retry attempt gets a fresh connection scope.
pub struct PostgresAttachmentStore {
    pool: PgPool,
}

impl PostgresAttachmentStore {
    /// Create a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to a database URL.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl AttachmentStore for PostgresAttachmentStore {
    #[instrument(skip(self), fields(request_id = request_id))]
    async fn query_attachments(&self, request_id: i64) -> Result<Vec<AttachmentRow>, StoreError> {
        // Only candidate filenames, restricted to the newest revision of
        // the request, in sequence order.
        let rows = sqlx::query(
            r#"
            SELECT a.file_name, a.sequence, a.payload_base64
            FROM request_attachments a
            WHERE a.request_id = $1
              AND (
                    a.file_name ILIKE '%AP%LICE%.pdf'
                 OR a.file_name ILIKE '%FRONT%'
                 OR a.file_name ILIKE '%ESPEC%'
              )
              AND a.revision = (
                    SELECT MAX(r.revision)
                    FROM request_attachments r
                    WHERE r.request_id = a.request_id
              )
            ORDER BY a.sequence ASC
            "#,
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(rows = rows.len(), "attachment rows fetched");

        Ok(rows
            .into_iter()
            .map(|row| AttachmentRow {
                file_name: row.get::<String, _>("file_name"),
                sequence: row.get::<i32, _>("sequence"),
                payload_base64: row.get::<String, _>("payload_base64"),
            })
            .collect())
    }
}
