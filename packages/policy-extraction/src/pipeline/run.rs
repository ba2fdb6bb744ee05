//! Pipeline entry point: fetch, fan out, consolidate, persist.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument};

use crate::attachments::AttachmentSource;
use crate::error::{PipelineError, Result};
use crate::normalize::sanitize_filename;
use crate::traits::{AttachmentStore, DocumentExtractor};
use crate::types::{CanonicalRecord, ExtractionTask, PipelineConfig, TaskResultSet};

use super::consolidate::consolidate;
use super::instructions::{FINANCIAL_INSTRUCTION, POLICY_TASKS};
use super::orchestrate::run_tasks;

/// The extraction pipeline for one request.
///
/// Generic over the attachment store and the extraction service, so tests
/// run the full pipeline against in-memory fakes.
pub struct Pipeline<S, E: ?Sized> {
    attachments: AttachmentSource<S>,
    extractor: Arc<E>,
    config: PipelineConfig,
}

impl<S, E> Pipeline<S, E>
where
    S: AttachmentStore,
    E: DocumentExtractor + ?Sized,
{
    /// Build a pipeline over a store and an extraction service.
    pub fn new(store: S, extractor: Arc<E>, config: PipelineConfig) -> Self {
        Self {
            attachments: AttachmentSource::new(store, config.max_fetch_attempts),
            extractor,
            config,
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// Fetches and classifies the request's attachments, fans the four
    /// policy tasks out over the bounded pool, runs the financial
    /// specification extraction, and consolidates everything into one
    /// canonical record. Per-task failures degrade their own section of the
    /// record; only missing documents or an exhausted attachment lookup end
    /// the run.
    #[instrument(skip(self))]
    pub async fn run(&self, request_id: i64) -> Result<CanonicalRecord> {
        let (policy, specification) = self.attachments.fetch_attachments(request_id).await?;

        let policy_found = policy.is_some();
        let specification_found = specification.is_some();
        let (Some(policy), Some(specification)) = (policy, specification) else {
            return Err(PipelineError::MissingDocuments {
                policy_found,
                specification_found,
            });
        };

        info!(
            policy = %policy.name,
            specification = %specification.name,
            "documents classified; starting extraction"
        );

        let tasks: Vec<ExtractionTask> = POLICY_TASKS
            .iter()
            .map(|(name, instruction)| {
                ExtractionTask::new(*name, policy.bytes.clone(), *instruction)
            })
            .collect();

        let policy_results: TaskResultSet =
            run_tasks(Arc::clone(&self.extractor), tasks, self.config.concurrency).await;

        info!(
            succeeded = policy_results.success_count(),
            failed = policy_results.failure_count(),
            "policy tasks finished"
        );

        let financial = self
            .extractor
            .extract(&specification.bytes, FINANCIAL_INSTRUCTION)
            .await;

        let record = consolidate(&policy_results, &financial, &policy.name);

        info!(run_id = %record.header.metadata.run_id, "record consolidated");
        Ok(record)
    }
}

/// Write a consolidated record to `dir` as pretty-printed JSON.
///
/// The file is named after the sanitized source filename with the run id
/// appended, so repeated runs over the same document never collide.
pub fn write_record(record: &CanonicalRecord, dir: &Path) -> Result<PathBuf> {
    let stem = sanitize_filename(&record.header.metadata.source_file);
    let stem = stem.strip_suffix(".PDF").or(stem.strip_suffix(".pdf")).unwrap_or(&stem);

    let path = dir.join(format!("{}_{}.json", stem, record.header.metadata.run_id));
    let json = serde_json::to_vec_pretty(record)?;

    std::fs::write(&path, json).map_err(PipelineError::Persist)?;

    info!(path = %path.display(), "record written");
    Ok(path)
}
