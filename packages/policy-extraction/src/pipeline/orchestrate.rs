//! Task orchestration: bounded fan-out, fan-in keyed by task name.

use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::traits::DocumentExtractor;
use crate::types::{ExtractionResult, ExtractionTask, TaskResultSet};

/// Run a batch of extraction tasks with bounded concurrency.
///
/// Fan-out is limited by a fixed pool of `concurrency` permits; fan-in
/// waits for *every* task, success or failure, before returning, gated on
/// the slowest one. A failing task only produces a `Failure` entry for its
/// own name; siblings are never cancelled and nothing is raised. There is
/// no completion-order guarantee: results are keyed by task name and
/// collected from the joined futures, so no shared mutable map exists.
pub async fn run_tasks<E>(
    extractor: Arc<E>,
    tasks: Vec<ExtractionTask>,
    concurrency: usize,
) -> TaskResultSet
where
    E: DocumentExtractor + ?Sized,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    let futures = tasks.into_iter().map(|task| {
        let extractor = Arc::clone(&extractor);
        let semaphore = Arc::clone(&semaphore);

        async move {
            // The semaphore is never closed.
            let _permit = semaphore.acquire().await.unwrap();

            let result = extractor.extract(&task.document, &task.instruction).await;

            match &result {
                ExtractionResult::Success(_) => {
                    info!(task = %task.name, "task completed");
                }
                ExtractionResult::Failure(failure) => {
                    error!(
                        task = %task.name,
                        kind = %failure.kind,
                        message = %failure.message,
                        "task failed"
                    );
                }
            }

            (task.name, result)
        }
    });

    join_all(futures).await.into_iter().collect()
}
