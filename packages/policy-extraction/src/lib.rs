//! Policy extraction pipeline
//!
//! Turns a pair of scanned Brazilian insurance documents (the policy and
//! its co-insurance financial specification) into one consolidated,
//! normalized JSON record.
//!
//! The pipeline fetches the request's attachments from a store, classifies
//! the two source documents by filename, fans four extraction tasks out
//! over a bounded pool against an AI extraction service, runs the financial
//! specification extraction, and consolidates every payload into a
//! [`CanonicalRecord`] with uniformly formatted monetary values.
//!
//! Failures are isolated per task: a failed extraction degrades its own
//! section of the record to sentinel values and never aborts the run.
//!
//! # Example
//!
//! ```rust,ignore
//! use policy_extraction::{Pipeline, PipelineConfig};
//! use policy_extraction::ai::GeminiExtractor;
//! use policy_extraction::stores::PostgresAttachmentStore;
//! use std::sync::Arc;
//!
//! let config = PipelineConfig::default();
//! let store = PostgresAttachmentStore::connect(&database_url).await?;
//! let extractor = Arc::new(GeminiExtractor::from_env(&config)?);
//!
//! let pipeline = Pipeline::new(store, extractor, config);
//! let record = pipeline.run(request_id).await?;
//! ```

pub mod attachments;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod security;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;
pub mod validate;

#[cfg(feature = "gemini")]
pub mod ai;

pub use attachments::{AttachmentSource, NamedDocument};
pub use error::{FetchError, PipelineError, Result, StoreError};
pub use normalize::{digits_only, format_currency, sanitize_filename, MISSING_VALUE};
pub use pipeline::{consolidate, run_tasks, write_record, Pipeline};
pub use traits::{AttachmentRow, AttachmentStore, DocumentExtractor};
pub use types::{
    CanonicalRecord, ExtractionResult, ExtractionTask, FailureKind, PipelineConfig, TaskFailure,
    TaskResultSet,
};
