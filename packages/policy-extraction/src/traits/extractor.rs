//! The extraction service seam.

use async_trait::async_trait;

use crate::types::ExtractionResult;

/// One document + one instruction in, a structured payload or recovered
/// failure out.
///
/// Implementations wrap a specific extraction service and own its per-call
/// timeout and validation. The handle is shared across the worker pool
/// (`Send + Sync`, no interior mutability required), so one instance serves
/// all concurrent tasks.
///
/// This never returns a Rust error: every failure mode (invalid document,
/// transport error, undecodable response) is recovered into
/// [`ExtractionResult::Failure`] so one task's failure cannot abort its
/// siblings.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Extract structured data from a document following an instruction.
    async fn extract(&self, document: &[u8], instruction: &str) -> ExtractionResult;
}
