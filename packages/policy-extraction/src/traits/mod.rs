//! Core trait abstractions (DocumentExtractor, AttachmentStore).

pub mod extractor;
pub mod store;

pub use extractor::DocumentExtractor;
pub use store::{AttachmentRow, AttachmentStore};
