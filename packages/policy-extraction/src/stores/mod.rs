//! Attachment store implementations.

pub mod memory;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::MemoryAttachmentStore;

#[cfg(feature = "postgres")]
pub use postgres::PostgresAttachmentStore;
