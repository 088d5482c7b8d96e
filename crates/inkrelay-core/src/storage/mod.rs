//! Persistence for batch streams.
//!
//! A stream is the ordered sequence of batches delivered by one capture
//! instance. Batches are stored in the wire format and loaded back in the
//! order they were appended.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryBatchStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileBatchStore;

use crate::events::Batch;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Stream not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for batch stream storage backends.
pub trait BatchStore {
    /// Append a batch to the end of a stream, creating the stream if needed.
    fn append(&self, stream: &str, batch: &Batch) -> StorageResult<()>;

    /// Load every batch of a stream, in append order.
    fn load(&self, stream: &str) -> StorageResult<Vec<Batch>>;

    /// Delete a stream. Deleting a missing stream is not an error.
    fn delete(&self, stream: &str) -> StorageResult<()>;

    /// List all stream names.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a stream exists.
    fn exists(&self, stream: &str) -> StorageResult<bool>;
}
