//! In-memory batch storage.

use super::{BatchStore, StorageError, StorageResult};
use crate::events::Batch;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryBatchStore {
    streams: RwLock<HashMap<String, Vec<Batch>>>,
}

impl MemoryBatchStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl BatchStore for MemoryBatchStore {
    fn append(&self, stream: &str, batch: &Batch) -> StorageResult<()> {
        let mut streams = self.streams.write().map_err(lock_error)?;
        streams.entry(stream.to_string()).or_default().push(batch.clone());
        Ok(())
    }

    fn load(&self, stream: &str) -> StorageResult<Vec<Batch>> {
        let streams = self.streams.read().map_err(lock_error)?;
        streams
            .get(stream)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(stream.to_string()))
    }

    fn delete(&self, stream: &str) -> StorageResult<()> {
        let mut streams = self.streams.write().map_err(lock_error)?;
        streams.remove(stream);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let streams = self.streams.read().map_err(lock_error)?;
        Ok(streams.keys().cloned().collect())
    }

    fn exists(&self, stream: &str) -> StorageResult<bool> {
        let streams = self.streams.read().map_err(lock_error)?;
        Ok(streams.contains_key(stream))
    }
}
