//! File-based batch storage.

use super::{BatchStore, StorageError, StorageResult};
use crate::events::Batch;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const STREAM_EXTENSION: &str = "jsonl";

/// File-based storage.
///
/// Each stream is a JSON-lines file in the base directory holding one batch
/// per line in the wire format.
#[derive(Debug, Clone)]
pub struct FileBatchStore {
    /// Base directory for stream files.
    base_path: PathBuf,
}

impl FileBatchStore {
    /// Create a file store with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/inkrelay/streams/`
    /// On Windows: `%LOCALAPPDATA%\inkrelay\streams\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("inkrelay").join("streams"))
    }

    /// Get the file path for a stream name.
    fn stream_path(&self, stream: &str) -> PathBuf {
        let safe_name: String = stream
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.{}", safe_name, STREAM_EXTENSION))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl BatchStore for FileBatchStore {
    fn append(&self, stream: &str, batch: &Batch) -> StorageResult<()> {
        let path = self.stream_path(stream);
        let line = batch
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StorageError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
        writeln!(file, "{}", line)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn load(&self, stream: &str) -> StorageResult<Vec<Batch>> {
        let path = self.stream_path(stream);
        if !path.exists() {
            return Err(StorageError::NotFound(stream.to_string()));
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        let mut batches = Vec::new();
        for (number, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match Batch::from_json(line) {
                Ok(batch) => batches.push(batch),
                Err(e) => log::warn!("Skipping line {} of {}: {}", number + 1, path.display(), e),
            }
        }
        Ok(batches)
    }

    fn delete(&self, stream: &str) -> StorageResult<()> {
        let path = self.stream_path(stream);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

        let mut names = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == STREAM_EXTENSION) {
                if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn exists(&self, stream: &str) -> StorageResult<bool> {
        Ok(self.stream_path(stream).exists())
    }
}
