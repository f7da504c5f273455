//! Key-value backends for the persisted history list.
//!
//! The cache stores one opaque string; backends only move it around.

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub trait HistoryStorage: Send + Sync {
    /// Stored value, or `None` when nothing has been written yet
    fn read(&self) -> Result<Option<String>>;

    fn write(&self, value: &str) -> Result<()>;

    fn remove(&self) -> Result<()>;
}

/// JSON file on disk, shared by every process pointing at the same path
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStorage for FileStorage {
    fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", self.path.display())),
        }
    }

    fn write(&self, value: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        // Write beside the target and rename so readers never see half a file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, value)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }
}

/// Process-local storage, mostly for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStorage {
    value: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a pre-existing raw value
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl HistoryStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        let value = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("history storage lock poisoned"))?;
        Ok(value.clone())
    }

    fn write(&self, value: &str) -> Result<()> {
        let mut slot = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("history storage lock poisoned"))?;
        *slot = Some(value.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        let mut slot = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("history storage lock poisoned"))?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read().unwrap(), None);

        storage.write("[]").unwrap();
        assert_eq!(storage.read().unwrap(), Some("[]".to_string()));

        storage.remove().unwrap();
        assert_eq!(storage.read().unwrap(), None);
    }

    #[test]
    fn test_file_storage_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("history.json"));
        assert_eq!(storage.read().unwrap(), None);
        storage.remove().unwrap();
    }

    #[test]
    fn test_file_storage_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");
        let storage = FileStorage::new(&path);
        assert_eq!(storage.path(), path.as_path());

        storage.write("[1]").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[1]");
        assert_eq!(storage.read().unwrap(), Some("[1]".to_string()));

        storage.remove().unwrap();
        assert!(!path.exists());
    }
}
