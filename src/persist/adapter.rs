//! State store implementations
//!
//! File-based persistence with atomic writes, plus an in-memory store.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable key-value boundary for serialized state blobs.
///
/// Implementations must tolerate concurrent readers; mutating callers are
/// serialized by the owning ledger/store.
pub trait StateStore: Send + Sync + std::fmt::Debug {
    /// Load the blob stored under `key`, if any
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `blob` under `key`, replacing any previous value
    fn save(&self, key: &str, blob: &str) -> Result<()>;

    /// Remove the blob stored under `key`, if any
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed state store: one `<key>.json` file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory is created lazily on first save.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The directory holding the state files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| Error::Persistence {
            message: format!("Failed to read state file {}: {e}", path.display()),
        })?;
        Ok(Some(contents))
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| Error::Persistence {
            message: format!("Failed to create state dir {}: {e}", self.dir.display()),
        })?;

        // Write to temp file first, then rename for atomicity
        let path = self.blob_path(key);
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, blob).map_err(|e| Error::Persistence {
            message: format!("Failed to write state file {}: {e}", temp_path.display()),
        })?;

        std::fs::rename(&temp_path, &path).map_err(|e| Error::Persistence {
            message: format!("Failed to rename state file {}: {e}", path.display()),
        })?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(());
        }
        std::fs::remove_file(&path).map_err(|e| Error::Persistence {
            message: format!("Failed to remove state file {}: {e}", path.display()),
        })
    }
}

/// In-memory state store, for tests and ephemeral capture sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the store holds no blobs
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| Error::persistence("MemoryStore lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::persistence("MemoryStore lock poisoned"))?;
        entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::persistence("MemoryStore lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}
