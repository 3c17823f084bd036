//! Raw byte backends for the document store.
//!
//! `FileBackend` writes each document to a sibling temp file and renames it
//! over the target, so readers only ever see a complete file.

use super::{ResourceKey, StoreError, StoreResult};
use crate::config::StoreConfig;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;
use uuid::Uuid;

/// Byte-level read/replace contract for one document per resource key.
///
/// Implementations do not need their own locking for transactions; the
/// store serializes access per key.
pub trait DocumentBackend: Send + Sync {
    /// Returns `None` when the document does not exist yet.
    fn read(&self, key: ResourceKey) -> StoreResult<Option<Vec<u8>>>;
    /// Replaces the whole document.
    fn write(&self, key: ResourceKey, bytes: &[u8]) -> StoreResult<()>;
}

/// One JSON file per resource inside the configured data directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    config: StoreConfig,
}

impl FileBackend {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl DocumentBackend for FileBackend {
    fn read(&self, key: ResourceKey) -> StoreResult<Option<Vec<u8>>> {
        let path = self.config.path_for(key);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn write(&self, key: ResourceKey, bytes: &[u8]) -> StoreResult<()> {
        let path = self.config.path_for(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let temp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        if let Err(source) = std::fs::write(&temp_path, bytes) {
            remove_quietly(&temp_path);
            return Err(StoreError::Io {
                path: temp_path,
                source,
            });
        }
        std::fs::rename(&temp_path, &path).map_err(|source| {
            remove_quietly(&temp_path);
            StoreError::Io {
                path: path.clone(),
                source,
            }
        })
    }
}

fn remove_quietly(path: &Path) {
    let _ = std::fs::remove_file(path);
}

/// Process-local backend used by tests and embedders without a disk.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: Mutex<HashMap<ResourceKey, Vec<u8>>>,
}

impl MemoryBackend {
    /// Seeds raw bytes for `key`, e.g. to simulate a corrupt file.
    pub fn with_raw(self, key: ResourceKey, bytes: impl Into<Vec<u8>>) -> Self {
        self.documents.lock().insert(key, bytes.into());
        self
    }

    /// Returns the raw bytes last written for `key`.
    pub fn raw(&self, key: ResourceKey) -> Option<Vec<u8>> {
        self.documents.lock().get(&key).cloned()
    }
}

impl DocumentBackend for MemoryBackend {
    fn read(&self, key: ResourceKey) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.raw(key))
    }

    fn write(&self, key: ResourceKey, bytes: &[u8]) -> StoreResult<()> {
        self.documents.lock().insert(key, bytes.to_vec());
        Ok(())
    }
}
