//! JSON document store with per-resource exclusive transactions.
//!
//! # Responsibility
//! - Load and fully replace one JSON document per resource kind.
//! - Serialize every load-mutate-replace cycle on the same resource key.
//! - Own the lenient-recovery policy for absent or corrupt documents.
//!
//! # Invariants
//! - For one key, transactions are strictly serialized: the lock is held
//!   across both the read and the write of a transaction.
//! - Absent, malformed, or wrongly shaped documents load as the empty
//!   default and are never surfaced as errors.
//! - A failed mutation never reaches the backend, so persisted state is
//!   untouched.

mod backend;

pub use backend::{DocumentBackend, FileBackend, MemoryBackend};

use crate::config::StoreConfig;
use log::{debug, error, info, warn};
use parking_lot::{Mutex, MutexGuard};
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Identifies the document a transaction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKey {
    Events,
    Notes,
    Chat,
    ActionItems,
}

impl ResourceKey {
    pub const ALL: [ResourceKey; 4] = [
        ResourceKey::Events,
        ResourceKey::Notes,
        ResourceKey::Chat,
        ResourceKey::ActionItems,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Notes => "notes",
            Self::Chat => "chat",
            Self::ActionItems => "action_items",
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::Events => 0,
            Self::Notes => 1,
            Self::Chat => 2,
            Self::ActionItems => 3,
        }
    }
}

impl Display for ResourceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage transport failures. Corrupt content is not one of them.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode {
        key: ResourceKey,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Encode { key, source } => write!(f, "failed to encode {key} document: {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
        }
    }
}

/// A value persisted as the single JSON document of one resource kind.
pub trait Document: Serialize + Default {
    /// Resource the document lives under.
    const KEY: ResourceKey;

    /// Decodes a parsed JSON value, dropping entries that do not fit.
    ///
    /// Returns `None` when the top-level shape itself is wrong.
    fn from_lenient(value: Value) -> Option<Self>;
}

/// Transactional document store over a pluggable backend.
pub struct DocumentStore<B: DocumentBackend> {
    backend: B,
    locks: [Mutex<()>; 4],
}

impl DocumentStore<FileBackend> {
    /// Opens a file-backed store laid out by `config`.
    pub fn open(config: StoreConfig) -> Self {
        Self::new(FileBackend::new(config))
    }
}

impl DocumentStore<MemoryBackend> {
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default())
    }
}

impl<B: DocumentBackend> DocumentStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            locks: Default::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads the current document for `D::KEY`.
    pub fn load<D: Document>(&self) -> StoreResult<D> {
        let _guard = self.lock(D::KEY);
        self.load_locked()
    }

    /// Replaces the whole document for `D::KEY`.
    pub fn replace<D: Document>(&self, document: &D) -> StoreResult<()> {
        let _guard = self.lock(D::KEY);
        self.persist_locked(document)
    }

    /// Runs one load-mutate-replace transaction under the key's lock.
    ///
    /// The document is persisted only when `mutate` returns `Ok`.
    pub fn transact<D, T, E, F>(&self, mutate: F) -> Result<T, E>
    where
        D: Document,
        E: From<StoreError>,
        F: FnOnce(&mut D) -> Result<T, E>,
    {
        let started_at = Instant::now();
        let _guard = self.lock(D::KEY);
        let mut document = self.load_locked::<D>()?;
        let output = match mutate(&mut document) {
            Ok(output) => output,
            Err(err) => {
                debug!(
                    "event=store_transact module=store status=rejected key={} duration_ms={}",
                    D::KEY,
                    started_at.elapsed().as_millis()
                );
                return Err(err);
            }
        };
        self.persist_locked(&document)?;
        debug!(
            "event=store_transact module=store status=ok key={} duration_ms={}",
            D::KEY,
            started_at.elapsed().as_millis()
        );
        Ok(output)
    }

    fn lock(&self, key: ResourceKey) -> MutexGuard<'_, ()> {
        self.locks[key.slot()].lock()
    }

    fn load_locked<D: Document>(&self) -> StoreResult<D> {
        let key = D::KEY;
        let Some(raw) = self.backend.read(key)? else {
            let document = D::default();
            self.persist_locked(&document)?;
            info!("event=document_init module=store status=ok key={key}");
            return Ok(document);
        };
        Ok(decode_or_default(key, &raw))
    }

    fn persist_locked<D: Document>(&self, document: &D) -> StoreResult<()> {
        let key = D::KEY;
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|source| StoreError::Encode { key, source })?;
        if let Err(err) = self.backend.write(key, &bytes) {
            error!("event=document_write module=store status=error key={key} error={err}");
            return Err(err);
        }
        Ok(())
    }
}

/// Single home of the lenient-recovery policy.
fn decode_or_default<D: Document>(key: ResourceKey, raw: &[u8]) -> D {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return D::default();
    }
    let value = match serde_json::from_slice::<Value>(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                "event=document_recover module=store status=fallback key={key} reason=malformed_json error={err}"
            );
            return D::default();
        }
    };
    match D::from_lenient(value) {
        Some(document) => document,
        None => {
            warn!(
                "event=document_recover module=store status=fallback key={key} reason=wrong_shape"
            );
            D::default()
        }
    }
}
