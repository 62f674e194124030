//! # Snapshot Persistence
//!
//! The pluggable on-device persistence boundary.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     SnapshotStore Boundary                              │
//! │                                                                         │
//! │  Shop (in-memory state)                                                │
//! │       │                         ▲                                       │
//! │       │ save(key, bytes)        │ load(key) -> Option<bytes>            │
//! │       ▼                         │                                       │
//! │  ┌─────────────────────────────────────────────┐                       │
//! │  │  SnapshotStore (trait)                      │                       │
//! │  │   ├── FileStore: one file per key on disk   │                       │
//! │  │   └── MemoryStore: HashMap, optional quota  │                       │
//! │  └─────────────────────────────────────────────┘                       │
//! │                                                                         │
//! │  Save may fail with QuotaExceeded → surfaced to the user, never        │
//! │  treated as loss of the in-memory state.                               │
//! │  Load tolerates absent data → caller falls back to an empty shop.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core consumes these as plain values once available and performs no
//! other I/O of its own; which backend a deployment uses is configuration,
//! not business logic.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Trait
// =============================================================================

/// Byte-snapshot persistence collaborator.
pub trait SnapshotStore {
    /// Loads the bytes stored under `key`, or `None` when nothing is there.
    fn load(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Stores `bytes` under `key`, replacing any previous value.
    ///
    /// Fails with [`StoreError::QuotaExceeded`] when the backend is out of
    /// room; callers surface that to the user and keep the in-memory state.
    fn save(&self, key: &str, bytes: &[u8]) -> StoreResult<()>;
}

// =============================================================================
// File Store
// =============================================================================

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a file store rooted at `dir`. The directory is created lazily
    /// on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => {
                debug!(key = %key, bytes = bytes.len(), "Loaded snapshot");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    fn save(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)?;

        match fs::write(self.path_for(key), bytes) {
            Ok(()) => {
                debug!(key = %key, bytes = bytes.len(), "Saved snapshot");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::StorageFull => Err(StoreError::QuotaExceeded {
                key: key.to_string(),
            }),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-memory backend for tests and ephemeral sessions.
///
/// ## Thread Safety
/// Guarded by a `Mutex` so `save` can take `&self` like the file backend;
/// operations are short and exclusive.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,

    /// Per-value size limit, for exercising the quota failure path.
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    /// Creates an unbounded in-memory store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store that rejects values larger than `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        MemoryStore {
            entries: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let entries = self.entries.lock().expect("snapshot store mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        if let Some(quota) = self.quota_bytes {
            if bytes.len() > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
        }

        let mut entries = self.entries.lock().expect("snapshot store mutex poisoned");
        entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
