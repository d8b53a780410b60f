//! Availability-aware adapter over a persistent key-value backend.
//!
//! [`LocalStore::read`] never fails: a missing, unreadable or corrupt value
//! reads as an empty collection so a damaged local cache cannot block the
//! caller. [`LocalStore::try_read`] reports the same conditions for callers
//! that must tell "empty" apart from "could not load". Writes do fail and the
//! caller decides what to surface.

use crate::core::db::Database;
use crate::core::db::error::DatabaseError;
use crate::types::{Config, StorageKey};
use error::{BackendError, StoreError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::warn;

pub mod error {
    use crate::core::db::error::DatabaseError;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum BackendError {
        #[error("Database error: {0}")]
        Database(#[from] DatabaseError),

        #[error("quota exceeded: {size} bytes exceeds {max} bytes")]
        QuotaExceeded { size: u64, max: u64 },

        #[error("storage unavailable: {0}")]
        Unavailable(String),
    }

    #[derive(Debug, Error)]
    pub enum StoreError {
        #[error("Backend error: {0}")]
        Backend(#[from] BackendError),

        #[error("Serialize error: {0}")]
        Serialize(#[from] serde_json::Error),

        #[error("Corrupt stored value: {0}")]
        Corrupt(#[source] serde_json::Error),
    }
}

/// Raw string storage keyed by [`StorageKey`].
pub trait KvBackend {
    fn get(&self, key: &StorageKey) -> Result<Option<String>, BackendError>;
    fn set(&mut self, key: &StorageKey, value: &str) -> Result<(), BackendError>;
    fn remove(&mut self, key: &StorageKey) -> Result<(), BackendError>;
}

pub struct LocalStore {
    backend: Box<dyn KvBackend>,
    quota_bytes: u64,
}

impl LocalStore {
    pub fn new(backend: impl KvBackend + 'static, quota_bytes: u64) -> Self {
        Self {
            backend: Box::new(backend),
            quota_bytes,
        }
    }

    /// Opens the redb-backed store in the configured data directory.
    pub fn open(config: &Config, quota_bytes: u64) -> Result<Self, DatabaseError> {
        Ok(Self::new(Database::new(config)?, quota_bytes))
    }

    /// Probes the backend by writing and removing a sentinel key.
    pub fn is_available(&mut self) -> bool {
        let probe = StorageKey::probe();
        let outcome = self
            .backend
            .set(&probe, StorageKey::PROBE)
            .and_then(|()| self.backend.remove(&probe));

        match outcome {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "local storage is not available");
                false
            }
        }
    }

    /// Reads the collection stored under `key`; absent or unparsable data reads as empty.
    pub fn read<T: DeserializeOwned>(&self, key: &StorageKey) -> Vec<T> {
        self.try_read(key).unwrap_or_else(|e| {
            warn!(key = %key, error = %e, "failed to read local storage, treating as empty");
            Vec::new()
        })
    }

    /// Reads the collection stored under `key`. An absent key is an empty collection.
    pub fn try_read<T: DeserializeOwned>(&self, key: &StorageKey) -> Result<Vec<T>, StoreError> {
        match self.backend.get(key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(StoreError::Corrupt),
            None => Ok(Vec::new()),
        }
    }

    /// Serializes the full collection and overwrites the value under `key`.
    pub fn write<T: Serialize>(&mut self, key: &StorageKey, collection: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_string(collection)?;

        let size = json.len() as u64;
        if size > self.quota_bytes {
            return Err(BackendError::QuotaExceeded {
                size,
                max: self.quota_bytes,
            }
            .into());
        }

        self.backend.set(key, &json)?;
        Ok(())
    }

    /// Removes `key` entirely.
    pub fn clear(&mut self, key: &StorageKey) -> Result<(), StoreError> {
        self.backend.remove(key)?;
        Ok(())
    }
}

/// In-process backend. Clones share the same entries, like two tabs of one origin.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Rc<RefCell<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    entries: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that rejects every operation, like storage disabled by the browser.
    pub fn unavailable() -> Self {
        let backend = Self::default();
        backend.set_available(false);
        backend
    }

    pub fn set_available(&self, available: bool) {
        self.state.borrow_mut().unavailable = !available;
    }

    /// Stores a raw value, bypassing serialization.
    pub fn insert_raw(&self, key: &StorageKey, value: &str) {
        self.state
            .borrow_mut()
            .entries
            .insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &StorageKey) -> Option<String> {
        self.state.borrow().entries.get(key.as_str()).cloned()
    }

    fn check_available(&self) -> Result<(), BackendError> {
        if self.state.borrow().unavailable {
            Err(BackendError::Unavailable("storage is disabled".to_string()))
        } else {
            Ok(())
        }
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &StorageKey) -> Result<Option<String>, BackendError> {
        self.check_available()?;
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &StorageKey, value: &str) -> Result<(), BackendError> {
        self.check_available()?;
        self.insert_raw(key, value);
        Ok(())
    }

    fn remove(&mut self, key: &StorageKey) -> Result<(), BackendError> {
        self.check_available()?;
        self.state.borrow_mut().entries.remove(key.as_str());
        Ok(())
    }
}
