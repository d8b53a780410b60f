//! Newest-first log of contact messages under one namespaced key.
//!
//! `append` is a read-modify-write across two backend transactions. Two
//! processes sharing a backend race on it and the last writer wins.

use crate::core::local_store::LocalStore;
use crate::core::local_store::error::StoreError;
use crate::types::{ContactMessage, StorageKey};
use tracing::info;

pub struct MessageStore {
    local: LocalStore,
    key: StorageKey,
}

impl MessageStore {
    pub fn new(local: LocalStore, key: StorageKey) -> Self {
        Self { local, key }
    }

    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    /// Probes the underlying local store.
    pub fn is_available(&mut self) -> bool {
        self.local.is_available()
    }

    /// Prepends `message` and writes back the whole collection.
    pub fn append(&mut self, message: ContactMessage) -> Result<(), StoreError> {
        let mut messages = self.list_all();
        messages.insert(0, message);
        self.local.write(&self.key, &messages)?;

        info!(count = messages.len(), "message appended");
        Ok(())
    }

    /// Current collection, newest first.
    pub fn list_all(&self) -> Vec<ContactMessage> {
        self.local.read(&self.key)
    }

    /// Current collection, or why it could not be loaded.
    pub fn try_list_all(&self) -> Result<Vec<ContactMessage>, StoreError> {
        self.local.try_read(&self.key)
    }

    /// Removes every message in one operation.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.local.clear(&self.key)?;
        info!("all messages cleared");
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.list_all().len()
    }
}

#[cfg(test)]
mod tests;
