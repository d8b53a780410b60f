//! Database layer for the local key-value store.
//!
//! One redb table maps a namespaced key to a JSON string, mirroring the
//! browser's per-origin `localStorage`.

use crate::core::db::error::DatabaseError;
use crate::core::local_store::KvBackend;
use crate::core::local_store::error::BackendError;
use crate::types::{Config, StorageKey};
use redb::{ReadableDatabase, ReadableTable, TableDefinition};

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum DatabaseError {
        #[error("Database error: {0}")]
        Redb(#[from] redb::DatabaseError),

        #[error("Table error: {0}")]
        TableError(#[from] redb::TableError),

        #[error("Storage error: {0}")]
        StorageError(#[from] redb::StorageError),

        #[error("Transaction error: {0}")]
        TransactionError(#[from] redb::TransactionError),

        #[error("Commit error: {0}")]
        CommitError(#[from] redb::CommitError),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
    }
}

/// Local storage table: namespaced key → JSON string
const LOCAL_STORAGE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("local_storage");

/// The database struct wrapping redb.
pub struct Database {
    db: redb::Database,
}

impl Database {
    /// Creates or opens the database at the path given by the config.
    pub fn new(config: &Config) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(&config.base_path)?;

        let db = redb::Database::create(config.db_path())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    pub fn get(&self, key: &StorageKey) -> Result<Option<String>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LOCAL_STORAGE_TABLE)?;

        Ok(table.get(key.as_str())?.map(|guard| guard.value().to_string()))
    }

    /// Overwrites the value for `key` in a single transaction.
    pub fn set(&mut self, key: &StorageKey, value: &str) -> Result<(), DatabaseError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
            table.insert(key.as_str(), value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Removes `key`. Removing a missing key is not an error.
    pub fn remove(&mut self, key: &StorageKey) -> Result<(), DatabaseError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
            table.remove(key.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl KvBackend for Database {
    fn get(&self, key: &StorageKey) -> Result<Option<String>, BackendError> {
        Ok(Database::get(self, key)?)
    }

    fn set(&mut self, key: &StorageKey, value: &str) -> Result<(), BackendError> {
        Ok(Database::set(self, key, value)?)
    }

    fn remove(&mut self, key: &StorageKey) -> Result<(), BackendError> {
        Ok(Database::remove(self, key)?)
    }
}
