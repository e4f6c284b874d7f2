//! Durable local key-value store
//!
//! A single string table backed by redb. It plays the role browser
//! local storage plays for the directory front-end: the flag set and the
//! cached session survive restarts, everything else is ephemeral.
//!
//! # Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `flaggedEmployees` | JSON array of employee ids |
//! | `authToken` | opaque bearer token |
//! | `authUser` | JSON user descriptor |

pub mod flags;
pub mod session;

pub use flags::FlagStore;
pub use session::{SessionStore, StoredSession};

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, TableDefinition};
use thiserror::Error;

/// Single key-value table: key = storage key, value = string payload
const KV_TABLE: TableDefinition<&str, &str> = TableDefinition::new("kv");

/// Storage key for the flagged employee id set
pub const FLAGGED_EMPLOYEES_KEY: &str = "flaggedEmployees";

/// Storage key for the session token
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Storage key for the session user descriptor
pub const AUTH_USER_KEY: &str = "authUser";

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Local store backed by redb
///
/// Reads and writes are synchronous; concurrent processes sharing the file
/// are last-writer-wins, the same contract the browser store gives.
#[derive(Clone)]
pub struct LocalStore {
    db: Arc<Database>,
}

impl LocalStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(KV_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(KV_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Read the string stored under a key
    pub fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    /// Write a string under a key
    pub fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(KV_TABLE)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Remove a key; removing an absent key is a no-op
    pub fn remove(&self, key: &str) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(KV_TABLE)?;
            table.remove(key)?;
        }
        txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_round_trip() {
        let store = LocalStore::open_in_memory().unwrap();

        assert_eq!(store.get("missing").unwrap(), None);

        store.set("k", "v1").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v1"));

        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);

        // Removing again is fine
        store.remove("k").unwrap();
    }
}
