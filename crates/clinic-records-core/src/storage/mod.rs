//! Durable key-value slots backing the record store.
//!
//! The store writes whole documents (one JSON text per slot), so the
//! backend only needs string get/set/remove.

mod memory;
mod schema;
mod sqlite;

pub use memory::*;
pub use schema::*;
pub use sqlite::*;

use thiserror::Error;

/// Storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A durable string-keyed slot store.
pub trait KeyValueStore {
    /// Read a slot; `None` when the key was never written or was removed.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a slot, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a slot. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Total size of all slots (keys plus values) in bytes.
    fn usage_bytes(&self) -> StorageResult<u64>;
}
