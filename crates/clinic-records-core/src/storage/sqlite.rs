//! SQLite-backed slot storage.

use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use super::{KeyValueStore, StorageResult, SCHEMA};

/// Slot storage in a single SQLite table.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open the slot file at `path`; a new file starts with no slots.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        Self::with_slot_table(Connection::open(path)?)
    }

    /// Slots that vanish with the connection, for tests and scratch stores.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::with_slot_table(Connection::open_in_memory()?)
    }

    fn with_slot_table(conn: Connection) -> StorageResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv_slots WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO kv_slots (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            [key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.conn.execute("DELETE FROM kv_slots WHERE key = ?", [key])?;
        Ok(())
    }

    fn usage_bytes(&self) -> StorageResult<u64> {
        let bytes: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0) FROM kv_slots",
            [],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(bytes).unwrap_or(0))
    }
}
