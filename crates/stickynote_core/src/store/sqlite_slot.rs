//! SQLite-backed storage slot for native hosts.
//!
//! # Responsibility
//! - Emulate a browser `localStorage` origin with one `kv_slots` table.
//!
//! # Invariants
//! - Each write replaces the whole value for its key (`INSERT OR REPLACE`).
//! - The connection must be opened through `db::open_db*` so the table exists.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::store::slot::{SlotError, SlotResult, StorageSlot};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Key-value slot stored in a migrated SQLite database.
pub struct SqliteSlot {
    conn: Connection,
}

impl SqliteSlot {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        open_db(path).map(Self::new)
    }

    /// Opens (and migrates) a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        open_db_in_memory().map(Self::new)
    }
}

impl StorageSlot for SqliteSlot {
    fn get_item(&self, key: &str) -> SlotResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|err| SlotError::backend("get_item", key, err.to_string()))
    }

    fn set_item(&self, key: &str, value: &str) -> SlotResult<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv_slots (key, value, updated_at)
                 VALUES (?1, ?2, (strftime('%s', 'now') * 1000));",
                params![key, value],
            )
            .map(|_| ())
            .map_err(|err| SlotError::backend("set_item", key, err.to_string()))
    }

    fn remove_item(&self, key: &str) -> SlotResult<()> {
        self.conn
            .execute("DELETE FROM kv_slots WHERE key = ?1;", [key])
            .map(|_| ())
            .map_err(|err| SlotError::backend("remove_item", key, err.to_string()))
    }
}
