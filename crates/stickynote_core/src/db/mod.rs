//! SQLite bootstrap and schema versioning for native hosts.
//!
//! # Responsibility
//! - Open and configure SQLite connections backing `SqliteSlot`.
//! - Bring the schema up to `SCHEMA_STEPS` in one transaction.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`; step `n` yields version `n`.
//! - A database newer than this binary is refused, never downgraded.

use rusqlite::Connection;
use thiserror::Error;

mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Ordered schema steps; index `i` upgrades version `i` to `i + 1`.
const SCHEMA_STEPS: &[&str] = &[include_str!("0001_kv_slots.sql")];

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

/// Schema version this binary writes.
pub fn latest_schema_version() -> u32 {
    SCHEMA_STEPS.len() as u32
}

/// Schema version recorded in the database.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Applies the steps missing from `conn`. Returns how many ran.
fn upgrade_schema(conn: &mut Connection) -> DbResult<u32> {
    let from = schema_version(conn)?;
    let latest = latest_schema_version();
    if from > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: latest,
        });
    }

    let pending = &SCHEMA_STEPS[from as usize..];
    if pending.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for sql in pending {
        tx.execute_batch(sql)?;
    }
    tx.pragma_update(None, "user_version", latest)?;
    tx.commit()?;
    Ok(latest - from)
}
