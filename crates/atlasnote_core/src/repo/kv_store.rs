//! Key-value storage contract and implementations.
//!
//! # Responsibility
//! - Provide durable get/set of serialized blobs under fixed keys.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `set` fully replaces the stored value for a key.
//! - `get` returns `None` for keys that were never written.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key for the serialized notes collection.
pub const NOTES_KEY: &str = "atlas-notes";
/// Storage key for the serialized UI metadata record.
pub const META_KEY: &str = "atlas-meta";
/// Storage key for the serialized user session record.
pub const USER_KEY: &str = "atlas-user";

pub type KvResult<T> = Result<T, KvError>;

/// Adapter-level storage error.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable key-value storage of serialized records.
pub trait KvStore {
    /// Returns the stored blob for `key`, or `None` when absent.
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    /// Replaces the stored blob for `key`.
    fn set(&mut self, key: &str, value: &str) -> KvResult<()>;
}

/// SQLite-backed storage over the migrated `kv` table.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Constructs storage from a migrated/ready connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl KvStore for SqliteKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory storage for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: BTreeMap<String, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KvStore, MemoryKvStore, SqliteKvStore, NOTES_KEY};
    use crate::db::open_db_in_memory;

    #[test]
    fn sqlite_get_returns_none_for_unwritten_key() {
        let store = SqliteKvStore::new(open_db_in_memory().unwrap());
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn sqlite_set_replaces_previous_value() {
        let mut store = SqliteKvStore::new(open_db_in_memory().unwrap());
        store.set(NOTES_KEY, "[]").unwrap();
        store.set(NOTES_KEY, "[1]").unwrap();
        assert_eq!(store.get(NOTES_KEY).unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryKvStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
