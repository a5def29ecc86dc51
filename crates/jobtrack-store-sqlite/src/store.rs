//! [`SqliteStorage`]: the SQLite implementation of [`KeyValueStorage`].

use std::path::Path;

use chrono::Utc;
use jobtrack_core::KeyValueStorage;
use rusqlite::{Connection, OptionalExtension as _};
use tracing::debug;

use crate::{Error, Result, schema::SCHEMA};

/// Key-value storage in a single SQLite file.
pub struct SqliteStorage {
  conn: Connection,
}

impl SqliteStorage {
  /// Open (or create) the database at `path`, creating missing parent
  /// directories, and initialise the schema.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
        path: parent.to_path_buf(),
        source,
      })?;
    }
    let conn = Connection::open(path)?;
    debug!(path = %path.display(), "opened sqlite storage");
    Self::init(conn)
  }

  /// Open an in-memory database, mostly for tests.
  pub fn open_in_memory() -> Result<Self> { Self::init(Connection::open_in_memory()?) }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn })
  }

  /// All stored keys, sorted.
  pub fn keys(&self) -> Result<Vec<String>> {
    let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
    let rows = stmt.query_map([], |r| r.get(0))?;
    Ok(rows.collect::<rusqlite::Result<Vec<String>>>()?)
  }
}

impl KeyValueStorage for SqliteStorage {
  type Error = Error;

  fn get(&self, key: &str) -> Result<Option<String>> {
    let value = self
      .conn
      .query_row("SELECT value FROM kv WHERE key = ?1", [key], |r| r.get(0))
      .optional()?;
    Ok(value)
  }

  fn set(&mut self, key: &str, value: &str) -> Result<()> {
    self.conn.execute(
      "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
       ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
      rusqlite::params![key, value, Utc::now().to_rfc3339()],
    )?;
    Ok(())
  }

  fn remove(&mut self, key: &str) -> Result<()> {
    self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
    Ok(())
  }
}
