//! The `KeyValueStorage` trait and an in-memory implementation.
//!
//! The persistence adapter only needs durable string storage with get/set
//! semantics. Concrete transports (e.g. `jobtrack-store-sqlite`) implement
//! this trait; the core never depends on them.

use std::collections::HashMap;

use crate::{Error, Result};

/// Durable key-value string storage.
pub trait KeyValueStorage {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return the value stored under `key`, or `None` if nothing is.
  fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

  /// Store `value` under `key`, replacing any previous value.
  fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

  /// Remove `key`. Removing a missing key is not an error.
  fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
}

// ─── MemoryStorage ───────────────────────────────────────────────────────────

/// A `HashMap`-backed store. Nothing survives the process; useful for tests
/// and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  entries:     HashMap<String, String>,
  fail_reads:  bool,
  fail_writes: bool,
}

impl MemoryStorage {
  pub fn new() -> Self { Self::default() }

  /// Seed an entry, e.g. to simulate state left by an earlier session.
  pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.entries.insert(key.into(), value.into());
    self
  }

  /// Make every subsequent `set` and `remove` fail, as a full or read-only
  /// backing store would.
  pub fn set_fail_writes(&mut self, fail: bool) { self.fail_writes = fail; }

  /// Make every subsequent `get` fail, as a locked or unreachable backing
  /// store would.
  pub fn set_fail_reads(&mut self, fail: bool) { self.fail_reads = fail; }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  fn check_writable(&self) -> Result<()> {
    if self.fail_writes {
      return Err(Error::StorageUnavailable("storage quota exceeded".into()));
    }
    Ok(())
  }
}

impl KeyValueStorage for MemoryStorage {
  type Error = Error;

  fn get(&self, key: &str) -> Result<Option<String>> {
    if self.fail_reads {
      return Err(Error::StorageUnavailable("storage is locked".into()));
    }
    Ok(self.entries.get(key).cloned())
  }

  fn set(&mut self, key: &str, value: &str) -> Result<()> {
    self.check_writable()?;
    self.entries.insert(key.to_owned(), value.to_owned());
    Ok(())
  }

  fn remove(&mut self, key: &str) -> Result<()> {
    self.check_writable()?;
    self.entries.remove(key);
    Ok(())
  }
}
