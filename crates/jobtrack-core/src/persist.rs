//! Persistence adapter: round-trips the application collection through a
//! [`KeyValueStorage`] under a fixed key.
//!
//! Stored layout:
//!
//! ```json
//! {"state":{"applications":[ ... ]},"version":0}
//! ```
//!
//! Only `applications` is written. Unknown fields in a stored value are
//! ignored, so blobs that also carry filter state still load. Every save
//! rewrites the whole collection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result, application::JobApplication, storage::KeyValueStorage};

/// Storage key the collection lives under.
pub const STORAGE_KEY: &str = "job-applications";

const STATE_VERSION: u32 = 0;

// ─── Wire shape ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct EnvelopeOut<'a> {
  state:   StateOut<'a>,
  version: u32,
}

#[derive(Serialize)]
struct StateOut<'a> {
  applications: &'a [JobApplication],
}

#[derive(Deserialize)]
struct EnvelopeIn {
  state:   StateIn,
  #[serde(default)]
  version: u32,
}

#[derive(Deserialize)]
struct StateIn {
  applications: Vec<JobApplication>,
}

/// Serialise `apps` into the stored JSON layout.
pub fn encode_state(apps: &[JobApplication]) -> Result<String> {
  let envelope = EnvelopeOut {
    state:   StateOut { applications: apps },
    version: STATE_VERSION,
  };
  Ok(serde_json::to_string(&envelope)?)
}

/// Parse a stored value and check it has the expected shape.
///
/// Fails on invalid JSON, on a missing or mistyped field, on an unsupported
/// version, and on duplicate ids.
pub fn decode_state(raw: &str) -> Result<Vec<JobApplication>> {
  let envelope: EnvelopeIn = serde_json::from_str(raw)?;
  if envelope.version != STATE_VERSION {
    return Err(Error::UnsupportedVersion {
      found:    envelope.version,
      expected: STATE_VERSION,
    });
  }

  let apps = envelope.state.applications;
  let mut seen = HashSet::with_capacity(apps.len());
  for app in &apps {
    if !seen.insert(app.id) {
      return Err(Error::DuplicateId(app.id));
    }
  }
  Ok(apps)
}

// ─── Persistence ─────────────────────────────────────────────────────────────

/// Loads and saves the collection through a storage backend.
#[derive(Debug)]
pub struct Persistence<S> {
  storage: S,
}

impl<S: KeyValueStorage> Persistence<S> {
  /// Persist under [`STORAGE_KEY`].
  pub fn new(storage: S) -> Self { Self { storage } }

  pub fn storage(&self) -> &S { &self.storage }

  pub fn into_storage(self) -> S { self.storage }

  /// Load the stored collection.
  ///
  /// Returns an empty collection when nothing is stored or the stored value
  /// cannot be used; the cause is logged, never returned. Callers that
  /// write back afterwards should use [`try_load`](Self::try_load) and
  /// tell a failed read apart from a rejected value.
  pub fn load(&self) -> Vec<JobApplication> {
    match self.try_load() {
      Ok(apps) => apps,
      Err(e) => {
        warn!(key = STORAGE_KEY, error = %e, "stored applications unreadable; starting empty");
        Vec::new()
      }
    }
  }

  /// Like [`load`](Self::load), but reports why the stored value was
  /// rejected.
  pub fn try_load(&self) -> Result<Vec<JobApplication>> {
    let raw = self
      .storage
      .get(STORAGE_KEY)
      .map_err(|e| Error::Storage(Box::new(e)))?;
    match raw {
      Some(raw) => {
        let apps = decode_state(&raw)?;
        debug!(key = STORAGE_KEY, count = apps.len(), "loaded applications");
        Ok(apps)
      }
      None => Ok(Vec::new()),
    }
  }

  /// Replace the stored value with the full collection.
  pub fn save(&mut self, apps: &[JobApplication]) -> Result<()> {
    let raw = encode_state(apps)?;
    self
      .storage
      .set(STORAGE_KEY, &raw)
      .map_err(|e| Error::Storage(Box::new(e)))?;
    debug!(key = STORAGE_KEY, count = apps.len(), bytes = raw.len(), "saved applications");
    Ok(())
  }

  /// Drop the stored value entirely.
  pub fn clear(&mut self) -> Result<()> {
    self
      .storage
      .remove(STORAGE_KEY)
      .map_err(|e| Error::Storage(Box::new(e)))
  }
}
