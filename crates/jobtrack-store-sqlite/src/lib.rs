//! SQLite-backed key-value storage for jobtrack.
//!
//! Implements [`jobtrack_core::KeyValueStorage`] over a single table, so the
//! application collection survives restarts in one local file.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStorage;
