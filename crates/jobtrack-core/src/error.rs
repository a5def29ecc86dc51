//! Error types for `jobtrack-core`.

use thiserror::Error;

use crate::application::ApplicationId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown application status: {0:?}")]
  UnknownStatus(String),

  #[error("unknown job type: {0:?}")]
  UnknownJobType(String),

  #[error("unknown job nature: {0:?}")]
  UnknownJobNature(String),

  #[error("unknown sort option: {0:?}")]
  UnknownSortOption(String),

  #[error("unknown sort direction: {0:?}")]
  UnknownSortDirection(String),

  #[error("invalid application id: {0:?}")]
  InvalidId(String),

  #[error("invalid calendar date: {0:?}")]
  InvalidDate(String),

  #[error("stored state has duplicate application id {0}")]
  DuplicateId(ApplicationId),

  #[error("stored state version {found} is not supported (expected {expected})")]
  UnsupportedVersion { found: u32, expected: u32 },

  #[error("storage unavailable: {0}")]
  StorageUnavailable(String),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
