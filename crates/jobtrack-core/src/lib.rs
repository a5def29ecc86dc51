//! Core types and the application store for jobtrack.
//!
//! This crate owns the record model, the mutation and query logic, and the
//! persistence adapter. It is free of database, CSV, and CLI dependencies;
//! storage transports plug in through [`storage::KeyValueStorage`].

pub mod application;
pub mod description;
pub mod error;
pub mod persist;
pub mod query;
pub mod stats;
pub mod storage;
pub mod store;

pub use application::{
  ApplicationId, ApplicationPatch, ApplicationStatus, JobApplication, JobNature,
  JobType, NewApplication,
};
pub use error::{Error, Result};
pub use persist::{Persistence, STORAGE_KEY};
pub use query::{SortDirection, SortOption, ViewCriteria};
pub use stats::ApplicationStats;
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::{ApplicationStore, StoreEvent, SubscriptionId};
