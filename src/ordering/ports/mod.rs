//! Port contracts for task ordering.
//!
//! Ports define infrastructure-agnostic interfaces used by ordering
//! services.

pub mod store;

pub use store::{TaskFeed, TaskStore, TaskStoreError, TaskStoreResult};
