//! Manual ordering of tasks within board columns and table scenes.
//!
//! Every task carries a floating-point order key; larger keys render
//! first. Moving a task rewrites only that task's key (and, on the board,
//! its status), choosing a value strictly between its new neighbours. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Tunables in [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
