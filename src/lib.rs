//! Tasklane: ordering engine for a collaborative task tracker.
//!
//! The crate decides where a dragged task lands, which fields are written
//! back to the store, and how legacy tasks without an order key are given
//! one. Rendering and persistence backends live elsewhere; the store is
//! reached through the [`ordering::ports::TaskStore`] port.
//!
//! # Architecture
//!
//! Tasklane follows hexagonal architecture principles:
//!
//! - **Domain**: Pure ordering rules with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the task store
//! - **Adapters**: Concrete implementations of ports (in-memory)
//!
//! # Modules
//!
//! - [`ordering`]: Order keys, grouping, drag planning, and seeding

pub mod ordering;
