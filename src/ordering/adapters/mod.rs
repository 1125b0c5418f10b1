//! Adapter implementations of ordering ports.

pub mod memory;
