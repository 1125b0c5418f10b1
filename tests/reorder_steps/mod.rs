//! Step definitions for drag-and-drop ordering scenarios.

pub mod then;
pub mod when;
