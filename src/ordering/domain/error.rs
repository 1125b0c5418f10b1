//! Error types for ordering domain parsing and validation.

use thiserror::Error;

/// Error returned while parsing a task status from storage or user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a project member role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown member role: {0}")]
pub struct ParseMemberRoleError(pub String);

/// Error returned when a raw float cannot serve as an order key.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[error("order key must be a finite number, got {0}")]
pub struct InvalidOrderKey(pub f64);
