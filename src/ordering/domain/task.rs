//! The slice of a task the ordering engine reads and writes.

use super::{OrderKey, ParseTaskStatusError, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Board column a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not yet started.
    Backlog,
    /// Being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Awaiting review.
    Review,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Every status in board column order.
    pub const ALL: [Self; 4] = [Self::Backlog, Self::InProgress, Self::Review, Self::Done];

    /// Returns the display and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Done => "Done",
        }
    }

    /// Returns `true` for the status that marks a task completed.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "backlog" => Ok(Self::Backlog),
            "in progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as observed in a store snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    status: TaskStatus,
    completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order: Option<OrderKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a task without an order key or timestamps.
    ///
    /// `completed` is derived from `status`.
    #[must_use]
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status,
            completed: status.is_done(),
            order: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Sets the order key.
    #[must_use]
    pub const fn with_order(mut self, order: OrderKey) -> Self {
        self.order = Some(order);
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the last-update timestamp.
    #[must_use]
    pub const fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the raw title, including any scene tag.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the board status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the stored order key, absent on legacy records.
    #[must_use]
    pub const fn order(&self) -> Option<OrderKey> {
        self.order
    }

    /// Returns the creation timestamp, if known.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns the last-update timestamp, if known.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the key this task ranks by.
    ///
    /// Falls back to `updated_at`, then `created_at`, then zero when the
    /// task has no stored order.
    #[must_use]
    pub fn effective_order(&self) -> OrderKey {
        self.order
            .or_else(|| self.updated_at.map(OrderKey::from_timestamp))
            .or_else(|| self.created_at.map(OrderKey::from_timestamp))
            .unwrap_or(OrderKey::ZERO)
    }

    /// Applies a write-set and stamps the update time.
    pub fn apply_patch(&mut self, patch: &TaskPatch, now: DateTime<Utc>) {
        self.order = Some(patch.order());
        if let Some(status) = patch.status() {
            self.status = status;
        }
        if let Some(completed) = patch.completed() {
            self.completed = completed;
        }
        self.updated_at = Some(now);
    }
}

/// Fields written to the store for one task as the result of a move or a
/// seed.
///
/// `completed` is only ever present alongside `status` and always equals
/// `status == Done`. Decoding ignores any incoming `completed` and derives
/// it from `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTaskPatch")]
pub struct TaskPatch {
    order: OrderKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
}

impl TaskPatch {
    /// Creates a patch that only writes the order key.
    #[must_use]
    pub const fn order_only(order: OrderKey) -> Self {
        Self {
            order,
            status: None,
            completed: None,
        }
    }

    /// Adds a status change and the derived completion flag.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self.completed = Some(status.is_done());
        self
    }

    /// Returns the order key to write.
    #[must_use]
    pub const fn order(&self) -> OrderKey {
        self.order
    }

    /// Returns the status to write, if the move changes it.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the completion flag to write, if the move changes status.
    #[must_use]
    pub const fn completed(&self) -> Option<bool> {
        self.completed
    }
}

/// Wire shape of a [`TaskPatch`] before `completed` is re-derived.
#[derive(Deserialize)]
struct RawTaskPatch {
    order: OrderKey,
    #[serde(default)]
    status: Option<TaskStatus>,
}

impl From<RawTaskPatch> for TaskPatch {
    fn from(raw: RawTaskPatch) -> Self {
        let patch = Self::order_only(raw.order);
        raw.status.map_or(patch, |status| patch.with_status(status))
    }
}

/// Parameter object for creating a task in a store.
///
/// There is no `completed` field: the created task derives it from
/// `status`, so a relocated task with a stale flag arrives normalised.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    /// Raw title, optionally prefixed with a `[Scene]` tag.
    pub title: String,
    /// Initial board status.
    pub status: TaskStatus,
    /// Explicit order key; the service assigns a fresh one when absent.
    pub order: Option<OrderKey>,
}

impl NewTask {
    /// Creates a draft with no explicit order.
    #[must_use]
    pub fn new(title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            title: title.into(),
            status,
            order: None,
        }
    }

    /// Sets an explicit order key.
    #[must_use]
    pub const fn with_order(mut self, order: OrderKey) -> Self {
        self.order = Some(order);
        self
    }

    /// Builds the stored task with the given identifier, order, and time.
    #[must_use]
    pub fn into_task(self, id: TaskId, order: OrderKey, now: DateTime<Utc>) -> Task {
        Task::new(id, self.title, self.status)
            .with_order(order)
            .with_created_at(now)
            .with_updated_at(now)
    }
}
