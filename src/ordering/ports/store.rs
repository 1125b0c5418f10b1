//! Task store port: the external collaborator that durably holds tasks and
//! pushes live snapshots.

use crate::ordering::domain::{NewTask, Task, TaskId, TaskPatch, TaskScope};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Receiver of live snapshots for one scope.
pub type TaskFeed = watch::Receiver<Vec<Task>>;

/// Task persistence and live-query contract.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns the current snapshot of a scope.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the backend cannot be
    /// read.
    async fn list_tasks(&self, scope: &TaskScope) -> TaskStoreResult<Vec<Task>>;

    /// Subscribes to snapshots of a scope.
    ///
    /// The receiver holds the latest confirmed snapshot and is notified on
    /// every change.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the feed cannot be
    /// opened.
    fn subscribe(&self, scope: &TaskScope) -> TaskStoreResult<TaskFeed>;

    /// Stores a new task and returns it as persisted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::PermissionDenied`] or
    /// [`TaskStoreError::Persistence`] when the write is rejected.
    async fn create_task(&self, scope: &TaskScope, task: NewTask) -> TaskStoreResult<Task>;

    /// Writes a partial update produced by the planner or the seeder.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist,
    /// or [`TaskStoreError::PermissionDenied`] /
    /// [`TaskStoreError::Persistence`] when the write is rejected.
    async fn update_task(
        &self,
        scope: &TaskScope,
        id: &TaskId,
        patch: &TaskPatch,
    ) -> TaskStoreResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn delete_task(&self, scope: &TaskScope, id: &TaskId) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The backend refused the write.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
