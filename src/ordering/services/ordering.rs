//! Service layer committing planned moves, seeds, and imports to the task
//! store.

use crate::ordering::{
    config::OrderingConfig,
    domain::{MemberRole, NewTask, OrderKey, Task, TaskId, TaskPatch, TaskScope},
    ports::{TaskStore, TaskStoreError},
    services::{
        import::{ImportRow, plan_import},
        planner::{MovePlan, ReorderPlanner, Target, View},
        seeder::{LegacySeeder, SeedWrite},
    },
};
use mockable::Clock;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for committing a drag-and-drop move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTaskRequest {
    view: View,
    dragged: TaskId,
    target: Target,
}

impl MoveTaskRequest {
    /// Creates a move request.
    #[must_use]
    pub fn new(view: View, dragged: impl Into<TaskId>, target: Target) -> Self {
        Self {
            view,
            dragged: dragged.into(),
            target,
        }
    }
}

/// Outcome of a seeding pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Seeds the store accepted.
    pub seeded: Vec<SeedWrite>,
    /// Tasks whose seed write failed; they are retried by the next pass.
    pub failed: Vec<TaskId>,
}

/// Service-level errors for ordering operations.
///
/// Invalid moves are not errors; they surface as `Ok(None)`.
#[derive(Debug, Error)]
pub enum OrderingServiceError {
    /// The viewer's role does not permit writes.
    #[error("{0} members cannot modify tasks")]
    ReadOnly(MemberRole),

    /// The snapshot could not be read.
    #[error("failed to read tasks for {scope}")]
    StoreRead {
        /// Scope being read.
        scope: TaskScope,
        /// Underlying store failure.
        #[source]
        source: TaskStoreError,
    },

    /// A write-set was rejected by the store. Not retried.
    #[error("failed to write task {task_id}")]
    StoreWrite {
        /// Task being written.
        task_id: TaskId,
        /// Underlying store failure.
        #[source]
        source: TaskStoreError,
    },

    /// A new task could not be created.
    #[error("failed to create task")]
    StoreCreate(#[source] TaskStoreError),

    /// The task to relocate is not in the source scope.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
}

/// Result type for ordering service operations.
pub type OrderingServiceResult<T> = Result<T, OrderingServiceError>;

/// Ordering orchestration service.
///
/// Every operation reads a fresh snapshot from the store, computes its
/// writes with the pure planner or seeder, and hands them to the store.
/// No task state is cached between calls; the seeder's in-flight set is
/// the only state the service keeps.
pub struct OrderingService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    config: OrderingConfig,
    seeder: Arc<Mutex<LegacySeeder>>,
}

impl<S, C> OrderingService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new ordering service.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            config: OrderingConfig::default(),
            seeder: Arc::new(Mutex::new(LegacySeeder::new())),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: OrderingConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns a planner for `view` sharing this service's configuration.
    #[must_use]
    pub fn planner(&self, view: View) -> ReorderPlanner {
        ReorderPlanner::new(view).with_config(self.config.clone())
    }

    /// Plans and commits a drag-and-drop move.
    ///
    /// Returns `Ok(None)` when the move is invalid and nothing was
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingServiceError::ReadOnly`] for viewers,
    /// [`OrderingServiceError::StoreRead`] when the snapshot cannot be
    /// read, and [`OrderingServiceError::StoreWrite`] when the store rejects
    /// the write-set.
    #[tracing::instrument(skip_all, fields(%scope, %role, dragged = %request.dragged))]
    pub async fn commit_move(
        &self,
        scope: &TaskScope,
        role: MemberRole,
        request: &MoveTaskRequest,
    ) -> OrderingServiceResult<Option<MovePlan>> {
        ensure_editable(role)?;
        let tasks = self.read(scope).await?;
        let planner = self.planner(request.view);
        let plan =
            match planner.try_plan_move(&tasks, &request.dragged, &request.target, &*self.clock) {
                Ok(plan) => plan,
                Err(reason) => {
                    debug!(%reason, "move ignored");
                    return Ok(None);
                }
            };

        self.store
            .update_task(scope, plan.task_id(), plan.patch())
            .await
            .map_err(|source| {
                warn!(error = %source, "move write failed");
                OrderingServiceError::StoreWrite {
                    task_id: plan.task_id().clone(),
                    source,
                }
            })?;
        info!(order = %plan.patch().order(), "move committed");
        Ok(Some(plan))
    }

    /// Backfills order keys for legacy tasks in `scope`.
    ///
    /// Viewers get an empty report; they cannot write.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingServiceError::StoreRead`] when the snapshot cannot
    /// be read. Individual write failures are reported in
    /// [`SeedReport::failed`].
    #[tracing::instrument(skip_all, fields(%scope, %role))]
    pub async fn seed_missing_orders(
        &self,
        scope: &TaskScope,
        role: MemberRole,
    ) -> OrderingServiceResult<SeedReport> {
        if !role.can_edit() {
            debug!(%role, "skipping seeding for read-only viewer");
            return Ok(SeedReport::default());
        }
        let tasks = self.read(scope).await?;
        let writes = self
            .lock_seeder()
            .seed_missing_orders(&tasks, &*self.clock);

        let mut report = SeedReport::default();
        for write in writes {
            let patch = TaskPatch::order_only(write.order);
            let result = self.store.update_task(scope, &write.task_id, &patch).await;
            self.lock_seeder().settle(&write.task_id);
            match result {
                Ok(()) => report.seeded.push(write),
                Err(error) => {
                    warn!(task = %write.task_id, %error, "seed write failed");
                    report.failed.push(write.task_id);
                }
            }
        }
        if !report.seeded.is_empty() {
            info!(count = report.seeded.len(), "seeded legacy order keys");
        }
        Ok(report)
    }

    /// Creates a task, assigning a fresh order key unless one is given.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingServiceError::ReadOnly`] for viewers and
    /// [`OrderingServiceError::StoreCreate`] when the store rejects the
    /// task.
    #[tracing::instrument(skip_all, fields(%scope, %role))]
    pub async fn create_task(
        &self,
        scope: &TaskScope,
        role: MemberRole,
        mut draft: NewTask,
    ) -> OrderingServiceResult<Task> {
        ensure_editable(role)?;
        if draft.order.is_none() {
            draft.order = Some(self.fresh_key());
        }
        self.store
            .create_task(scope, draft)
            .await
            .map_err(OrderingServiceError::StoreCreate)
    }

    /// Re-creates a task in another milestone at the top of its group and
    /// removes it from the source milestone.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingServiceError::TaskNotFound`] when the task is not
    /// in `from`, and store errors from the read, create, or delete.
    #[tracing::instrument(skip_all, fields(%from, %to, %task_id))]
    pub async fn move_to_milestone(
        &self,
        from: &TaskScope,
        to: &TaskScope,
        role: MemberRole,
        task_id: &TaskId,
    ) -> OrderingServiceResult<Task> {
        ensure_editable(role)?;
        let tasks = self.read(from).await?;
        let original = tasks
            .into_iter()
            .find(|task| task.id() == task_id)
            .ok_or_else(|| OrderingServiceError::TaskNotFound(task_id.clone()))?;

        // `completed` is re-derived from the status, not copied.
        let draft =
            NewTask::new(original.title(), original.status()).with_order(self.fresh_key());
        let moved = self
            .store
            .create_task(to, draft)
            .await
            .map_err(OrderingServiceError::StoreCreate)?;
        self.store
            .delete_task(from, task_id)
            .await
            .map_err(|source| OrderingServiceError::StoreWrite {
                task_id: task_id.clone(),
                source,
            })?;
        info!(new_id = %moved.id(), "task moved to milestone");
        Ok(moved)
    }

    /// Imports spreadsheet rows as new tasks in row order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingServiceError::ReadOnly`] for viewers and
    /// [`OrderingServiceError::StoreCreate`] on the first rejected task;
    /// tasks created before the failure remain.
    #[tracing::instrument(skip_all, fields(%scope, rows = rows.len()))]
    pub async fn import(
        &self,
        scope: &TaskScope,
        role: MemberRole,
        rows: &[ImportRow],
    ) -> OrderingServiceResult<Vec<Task>> {
        ensure_editable(role)?;
        let drafts = plan_import(rows, &*self.clock);
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let task = self
                .store
                .create_task(scope, draft)
                .await
                .map_err(OrderingServiceError::StoreCreate)?;
            created.push(task);
        }
        info!(count = created.len(), "imported tasks");
        Ok(created)
    }

    async fn read(&self, scope: &TaskScope) -> OrderingServiceResult<Vec<Task>> {
        self.store
            .list_tasks(scope)
            .await
            .map_err(|source| OrderingServiceError::StoreRead {
                scope: scope.clone(),
                source,
            })
    }

    fn fresh_key(&self) -> OrderKey {
        OrderKey::fresh_jittered(&*self.clock, &mut rand::rng())
    }

    fn lock_seeder(&self) -> MutexGuard<'_, LegacySeeder> {
        self.seeder.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

const fn ensure_editable(role: MemberRole) -> OrderingServiceResult<()> {
    if role.can_edit() {
        Ok(())
    } else {
        Err(OrderingServiceError::ReadOnly(role))
    }
}
