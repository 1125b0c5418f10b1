//! In-memory task store with live snapshot feeds.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;

use crate::ordering::{
    domain::{NewTask, OrderKey, Task, TaskId, TaskPatch, TaskScope},
    ports::{TaskFeed, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Every mutation republishes the full snapshot of the affected scope to
/// its subscribers, mirroring a document store's live query.
#[derive(Clone)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryStoreState>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

#[derive(Default)]
struct InMemoryStoreState {
    scopes: HashMap<TaskScope, ScopeState>,
    pending_failures: usize,
}

struct ScopeState {
    tasks: Vec<Task>,
    feed: watch::Sender<Vec<Task>>,
}

impl ScopeState {
    fn new() -> Self {
        let (feed, _) = watch::channel(Vec::new());
        Self {
            tasks: Vec::new(),
            feed,
        }
    }

    fn publish(&self) {
        self.feed.send_replace(self.tasks.clone());
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }
}

impl std::fmt::Debug for InMemoryTaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTaskStore").finish_non_exhaustive()
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTaskStore {
    /// Creates an empty store stamped by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates an empty store stamped by `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState::default())),
            clock,
        }
    }

    /// Inserts tasks exactly as given, bypassing timestamps and order
    /// assignment. Used to stage legacy records.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] if the state lock is
    /// poisoned.
    pub fn insert_raw(
        &self,
        scope: &TaskScope,
        tasks: impl IntoIterator<Item = Task>,
    ) -> TaskStoreResult<()> {
        let mut state = self.write_state()?;
        let scope_state = state
            .scopes
            .entry(scope.clone())
            .or_insert_with(ScopeState::new);
        scope_state.tasks.extend(tasks);
        scope_state.publish();
        Ok(())
    }

    /// Makes the next `count` writes fail with a persistence error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] if the state lock is
    /// poisoned.
    pub fn fail_next_writes(&self, count: usize) -> TaskStoreResult<()> {
        self.write_state()?.pending_failures = count;
        Ok(())
    }

    fn read_state(&self) -> TaskStoreResult<RwLockReadGuard<'_, InMemoryStoreState>> {
        self.state.read().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryStoreState>> {
        self.state.write().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Consumes one injected failure, if any are pending.
fn take_injected_failure(state: &mut InMemoryStoreState) -> TaskStoreResult<()> {
    if state.pending_failures == 0 {
        return Ok(());
    }
    state.pending_failures -= 1;
    Err(TaskStoreError::persistence(std::io::Error::other(
        "injected write failure",
    )))
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list_tasks(&self, scope: &TaskScope) -> TaskStoreResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(state
            .scopes
            .get(scope)
            .map(|scope_state| scope_state.tasks.clone())
            .unwrap_or_default())
    }

    fn subscribe(&self, scope: &TaskScope) -> TaskStoreResult<TaskFeed> {
        let mut state = self.write_state()?;
        let scope_state = state
            .scopes
            .entry(scope.clone())
            .or_insert_with(ScopeState::new);
        Ok(scope_state.feed.subscribe())
    }

    async fn create_task(&self, scope: &TaskScope, task: NewTask) -> TaskStoreResult<Task> {
        let mut state = self.write_state()?;
        take_injected_failure(&mut state)?;

        let now = self.clock.utc();
        let order = task.order.unwrap_or_else(|| OrderKey::fresh(&*self.clock));
        let stored = task.into_task(TaskId::generate(), order, now);

        let scope_state = state
            .scopes
            .entry(scope.clone())
            .or_insert_with(ScopeState::new);
        scope_state.tasks.push(stored.clone());
        scope_state.publish();
        Ok(stored)
    }

    async fn update_task(
        &self,
        scope: &TaskScope,
        id: &TaskId,
        patch: &TaskPatch,
    ) -> TaskStoreResult<()> {
        let mut state = self.write_state()?;
        take_injected_failure(&mut state)?;

        let now = self.clock.utc();
        let scope_state = state
            .scopes
            .get_mut(scope)
            .ok_or_else(|| TaskStoreError::NotFound(id.clone()))?;
        let task = scope_state
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or_else(|| TaskStoreError::NotFound(id.clone()))?;
        task.apply_patch(patch, now);
        scope_state.publish();
        Ok(())
    }

    async fn delete_task(&self, scope: &TaskScope, id: &TaskId) -> TaskStoreResult<()> {
        let mut state = self.write_state()?;
        take_injected_failure(&mut state)?;

        let scope_state = state
            .scopes
            .get_mut(scope)
            .ok_or_else(|| TaskStoreError::NotFound(id.clone()))?;
        let position = scope_state
            .position(id)
            .ok_or_else(|| TaskStoreError::NotFound(id.clone()))?;
        scope_state.tasks.remove(position);
        scope_state.publish();
        Ok(())
    }
}
