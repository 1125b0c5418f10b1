//! Shared test helpers for in-memory ordering integration tests.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use rstest::fixture;
use tasklane::ordering::{
    adapters::memory::InMemoryTaskStore,
    domain::{GroupIndex, GroupKey, OrderKey, Task, TaskScope, TaskStatus},
    ports::TaskStore,
    services::{OrderingService, View},
};

/// Epoch milliseconds reported by [`FixedClock`].
pub const NOW_MS: i64 = 1_700_000_000_000;

/// Service type used by the integration tests.
pub type TestService = OrderingService<InMemoryTaskStore, FixedClock>;

/// Clock frozen at [`NOW_MS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock;

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(NOW_MS).unwrap_or_default()
    }
}

/// A store and a service sharing it.
pub struct Workspace {
    pub store: Arc<InMemoryTaskStore>,
    pub service: TestService,
    pub scope: TaskScope,
}

/// Provides a fresh workspace for each test.
#[fixture]
pub fn workspace() -> Workspace {
    let clock = Arc::new(FixedClock);
    let store = Arc::new(InMemoryTaskStore::with_clock(clock.clone()));
    Workspace {
        service: OrderingService::new(Arc::clone(&store), clock),
        store,
        scope: TaskScope::new("film", "act-one"),
    }
}

/// Builds a task with an explicit order key.
///
/// # Errors
///
/// Returns an error if `order` is not finite.
pub fn task_at(id: &str, title: &str, status: TaskStatus, order: f64) -> eyre::Result<Task> {
    Ok(Task::new(id, title, status).with_order(OrderKey::new(order)?))
}

/// Returns the fixed clock's fresh key.
#[must_use]
pub fn fresh_key() -> OrderKey {
    OrderKey::fresh(&FixedClock)
}

/// Returns the identifiers of `key`'s members in rendering order.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read.
pub async fn rendered(
    workspace: &Workspace,
    view: View,
    key: &GroupKey,
) -> eyre::Result<Vec<String>> {
    let tasks = workspace.store.list_tasks(&workspace.scope).await?;
    let planner = workspace.service.planner(view);
    let index = GroupIndex::build(&tasks, view.grouping(), planner.config());
    Ok(index
        .members(key)
        .iter()
        .map(|task| task.id().to_string())
        .collect())
}

/// Returns the stored task with `id`.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or the task is missing.
pub async fn stored(workspace: &Workspace, id: &str) -> eyre::Result<Task> {
    workspace
        .store
        .list_tasks(&workspace.scope)
        .await?
        .into_iter()
        .find(|task| task.id().as_str() == id)
        .ok_or_else(|| eyre::eyre!("task {id} missing from store"))
}
