//! Computes the order (and, on the board, status) a dragged task should be
//! written with.
//!
//! Planning is a pure function of the snapshot it is given. Callers build a
//! fresh plan for every gesture and hand the resulting write-set to the
//! store; nothing is cached between calls.

use crate::ordering::{
    config::OrderingConfig,
    domain::{GroupIndex, GroupKey, Grouping, OrderKey, Task, TaskId, TaskPatch},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// View a drag happens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Kanban board: columns are statuses and cards may change column.
    Board,
    /// Table: rows are grouped by scene and never leave their scene.
    Table,
}

impl View {
    /// Returns the grouping function the view renders with.
    #[must_use]
    pub const fn grouping(self) -> Grouping {
        match self {
            Self::Board => Grouping::ByStatus,
            Self::Table => Grouping::ByScene,
        }
    }

    /// Returns `true` when a drop may move a task into another group.
    #[must_use]
    pub const fn allows_cross_group(self) -> bool {
        matches!(self, Self::Board)
    }
}

/// Side of the sibling a task is dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPosition {
    /// Render immediately before the sibling.
    Before,
    /// Render immediately after the sibling.
    After,
}

/// Where a dragged task was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Empty area of a group: the task goes to the top of it.
    GroupTop(GroupKey),
    /// Next to a specific sibling.
    RelativeTo {
        /// Sibling the task was dropped on.
        sibling: TaskId,
        /// Side of the sibling.
        position: DropPosition,
    },
}

impl Target {
    /// Creates a target before `sibling`.
    #[must_use]
    pub fn before(sibling: impl Into<TaskId>) -> Self {
        Self::RelativeTo {
            sibling: sibling.into(),
            position: DropPosition::Before,
        }
    }

    /// Creates a target after `sibling`.
    #[must_use]
    pub fn after(sibling: impl Into<TaskId>) -> Self {
        Self::RelativeTo {
            sibling: sibling.into(),
            position: DropPosition::After,
        }
    }
}

/// Write-set for one dragged task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePlan {
    task_id: TaskId,
    patch: TaskPatch,
}

impl MovePlan {
    /// Returns the dragged task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the fields to write.
    #[must_use]
    pub const fn patch(&self) -> &TaskPatch {
        &self.patch
    }

    /// Splits the plan into its parts.
    #[must_use]
    pub fn into_parts(self) -> (TaskId, TaskPatch) {
        (self.task_id, self.patch)
    }
}

/// Reasons a drop produces no write.
///
/// These are resolved locally by ignoring the gesture; they are never shown
/// to the user as failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidMove {
    /// The task was dropped on itself.
    #[error("task {0} was dropped onto itself")]
    SelfDrop(TaskId),

    /// The dragged task is not in the snapshot.
    #[error("dragged task {0} is not in the snapshot")]
    DraggedMissing(TaskId),

    /// The sibling the task was dropped on is not in the snapshot.
    #[error("drop target {0} is not in the snapshot")]
    SiblingMissing(TaskId),

    /// The view keeps tasks inside their group.
    #[error("cannot move a task from {from} to {to} in this view")]
    CrossGroupForbidden {
        /// Group the task is in.
        from: GroupKey,
        /// Group it was dropped into.
        to: GroupKey,
    },

    /// The target group key does not belong to the view's grouping.
    #[error("group {0} does not exist in this view")]
    ForeignGroup(GroupKey),
}

/// Plans drag-and-drop moves for one view.
#[derive(Debug, Clone)]
pub struct ReorderPlanner {
    view: View,
    config: OrderingConfig,
}

impl ReorderPlanner {
    /// Creates a planner with default configuration.
    #[must_use]
    pub fn new(view: View) -> Self {
        Self {
            view,
            config: OrderingConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: OrderingConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the view this planner plans for.
    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &OrderingConfig {
        &self.config
    }

    /// Returns the group `task` belongs to in this view.
    #[must_use]
    pub fn group_of(&self, task: &Task) -> GroupKey {
        self.view.grouping().key_for(task, &self.config)
    }

    /// Plans a move, discarding the reason when the move is invalid.
    #[must_use]
    pub fn plan_move(
        &self,
        tasks: &[Task],
        dragged: &TaskId,
        target: &Target,
        clock: &(impl Clock + ?Sized),
    ) -> Option<MovePlan> {
        self.try_plan_move(tasks, dragged, target, clock).ok()
    }

    /// Plans a move of `dragged` to `target` over the snapshot `tasks`.
    ///
    /// Dropping a task where it already sits still yields a plan; the
    /// resulting write is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove`] for self drops, tasks missing from the
    /// snapshot, group keys foreign to the view, and cross-group moves in
    /// the table view.
    pub fn try_plan_move(
        &self,
        tasks: &[Task],
        dragged: &TaskId,
        target: &Target,
        clock: &(impl Clock + ?Sized),
    ) -> Result<MovePlan, InvalidMove> {
        if let Target::RelativeTo { sibling, .. } = target {
            if sibling == dragged {
                return Err(InvalidMove::SelfDrop(dragged.clone()));
            }
        }

        let dragged_task = find_task(tasks, dragged)
            .ok_or_else(|| InvalidMove::DraggedMissing(dragged.clone()))?;
        let grouping = self.view.grouping();
        let index = GroupIndex::build(tasks, grouping, &self.config);
        let source_key = grouping.key_for(dragged_task, &self.config);

        let (target_key, order) = match target {
            Target::GroupTop(key) => {
                if !grouping.produces(key) {
                    return Err(InvalidMove::ForeignGroup(key.clone()));
                }
                self.ensure_reachable(&source_key, key)?;
                let top = index
                    .members(key)
                    .iter()
                    .find(|task| task.id() != dragged)
                    .map(|task| task.effective_order().above());
                (key.clone(), top.unwrap_or_else(|| OrderKey::fresh(clock)))
            }
            Target::RelativeTo { sibling, position } => {
                let sibling_task = find_task(tasks, sibling)
                    .ok_or_else(|| InvalidMove::SiblingMissing(sibling.clone()))?;
                let key = grouping.key_for(sibling_task, &self.config);
                self.ensure_reachable(&source_key, &key)?;
                let order = order_next_to(index.members(&key), dragged, sibling, *position, clock)
                    .ok_or_else(|| InvalidMove::SiblingMissing(sibling.clone()))?;
                (key, order)
            }
        };

        let mut patch = TaskPatch::order_only(order);
        if target_key != source_key {
            if let Some(status) = target_key.as_status() {
                patch = patch.with_status(status);
            }
        }

        Ok(MovePlan {
            task_id: dragged.clone(),
            patch,
        })
    }

    fn ensure_reachable(&self, from: &GroupKey, to: &GroupKey) -> Result<(), InvalidMove> {
        if from == to || self.view.allows_cross_group() {
            return Ok(());
        }
        Err(InvalidMove::CrossGroupForbidden {
            from: from.clone(),
            to: to.clone(),
        })
    }
}

fn find_task<'a>(tasks: &'a [Task], id: &TaskId) -> Option<&'a Task> {
    tasks.iter().find(|task| task.id() == id)
}

/// Computes the key for an insertion next to `sibling` in `members`, with
/// the dragged task removed from the list first.
fn order_next_to(
    members: &[&Task],
    dragged: &TaskId,
    sibling: &TaskId,
    position: DropPosition,
    clock: &(impl Clock + ?Sized),
) -> Option<OrderKey> {
    let remaining: Vec<&Task> = members
        .iter()
        .copied()
        .filter(|task| task.id() != dragged)
        .collect();
    let sibling_index = remaining.iter().position(|task| task.id() == sibling)?;
    let insert_at = match position {
        DropPosition::Before => sibling_index,
        DropPosition::After => sibling_index + 1,
    };
    let upper = insert_at
        .checked_sub(1)
        .and_then(|index| remaining.get(index))
        .map(|task| task.effective_order());
    let lower = remaining.get(insert_at).map(|task| task.effective_order());
    Some(OrderKey::between(upper, lower, clock))
}
