//! Per-gesture state machine deciding which drag events reach the planner.

use crate::ordering::{
    domain::{DragPayload, GroupKey, Task, TaskId},
    services::planner::{MovePlan, ReorderPlanner, Target, View},
};
use mockable::Clock;
use std::mem;
use tracing::debug;

/// Current phase of a drag gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GateState {
    /// No task drag in progress.
    #[default]
    Idle,
    /// A recognised task drag is in progress.
    Dragging {
        /// Payload the drag started with.
        payload: DragPayload,
        /// Target currently hovered and accepted, if any.
        hover: Option<Target>,
    },
}

/// Outcome of hovering over a candidate drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverVerdict {
    /// The target may receive the drop.
    Accepted,
    /// The target cannot receive the drop; no drop marker is shown.
    Rejected,
}

/// Gates drag events for one view.
///
/// The gate is `Idle` until a payload with the configured task-drag MIME
/// type arrives, and returns to `Idle` on every drop or drag end, so a
/// cancelled gesture never leaves a stale hover marker behind.
#[derive(Debug, Clone)]
pub struct DragSessionGate {
    planner: ReorderPlanner,
    editable: bool,
    state: GateState,
}

impl DragSessionGate {
    /// Creates an idle gate.
    ///
    /// A gate for a viewer who cannot edit ignores every drag.
    #[must_use]
    pub fn new(planner: ReorderPlanner, editable: bool) -> Self {
        Self {
            planner,
            editable,
            state: GateState::Idle,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &GateState {
        &self.state
    }

    /// Returns `true` while a task drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, GateState::Dragging { .. })
    }

    /// Returns the accepted hover target, if any.
    #[must_use]
    pub const fn hover_target(&self) -> Option<&Target> {
        match &self.state {
            GateState::Dragging { hover, .. } => hover.as_ref(),
            GateState::Idle => None,
        }
    }

    /// Starts a gesture from a transfer item.
    ///
    /// Returns `true` when the gate entered `Dragging`. Foreign payloads
    /// leave the gate `Idle`.
    pub fn begin(&mut self, mime_type: &str, data: &str) -> bool {
        if !self.editable {
            debug!(mime_type, "ignoring drag for read-only viewer");
            return false;
        }
        let Some(payload) = DragPayload::from_transfer(mime_type, data, self.planner.config())
        else {
            debug!(mime_type, "ignoring foreign drag payload");
            return false;
        };
        self.state = GateState::Dragging {
            payload,
            hover: None,
        };
        true
    }

    /// Records the target under the pointer.
    ///
    /// The dragged task's own row is rejected, as is, in the table view, a
    /// target outside the dragged task's scene. A rejected hover clears any
    /// previous marker.
    pub fn hover(&mut self, target: Target, tasks: &[Task]) -> HoverVerdict {
        let accepted = match &self.state {
            GateState::Dragging { payload, .. } => {
                self.accepts(payload.task_id(), &target, tasks)
            }
            GateState::Idle => return HoverVerdict::Rejected,
        };
        if let GateState::Dragging { hover, .. } = &mut self.state {
            *hover = accepted.then_some(target);
        }
        if accepted {
            HoverVerdict::Accepted
        } else {
            HoverVerdict::Rejected
        }
    }

    /// Clears the hover marker when the pointer leaves `target`.
    pub fn leave(&mut self, target: &Target) {
        if let GateState::Dragging { hover, .. } = &mut self.state {
            if hover.as_ref() == Some(target) {
                *hover = None;
            }
        }
    }

    /// Releases the drag over `target`.
    ///
    /// The gate returns to `Idle` whatever the outcome. Returns the
    /// write-set to commit, or `None` when the drop is ignored.
    pub fn release(
        &mut self,
        target: &Target,
        tasks: &[Task],
        clock: &(impl Clock + ?Sized),
    ) -> Option<MovePlan> {
        let GateState::Dragging { payload, .. } = mem::take(&mut self.state) else {
            return None;
        };
        let dragged = payload.task_id();
        if !self.accepts(dragged, target, tasks) {
            debug!(%dragged, "drop rejected by gate");
            return None;
        }
        match self.planner.try_plan_move(tasks, dragged, target, clock) {
            Ok(plan) => Some(plan),
            Err(reason) => {
                debug!(%dragged, %reason, "drop ignored");
                None
            }
        }
    }

    /// Ends the gesture without a drop.
    pub fn end(&mut self) {
        self.state = GateState::Idle;
    }

    fn accepts(&self, dragged: &TaskId, target: &Target, tasks: &[Task]) -> bool {
        if matches!(target, Target::RelativeTo { sibling, .. } if sibling == dragged) {
            return false;
        }
        if self.planner.view() != View::Table {
            return true;
        }
        let Some(dragged_task) = find_task(tasks, dragged) else {
            return false;
        };
        let dragged_scene = self.planner.group_of(dragged_task);
        let target_scene: Option<GroupKey> = match target {
            Target::GroupTop(key) => Some(key.clone()),
            Target::RelativeTo { sibling, .. } => {
                find_task(tasks, sibling).map(|task| self.planner.group_of(task))
            }
        };
        target_scene.is_some_and(|scene| scene == dragged_scene)
    }
}

fn find_task<'a>(tasks: &'a [Task], id: &TaskId) -> Option<&'a Task> {
    tasks.iter().find(|task| task.id() == id)
}
