//! Deterministic total order over tasks within a group.

use super::Task;
use std::cmp::Ordering;

/// Compares two tasks for rendering order.
///
/// Returns [`Ordering::Less`] when `a` renders before `b`. Tasks sort by
/// [`Task::effective_order`] descending, then by identifier ascending, so
/// colliding or missing keys still yield a reproducible order.
#[must_use]
pub fn rank(a: &Task, b: &Task) -> Ordering {
    b.effective_order()
        .cmp(&a.effective_order())
        .then_with(|| a.id().cmp(b.id()))
}

/// Sorts tasks in place by [`rank`].
pub fn sort_by_rank(tasks: &mut [&Task]) {
    tasks.sort_by(|a, b| rank(a, b));
}
