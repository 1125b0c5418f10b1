//! Order assignment for tasks imported in bulk from spreadsheet rows.

use crate::ordering::domain::{NewTask, OrderKey, SceneCarry, TaskStatus, tagged_title};
use mockable::Clock;

/// One imported spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    /// Raw scene cell; empty cells inherit the previous explicit scene.
    pub scene: String,
    /// Task title without scene tag; rows with an empty title are skipped.
    pub title: String,
    /// Status mapped from the row's progress column.
    pub status: TaskStatus,
}

impl ImportRow {
    /// Creates a row.
    #[must_use]
    pub fn new(scene: impl Into<String>, title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            scene: scene.into(),
            title: title.into(),
            status,
        }
    }
}

/// Converts rows into new tasks that keep the rows' top-to-bottom order.
///
/// Keys count down one unit per created task from `fresh + rows.len()`,
/// so the first row ranks highest and every imported task sorts above
/// tasks that existed before the import.
#[must_use]
pub fn plan_import(rows: &[ImportRow], clock: &(impl Clock + ?Sized)) -> Vec<NewTask> {
    let mut carry = SceneCarry::new();
    let mut keys = OrderKey::descending_run(clock, rows.len()).into_iter();
    let mut drafts = Vec::new();

    for row in rows {
        let scene = carry.resolve(&row.scene);
        let title = row.title.trim();
        if title.is_empty() {
            continue;
        }
        let Some(order) = keys.next() else {
            break;
        };
        drafts.push(
            NewTask::new(tagged_title(scene.as_deref(), title), row.status).with_order(order),
        );
    }
    drafts
}
