//! One-shot backfill of order keys for tasks created before ordering
//! existed.

use crate::ordering::domain::{OrderKey, Task, TaskId};
use mockable::Clock;
use std::collections::HashSet;

/// Pending seed write for one legacy task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedWrite {
    /// Task lacking an order key.
    pub task_id: TaskId,
    /// Key to write.
    pub order: OrderKey,
}

/// Assigns an order key to every observed task that lacks one.
///
/// A task is handed out at most once while its write is in flight. Once
/// the store confirms the write the task carries an order and is never
/// considered again; if the write fails, [`LegacySeeder::settle`] makes it
/// eligible for the next pass.
#[derive(Debug, Clone, Default)]
pub struct LegacySeeder {
    in_flight: HashSet<TaskId>,
}

impl LegacySeeder {
    /// Creates a seeder with nothing in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the writes needed to give every unordered task a key.
    ///
    /// The seed is `updated_at`, else `created_at`, else the current time
    /// plus the task's position in this batch so that timestamp-less tasks
    /// found together do not collide. Returned tasks are marked in flight.
    pub fn seed_missing_orders(
        &mut self,
        tasks: &[Task],
        clock: &(impl Clock + ?Sized),
    ) -> Vec<SeedWrite> {
        let unseeded: Vec<&Task> = tasks
            .iter()
            .filter(|task| task.order().is_none() && !self.in_flight.contains(task.id()))
            .collect();

        let mut writes = Vec::with_capacity(unseeded.len());
        for (position, task) in (0_u32..).zip(unseeded) {
            let order = task
                .updated_at()
                .or_else(|| task.created_at())
                .map_or_else(
                    || OrderKey::fresh_with_offset(clock, position),
                    OrderKey::from_timestamp,
                );
            self.in_flight.insert(task.id().clone());
            writes.push(SeedWrite {
                task_id: task.id().clone(),
                order,
            });
        }
        writes
    }

    /// Releases a task once its seed write has completed or failed.
    pub fn settle(&mut self, task_id: &TaskId) {
        self.in_flight.remove(task_id);
    }

    /// Returns `true` while a seed write for `task_id` is outstanding.
    #[must_use]
    pub fn is_in_flight(&self, task_id: &TaskId) -> bool {
        self.in_flight.contains(task_id)
    }
}
