//! Shared fixtures for ordering unit tests.

use crate::ordering::domain::{OrderKey, Task, TaskStatus};
use chrono::{DateTime, Local, Utc};
use mockable::Clock;

/// Epoch milliseconds the fixed clock reports.
pub const NOW_MS: i64 = 1_700_000_000_000;

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn at_millis(millis: i64) -> Self {
        Self(DateTime::from_timestamp_millis(millis).expect("timestamp in range"))
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at_millis(NOW_MS)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn key(value: f64) -> OrderKey {
    OrderKey::new(value).expect("finite order key")
}

pub fn millis(value: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value).expect("timestamp in range")
}

pub fn ordered(id: &str, status: TaskStatus, order: f64) -> Task {
    Task::new(id, format!("Task {id}"), status).with_order(key(order))
}

pub fn titled(id: &str, title: &str, order: f64) -> Task {
    Task::new(id, title, TaskStatus::Backlog).with_order(key(order))
}

#[expect(
    clippy::cast_precision_loss,
    reason = "test timestamps stay far below 2^53"
)]
pub fn now_key() -> OrderKey {
    key(NOW_MS as f64)
}
