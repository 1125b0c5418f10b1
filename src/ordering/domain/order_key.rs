//! Numeric order keys and the arithmetic used to place tasks between
//! neighbours.
//!
//! Keys are real numbers with "descending is first" semantics: the largest
//! key renders at the top of its group. New positions are found by
//! bisecting the two neighbours of the insertion point, so a move writes one
//! value and never renumbers siblings.
//!
//! There is no compaction pass. Repeatedly bisecting the same pair of
//! neighbours eventually reaches adjacent floating-point values, at which
//! point [`OrderKey::midpoint`] returns one of its inputs. That limit is far
//! beyond any realistic number of manual reorders and is left unhandled.
#![expect(
    clippy::float_arithmetic,
    reason = "order keys are floating-point by definition"
)]

use super::InvalidOrderKey;
use chrono::{DateTime, Utc};
use mockable::Clock;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A finite order value. Larger keys sort first within a group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct OrderKey(f64);

impl OrderKey {
    /// The key of a task with no order and no timestamps.
    pub const ZERO: Self = Self(0.0);

    /// Creates a key from a raw float.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOrderKey`] for NaN or infinite values.
    pub fn new(value: f64) -> Result<Self, InvalidOrderKey> {
        if value.is_finite() {
            // Adding positive zero folds -0.0 into 0.0 so both compare equal.
            Ok(Self(value + 0.0))
        } else {
            Err(InvalidOrderKey(value))
        }
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns a key one unit above `self`.
    #[must_use]
    pub fn above(self) -> Self {
        Self(self.0 + 1.0)
    }

    /// Returns a key one unit below `self`.
    #[must_use]
    pub fn below(self) -> Self {
        Self(self.0 - 1.0)
    }

    /// Returns the key halfway between two neighbours.
    ///
    /// Equal neighbours cannot be bisected, so the result is displaced one
    /// unit above them instead; siblings are never renumbered.
    #[must_use]
    pub fn midpoint(upper: Self, lower: Self) -> Self {
        if upper == lower {
            return upper.above();
        }
        Self(upper.0 / 2.0 + lower.0 / 2.0)
    }

    /// Chooses a key for an insertion point between optional neighbours.
    ///
    /// `upper` is the neighbour that renders before the insertion point and
    /// `lower` the one that renders after it.
    #[must_use]
    pub fn between(
        upper: Option<Self>,
        lower: Option<Self>,
        clock: &(impl Clock + ?Sized),
    ) -> Self {
        match (upper, lower) {
            (Some(upper_key), Some(lower_key)) => Self::midpoint(upper_key, lower_key),
            (Some(upper_key), None) => upper_key.below(),
            (None, Some(lower_key)) => lower_key.above(),
            (None, None) => Self::fresh(clock),
        }
    }

    /// Returns a wall-clock derived key that sorts above every key assigned
    /// before now.
    #[must_use]
    pub fn fresh(clock: &(impl Clock + ?Sized)) -> Self {
        Self(epoch_millis(clock.utc()))
    }

    /// Returns the key of a timestamp in epoch milliseconds.
    #[must_use]
    pub fn from_timestamp(timestamp: DateTime<Utc>) -> Self {
        Self(epoch_millis(timestamp))
    }

    /// Returns [`Self::fresh`] shifted up by `offset` units.
    #[must_use]
    pub fn fresh_with_offset(clock: &(impl Clock + ?Sized), offset: u32) -> Self {
        Self(epoch_millis(clock.utc()) + f64::from(offset))
    }

    /// Returns [`Self::fresh`] plus a random fraction in `[0, 1)`.
    #[must_use]
    pub fn fresh_jittered(clock: &(impl Clock + ?Sized), rng: &mut impl Rng) -> Self {
        Self(epoch_millis(clock.utc()) + rng.random::<f64>())
    }

    /// Returns `len` keys counting down from `fresh + len`, one unit apart.
    #[must_use]
    pub fn descending_run(clock: &(impl Clock + ?Sized), len: usize) -> Vec<Self> {
        let mut keys = Vec::with_capacity(len);
        let mut next = epoch_millis(clock.utc());
        for _ in 0..len {
            next += 1.0;
            keys.push(Self(next));
        }
        keys.reverse();
        keys
    }
}

impl TryFrom<f64> for OrderKey {
    type Error = InvalidOrderKey;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderKey> for f64 {
    fn from(key: OrderKey) -> Self {
        key.0
    }
}

impl PartialEq for OrderKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderKey {}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for OrderKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts a timestamp to epoch milliseconds as a key-compatible float.
#[expect(
    clippy::cast_precision_loss,
    reason = "epoch milliseconds stay far below 2^53"
)]
fn epoch_millis(timestamp: DateTime<Utc>) -> f64 {
    timestamp.timestamp_millis() as f64
}
