//! View-specific partitions of a task snapshot.

use super::{Task, TaskId, TaskStatus, rank::sort_by_rank, scene_of};
use crate::ordering::config::OrderingConfig;
use std::collections::HashMap;
use std::fmt;

/// Partition key of a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Board column.
    Status(TaskStatus),
    /// Table scene bucket.
    Scene(String),
}

impl GroupKey {
    /// Creates a scene key.
    #[must_use]
    pub fn scene(name: impl Into<String>) -> Self {
        Self::Scene(name.into())
    }

    /// Returns the status for a board key.
    #[must_use]
    pub const fn as_status(&self) -> Option<TaskStatus> {
        match self {
            Self::Status(status) => Some(*status),
            Self::Scene(_) => None,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "status:{status}"),
            Self::Scene(scene) => write!(f, "scene:{scene}"),
        }
    }
}

/// Function used to partition tasks into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// One group per board status.
    ByStatus,
    /// One group per scene tag parsed from the title.
    ByScene,
}

impl Grouping {
    /// Returns the group key of `task`.
    #[must_use]
    pub fn key_for(self, task: &Task, config: &OrderingConfig) -> GroupKey {
        match self {
            Self::ByStatus => GroupKey::Status(task.status()),
            Self::ByScene => GroupKey::Scene(scene_of(task.title(), config)),
        }
    }

    /// Returns `true` when `key` is of the kind this grouping produces.
    #[must_use]
    pub const fn produces(self, key: &GroupKey) -> bool {
        matches!(
            (self, key),
            (Self::ByStatus, GroupKey::Status(_)) | (Self::ByScene, GroupKey::Scene(_))
        )
    }
}

/// One group and its members in rendering order.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    key: GroupKey,
    tasks: Vec<&'a Task>,
}

impl<'a> Group<'a> {
    /// Returns the group key.
    #[must_use]
    pub const fn key(&self) -> &GroupKey {
        &self.key
    }

    /// Returns the members sorted by rank.
    #[must_use]
    pub fn tasks(&self) -> &[&'a Task] {
        &self.tasks
    }
}

/// Ordered groups derived from a single snapshot.
///
/// The index borrows the snapshot it was built from and holds no state of
/// its own; build a new one for every snapshot.
#[derive(Debug, Clone)]
pub struct GroupIndex<'a> {
    grouping: Grouping,
    groups: Vec<Group<'a>>,
}

impl<'a> GroupIndex<'a> {
    /// Partitions `tasks` and sorts every group by rank.
    ///
    /// Status groups appear in board column order and are present even
    /// when empty. Scene groups appear in the order their first member
    /// appears in `tasks`.
    #[must_use]
    pub fn build(tasks: &'a [Task], grouping: Grouping, config: &OrderingConfig) -> Self {
        let mut groups: Vec<Group<'a>> = match grouping {
            Grouping::ByStatus => TaskStatus::ALL
                .iter()
                .map(|status| Group {
                    key: GroupKey::Status(*status),
                    tasks: Vec::new(),
                })
                .collect(),
            Grouping::ByScene => Vec::new(),
        };
        let mut positions: HashMap<GroupKey, usize> = groups
            .iter()
            .enumerate()
            .map(|(position, group)| (group.key.clone(), position))
            .collect();

        for task in tasks {
            let key = grouping.key_for(task, config);
            let position = *positions.entry(key.clone()).or_insert_with(|| {
                groups.push(Group {
                    key,
                    tasks: Vec::new(),
                });
                groups.len() - 1
            });
            if let Some(group) = groups.get_mut(position) {
                group.tasks.push(task);
            }
        }

        for group in &mut groups {
            sort_by_rank(&mut group.tasks);
        }

        Self { grouping, groups }
    }

    /// Returns the grouping function the index was built with.
    #[must_use]
    pub const fn grouping(&self) -> Grouping {
        self.grouping
    }

    /// Returns every group in display order.
    #[must_use]
    pub fn groups(&self) -> &[Group<'a>] {
        &self.groups
    }

    /// Returns the members of `key` in rank order, or an empty slice.
    #[must_use]
    pub fn members(&self, key: &GroupKey) -> &[&'a Task] {
        self.groups
            .iter()
            .find(|group| &group.key == key)
            .map(|group| group.tasks.as_slice())
            .unwrap_or_default()
    }

    /// Returns the group containing the task with `id`.
    #[must_use]
    pub fn key_of(&self, id: &TaskId) -> Option<&GroupKey> {
        self.groups
            .iter()
            .find(|group| group.tasks.iter().any(|task| task.id() == id))
            .map(|group| &group.key)
    }
}
