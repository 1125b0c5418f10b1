//! Drag payloads exchanged between the drag source and drop targets.

use super::{TaskId, TaskStatus};
use crate::ordering::config::OrderingConfig;
use serde::{Deserialize, Serialize};

/// Explicitly tagged drag payload.
///
/// Serialized as `{"kind":"task-drag","taskId":"...","status":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum DragPayload {
    /// A task card or table row is being dragged.
    TaskDrag {
        /// Dragged task.
        task_id: TaskId,
        /// Status of the dragged task when the drag started.
        status: TaskStatus,
    },
}

impl DragPayload {
    /// Creates a task-drag payload.
    #[must_use]
    pub fn task(task_id: impl Into<TaskId>, status: TaskStatus) -> Self {
        Self::TaskDrag {
            task_id: task_id.into(),
            status,
        }
    }

    /// Parses a transfer item, returning `None` for foreign payloads.
    ///
    /// A payload is recognised only when it is carried under the configured
    /// MIME type and decodes as a tagged task drag. File drags, plain text,
    /// and malformed JSON are all foreign.
    #[must_use]
    pub fn from_transfer(mime_type: &str, data: &str, config: &OrderingConfig) -> Option<Self> {
        if mime_type != config.drag_mime_type {
            return None;
        }
        serde_json::from_str(data).ok()
    }

    /// Encodes the payload for a transfer item.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; the payload types always encode, so
    /// this is only reachable through a custom serializer failure.
    pub fn to_transfer_data(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Returns the dragged task identifier.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        match self {
            Self::TaskDrag { task_id, .. } => task_id,
        }
    }

    /// Returns the status recorded when the drag started.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        match self {
            Self::TaskDrag { status, .. } => *status,
        }
    }
}
