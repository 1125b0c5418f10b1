//! Domain model for task ordering.
//!
//! Pure values and rules: order keys, the ranking function, grouping, scene
//! parsing, drag payloads, and project roles. Nothing here performs I/O.

mod access;
mod error;
mod group;
mod ids;
mod order_key;
mod payload;
mod rank;
mod scene;
mod task;

pub use access::{MemberRole, ProjectAccess};
pub use error::{InvalidOrderKey, ParseMemberRoleError, ParseTaskStatusError};
pub use group::{Group, GroupIndex, GroupKey, Grouping};
pub use ids::{TaskId, TaskScope};
pub use order_key::OrderKey;
pub use payload::DragPayload;
pub use rank::{rank, sort_by_rank};
pub use scene::{SceneCarry, SceneInfo, parse_scene, scene_of, tagged_title};
pub use task::{NewTask, Task, TaskPatch, TaskStatus};
