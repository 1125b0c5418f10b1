//! Application services for drag-and-drop ordering.

mod gate;
mod import;
mod ordering;
mod planner;
mod seeder;

pub use gate::{DragSessionGate, GateState, HoverVerdict};
pub use import::{ImportRow, plan_import};
pub use ordering::{
    MoveTaskRequest, OrderingService, OrderingServiceError, OrderingServiceResult, SeedReport,
};
pub use planner::{DropPosition, InvalidMove, MovePlan, ReorderPlanner, Target, View};
pub use seeder::{LegacySeeder, SeedWrite};
