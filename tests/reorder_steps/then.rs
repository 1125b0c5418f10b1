//! Then steps for drag-and-drop ordering scenarios.

use super::world::{FixedClock, OrderingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use tasklane::ordering::{
    domain::{GroupIndex, GroupKey, MemberRole, OrderKey, Task, TaskStatus},
    ports::TaskStore,
    services::{OrderingServiceError, View},
};

fn stored(world: &OrderingWorld, id: &str) -> Result<Task, eyre::Report> {
    run_async(world.store.list_tasks(&world.scope))
        .wrap_err("list tasks")?
        .into_iter()
        .find(|task| task.id().as_str() == id)
        .ok_or_else(|| eyre::eyre!("task {id} missing from store"))
}

#[then(r#"task "{id}" has order {order}"#)]
fn task_has_order(world: &OrderingWorld, id: String, order: f64) -> Result<(), eyre::Report> {
    let expected = OrderKey::new(order).wrap_err("parse order key")?;
    let task = stored(world, &id)?;
    if task.order() != Some(expected) {
        return Err(eyre::eyre!(
            "expected task {id} at order {expected}, found {:?}",
            task.order()
        ));
    }
    Ok(())
}

#[then(r#"task "{id}" has status "{status}""#)]
fn task_has_status(world: &OrderingWorld, id: String, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str()).wrap_err("parse task status")?;
    let task = stored(world, &id)?;
    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected task {id} in {expected}, found {}",
            task.status()
        ));
    }
    Ok(())
}

#[then(r#"task "{id}" is completed"#)]
fn task_is_completed(world: &OrderingWorld, id: String) -> Result<(), eyre::Report> {
    if !stored(world, &id)?.completed() {
        return Err(eyre::eyre!("expected task {id} to be completed"));
    }
    Ok(())
}

#[then(r#"task "{id}" has a fresh order"#)]
fn task_has_fresh_order(world: &OrderingWorld, id: String) -> Result<(), eyre::Report> {
    let expected = OrderKey::fresh(&FixedClock);
    let task = stored(world, &id)?;
    if task.order() != Some(expected) {
        return Err(eyre::eyre!(
            "expected task {id} at fresh order {expected}, found {:?}",
            task.order()
        ));
    }
    Ok(())
}

#[then(r#"the "{status}" column reads "{ids}""#)]
fn column_reads(world: &OrderingWorld, status: String, ids: String) -> Result<(), eyre::Report> {
    let column = TaskStatus::try_from(status.as_str()).wrap_err("parse task status")?;
    let tasks = run_async(world.store.list_tasks(&world.scope)).wrap_err("list tasks")?;
    let planner = world.service.planner(View::Board);
    let index = GroupIndex::build(&tasks, View::Board.grouping(), planner.config());
    let rendered: Vec<&str> = index
        .members(&GroupKey::Status(column))
        .iter()
        .map(|task| task.id().as_str())
        .collect();
    let expected: Vec<&str> = ids.split(',').map(str::trim).collect();
    if rendered != expected {
        return Err(eyre::eyre!(
            "expected column {column} to read {expected:?}, found {rendered:?}"
        ));
    }
    Ok(())
}

#[then("no move was committed")]
fn no_move_committed(world: &OrderingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result in scenario world"))?;
    if !matches!(result, Ok(None)) {
        return Err(eyre::eyre!("expected the move to be ignored, got {result:?}"));
    }
    Ok(())
}

#[then("the move is rejected as read-only")]
fn move_rejected_read_only(world: &OrderingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result in scenario world"))?;
    if !matches!(
        result,
        Err(OrderingServiceError::ReadOnly(MemberRole::Viewer))
    ) {
        return Err(eyre::eyre!("expected a read-only rejection, got {result:?}"));
    }
    Ok(())
}

#[then("the second seeding pass wrote nothing")]
fn second_seed_pass_empty(world: &OrderingWorld) -> Result<(), eyre::Report> {
    let second = world
        .seed_reports
        .get(1)
        .ok_or_else(|| eyre::eyre!("expected two seeding passes"))?;
    if !second.seeded.is_empty() || !second.failed.is_empty() {
        return Err(eyre::eyre!("second seeding pass was not empty: {second:?}"));
    }
    Ok(())
}
