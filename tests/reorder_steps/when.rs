//! When steps for drag-and-drop ordering scenarios.

use super::world::{OrderingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use tasklane::ordering::{
    domain::{GroupKey, MemberRole, TaskStatus},
    services::{MoveTaskRequest, Target, View},
};

fn relative_target(position: &str, sibling: String) -> Result<Target, eyre::Report> {
    match position {
        "before" => Ok(Target::before(sibling)),
        "after" => Ok(Target::after(sibling)),
        other => Err(eyre::eyre!("unknown drop position {other:?}")),
    }
}

fn commit(world: &mut OrderingWorld, role: MemberRole, request: &MoveTaskRequest) {
    let result = run_async(world.service.commit_move(&world.scope, role, request));
    world.last_move = Some(result);
}

#[when(r#"an editor drops "{id}" at the top of "{status}""#)]
fn drop_on_column(world: &mut OrderingWorld, id: String, status: String) -> Result<(), eyre::Report> {
    let column = TaskStatus::try_from(status.as_str()).wrap_err("parse task status")?;
    let request = MoveTaskRequest::new(View::Board, id, Target::GroupTop(GroupKey::Status(column)));
    commit(world, MemberRole::Editor, &request);
    Ok(())
}

#[when(r#"an editor drops "{id}" {position} "{sibling}" on the board"#)]
fn editor_drops_on_board(
    world: &mut OrderingWorld,
    id: String,
    position: String,
    sibling: String,
) -> Result<(), eyre::Report> {
    let request = MoveTaskRequest::new(View::Board, id, relative_target(&position, sibling)?);
    commit(world, MemberRole::Editor, &request);
    Ok(())
}

#[when(r#"an editor drops "{id}" {position} "{sibling}" in the table"#)]
fn editor_drops_in_table(
    world: &mut OrderingWorld,
    id: String,
    position: String,
    sibling: String,
) -> Result<(), eyre::Report> {
    let request = MoveTaskRequest::new(View::Table, id, relative_target(&position, sibling)?);
    commit(world, MemberRole::Editor, &request);
    Ok(())
}

#[when(r#"a viewer drops "{id}" {position} "{sibling}" on the board"#)]
fn viewer_drops_on_board(
    world: &mut OrderingWorld,
    id: String,
    position: String,
    sibling: String,
) -> Result<(), eyre::Report> {
    let request = MoveTaskRequest::new(View::Board, id, relative_target(&position, sibling)?);
    commit(world, MemberRole::Viewer, &request);
    Ok(())
}

#[when("the legacy seeder runs twice")]
fn seeder_runs_twice(world: &mut OrderingWorld) -> Result<(), eyre::Report> {
    for _ in 0..2 {
        let report = run_async(
            world
                .service
                .seed_missing_orders(&world.scope, MemberRole::Editor),
        )
        .wrap_err("run seeding pass")?;
        world.seed_reports.push(report);
    }
    Ok(())
}
