//! End-to-end drag flows: gate, planner, service, and store together.

use super::helpers::{FixedClock, Workspace, fresh_key, rendered, stored, task_at, workspace};
use rstest::rstest;
use tasklane::ordering::{
    domain::{DragPayload, GroupKey, MemberRole, TaskStatus},
    ports::TaskStore,
    services::{DragSessionGate, MoveTaskRequest, Target, View},
};

const MIME: &str = "application/x-task-drag";

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_reorder_renders_task_at_drop_point(workspace: Workspace) -> eyre::Result<()> {
    workspace.store.insert_raw(
        &workspace.scope,
        [
            task_at("a", "Storyboard", TaskStatus::Backlog, 10.0)?,
            task_at("b", "Cast", TaskStatus::Backlog, 6.0)?,
            task_at("c", "Scout", TaskStatus::Backlog, 1.0)?,
        ],
    )?;

    let request = MoveTaskRequest::new(View::Board, "c", Target::after("a"));
    let plan = workspace
        .service
        .commit_move(&workspace.scope, MemberRole::Editor, &request)
        .await?
        .ok_or_else(|| eyre::eyre!("move unexpectedly rejected"))?;

    eyre::ensure!(plan.patch().status().is_none(), "same-column move changed status");
    let column = rendered(
        &workspace,
        View::Board,
        &GroupKey::Status(TaskStatus::Backlog),
    )
    .await?;
    eyre::ensure!(column == ["a", "c", "b"], "unexpected column order {column:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn gate_release_feeds_service_commit(workspace: Workspace) -> eyre::Result<()> {
    workspace.store.insert_raw(
        &workspace.scope,
        [
            task_at("a", "Edit", TaskStatus::Review, 10.0)?,
            task_at("x", "Grade", TaskStatus::InProgress, 3.0)?,
        ],
    )?;
    let snapshot = workspace.store.list_tasks(&workspace.scope).await?;
    let mut gate = DragSessionGate::new(workspace.service.planner(View::Board), true);
    let payload = DragPayload::task("x", TaskStatus::InProgress).to_transfer_data()?;

    eyre::ensure!(gate.begin(MIME, &payload), "gate ignored a task drag");
    let target = Target::GroupTop(GroupKey::Status(TaskStatus::Done));
    let plan = gate
        .release(&target, &snapshot, &FixedClock)
        .ok_or_else(|| eyre::eyre!("gate rejected the drop"))?;
    eyre::ensure!(!gate.is_dragging(), "gate did not reset after drop");

    let (task_id, patch) = plan.into_parts();
    workspace
        .store
        .update_task(&workspace.scope, &task_id, &patch)
        .await?;

    let moved = stored(&workspace, "x").await?;
    eyre::ensure!(moved.status() == TaskStatus::Done, "status not written");
    eyre::ensure!(moved.completed(), "completed not derived from status");
    eyre::ensure!(moved.order() == Some(fresh_key()), "empty column should get a fresh key");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn table_keeps_rows_inside_their_scene(workspace: Workspace) -> eyre::Result<()> {
    workspace.store.insert_raw(
        &workspace.scope,
        [
            task_at("1", "[Intro] Opening", TaskStatus::Backlog, 10.0)?,
            task_at("2", "[Intro] Title card", TaskStatus::Done, 6.0)?,
            task_at("3", "[Outro] Credits", TaskStatus::Backlog, 4.0)?,
        ],
    )?;

    let across = MoveTaskRequest::new(View::Table, "1", Target::after("3"));
    let rejected = workspace
        .service
        .commit_move(&workspace.scope, MemberRole::Editor, &across)
        .await?;
    eyre::ensure!(rejected.is_none(), "cross-scene drop was committed");

    let within = MoveTaskRequest::new(View::Table, "1", Target::after("2"));
    workspace
        .service
        .commit_move(&workspace.scope, MemberRole::Editor, &within)
        .await?
        .ok_or_else(|| eyre::eyre!("same-scene drop rejected"))?;

    let intro = rendered(&workspace, View::Table, &GroupKey::scene("Intro")).await?;
    eyre::ensure!(intro == ["2", "1"], "unexpected scene order {intro:?}");
    let moved = stored(&workspace, "1").await?;
    eyre::ensure!(
        moved.status() == TaskStatus::Backlog,
        "table move changed status"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subscribers_see_the_committed_move(workspace: Workspace) -> eyre::Result<()> {
    workspace.store.insert_raw(
        &workspace.scope,
        [
            task_at("a", "Storyboard", TaskStatus::Backlog, 10.0)?,
            task_at("b", "Cast", TaskStatus::Backlog, 6.0)?,
        ],
    )?;
    let mut feed = workspace.store.subscribe(&workspace.scope)?;

    let request = MoveTaskRequest::new(View::Board, "b", Target::before("a"));
    workspace
        .service
        .commit_move(&workspace.scope, MemberRole::Owner, &request)
        .await?;

    feed.changed().await?;
    let snapshot = feed.borrow_and_update().clone();
    let moved = snapshot
        .iter()
        .find(|task| task.id().as_str() == "b")
        .ok_or_else(|| eyre::eyre!("moved task missing from feed"))?;
    eyre::ensure!(
        moved.order().is_some_and(|order| order.value() > 10.0),
        "feed did not carry the new order"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_drops_resolve_to_last_write(workspace: Workspace) -> eyre::Result<()> {
    workspace.store.insert_raw(
        &workspace.scope,
        [
            task_at("a", "Storyboard", TaskStatus::Backlog, 10.0)?,
            task_at("b", "Cast", TaskStatus::Backlog, 6.0)?,
            task_at("c", "Scout", TaskStatus::Backlog, 1.0)?,
        ],
    )?;
    let first = MoveTaskRequest::new(View::Board, "c", Target::before("a"));
    let second = MoveTaskRequest::new(View::Board, "c", Target::after("b"));

    let (left, right) = tokio::join!(
        workspace
            .service
            .commit_move(&workspace.scope, MemberRole::Editor, &first),
        workspace
            .service
            .commit_move(&workspace.scope, MemberRole::Editor, &second),
    );
    left?;
    right?;

    let column = rendered(
        &workspace,
        View::Board,
        &GroupKey::Status(TaskStatus::Backlog),
    )
    .await?;
    eyre::ensure!(column.len() == 3, "a task was lost: {column:?}");
    Ok(())
}
