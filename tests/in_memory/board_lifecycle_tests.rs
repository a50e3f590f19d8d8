//! End-to-end command flows on an owned board.

use super::helpers::{column, fields, load_board, scroller, snapshot};
use atelier::board::{
    adapters::memory::RecordingScroller,
    config::BoardConfig,
    domain::{
        BoardEvent, BoardSnapshot, DropOutcome, PointerPosition, Priority, ScrollDirection,
        TaskPatch, Viewport,
    },
    services::DeleteColumnRequest,
};
use rstest::rstest;

#[rstest]
fn workflow_survives_a_snapshot_round_trip(
    snapshot: BoardSnapshot,
    scroller: RecordingScroller,
) -> eyre::Result<()> {
    let mut board = load_board(snapshot, BoardConfig::default(), scroller.clone())?;
    board.create_column("Review", Some(1))?;
    let task = board.create_task(
        &column("todo")?,
        fields("Write changelog").with_assignee(atelier::board::domain::MemberId::new("bob")),
    )?;
    board.update_task(
        task.id(),
        TaskPatch {
            priority: Some(Priority::High),
            ..TaskPatch::default()
        },
    )?;
    board.begin_drag(task.id())?;
    board.drop(&column("review")?)?;

    let document = serde_json::to_string(&board.snapshot())?;
    let restored: BoardSnapshot = serde_json::from_str(&document)?;
    let reloaded = load_board(restored, BoardConfig::default(), scroller)?;

    let moved = reloaded
        .task(task.id())
        .ok_or_else(|| eyre::eyre!("task lost in round trip"))?;
    eyre::ensure!(moved.status().as_str() == "review");
    eyre::ensure!(moved.priority() == Priority::High);
    let review_limit = reloaded
        .columns()
        .into_iter()
        .find(|existing| existing.id().as_str() == "review")
        .and_then(|existing| existing.wip_limit());
    eyre::ensure!(review_limit == Some(1), "limit lost: {review_limit:?}");
    Ok(())
}

#[rstest]
fn events_describe_each_command_in_order(
    snapshot: BoardSnapshot,
    scroller: RecordingScroller,
) -> eyre::Result<()> {
    let mut board = load_board(snapshot, BoardConfig::default(), scroller)?;
    let created = board.create_column("QA", None)?;
    let task = board.create_task(created.id(), fields("Check build"))?;
    let copy = board.duplicate_task(task.id())?;
    board.delete_column(
        &DeleteColumnRequest::new(created.id().clone(), column("done")?).confirm_migration(),
    )?;

    let events = board.take_events();
    eyre::ensure!(
        events
            == vec![
                BoardEvent::ColumnCreated {
                    column: created.id().clone(),
                    order: 5,
                },
                BoardEvent::TaskCreated {
                    task: task.id(),
                    column: created.id().clone(),
                },
                BoardEvent::TaskDuplicated {
                    source: task.id(),
                    task: copy.id(),
                    column: column("todo")?,
                },
                BoardEvent::ColumnDeleted {
                    column: created.id().clone(),
                    fallback: column("done")?,
                    migrated: vec![task.id()],
                },
            ],
        "unexpected events: {events:?}"
    );
    eyre::ensure!(board.take_events().is_empty(), "events were not drained");
    Ok(())
}

#[rstest]
fn auto_scroll_moves_the_container_while_dragging(
    snapshot: BoardSnapshot,
    scroller: RecordingScroller,
) -> eyre::Result<()> {
    let mut board = load_board(snapshot, BoardConfig::default(), scroller.clone())?;
    let task = board.create_task(&column("todo")?, fields("Far away"))?;
    let viewport = Viewport::new(0, 1200);

    board.begin_drag(task.id())?;
    let direction = board.update_pointer(PointerPosition::new(1180, 300), viewport);
    for _ in 0..3 {
        board.auto_scroll_tick();
    }
    board.update_pointer(PointerPosition::new(600, 300), viewport);
    board.auto_scroll_tick();
    let outcome = board.drop(&column("done")?)?;

    eyre::ensure!(direction == Some(ScrollDirection::Right));
    eyre::ensure!(scroller.steps() == 4, "steps: {}", scroller.steps());
    eyre::ensure!(scroller.offset() == 80, "offset: {}", scroller.offset());
    eyre::ensure!(matches!(outcome, DropOutcome::Moved { .. }));
    Ok(())
}
