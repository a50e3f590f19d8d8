//! Integration tests for the board actor.

use std::time::Duration;

use super::helpers::{
    TestHandle, column, fields, publisher, scroller, seed_tasks, snapshot, spawn_board,
};
use atelier::board::{
    adapters::memory::{InMemorySnapshotPublisher, RecordingScroller},
    config::{AutoScrollConfig, BoardConfig},
    domain::{
        BoardDomainError, BoardEvent, BoardSnapshot, DragState, DropOutcome, PointerPosition,
        ScrollDirection, TransitionDecision, Viewport,
    },
    services::{BoardActorError, BoardCommand, CommandOutput},
};
use rstest::rstest;

/// Waits until every earlier request, including its publishing, has run.
async fn settle(handle: &TestHandle) -> eyre::Result<BoardSnapshot> {
    Ok(handle.snapshot().await?)
}

fn fast_ticks() -> BoardConfig {
    BoardConfig {
        auto_scroll: AutoScrollConfig {
            tick_interval_ms: 5,
            ..AutoScrollConfig::default()
        },
        ..BoardConfig::default()
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mutations_publish_snapshots_and_notifications(
    snapshot: BoardSnapshot,
    publisher: InMemorySnapshotPublisher,
    scroller: RecordingScroller,
) -> eyre::Result<()> {
    let (handle, _join) = spawn_board(snapshot, BoardConfig::default(), &publisher, scroller)?;

    let created = handle.create_column("Review".to_owned(), Some(2)).await?;
    settle(&handle).await?;

    let latest = publisher
        .latest_snapshot()?
        .ok_or_else(|| eyre::eyre!("no snapshot published"))?;
    eyre::ensure!(latest.columns.iter().any(|existing| existing.id() == created.id()));
    eyre::ensure!(
        publisher.events()?
            == vec![BoardEvent::ColumnCreated {
                column: created.id().clone(),
                order: 5,
            }]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_moves_notify_without_publishing(
    snapshot: BoardSnapshot,
    publisher: InMemorySnapshotPublisher,
    scroller: RecordingScroller,
) -> eyre::Result<()> {
    let (handle, _join) = spawn_board(snapshot, BoardConfig::default(), &publisher, scroller)?;
    let done = column("done")?;
    handle.set_column_limit(done.clone(), Some(0)).await?;
    let task = handle.create_task(column("todo")?, fields("Blocked")).await?;
    settle(&handle).await?;
    let published_before = publisher.snapshots()?.len();

    let decision = handle.move_task(task.id(), done).await?;
    settle(&handle).await?;

    eyre::ensure!(!decision.is_allowed());
    eyre::ensure!(publisher.snapshots()?.len() == published_before);
    eyre::ensure!(matches!(
        publisher.events()?.last(),
        Some(BoardEvent::MoveRejected { .. })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_moves_never_exceed_a_limit(
    snapshot: BoardSnapshot,
    publisher: InMemorySnapshotPublisher,
    scroller: RecordingScroller,
) -> eyre::Result<()> {
    let (handle, _join) = spawn_board(snapshot, BoardConfig::default(), &publisher, scroller)?;
    let in_progress = column("in_progress")?;
    handle.set_column_limit(in_progress.clone(), Some(1)).await?;
    let tasks = seed_tasks(&handle, &column("todo")?, 8).await?;

    let mut moves = Vec::new();
    for task in tasks {
        let mover = handle.clone();
        let target = in_progress.clone();
        moves.push(tokio::spawn(
            async move { mover.move_task(task, target).await },
        ));
    }
    let mut allowed = 0_usize;
    for join in moves {
        if join.await?? == TransitionDecision::Allowed {
            allowed += 1;
        }
    }

    eyre::ensure!(allowed == 1, "expected one allowed move, got {allowed}");
    eyre::ensure!(handle.tasks_by_status(in_progress).await?.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ticker_scrolls_only_while_in_an_edge_zone(
    snapshot: BoardSnapshot,
    publisher: InMemorySnapshotPublisher,
    scroller: RecordingScroller,
) -> eyre::Result<()> {
    let (handle, _join) = spawn_board(snapshot, fast_ticks(), &publisher, scroller.clone())?;
    let task = handle.create_task(column("todo")?, fields("Dragged")).await?;
    let viewport = Viewport::new(0, 1000);

    handle.begin_drag(task.id()).await?;
    let direction = handle
        .update_pointer(PointerPosition::new(5, 100), viewport)
        .await?;
    eyre::ensure!(direction == Some(ScrollDirection::Left));
    tokio::time::sleep(Duration::from_millis(80)).await;
    settle(&handle).await?;
    eyre::ensure!(
        scroller.steps() > 1,
        "ticker did not scroll: {} step(s)",
        scroller.steps()
    );
    eyre::ensure!(scroller.offset() < 0);

    handle
        .update_pointer(PointerPosition::new(500, 100), viewport)
        .await?;
    settle(&handle).await?;
    let parked = scroller.steps();
    tokio::time::sleep(Duration::from_millis(50)).await;
    settle(&handle).await?;
    eyre::ensure!(scroller.steps() == parked, "scrolled outside the edge zone");

    handle
        .update_pointer(PointerPosition::new(990, 100), viewport)
        .await?;
    handle.cancel_drag().await?;
    let after_cancel = scroller.steps();
    tokio::time::sleep(Duration::from_millis(50)).await;
    settle(&handle).await?;
    eyre::ensure!(scroller.steps() == after_cancel, "ticker outlived the drag");
    eyre::ensure!(handle.drag_state().await? == DragState::Idle);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ticker_stops_when_the_task_is_dropped_from_an_edge_zone(
    snapshot: BoardSnapshot,
    publisher: InMemorySnapshotPublisher,
    scroller: RecordingScroller,
) -> eyre::Result<()> {
    let (handle, _join) = spawn_board(snapshot, fast_ticks(), &publisher, scroller.clone())?;
    let task = handle.create_task(column("todo")?, fields("Dropped")).await?;

    handle.begin_drag(task.id()).await?;
    handle
        .update_pointer(PointerPosition::new(995, 100), Viewport::new(0, 1000))
        .await?;
    tokio::time::sleep(Duration::from_millis(40)).await;
    let outcome = handle.drop(column("in_progress")?).await?;
    eyre::ensure!(
        matches!(outcome, DropOutcome::Moved { .. }),
        "unexpected drop outcome: {outcome:?}"
    );
    eyre::ensure!(scroller.offset() > 0, "ticker never scrolled right");

    settle(&handle).await?;
    let after_drop = scroller.steps();
    tokio::time::sleep(Duration::from_millis(50)).await;
    settle(&handle).await?;
    eyre::ensure!(
        scroller.steps() == after_drop,
        "ticker kept scrolling after the drop"
    );
    eyre::ensure!(handle.drag_state().await? == DragState::Idle);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn publisher_failures_do_not_roll_back(
    snapshot: BoardSnapshot,
    publisher: InMemorySnapshotPublisher,
    scroller: RecordingScroller,
) -> eyre::Result<()> {
    let (handle, _join) = spawn_board(snapshot, BoardConfig::default(), &publisher, scroller)?;
    publisher.close()?;

    let task = handle.create_task(column("backlog")?, fields("Kept")).await?;
    let current = settle(&handle).await?;

    eyre::ensure!(current.tasks.iter().any(|existing| existing.id() == task.id()));
    eyre::ensure!(publisher.snapshots()?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn handle_surfaces_domain_and_command_errors(
    snapshot: BoardSnapshot,
    publisher: InMemorySnapshotPublisher,
    scroller: RecordingScroller,
) -> eyre::Result<()> {
    let (handle, _join) = spawn_board(snapshot, BoardConfig::default(), &publisher, scroller)?;

    let rejected = handle.create_column("   ".to_owned(), None).await;
    eyre::ensure!(
        rejected == Err(BoardActorError::Domain(BoardDomainError::EmptyColumnTitle)),
        "unexpected result: {rejected:?}"
    );

    let output = handle
        .execute(BoardCommand::CreateColumn {
            title: "Ops".to_owned(),
            wip_limit: None,
        })
        .await?;
    eyre::ensure!(matches!(output, CommandOutput::Column(_)));

    let dropped = handle
        .execute(BoardCommand::Drop {
            column: column("done")?,
        })
        .await;
    eyre::ensure!(matches!(dropped, Err(BoardActorError::Command(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn actor_stops_when_every_handle_is_dropped(
    snapshot: BoardSnapshot,
    publisher: InMemorySnapshotPublisher,
    scroller: RecordingScroller,
) -> eyre::Result<()> {
    let (handle, join) = spawn_board(snapshot, BoardConfig::default(), &publisher, scroller)?;
    let extra = handle.clone();
    drop(handle);
    eyre::ensure!(!extra.is_closed());
    drop(extra);

    tokio::time::timeout(Duration::from_secs(5), join).await??;
    Ok(())
}
