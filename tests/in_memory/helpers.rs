//! Shared test helpers for in-memory board integration tests.

use std::sync::Arc;

use atelier::board::{
    adapters::memory::{InMemorySnapshotPublisher, RecordingScroller},
    config::BoardConfig,
    domain::{BoardSnapshot, ColumnId, MemberId, NewTask, ProjectId, TaskId},
    services::{Board, BoardActor, BoardHandle},
};
use mockable::DefaultClock;
use rstest::fixture;
use tokio::task::JoinHandle;

/// Board type used by the integration tests.
pub type TestBoard = Board<DefaultClock, RecordingScroller>;

/// Handle type used by the actor tests.
pub type TestHandle = BoardHandle<DefaultClock, RecordingScroller>;

/// Provides the default board for the `atelier` project.
#[fixture]
pub fn snapshot() -> BoardSnapshot {
    BoardSnapshot::with_default_columns(
        ProjectId::new("atelier"),
        vec![MemberId::new("alice"), MemberId::new("bob")],
    )
}

/// Provides a fresh recording publisher.
#[fixture]
pub fn publisher() -> InMemorySnapshotPublisher {
    InMemorySnapshotPublisher::new()
}

/// Provides a fresh recording scroller.
#[fixture]
pub fn scroller() -> RecordingScroller {
    RecordingScroller::new()
}

/// Parses a column identifier used by a test.
///
/// # Errors
///
/// Returns an error if the identifier is blank or contains whitespace.
pub fn column(value: &str) -> Result<ColumnId, eyre::Report> {
    Ok(ColumnId::new(value)?)
}

/// Builds task fields created by `alice`.
pub fn fields(title: &str) -> NewTask {
    NewTask::new(title, MemberId::new("alice"))
}

/// Loads `snapshot` into an owned board.
///
/// # Errors
///
/// Returns an error if the snapshot is inconsistent.
pub fn load_board(
    snapshot: BoardSnapshot,
    config: BoardConfig,
    scroller: RecordingScroller,
) -> Result<TestBoard, eyre::Report> {
    Ok(Board::from_snapshot(
        snapshot,
        config,
        Arc::new(DefaultClock),
        Arc::new(scroller),
    )?)
}

/// Loads `snapshot` and starts an actor publishing into `publisher`.
///
/// # Errors
///
/// Returns an error if the snapshot is inconsistent.
pub fn spawn_board(
    snapshot: BoardSnapshot,
    config: BoardConfig,
    publisher: &InMemorySnapshotPublisher,
    scroller: RecordingScroller,
) -> Result<(TestHandle, JoinHandle<()>), eyre::Report> {
    let board = load_board(snapshot, config, scroller)?;
    Ok(BoardActor::spawn(board, Arc::new(publisher.clone())))
}

/// Creates `count` tasks in `column` through the actor.
///
/// # Errors
///
/// Returns an error if any creation is rejected.
pub async fn seed_tasks(
    handle: &TestHandle,
    column_id: &ColumnId,
    count: usize,
) -> Result<Vec<TaskId>, eyre::Report> {
    let mut ids = Vec::with_capacity(count);
    for index in 0..count {
        let task = handle
            .create_task(column_id.clone(), fields(&format!("Seed {index}")))
            .await?;
        ids.push(task.id());
    }
    Ok(ids)
}
