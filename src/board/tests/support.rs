//! Shared fixtures for board unit tests.

use std::{
    io,
    sync::{Arc, Mutex},
};

use crate::board::{
    adapters::memory::RecordingScroller,
    config::BoardConfig,
    domain::{
        BoardSnapshot, Column, ColumnId, ColumnTitle, MemberId, NewTask, ProjectId, Task, TaskId,
    },
    services::Board,
};
use mockable::DefaultClock;

pub type TestBoard = Board<DefaultClock, RecordingScroller>;

pub fn column_id(value: &str) -> ColumnId {
    ColumnId::new(value).expect("valid column id")
}

pub fn member(value: &str) -> MemberId {
    MemberId::new(value)
}

pub fn column(id: &str, title: &str, order: u32) -> Column {
    let validated = ColumnTitle::new(title).expect("valid column title");
    Column::new(column_id(id), validated, order)
}

pub fn default_column(id: &str, title: &str, order: u32) -> Column {
    let validated = ColumnTitle::new(title).expect("valid column title");
    Column::new_default(column_id(id), validated, order)
}

/// Default board extended with a custom `review` column at order 5.
pub fn snapshot_with_review() -> BoardSnapshot {
    let mut snapshot =
        BoardSnapshot::with_default_columns(ProjectId::new("atelier"), vec![member("alice")]);
    snapshot.columns.push(column("review", "Review", 5));
    snapshot
}

pub fn board_from(snapshot: BoardSnapshot) -> TestBoard {
    Board::from_snapshot(
        snapshot,
        BoardConfig::default(),
        Arc::new(DefaultClock),
        Arc::new(RecordingScroller::new()),
    )
    .expect("snapshot should load")
}

pub fn new_task(title: &str) -> NewTask {
    NewTask::new(title, member("alice"))
}

pub fn add_task(board: &mut TestBoard, column: &str, title: &str) -> TaskId {
    board
        .create_task(&column_id(column), new_task(title))
        .map(|task: Task| task.id())
        .expect("task should be created")
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer lock")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `action` and returns the warnings it logged.
pub fn capture_warnings(action: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, action);

    let bytes = buffer.0.lock().expect("log buffer lock").clone();
    String::from_utf8(bytes).expect("logs are UTF-8")
}
