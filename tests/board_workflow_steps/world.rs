//! Shared world state for board workflow BDD scenarios.

use std::{collections::HashMap, sync::Arc};

use atelier::board::{
    adapters::memory::RecordingScroller,
    config::BoardConfig,
    domain::{
        BoardDomainError, BoardSnapshot, Column, DragError, DropOutcome, MemberId, ProjectId,
        TaskId,
    },
    services::{Board, ColumnDeletion},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Board type used by the BDD world.
pub type TestBoard = Board<DefaultClock, RecordingScroller>;

/// Scenario world for board workflow behaviour tests.
#[derive(Default)]
pub struct BoardWorld {
    pub board: Option<TestBoard>,
    pub named_tasks: HashMap<String, TaskId>,
    pub last_column: Option<Result<Column, BoardDomainError>>,
    pub last_drop: Option<Result<DropOutcome, DragError>>,
    pub last_deletion: Option<Result<ColumnDeletion, BoardDomainError>>,
}

impl BoardWorld {
    /// Loads `snapshot` as the scenario's board.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is inconsistent.
    pub fn load(&mut self, snapshot: BoardSnapshot) -> Result<(), eyre::Report> {
        let board = Board::from_snapshot(
            snapshot,
            BoardConfig::default(),
            Arc::new(DefaultClock),
            Arc::new(RecordingScroller::new()),
        )?;
        self.board = Some(board);
        Ok(())
    }

    /// Returns the loaded board.
    ///
    /// # Errors
    ///
    /// Returns an error if no Given step loaded a board.
    pub fn board(&self) -> Result<&TestBoard, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing board in scenario world"))
    }

    /// Returns the loaded board mutably.
    ///
    /// # Errors
    ///
    /// Returns an error if no Given step loaded a board.
    pub fn board_mut(&mut self) -> Result<&mut TestBoard, eyre::Report> {
        self.board
            .as_mut()
            .ok_or_else(|| eyre::eyre!("missing board in scenario world"))
    }

    /// Looks up a task created by an earlier step.
    ///
    /// # Errors
    ///
    /// Returns an error if no task with that title was created.
    pub fn task_named(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.named_tasks
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task named {title} in scenario world"))
    }
}

/// Creates an empty board with the default columns.
pub fn default_snapshot() -> BoardSnapshot {
    BoardSnapshot::with_default_columns(ProjectId::new("atelier"), Vec::new())
}

/// Member recorded as the creator of scenario tasks.
pub fn scenario_member() -> MemberId {
    MemberId::new("scenario")
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}
