//! Notifications emitted to the host after each command.

use super::{ColumnId, RejectionReason, TaskId};
use serde::{Deserialize, Serialize};

/// Typed notification describing what a command did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BoardEvent {
    /// A column was appended to the board.
    ColumnCreated {
        /// New column.
        column: ColumnId,
        /// Order value assigned to it.
        order: u32,
    },
    /// A column was removed after migrating its tasks.
    ColumnDeleted {
        /// Removed column.
        column: ColumnId,
        /// Column that received the occupants.
        fallback: ColumnId,
        /// Tasks that were migrated.
        migrated: Vec<TaskId>,
    },
    /// A column's work-in-progress limit changed.
    ColumnLimitChanged {
        /// Affected column.
        column: ColumnId,
        /// New limit.
        limit: Option<u32>,
    },
    /// A column's title, theme or entry marker changed.
    ColumnUpdated {
        /// Affected column.
        column: ColumnId,
    },
    /// A task was created.
    TaskCreated {
        /// New task.
        task: TaskId,
        /// Column it was placed in.
        column: ColumnId,
    },
    /// A task was copied into the entry column.
    TaskDuplicated {
        /// Original task.
        source: TaskId,
        /// Copy.
        task: TaskId,
        /// Entry column the copy landed in.
        column: ColumnId,
    },
    /// A task was removed.
    TaskDeleted {
        /// Removed task.
        task: TaskId,
    },
    /// A task's fields were patched.
    TaskUpdated {
        /// Patched task.
        task: TaskId,
    },
    /// A task changed column.
    TaskMoved {
        /// Moved task.
        task: TaskId,
        /// Previous column.
        from: ColumnId,
        /// New column.
        to: ColumnId,
    },
    /// A move was refused and the task kept its column.
    MoveRejected {
        /// Task that stayed put.
        task: TaskId,
        /// Why the move was refused.
        reason: RejectionReason,
    },
    /// A drag gesture started.
    DragStarted {
        /// Dragged task.
        task: TaskId,
    },
    /// A drag gesture ended without a move.
    DragCancelled {
        /// Dragged task.
        task: TaskId,
    },
}

impl BoardEvent {
    /// Returns whether the event reflects a change to columns or tasks.
    ///
    /// Drag lifecycle events and rejected moves leave the board untouched.
    #[must_use]
    pub const fn changes_board(&self) -> bool {
        !matches!(
            self,
            Self::MoveRejected { .. } | Self::DragStarted { .. } | Self::DragCancelled { .. }
        )
    }
}
