//! Serialisable command stream accepted by the board.

use super::{Board, ColumnDeletion, DeleteColumnRequest, DeleteOutcome};
use crate::board::{
    domain::{
        BoardDomainError, Column, ColumnId, ColumnTheme, DragError, DragState, DropOutcome,
        NewTask, PointerPosition, ScrollDirection, Task, TaskId, TaskPatch, TransitionDecision,
        Viewport,
    },
    ports::BoardScroller,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single host command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum BoardCommand {
    /// Append a custom column.
    CreateColumn {
        /// Column title.
        title: String,
        /// Optional work-in-progress limit.
        #[serde(default)]
        wip_limit: Option<u32>,
    },
    /// Delete a column, migrating its tasks.
    DeleteColumn(DeleteColumnRequest),
    /// Change a column's limit.
    SetColumnLimit {
        /// Target column.
        column: ColumnId,
        /// New limit; `None` removes it.
        #[serde(default)]
        limit: Option<u32>,
    },
    /// Rename a column.
    RenameColumn {
        /// Target column.
        column: ColumnId,
        /// New title.
        title: String,
    },
    /// Change or clear a column's theme tag.
    SetColumnTheme {
        /// Target column.
        column: ColumnId,
        /// New theme.
        #[serde(default)]
        theme: Option<ColumnTheme>,
    },
    /// Change the entry column.
    SetEntryColumn {
        /// New entry column.
        column: ColumnId,
    },
    /// Create a task.
    CreateTask {
        /// Column to create the task in.
        column: ColumnId,
        /// Caller-supplied fields.
        fields: NewTask,
    },
    /// Duplicate a task into the entry column.
    DuplicateTask {
        /// Source task.
        task: TaskId,
    },
    /// Delete a task.
    DeleteTask {
        /// Task to delete.
        task: TaskId,
    },
    /// Patch a task's fields.
    UpdateTask {
        /// Task to patch.
        task: TaskId,
        /// Field changes.
        patch: TaskPatch,
    },
    /// Move a task without a drag gesture.
    MoveTask {
        /// Task to move.
        task: TaskId,
        /// Target column.
        column: ColumnId,
    },
    /// Start dragging a task.
    BeginDrag {
        /// Task to drag.
        task: TaskId,
    },
    /// Report a pointer move during a drag.
    UpdatePointer {
        /// Pointer position.
        pointer: PointerPosition,
        /// Current viewport extent.
        viewport: Viewport,
    },
    /// Advance auto-scroll by one step.
    AutoScrollTick,
    /// Drop the dragged task.
    Drop {
        /// Target column.
        column: ColumnId,
    },
    /// Abort the drag.
    CancelDrag,
}

/// Result of a successfully executed command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "output", content = "value", rename_all = "snake_case")]
pub enum CommandOutput {
    /// A column was created.
    Column(Column),
    /// A column was deleted.
    ColumnDeleted(ColumnDeletion),
    /// A task was created, duplicated or updated.
    Task(Task),
    /// A delete request finished.
    TaskDeleted(DeleteOutcome),
    /// A programmatic move was evaluated.
    Transition(TransitionDecision),
    /// A drag gesture changed state.
    Drag(DragState),
    /// An auto-scroll step was evaluated.
    Scroll(Option<ScrollDirection>),
    /// A drop finished.
    Dropped(DropOutcome),
    /// A command without a payload completed.
    Done,
}

/// Errors returned when a command is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Board validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The drag controller refused the command.
    #[error(transparent)]
    Drag(#[from] DragError),
}

impl<C, S> Board<C, S>
where
    C: Clock + Send + Sync,
    S: BoardScroller,
{
    /// Executes one command against the board.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when the command is rejected; the board is
    /// left unchanged in that case.
    pub fn execute(&mut self, command: BoardCommand) -> Result<CommandOutput, CommandError> {
        let output = match command {
            BoardCommand::CreateColumn { title, wip_limit } => {
                CommandOutput::Column(self.create_column(&title, wip_limit)?)
            }
            BoardCommand::DeleteColumn(request) => {
                CommandOutput::ColumnDeleted(self.delete_column(&request)?)
            }
            BoardCommand::SetColumnLimit { column, limit } => {
                self.set_column_limit(&column, limit)?;
                CommandOutput::Done
            }
            BoardCommand::RenameColumn { column, title } => {
                self.rename_column(&column, &title)?;
                CommandOutput::Done
            }
            BoardCommand::SetColumnTheme { column, theme } => {
                self.set_column_theme(&column, theme)?;
                CommandOutput::Done
            }
            BoardCommand::SetEntryColumn { column } => {
                self.set_entry_column(&column)?;
                CommandOutput::Done
            }
            BoardCommand::CreateTask { column, fields } => {
                CommandOutput::Task(self.create_task(&column, fields)?)
            }
            BoardCommand::DuplicateTask { task } => CommandOutput::Task(self.duplicate_task(task)?),
            BoardCommand::DeleteTask { task } => CommandOutput::TaskDeleted(self.delete_task(task)),
            BoardCommand::UpdateTask { task, patch } => {
                CommandOutput::Task(self.update_task(task, patch)?)
            }
            BoardCommand::MoveTask { task, column } => {
                CommandOutput::Transition(self.move_task(task, &column)?)
            }
            BoardCommand::BeginDrag { task } => {
                self.begin_drag(task)?;
                CommandOutput::Drag(self.drag_state().clone())
            }
            BoardCommand::UpdatePointer { pointer, viewport } => {
                CommandOutput::Scroll(self.update_pointer(pointer, viewport))
            }
            BoardCommand::AutoScrollTick => CommandOutput::Scroll(self.auto_scroll_tick()),
            BoardCommand::Drop { column } => CommandOutput::Dropped(self.drop(&column)?),
            BoardCommand::CancelDrag => {
                self.cancel_drag();
                CommandOutput::Drag(self.drag_state().clone())
            }
        };
        Ok(output)
    }
}
