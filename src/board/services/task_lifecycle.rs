//! Service layer for task creation, duplication, update, moves and deletion.

use super::BoardState;
use crate::board::domain::{
    BoardDomainError, BoardEvent, BoardResult, ColumnId, NewTask, Task, TaskDefaults, TaskId,
    TaskPatch, TransitionDecision,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of deleting a task.
///
/// Deleting an absent task is not an error; it is reported as
/// [`DeleteOutcome::Absent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// The task was removed.
    Deleted {
        /// Removed task.
        task: Task,
    },
    /// No task had the identifier.
    Absent {
        /// Requested identifier.
        task: TaskId,
    },
}

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
    defaults: TaskDefaults,
}

impl<C> TaskLifecycleService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a task lifecycle service.
    #[must_use]
    pub const fn new(clock: Arc<C>, defaults: TaskDefaults) -> Self {
        Self { clock, defaults }
    }

    /// Creates a task inside `column`.
    ///
    /// Creation does not consult the column's limit; limits govern
    /// transitions only. Fields are validated before the column and the
    /// assignee are resolved.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] or
    /// [`BoardDomainError::InvalidHours`] for invalid fields,
    /// [`BoardDomainError::ColumnNotFound`] for an unknown column and
    /// [`BoardDomainError::UnknownMember`] for an assignee outside the
    /// project.
    pub fn create_task(
        &self,
        state: &mut BoardState,
        column: &ColumnId,
        fields: NewTask,
    ) -> BoardResult<Task> {
        let task = Task::create(
            state.project_id().clone(),
            column.clone(),
            fields,
            &self.defaults,
            &*self.clock,
        )?;
        if let Err(err) = state.ensure_column(column) {
            warn!(column = %column, "task creation targets an unknown column");
            return Err(err);
        }
        if let Some(assignee) = task.assigned_to() {
            state.ensure_member(assignee)?;
        }
        state.store_mut().add(task.clone())?;

        info!(task_id = %task.id(), column = %column, "task created");
        state.record(BoardEvent::TaskCreated {
            task: task.id(),
            column: column.clone(),
        });
        Ok(task)
    }

    /// Copies a task into the board's entry column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the source is absent.
    pub fn duplicate_task(&self, state: &mut BoardState, source: TaskId) -> BoardResult<Task> {
        let Some(original) = state.store().get(source) else {
            warn!(task_id = %source, "duplicate requested for unknown task");
            return Err(BoardDomainError::TaskNotFound(source));
        };
        let entry = state.registry().entry_column().clone();
        let copy = original.duplicate(entry.clone(), &*self.clock);
        state.store_mut().add(copy.clone())?;

        info!(source = %source, task_id = %copy.id(), column = %entry, "task duplicated");
        state.record(BoardEvent::TaskDuplicated {
            source,
            task: copy.id(),
            column: entry,
        });
        Ok(copy)
    }

    /// Removes a task. Idempotent.
    pub fn delete_task(&self, state: &mut BoardState, id: TaskId) -> DeleteOutcome {
        let Some(task) = state.store_mut().remove(id) else {
            warn!(task_id = %id, "delete requested for unknown task");
            return DeleteOutcome::Absent { task: id };
        };

        info!(task_id = %id, "task deleted");
        state.record(BoardEvent::TaskDeleted { task: id });
        DeleteOutcome::Deleted { task }
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when absent,
    /// [`BoardDomainError::UnknownMember`] for an assignee outside the
    /// project, or the patch validation error.
    pub fn update_task(
        &self,
        state: &mut BoardState,
        id: TaskId,
        patch: TaskPatch,
    ) -> BoardResult<Task> {
        if let Some(assignee) = patch.new_assignee() {
            state.ensure_member(assignee)?;
        }
        let updated = match state.store_mut().update(id, patch) {
            Ok(task) => task.clone(),
            Err(err) => {
                warn!(task_id = %id, error = %err, "task update rejected");
                return Err(err);
            }
        };

        info!(task_id = %id, "task updated");
        state.record(BoardEvent::TaskUpdated { task: id });
        Ok(updated)
    }

    /// Moves a task to `target` outside of a drag gesture.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] or
    /// [`BoardDomainError::ColumnNotFound`] for unknown identifiers. A
    /// limit breach is reported through the returned decision.
    pub fn move_task(
        &self,
        state: &mut BoardState,
        id: TaskId,
        target: &ColumnId,
    ) -> BoardResult<TransitionDecision> {
        let (_, decision) = state.transition(id, target)?;
        Ok(decision)
    }
}
