//! Task collection keyed by identity.

use super::{BoardDomainError, ColumnId, Task, TaskId, TaskPatch};
use std::collections::HashMap;

/// Owns the board's tasks.
///
/// Reads preserve insertion order; nothing is re-sorted on read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStore {
    tasks: HashMap<TaskId, Task>,
    insertion_order: Vec<TaskId>,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the task with the given identifier.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Returns whether the task exists.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Iterates all tasks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.insertion_order
            .iter()
            .filter_map(|id| self.tasks.get(id))
    }

    /// Returns the tasks occupying `column` in insertion order.
    #[must_use]
    pub fn tasks_by_status(&self, column: &ColumnId) -> Vec<&Task> {
        self.iter().filter(|task| task.status() == column).collect()
    }

    /// Returns how many tasks occupy `column`.
    #[must_use]
    pub fn count_in(&self, column: &ColumnId) -> usize {
        self.tasks
            .values()
            .filter(|task| task.status() == column)
            .count()
    }

    /// Stores a new task at the end of the insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateTask`] when the identifier is
    /// already present.
    pub fn add(&mut self, task: Task) -> Result<(), BoardDomainError> {
        if self.contains(task.id()) {
            return Err(BoardDomainError::DuplicateTask(task.id()));
        }
        self.insertion_order.push(task.id());
        self.tasks.insert(task.id(), task);
        Ok(())
    }

    /// Removes a task, returning it when it was present.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let removed = self.tasks.remove(&id)?;
        self.insertion_order.retain(|existing| *existing != id);
        Some(removed)
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is absent, or
    /// the patch validation error.
    pub fn update(&mut self, id: TaskId, patch: TaskPatch) -> Result<&Task, BoardDomainError> {
        let task = self
            .tasks
            .get_mut(&id)
            .ok_or(BoardDomainError::TaskNotFound(id))?;
        task.apply_patch(patch)?;
        Ok(task)
    }

    /// Rewrites a single task's status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is absent.
    pub(crate) fn set_status(
        &mut self,
        id: TaskId,
        status: ColumnId,
    ) -> Result<&Task, BoardDomainError> {
        let task = self
            .tasks
            .get_mut(&id)
            .ok_or(BoardDomainError::TaskNotFound(id))?;
        task.set_status(status);
        Ok(task)
    }

    /// Moves every occupant of `from` into `to`, returning the moved ids in
    /// insertion order.
    pub(crate) fn reassign_status(&mut self, from: &ColumnId, to: &ColumnId) -> Vec<TaskId> {
        let moved: Vec<TaskId> = self
            .tasks_by_status(from)
            .into_iter()
            .map(Task::id)
            .collect();
        for id in &moved {
            if let Some(task) = self.tasks.get_mut(id) {
                task.set_status(to.clone());
            }
        }
        moved
    }
}
