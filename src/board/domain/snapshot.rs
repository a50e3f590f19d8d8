//! Serialisable board state exchanged with the host.

use super::{
    BoardDomainError, Column, ColumnId, ColumnRegistry, MemberId, ProjectId, Task, TaskStore,
};
use serde::{Deserialize, Serialize};

/// Complete board state as received from and handed back to the host.
///
/// Columns are listed by `order` and tasks in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Project owning the board.
    pub project_id: ProjectId,
    /// Members tasks may be assigned to.
    #[serde(default)]
    pub members: Vec<MemberId>,
    /// Board columns.
    pub columns: Vec<Column>,
    /// Board tasks.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Column receiving new and duplicated tasks.
    pub entry_column: ColumnId,
}

impl BoardSnapshot {
    /// Creates an empty board with the standard default columns.
    #[must_use]
    pub fn with_default_columns(project_id: ProjectId, members: Vec<MemberId>) -> Self {
        let registry = ColumnRegistry::with_defaults();
        Self::from_parts(project_id, members, &registry, &TaskStore::new())
    }

    /// Captures the given registry and store.
    #[must_use]
    pub fn from_parts(
        project_id: ProjectId,
        members: Vec<MemberId>,
        registry: &ColumnRegistry,
        store: &TaskStore,
    ) -> Self {
        Self {
            project_id,
            members,
            columns: registry.list().into_iter().cloned().collect(),
            tasks: store.iter().cloned().collect(),
            entry_column: registry.entry_column().clone(),
        }
    }

    /// Rebuilds the registry and store, checking every board invariant.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InconsistentSnapshot`] when column orders
    /// or identifiers collide, no default column exists, the entry column is
    /// missing, a task id repeats, or a task references an unknown column.
    pub fn into_parts(self) -> Result<BoardParts, BoardDomainError> {
        let registry = ColumnRegistry::new(self.columns, self.entry_column).map_err(|err| {
            match err {
                BoardDomainError::InconsistentSnapshot(_) => err,
                other => BoardDomainError::InconsistentSnapshot(other.to_string()),
            }
        })?;

        let mut store = TaskStore::new();
        for task in self.tasks {
            if !registry.contains(task.status()) {
                return Err(BoardDomainError::InconsistentSnapshot(format!(
                    "task {} references unknown column {}",
                    task.id(),
                    task.status()
                )));
            }
            store
                .add(task)
                .map_err(|err| BoardDomainError::InconsistentSnapshot(err.to_string()))?;
        }

        Ok(BoardParts {
            project_id: self.project_id,
            members: self.members,
            registry,
            store,
        })
    }
}

/// Validated pieces of a [`BoardSnapshot`].
#[derive(Debug, Clone)]
pub struct BoardParts {
    /// Project owning the board.
    pub project_id: ProjectId,
    /// Members tasks may be assigned to.
    pub members: Vec<MemberId>,
    /// Column registry.
    pub registry: ColumnRegistry,
    /// Task store.
    pub store: TaskStore,
}
