//! Error types for board domain validation and parsing.

use super::{ColumnId, MemberId, TaskId};
use thiserror::Error;

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardDomainError>;

/// Errors returned by board domain operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The column title is empty after trimming.
    #[error("column title must not be empty")]
    EmptyColumnTitle,

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// An hour estimate is negative or not a finite number.
    #[error("invalid hour value {0}, expected a finite non-negative number")]
    InvalidHours(String),

    /// The column identifier is empty or contains whitespace.
    #[error("invalid column identifier '{0}'")]
    InvalidColumnId(String),

    /// Another column already occupies the requested order slot.
    #[error("column order {order} is already taken by column {existing}")]
    DuplicateOrder {
        /// Requested order value.
        order: u32,
        /// Column currently holding the order value.
        existing: ColumnId,
    },

    /// A column with the same identifier already exists.
    #[error("duplicate column identifier: {0}")]
    DuplicateColumn(ColumnId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The column was not found.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Default columns and the entry column can never be removed.
    #[error("column {0} is protected (default or entry column) and cannot be deleted")]
    ProtectedColumn(ColumnId),

    /// The fallback column for a deletion is missing or is the deleted column.
    #[error("column {0} is not a valid migration target")]
    InvalidFallback(ColumnId),

    /// The column still holds tasks and the caller did not confirm migration.
    #[error("column {column} holds {occupancy} task(s); migration must be confirmed")]
    MigrationNotConfirmed {
        /// Column scheduled for deletion.
        column: ColumnId,
        /// Number of tasks that would be migrated.
        occupancy: usize,
    },

    /// The assignee is not a member of the project.
    #[error("member {0} does not belong to the project")]
    UnknownMember(MemberId),

    /// A host-supplied snapshot violates a board invariant.
    #[error("inconsistent board snapshot: {0}")]
    InconsistentSnapshot(String),

    /// The engine configuration holds an unusable value.
    #[error("invalid board configuration: {0}")]
    InvalidConfig(String),
}

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
