//! Column transition rules.

use super::{ColumnId, ColumnRegistry, Task, TaskStore};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a move was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RejectionReason {
    /// The target column already holds as many tasks as its limit allows.
    LimitExceeded {
        /// Target column.
        column: ColumnId,
        /// Configured work-in-progress limit.
        limit: u32,
        /// Tasks already in the column when the move was evaluated.
        occupancy: usize,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LimitExceeded {
                column,
                limit,
                occupancy,
            } => write!(
                f,
                "column {column} is at its limit of {limit} task(s) ({occupancy} present)"
            ),
        }
    }
}

/// Outcome of evaluating a proposed column change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum TransitionDecision {
    /// The move may be committed.
    Allowed,
    /// The move must not be committed.
    Rejected(RejectionReason),
}

impl TransitionDecision {
    /// Returns whether the move is allowed.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Decides whether `task` may move into `target`.
///
/// Reordering inside the current column is always allowed. Otherwise the
/// target's limit is compared against its live occupancy, so the answer
/// reflects the state at the moment of the call. Unknown targets carry no
/// limit; callers check existence before committing.
#[must_use]
pub fn can_move(
    task: &Task,
    target: &ColumnId,
    registry: &ColumnRegistry,
    store: &TaskStore,
) -> TransitionDecision {
    if task.status() == target {
        return TransitionDecision::Allowed;
    }

    let Some(column) = registry.get(target) else {
        return TransitionDecision::Allowed;
    };
    let Some(limit) = column.wip_limit() else {
        return TransitionDecision::Allowed;
    };

    let occupancy = store.count_in(target);
    if column.is_full(occupancy) {
        return TransitionDecision::Rejected(RejectionReason::LimitExceeded {
            column: target.clone(),
            limit,
            occupancy,
        });
    }
    TransitionDecision::Allowed
}
