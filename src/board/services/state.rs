//! Mutable board state shared by the lifecycle services.

use crate::board::domain::{
    BoardDomainError, BoardEvent, BoardParts, BoardResult, BoardSnapshot, ColumnId,
    ColumnRegistry, MemberId, ProjectId, TaskId, TaskStore, TransitionDecision, can_move,
};
use tracing::{info, warn};

/// The `{columns, tasks}` collection plus project context.
///
/// Services mutate it and record a [`BoardEvent`] for every effect; the
/// owner drains the events after each command.
#[derive(Debug, Clone)]
pub struct BoardState {
    project_id: ProjectId,
    members: Vec<MemberId>,
    registry: ColumnRegistry,
    store: TaskStore,
    pending_events: Vec<BoardEvent>,
}

impl BoardState {
    /// Wraps validated snapshot parts.
    #[must_use]
    pub fn from_parts(parts: BoardParts) -> Self {
        Self {
            project_id: parts.project_id,
            members: parts.members,
            registry: parts.registry,
            store: parts.store,
            pending_events: Vec::new(),
        }
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns the project roster.
    #[must_use]
    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    /// Returns the column registry.
    #[must_use]
    pub const fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    /// Returns the task store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    pub(crate) const fn registry_mut(&mut self) -> &mut ColumnRegistry {
        &mut self.registry
    }

    pub(crate) const fn store_mut(&mut self) -> &mut TaskStore {
        &mut self.store
    }

    /// Captures the current state for the host.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_parts(
            self.project_id.clone(),
            self.members.clone(),
            &self.registry,
            &self.store,
        )
    }

    /// Checks that `member` may be assigned work.
    ///
    /// An empty roster disables the check.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownMember`] for members outside a
    /// non-empty roster.
    pub fn ensure_member(&self, member: &MemberId) -> BoardResult<()> {
        if self.members.is_empty() || self.members.contains(member) {
            return Ok(());
        }
        Err(BoardDomainError::UnknownMember(member.clone()))
    }

    /// Checks that `column` exists.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] when absent.
    pub fn ensure_column(&self, column: &ColumnId) -> BoardResult<()> {
        if self.registry.contains(column) {
            return Ok(());
        }
        Err(BoardDomainError::ColumnNotFound(column.clone()))
    }

    /// Validates and, when allowed, commits a column change.
    ///
    /// Returns the column the task occupied before the call together with
    /// the decision. Rejected moves leave the task untouched.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] or
    /// [`BoardDomainError::ColumnNotFound`] for unknown identifiers.
    pub fn transition(
        &mut self,
        task_id: TaskId,
        target: &ColumnId,
    ) -> BoardResult<(ColumnId, TransitionDecision)> {
        let Some(task) = self.store.get(task_id) else {
            warn!(task_id = %task_id, to = %target, "move requested for unknown task");
            return Err(BoardDomainError::TaskNotFound(task_id));
        };
        if let Err(err) = self.ensure_column(target) {
            warn!(task_id = %task_id, to = %target, "move targets an unknown column");
            return Err(err);
        }

        let from = task.status().clone();
        let decision = can_move(task, target, &self.registry, &self.store);
        match &decision {
            TransitionDecision::Allowed if from == *target => {}
            TransitionDecision::Allowed => {
                self.store.set_status(task_id, target.clone())?;
                info!(task_id = %task_id, from = %from, to = %target, "task moved");
                self.record(BoardEvent::TaskMoved {
                    task: task_id,
                    from: from.clone(),
                    to: target.clone(),
                });
            }
            TransitionDecision::Rejected(reason) => {
                warn!(task_id = %task_id, to = %target, %reason, "move rejected");
                self.record(BoardEvent::MoveRejected {
                    task: task_id,
                    reason: reason.clone(),
                });
            }
        }
        Ok((from, decision))
    }

    /// Queues a notification for the host.
    pub(crate) fn record(&mut self, event: BoardEvent) {
        self.pending_events.push(event);
    }

    /// Drains queued notifications.
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
