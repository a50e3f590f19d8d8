//! The owned board: query and command surface over one [`BoardState`].

use super::{
    BoardState, ColumnDeletion, ColumnLifecycleService, DeleteColumnRequest, DeleteOutcome,
    TaskLifecycleService,
};
use crate::board::{
    config::BoardConfig,
    domain::{
        BoardDomainError, BoardEvent, BoardResult, BoardSnapshot, Column, ColumnId, ColumnTheme,
        DragController, DragError, DragState, DropOutcome, NewTask, PointerPosition,
        ScrollDirection, Task, TaskId, TaskPatch, TransitionDecision, Viewport,
    },
    ports::BoardScroller,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Task-workflow engine for a single board.
///
/// Every command takes `&mut self` and completes synchronously, so commands
/// are atomic with respect to each other. Use
/// [`BoardActor`](super::BoardActor) to serialise commands arriving from
/// several sources.
pub struct Board<C, S>
where
    C: Clock + Send + Sync,
    S: BoardScroller,
{
    state: BoardState,
    tasks: TaskLifecycleService<C>,
    columns: ColumnLifecycleService,
    drag: DragController,
    scroller: Arc<S>,
    config: BoardConfig,
}

impl<C, S> Board<C, S>
where
    C: Clock + Send + Sync,
    S: BoardScroller,
{
    /// Loads a board from a host snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidConfig`] when `config` fails
    /// [`BoardConfig::validate`] and
    /// [`BoardDomainError::InconsistentSnapshot`] when the snapshot violates
    /// a board invariant.
    pub fn from_snapshot(
        snapshot: BoardSnapshot,
        config: BoardConfig,
        clock: Arc<C>,
        scroller: Arc<S>,
    ) -> BoardResult<Self> {
        config
            .validate()
            .map_err(|err| BoardDomainError::InvalidConfig(err.to_string()))?;
        let state = BoardState::from_parts(snapshot.into_parts()?);
        info!(
            project_id = %state.project_id(),
            columns = state.registry().len(),
            tasks = state.store().len(),
            "board loaded"
        );
        Ok(Self {
            state,
            tasks: TaskLifecycleService::new(clock, config.task_defaults),
            columns: ColumnLifecycleService::new(),
            drag: DragController::new(),
            scroller,
            config,
        })
    }

    /// Returns the current board state.
    #[must_use]
    pub const fn state(&self) -> &BoardState {
        &self.state
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Captures the board for the host.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.state.snapshot()
    }

    /// Drains the notifications produced since the last call.
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        self.state.take_events()
    }

    /// Returns the columns sorted by order.
    #[must_use]
    pub fn columns(&self) -> Vec<&Column> {
        self.state.registry().list()
    }

    /// Returns the tasks in `column`, in insertion order.
    #[must_use]
    pub fn tasks_by_status(&self, column: &ColumnId) -> Vec<&Task> {
        self.state.store().tasks_by_status(column)
    }

    /// Returns a task by identifier.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.state.store().get(id)
    }

    /// Appends a custom column.
    ///
    /// # Errors
    ///
    /// See [`ColumnLifecycleService::create_column`].
    pub fn create_column(&mut self, title: &str, wip_limit: Option<u32>) -> BoardResult<Column> {
        self.columns.create_column(&mut self.state, title, wip_limit)
    }

    /// Deletes a column, migrating occupants.
    ///
    /// # Errors
    ///
    /// See [`ColumnLifecycleService::delete_column`].
    pub fn delete_column(&mut self, request: &DeleteColumnRequest) -> BoardResult<ColumnDeletion> {
        self.columns.delete_column(&mut self.state, request)
    }

    /// Changes a column's limit.
    ///
    /// # Errors
    ///
    /// See [`ColumnLifecycleService::set_column_limit`].
    pub fn set_column_limit(&mut self, column: &ColumnId, limit: Option<u32>) -> BoardResult<()> {
        self.columns.set_column_limit(&mut self.state, column, limit)
    }

    /// Renames a column.
    ///
    /// # Errors
    ///
    /// See [`ColumnLifecycleService::rename_column`].
    pub fn rename_column(&mut self, column: &ColumnId, title: &str) -> BoardResult<()> {
        self.columns.rename_column(&mut self.state, column, title)
    }

    /// Changes a column's theme tag.
    ///
    /// # Errors
    ///
    /// See [`ColumnLifecycleService::set_column_theme`].
    pub fn set_column_theme(
        &mut self,
        column: &ColumnId,
        theme: Option<ColumnTheme>,
    ) -> BoardResult<()> {
        self.columns.set_column_theme(&mut self.state, column, theme)
    }

    /// Changes the entry column.
    ///
    /// # Errors
    ///
    /// See [`ColumnLifecycleService::set_entry_column`].
    pub fn set_entry_column(&mut self, column: &ColumnId) -> BoardResult<()> {
        self.columns.set_entry_column(&mut self.state, column)
    }

    /// Creates a task in `column`.
    ///
    /// # Errors
    ///
    /// See [`TaskLifecycleService::create_task`].
    pub fn create_task(&mut self, column: &ColumnId, fields: NewTask) -> BoardResult<Task> {
        self.tasks.create_task(&mut self.state, column, fields)
    }

    /// Duplicates a task into the entry column.
    ///
    /// # Errors
    ///
    /// See [`TaskLifecycleService::duplicate_task`].
    pub fn duplicate_task(&mut self, id: TaskId) -> BoardResult<Task> {
        self.tasks.duplicate_task(&mut self.state, id)
    }

    /// Deletes a task. Idempotent.
    pub fn delete_task(&mut self, id: TaskId) -> DeleteOutcome {
        self.tasks.delete_task(&mut self.state, id)
    }

    /// Patches a task.
    ///
    /// # Errors
    ///
    /// See [`TaskLifecycleService::update_task`].
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> BoardResult<Task> {
        self.tasks.update_task(&mut self.state, id, patch)
    }

    /// Moves a task programmatically.
    ///
    /// # Errors
    ///
    /// See [`TaskLifecycleService::move_task`].
    pub fn move_task(&mut self, id: TaskId, target: &ColumnId) -> BoardResult<TransitionDecision> {
        self.tasks.move_task(&mut self.state, id, target)
    }

    /// Returns the drag controller's state.
    #[must_use]
    pub const fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Starts dragging a task.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::AlreadyActive`] while another drag runs and
    /// [`DragError::Domain`] for an unknown task.
    pub fn begin_drag(&mut self, id: TaskId) -> Result<(), DragError> {
        if let Some(active) = self.drag.state().session() {
            return Err(DragError::AlreadyActive(active.task()));
        }
        let Some(origin) = self.state.store().get(id).map(|task| task.status().clone()) else {
            warn!(task_id = %id, "drag requested for unknown task");
            return Err(BoardDomainError::TaskNotFound(id).into());
        };
        self.drag.begin(id, origin.clone())?;

        info!(task_id = %id, column = %origin, "drag started");
        self.state.record(BoardEvent::DragStarted { task: id });
        Ok(())
    }

    /// Feeds a pointer move into the drag controller.
    ///
    /// While the pointer sits inside an edge zone each call scrolls the board
    /// one step towards that edge. Ignored when no drag is active.
    pub fn update_pointer(
        &mut self,
        pointer: PointerPosition,
        viewport: Viewport,
    ) -> Option<ScrollDirection> {
        let direction =
            self.drag
                .track_pointer(pointer, viewport, self.config.auto_scroll.edge_threshold_px);
        debug!(x = pointer.x, y = pointer.y, ?direction, "drag pointer moved");
        if let Some(direction) = direction {
            self.scroll_step(direction);
        }
        direction
    }

    /// Scrolls one step if the drag is auto-scrolling.
    ///
    /// Hosts or timers call this at a fixed interval; it does nothing once
    /// the pointer leaves the edge zone or the drag ends.
    pub fn auto_scroll_tick(&mut self) -> Option<ScrollDirection> {
        let direction = self.drag.state().scroll_direction()?;
        self.scroll_step(direction);
        Some(direction)
    }

    fn scroll_step(&self, direction: ScrollDirection) {
        self.scroller
            .scroll_by(direction.delta(self.config.auto_scroll.step_px));
    }

    /// Drops the dragged task onto `target` and returns to idle.
    ///
    /// The limit is evaluated now, against the live occupancy. Dropping on an
    /// unknown column counts as a cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NoActiveDrag`] when idle and
    /// [`DragError::Domain`] when the dragged task disappeared mid-drag.
    pub fn drop(&mut self, target: &ColumnId) -> Result<DropOutcome, DragError> {
        let session = self.drag.finish().ok_or(DragError::NoActiveDrag)?;
        let task = session.task();

        if !self.state.registry().contains(target) {
            info!(task_id = %task, target = %target, "drag dropped outside a column");
            self.state.record(BoardEvent::DragCancelled { task });
            return Ok(DropOutcome::Cancelled { task });
        }

        let (from, decision) = self.state.transition(task, target)?;
        Ok(match decision {
            TransitionDecision::Allowed if from == *target => DropOutcome::Reordered { task },
            TransitionDecision::Allowed => DropOutcome::Moved {
                task,
                from,
                to: target.clone(),
            },
            TransitionDecision::Rejected(reason) => DropOutcome::Rejected { task, reason },
        })
    }

    /// Aborts the drag without changing anything.
    ///
    /// Returns the dragged task, or `None` when no drag was active.
    pub fn cancel_drag(&mut self) -> Option<TaskId> {
        let session = self.drag.finish()?;
        let task = session.task();
        info!(task_id = %task, "drag cancelled");
        self.state.record(BoardEvent::DragCancelled { task });
        Some(task)
    }
}
