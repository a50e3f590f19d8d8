//! Single-writer actor that serialises board commands.
//!
//! The actor owns the [`Board`] on a tokio task. Callers talk to it through a
//! cloneable [`BoardHandle`]; every request is queued on a bounded channel and
//! applied in arrival order, so no two commands ever interleave. After each
//! command the actor drains the board's events, hands a fresh snapshot to the
//! [`SnapshotPublisher`] when the board changed, and forwards every event.
//!
//! While a drag sits in an edge zone the actor runs a ticker that feeds
//! auto-scroll steps back through the same queue.

use super::{
    Board, BoardCommand, ColumnDeletion, CommandError, CommandOutput, DeleteColumnRequest,
    DeleteOutcome,
};
use crate::board::{
    domain::{
        BoardDomainError, BoardEvent, BoardSnapshot, Column, ColumnId, ColumnTheme, DragError,
        DragState, DropOutcome, NewTask, PointerPosition, ScrollDirection, Task, TaskId,
        TaskPatch, TransitionDecision, Viewport,
    },
    ports::{BoardScroller, SnapshotPublisher},
};
use mockable::Clock;
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tokio::{
    sync::{
        mpsc::{self, error::TrySendError},
        oneshot,
    },
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};
use tracing::{debug, info, warn};

type Job<C, S> = Box<dyn FnOnce(&mut Board<C, S>) + Send>;

enum Message<C, S>
where
    C: Clock + Send + Sync,
    S: BoardScroller,
{
    Job(Job<C, S>),
    Tick,
}

/// Errors returned by [`BoardHandle`] requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardActorError {
    /// The actor has stopped and no longer accepts requests.
    #[error("board actor is closed")]
    Closed,

    /// Board validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// The drag controller refused the request.
    #[error(transparent)]
    Drag(#[from] DragError),

    /// A serialised command was rejected.
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Owner of a [`Board`] running on its own task.
pub struct BoardActor<C, S, P>
where
    C: Clock + Send + Sync + 'static,
    S: BoardScroller + 'static,
    P: SnapshotPublisher + ?Sized,
{
    board: Board<C, S>,
    publisher: Arc<P>,
    receiver: mpsc::Receiver<Message<C, S>>,
    ticks: mpsc::WeakSender<Message<C, S>>,
    ticker: Option<JoinHandle<()>>,
}

impl<C, S, P> BoardActor<C, S, P>
where
    C: Clock + Send + Sync + 'static,
    S: BoardScroller + 'static,
    P: SnapshotPublisher + ?Sized + 'static,
{
    /// Starts an actor for `board` and returns a handle to it.
    ///
    /// The queue capacity comes from the board's configuration. The actor
    /// stops once every handle has been dropped; the returned join handle
    /// resolves at that point.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(board: Board<C, S>, publisher: Arc<P>) -> (BoardHandle<C, S>, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(board.config().actor_queue_depth);
        let actor = Self {
            board,
            publisher,
            receiver,
            ticks: sender.downgrade(),
            ticker: None,
        };
        let join = tokio::spawn(actor.run());
        (BoardHandle { sender }, join)
    }

    async fn run(mut self) {
        info!(project_id = %self.board.state().project_id(), "board actor started");
        while let Some(message) = self.receiver.recv().await {
            match message {
                Message::Job(job) => job(&mut self.board),
                Message::Tick => {
                    self.board.auto_scroll_tick();
                }
            }
            self.sync_ticker();
            self.flush().await;
        }
        self.stop_ticker();
        info!(project_id = %self.board.state().project_id(), "board actor stopped");
    }

    fn sync_ticker(&mut self) {
        let scrolling = self.board.drag_state().scroll_direction().is_some();
        if scrolling && self.ticker.is_none() {
            let period = self.board.config().auto_scroll.tick_interval();
            debug!(?period, "auto-scroll ticker started");
            self.ticker = Some(spawn_ticker(self.ticks.clone(), period));
        } else if !scrolling {
            self.stop_ticker();
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            debug!("auto-scroll ticker stopped");
        }
    }

    async fn flush(&mut self) {
        let events = self.board.take_events();
        if events.is_empty() {
            return;
        }

        if events.iter().any(BoardEvent::changes_board) {
            let snapshot = self.board.snapshot();
            if let Err(err) = self.publisher.publish_snapshot(&snapshot).await {
                warn!(error = %err, "failed to publish board snapshot");
            }
        }
        for event in &events {
            if let Err(err) = self.publisher.notify(event).await {
                warn!(error = %err, ?event, "failed to deliver board notification");
            }
        }
    }
}

fn spawn_ticker<C, S>(ticks: mpsc::WeakSender<Message<C, S>>, period: Duration) -> JoinHandle<()>
where
    C: Clock + Send + Sync + 'static,
    S: BoardScroller + 'static,
{
    tokio::spawn(async move {
        let mut timer = interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The pointer update that started scrolling already moved one step.
        timer.tick().await;
        loop {
            timer.tick().await;
            let Some(sender) = ticks.upgrade() else {
                break;
            };
            match sender.try_send(Message::Tick) {
                Ok(()) | Err(TrySendError::Full(_)) => {}
                Err(TrySendError::Closed(_)) => break,
            }
        }
    })
}

/// Cloneable handle for sending requests to a [`BoardActor`].
pub struct BoardHandle<C, S>
where
    C: Clock + Send + Sync,
    S: BoardScroller,
{
    sender: mpsc::Sender<Message<C, S>>,
}

impl<C, S> Clone for BoardHandle<C, S>
where
    C: Clock + Send + Sync,
    S: BoardScroller,
{
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<C, S> BoardHandle<C, S>
where
    C: Clock + Send + Sync + 'static,
    S: BoardScroller + 'static,
{
    async fn call<T, F>(&self, request: F) -> Result<T, BoardActorError>
    where
        F: FnOnce(&mut Board<C, S>) -> T + Send + 'static,
        T: Send + 'static,
    {
        let (reply, response) = oneshot::channel();
        let job: Job<C, S> = Box::new(move |board| {
            if reply.send(request(board)).is_err() {
                debug!("board request caller went away before the reply");
            }
        });
        self.sender
            .send(Message::Job(job))
            .await
            .map_err(|_| BoardActorError::Closed)?;
        response.await.map_err(|_| BoardActorError::Closed)
    }

    /// Returns whether the actor has stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Captures the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Closed`] when the actor has stopped.
    pub async fn snapshot(&self) -> Result<BoardSnapshot, BoardActorError> {
        self.call(|board| board.snapshot()).await
    }

    /// Returns the columns sorted by order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Closed`] when the actor has stopped.
    pub async fn columns(&self) -> Result<Vec<Column>, BoardActorError> {
        self.call(|board| board.columns().into_iter().cloned().collect())
            .await
    }

    /// Returns the tasks in `column`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Closed`] when the actor has stopped.
    pub async fn tasks_by_status(&self, column: ColumnId) -> Result<Vec<Task>, BoardActorError> {
        self.call(move |board| board.tasks_by_status(&column).into_iter().cloned().collect())
            .await
    }

    /// Returns the drag controller's state.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Closed`] when the actor has stopped.
    pub async fn drag_state(&self) -> Result<DragState, BoardActorError> {
        self.call(|board| board.drag_state().clone()).await
    }

    /// Appends a custom column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Domain`] when the board rejects it.
    pub async fn create_column(
        &self,
        title: String,
        wip_limit: Option<u32>,
    ) -> Result<Column, BoardActorError> {
        Ok(self
            .call(move |board| board.create_column(&title, wip_limit))
            .await??)
    }

    /// Deletes a column, migrating occupants.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Domain`] when the board rejects it.
    pub async fn delete_column(
        &self,
        request: DeleteColumnRequest,
    ) -> Result<ColumnDeletion, BoardActorError> {
        Ok(self
            .call(move |board| board.delete_column(&request))
            .await??)
    }

    /// Changes a column's limit.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Domain`] when the column is absent.
    pub async fn set_column_limit(
        &self,
        column: ColumnId,
        limit: Option<u32>,
    ) -> Result<(), BoardActorError> {
        Ok(self
            .call(move |board| board.set_column_limit(&column, limit))
            .await??)
    }

    /// Renames a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Domain`] when the board rejects it.
    pub async fn rename_column(
        &self,
        column: ColumnId,
        title: String,
    ) -> Result<(), BoardActorError> {
        Ok(self
            .call(move |board| board.rename_column(&column, &title))
            .await??)
    }

    /// Changes a column's theme tag.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Domain`] when the column is absent.
    pub async fn set_column_theme(
        &self,
        column: ColumnId,
        theme: Option<ColumnTheme>,
    ) -> Result<(), BoardActorError> {
        Ok(self
            .call(move |board| board.set_column_theme(&column, theme))
            .await??)
    }

    /// Changes the entry column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Domain`] when the column is absent.
    pub async fn set_entry_column(&self, column: ColumnId) -> Result<(), BoardActorError> {
        Ok(self
            .call(move |board| board.set_entry_column(&column))
            .await??)
    }

    /// Creates a task in `column`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Domain`] when the board rejects it.
    pub async fn create_task(
        &self,
        column: ColumnId,
        fields: NewTask,
    ) -> Result<Task, BoardActorError> {
        Ok(self
            .call(move |board| board.create_task(&column, fields))
            .await??)
    }

    /// Duplicates a task into the entry column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Domain`] when the task is absent.
    pub async fn duplicate_task(&self, id: TaskId) -> Result<Task, BoardActorError> {
        Ok(self.call(move |board| board.duplicate_task(id)).await??)
    }

    /// Deletes a task. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Closed`] when the actor has stopped.
    pub async fn delete_task(&self, id: TaskId) -> Result<DeleteOutcome, BoardActorError> {
        self.call(move |board| board.delete_task(id)).await
    }

    /// Patches a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Domain`] when the board rejects it.
    pub async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task, BoardActorError> {
        Ok(self
            .call(move |board| board.update_task(id, patch))
            .await??)
    }

    /// Moves a task programmatically.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Domain`] for an unknown task or column.
    pub async fn move_task(
        &self,
        id: TaskId,
        target: ColumnId,
    ) -> Result<TransitionDecision, BoardActorError> {
        Ok(self
            .call(move |board| board.move_task(id, &target))
            .await??)
    }

    /// Starts dragging a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Drag`] while another drag runs or for an
    /// unknown task.
    pub async fn begin_drag(&self, id: TaskId) -> Result<(), BoardActorError> {
        Ok(self.call(move |board| board.begin_drag(id)).await??)
    }

    /// Feeds a pointer move into the drag controller.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Closed`] when the actor has stopped.
    pub async fn update_pointer(
        &self,
        pointer: PointerPosition,
        viewport: Viewport,
    ) -> Result<Option<ScrollDirection>, BoardActorError> {
        self.call(move |board| board.update_pointer(pointer, viewport))
            .await
    }

    /// Drops the dragged task onto `target`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Drag`] when no drag is active.
    pub async fn drop(&self, target: ColumnId) -> Result<DropOutcome, BoardActorError> {
        Ok(self.call(move |board| board.drop(&target)).await??)
    }

    /// Aborts the drag.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Closed`] when the actor has stopped.
    pub async fn cancel_drag(&self) -> Result<Option<TaskId>, BoardActorError> {
        self.call(Board::cancel_drag).await
    }

    /// Executes a serialised command.
    ///
    /// # Errors
    ///
    /// Returns [`BoardActorError::Command`] when the board rejects it.
    pub async fn execute(&self, command: BoardCommand) -> Result<CommandOutput, BoardActorError> {
        Ok(self.call(move |board| board.execute(command)).await??)
    }
}
