//! In-memory snapshot publisher for tests and offline replay.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{BoardEvent, BoardSnapshot},
    ports::{SnapshotPublisher, SnapshotPublisherError, SnapshotPublisherResult},
};

/// Thread-safe publisher that records everything it is handed.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotPublisher {
    state: Arc<RwLock<InMemoryPublisherState>>,
}

#[derive(Debug, Default)]
struct InMemoryPublisherState {
    snapshots: Vec<BoardSnapshot>,
    events: Vec<BoardEvent>,
    closed: bool,
}

fn poisoned(err: &impl std::fmt::Display) -> SnapshotPublisherError {
    SnapshotPublisherError::host(std::io::Error::other(err.to_string()))
}

impl InMemorySnapshotPublisher {
    /// Creates an empty publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops accepting updates; later calls fail with
    /// [`SnapshotPublisherError::Closed`].
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotPublisherError::Host`] if the lock is poisoned.
    pub fn close(&self) -> SnapshotPublisherResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.closed = true;
        Ok(())
    }

    /// Returns every snapshot received, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotPublisherError::Host`] if the lock is poisoned.
    pub fn snapshots(&self) -> SnapshotPublisherResult<Vec<BoardSnapshot>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.snapshots.clone())
    }

    /// Returns the most recent snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotPublisherError::Host`] if the lock is poisoned.
    pub fn latest_snapshot(&self) -> SnapshotPublisherResult<Option<BoardSnapshot>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.snapshots.last().cloned())
    }

    /// Returns every notification received, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotPublisherError::Host`] if the lock is poisoned.
    pub fn events(&self) -> SnapshotPublisherResult<Vec<BoardEvent>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.events.clone())
    }
}

#[async_trait]
impl SnapshotPublisher for InMemorySnapshotPublisher {
    async fn publish_snapshot(&self, snapshot: &BoardSnapshot) -> SnapshotPublisherResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.closed {
            return Err(SnapshotPublisherError::Closed);
        }
        state.snapshots.push(snapshot.clone());
        Ok(())
    }

    async fn notify(&self, event: &BoardEvent) -> SnapshotPublisherResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.closed {
            return Err(SnapshotPublisherError::Closed);
        }
        state.events.push(event.clone());
        Ok(())
    }
}
