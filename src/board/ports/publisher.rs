//! Publisher port through which the engine hands state back to the host.

use crate::board::domain::{BoardEvent, BoardSnapshot};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for publisher operations.
pub type SnapshotPublisherResult<T> = Result<T, SnapshotPublisherError>;

/// Receives updated snapshots and typed notifications.
///
/// The host owns durability and rendering. The engine never rolls back a
/// committed command because publishing failed.
#[async_trait]
pub trait SnapshotPublisher: Send + Sync {
    /// Hands over the board state after a successful mutation.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotPublisherError`] when the host cannot accept it.
    async fn publish_snapshot(&self, snapshot: &BoardSnapshot) -> SnapshotPublisherResult<()>;

    /// Hands over a notification describing a command's effect.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotPublisherError`] when the host cannot accept it.
    async fn notify(&self, event: &BoardEvent) -> SnapshotPublisherResult<()>;
}

/// Errors returned by publisher implementations.
#[derive(Debug, Clone, Error)]
pub enum SnapshotPublisherError {
    /// The host is no longer accepting updates.
    #[error("snapshot publisher is closed")]
    Closed,

    /// Host-side failure.
    #[error("host error: {0}")]
    Host(Arc<dyn std::error::Error + Send + Sync>),
}

impl SnapshotPublisherError {
    /// Wraps a host-side error.
    pub fn host(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Host(Arc::new(err))
    }
}
