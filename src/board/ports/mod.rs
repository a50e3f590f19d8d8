//! Port contracts for the board engine.
//!
//! Ports describe what the engine needs from its host: somewhere to hand
//! updated snapshots and notifications, and a way to scroll the board while a
//! task is dragged near the viewport edge.

pub mod publisher;
pub mod scroller;

pub use publisher::{SnapshotPublisher, SnapshotPublisherError, SnapshotPublisherResult};
pub use scroller::BoardScroller;

#[cfg(test)]
pub use scroller::MockBoardScroller;
