//! In-memory adapters used by tests and the replay tool.

mod publisher;
mod scroller;

pub use publisher::InMemorySnapshotPublisher;
pub use scroller::RecordingScroller;
