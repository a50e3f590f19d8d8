//! Scroller that accumulates the requested offset.

use std::sync::{
    Arc,
    atomic::{AtomicI64, AtomicUsize, Ordering},
};

use crate::board::ports::BoardScroller;

/// Records scroll requests instead of moving a real container.
///
/// Clones share the same counters, so a test can keep one clone while the
/// board owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingScroller {
    offset: Arc<AtomicI64>,
    steps: Arc<AtomicUsize>,
}

impl RecordingScroller {
    /// Creates a scroller at offset zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sum of all requested deltas.
    #[must_use]
    pub fn offset(&self) -> i64 {
        self.offset.load(Ordering::SeqCst)
    }

    /// Returns how many scroll requests were made.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps.load(Ordering::SeqCst)
    }
}

impl BoardScroller for RecordingScroller {
    fn scroll_by(&self, delta_px: i32) {
        self.offset.fetch_add(i64::from(delta_px), Ordering::SeqCst);
        self.steps.fetch_add(1, Ordering::SeqCst);
    }
}
