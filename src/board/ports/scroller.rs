//! Scroll port driven by drag auto-scroll.

/// Scrolls the host's board container horizontally.
///
/// Called once per auto-scroll step with a signed pixel delta; negative
/// values scroll towards the first column.
#[cfg_attr(test, mockall::automock)]
pub trait BoardScroller: Send + Sync {
    /// Scrolls the container by `delta_px` pixels.
    fn scroll_by(&self, delta_px: i32);
}
