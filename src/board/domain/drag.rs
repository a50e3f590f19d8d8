//! Pointer-drag state machine.
//!
//! The controller has three states. `AutoScrolling` is a transient sub-state
//! of a drag: it holds the same session as `Dragging` and only records that
//! the pointer currently sits inside one of the viewport's edge zones.
//!
//! ```text
//! Idle --begin--> Dragging <--pointer--> AutoScrolling
//!   ^                |                        |
//!   +---drop/cancel--+------drop/cancel-------+
//! ```

use super::{BoardDomainError, ColumnId, RejectionReason, TaskId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pointer coordinates in the host's viewport coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerPosition {
    /// Horizontal coordinate in pixels.
    pub x: i32,
    /// Vertical coordinate in pixels.
    pub y: i32,
}

impl PointerPosition {
    /// Creates a pointer position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Horizontal extent of the scrollable board container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge in pixels.
    pub left: i32,
    /// Visible width in pixels.
    pub width: u32,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub const fn new(left: i32, width: u32) -> Self {
        Self { left, width }
    }

    /// Returns the right edge in pixels.
    #[must_use]
    pub fn right(self) -> i64 {
        i64::from(self.left) + i64::from(self.width)
    }

    /// Returns the edge the pointer is close to, if any.
    ///
    /// A pointer closer than `threshold_px` to an edge (or beyond it) selects
    /// that edge. When both edges qualify the nearer one wins.
    #[must_use]
    pub fn edge_near(self, pointer: PointerPosition, threshold_px: u32) -> Option<ScrollDirection> {
        let x = i64::from(pointer.x);
        let threshold = i64::from(threshold_px);
        let to_left = x - i64::from(self.left);
        let to_right = self.right() - x;

        if to_left < threshold && to_left <= to_right {
            Some(ScrollDirection::Left)
        } else if to_right < threshold {
            Some(ScrollDirection::Right)
        } else {
            None
        }
    }
}

/// Direction of an auto-scroll step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    /// Towards the first column.
    Left,
    /// Towards the last column.
    Right,
}

impl ScrollDirection {
    /// Returns the signed pixel delta for one step of `step_px`.
    #[must_use]
    pub fn delta(self, step_px: u32) -> i32 {
        let magnitude = i32::try_from(step_px).unwrap_or(i32::MAX);
        match self {
            Self::Left => -magnitude,
            Self::Right => magnitude,
        }
    }
}

/// The task being dragged and where the drag started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSession {
    task: TaskId,
    origin: ColumnId,
    pointer: Option<PointerPosition>,
}

impl DragSession {
    /// Returns the dragged task.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the column the task occupied when the drag began.
    #[must_use]
    pub const fn origin(&self) -> &ColumnId {
        &self.origin
    }

    /// Returns the last tracked pointer position.
    #[must_use]
    pub const fn pointer(&self) -> Option<PointerPosition> {
        self.pointer
    }
}

/// State of the drag controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A task is being dragged away from the viewport edges.
    Dragging {
        /// Active session.
        session: DragSession,
    },
    /// A task is being dragged inside an edge zone.
    AutoScrolling {
        /// Active session.
        session: DragSession,
        /// Edge being scrolled towards.
        direction: ScrollDirection,
    },
}

impl DragState {
    /// Returns the active session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::Dragging { session } | Self::AutoScrolling { session, .. } => Some(session),
        }
    }

    /// Returns the current auto-scroll direction, if any.
    #[must_use]
    pub const fn scroll_direction(&self) -> Option<ScrollDirection> {
        match self {
            Self::AutoScrolling { direction, .. } => Some(*direction),
            Self::Idle | Self::Dragging { .. } => None,
        }
    }

    /// Returns whether no gesture is in progress.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Finite-state machine for a single pointer-drag gesture.
///
/// Only one task can be dragged at a time; there is no queueing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Starts dragging `task` out of `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::AlreadyActive`] when another gesture is running.
    pub fn begin(&mut self, task: TaskId, origin: ColumnId) -> Result<(), DragError> {
        if let Some(active) = self.state.session() {
            return Err(DragError::AlreadyActive(active.task()));
        }
        self.state = DragState::Dragging {
            session: DragSession {
                task,
                origin,
                pointer: None,
            },
        };
        Ok(())
    }

    /// Records a pointer move and re-evaluates edge proximity.
    ///
    /// Returns the scroll direction the board should move in, or `None` when
    /// the pointer is clear of both edges or no drag is active.
    pub fn track_pointer(
        &mut self,
        pointer: PointerPosition,
        viewport: Viewport,
        threshold_px: u32,
    ) -> Option<ScrollDirection> {
        let mut session = match std::mem::take(&mut self.state) {
            DragState::Idle => return None,
            DragState::Dragging { session } | DragState::AutoScrolling { session, .. } => session,
        };
        session.pointer = Some(pointer);

        let direction = viewport.edge_near(pointer, threshold_px);
        self.state = match direction {
            Some(direction) => DragState::AutoScrolling { session, direction },
            None => DragState::Dragging { session },
        };
        direction
    }

    /// Ends the gesture and returns its session.
    ///
    /// Used for both drops and cancellations; returns `None` when idle.
    pub fn finish(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging { session } | DragState::AutoScrolling { session, .. } => {
                Some(session)
            }
        }
    }
}

/// Result of dropping a dragged task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    /// The task moved to another column.
    Moved {
        /// Dragged task.
        task: TaskId,
        /// Previous column.
        from: ColumnId,
        /// New column.
        to: ColumnId,
    },
    /// The task was dropped back into its own column.
    Reordered {
        /// Dragged task.
        task: TaskId,
    },
    /// The move was refused; the task keeps its column.
    Rejected {
        /// Dragged task.
        task: TaskId,
        /// Why the move was refused.
        reason: RejectionReason,
    },
    /// The gesture ended without a valid target.
    Cancelled {
        /// Dragged task.
        task: TaskId,
    },
}

/// Errors returned by drag gesture commands.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DragError {
    /// Another task is already being dragged.
    #[error("task {0} is already being dragged")]
    AlreadyActive(TaskId),

    /// A drop arrived while no drag was in progress.
    #[error("no drag gesture is in progress")]
    NoActiveDrag,

    /// The board rejected the gesture.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
}
