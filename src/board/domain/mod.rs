//! Domain model for the task-workflow board.
//!
//! Columns, tasks, the transition rule and the drag state machine live here
//! as plain values with no infrastructure dependencies. A task's `status` is
//! a logical foreign key into the [`ColumnRegistry`], resolved by lookup.

mod column;
mod drag;
mod error;
mod event;
mod ids;
mod registry;
mod snapshot;
mod store;
mod task;
mod transition;

pub use column::{Column, ColumnTheme, ColumnTitle};
pub use drag::{
    DragController, DragError, DragSession, DragState, DropOutcome, PointerPosition,
    ScrollDirection, Viewport,
};
pub use error::{BoardDomainError, BoardResult, ParsePriorityError};
pub use event::BoardEvent;
pub use ids::{ColumnId, MemberId, ProjectId, TaskId};
pub use registry::ColumnRegistry;
pub use snapshot::{BoardParts, BoardSnapshot};
pub use store::TaskStore;
pub use task::{Hours, NewTask, Priority, Task, TaskDefaults, TaskPatch, TaskTitle};
pub use transition::{RejectionReason, TransitionDecision, can_move};
