//! Application services for board commands.
//!
//! [`Board`] is the synchronous command surface; [`BoardActor`] wraps it for
//! hosts that submit commands from several tasks.

mod actor;
mod board;
mod column_lifecycle;
mod command;
mod state;
mod task_lifecycle;

pub use actor::{BoardActor, BoardActorError, BoardHandle};
pub use board::Board;
pub use column_lifecycle::{ColumnDeletion, ColumnLifecycleService, DeleteColumnRequest};
pub use command::{BoardCommand, CommandError, CommandOutput};
pub use state::BoardState;
pub use task_lifecycle::{DeleteOutcome, TaskLifecycleService};
