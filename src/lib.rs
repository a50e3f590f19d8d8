//! Atelier: task-workflow engine for kanban boards.
//!
//! This crate validates and applies board commands: creating and deleting
//! columns, creating, duplicating, updating and moving tasks, and enforcing
//! per-column work-in-progress limits while a task is dragged between
//! columns.
//!
//! # Architecture
//!
//! Atelier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the host
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`board`]: Columns, tasks, transitions and drag handling

pub mod board;
