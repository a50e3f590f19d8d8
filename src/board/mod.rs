//! Kanban task-workflow engine.
//!
//! A board is an ordered set of columns, each with an optional
//! work-in-progress limit, and the tasks placed in them. The engine validates
//! every create, update, move and delete against the board's invariants and
//! drives the pointer-drag gesture used to move tasks. Persistence and
//! rendering belong to the host, which receives snapshots and notifications
//! through [`ports::SnapshotPublisher`]. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Engine settings in [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
