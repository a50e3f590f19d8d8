//! Step definitions for board workflow scenarios.

pub mod world;

mod given;
mod then;
mod when;
