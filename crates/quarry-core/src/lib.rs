//! Core data model for grid-based fleet coordination.
//!
//! This crate holds the value types shared by every other `quarry` crate:
//!
//! - [`Cell`] — an integer grid coordinate (row, col)
//! - [`Grid`] / [`Terrain`] — the immutable walkable/blocked cell matrix
//! - [`TargetSet`] — labelled target cells for one assignment round
//! - [`AgentRecord`] — a fleet agent with an append-only event history
//! - [`Error`] — the shared error taxonomy
//!
//! Unreachable goals are not errors: pathfinding surfaces them as empty
//! [`Route`]s so callers can skip or retry with another strategy.

pub mod agent;
pub mod cell;
pub mod error;
pub mod grid;
pub mod targets;

pub use agent::{AgentEvent, AgentRecord};
pub use cell::{Cell, Route};
pub use error::Error;
pub use grid::{Grid, Terrain};
pub use targets::TargetSet;
