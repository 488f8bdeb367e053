//! Fleet coordination: task assignment, conflict detection, and the
//! coordinating controller.
//!
//! The assignment engine maps idle agents to labelled targets through one
//! of six strategies with different optimality/cost tradeoffs, from the
//! O(T·A) nearest-greedy pick to the O(n³) Hungarian matching and a
//! decentralized auction. The conflict detector inspects the resulting
//! time-indexed routes for cell-occupancy and position-swap collisions.
//!
//! Everything runs synchronously within one planning round: the grid is a
//! static snapshot, and a single coordinator mutates agent records.

pub mod assign;
pub mod conflict;
pub mod controller;
pub mod mapgen;
pub mod scout;

pub use assign::{AssignStrategy, Task, assign};
pub use conflict::{Conflict, detect_conflicts};
pub use controller::{Command, Controller};
pub use mapgen::MazeGen;
pub use scout::{ScanRecord, Scout};
