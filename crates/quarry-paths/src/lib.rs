//! Pathfinding strategies for grid fleets.
//!
//! Five interchangeable search strategies share one contract: given start
//! and goal cells, produce an ordered route or report unreachability.
//!
//! | Strategy | Frontier | Optimal on a uniform grid |
//! |---|---|---|
//! | [`Strategy::Bfs`] | FIFO | yes |
//! | [`Strategy::Dfs`] | LIFO | no |
//! | [`Strategy::Dijkstra`] | min-cost heap | yes |
//! | [`Strategy::AStar`] | cost + Manhattan heap | yes |
//! | [`Strategy::Gbfs`] | Manhattan-only heap | no |
//!
//! All strategies run through [`Search`], which owns the node caches so
//! repeated queries on one grid incur no allocations after warm-up. A
//! start equal to the goal yields the single-cell route `[start]`; an
//! exhausted frontier yields `None`, surfaced as an empty route by
//! [`plan_route`].

mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod distance;
mod gbfs;
mod search;
mod strategy;
mod traits;

pub use distance::manhattan;
pub use search::Search;
pub use strategy::{Strategy, plan_route};
pub use traits::{AstarPather, Pather, WeightedPather};
