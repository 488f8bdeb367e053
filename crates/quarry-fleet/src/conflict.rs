//! Trajectory conflict detection over time-indexed routes.
//!
//! The detector is diagnostic: it reports where simultaneous routes
//! collide, it does not repair them. A route's time index is its sequence
//! position. An agent whose route has ended is treated as parked on its
//! final cell for all later timesteps, so stationary agents still collide
//! with traffic passing through their cell; parked agents never count as
//! the moving side of a swap.

use std::collections::BTreeMap;

use quarry_core::{Cell, Route};

/// One detected collision between two agents. Records are generated
/// once and collected in (timestep, agent pair) order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Conflict {
    /// Two agents occupy the same cell at the same timestep.
    Region {
        cell: Cell,
        timestep: usize,
        agents: (String, String),
    },
    /// Two agents exchange adjacent cells within one timestep.
    Swap {
        cells: (Cell, Cell),
        timestep: usize,
        agents: (String, String),
    },
}

/// Position of an agent at `t`, parking it on its final cell once the
/// route is exhausted. Empty routes yield `None`.
fn position_at(route: &Route, t: usize) -> Option<Cell> {
    route.get(t).or(route.last()).copied()
}

/// Scan all routes for region and swap conflicts.
///
/// Agents with empty (unreachable) routes never appear in a conflict.
/// The `BTreeMap` keying makes the report order deterministic.
pub fn detect_conflicts(routes: &BTreeMap<String, Route>) -> Vec<Conflict> {
    let walkers: Vec<(&String, &Route)> =
        routes.iter().filter(|(_, r)| !r.is_empty()).collect();
    let horizon = walkers.iter().map(|(_, r)| r.len()).max().unwrap_or(0);
    let mut conflicts = Vec::new();

    for t in 0..horizon {
        for (i, &(id_a, route_a)) in walkers.iter().enumerate() {
            for &(id_b, route_b) in walkers.iter().skip(i + 1) {
                let (Some(a), Some(b)) = (position_at(route_a, t), position_at(route_b, t))
                else {
                    continue;
                };

                if a == b {
                    conflicts.push(Conflict::Region {
                        cell: a,
                        timestep: t,
                        agents: (id_a.clone(), id_b.clone()),
                    });
                }

                if t >= 1 {
                    let (Some(pa), Some(pb)) =
                        (position_at(route_a, t - 1), position_at(route_b, t - 1))
                    else {
                        continue;
                    };
                    // Both sides must actually move to swap.
                    if pa != a && pb != b && a == pb && b == pa {
                        conflicts.push(Conflict::Swap {
                            cells: (pa, a),
                            timestep: t,
                            agents: (id_a.clone(), id_b.clone()),
                        });
                    }
                }
            }
        }
    }

    if !conflicts.is_empty() {
        log::debug!("detected {} conflicts across {} routes", conflicts.len(), walkers.len());
    }
    conflicts
}
