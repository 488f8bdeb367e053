//! The assignment engine: idle agents × labelled targets → tasks.
//!
//! Every strategy honors the same round contract: busy agents are never
//! assigned, no target is handed out twice, empty inputs yield an empty
//! task list, and when the two sides differ in size the result is a
//! best-effort partial mapping covering the smaller side.

mod auction;
mod greedy;
mod hungarian;

use std::fmt;
use std::str::FromStr;

use quarry_core::{AgentRecord, Cell, Error, Grid, TargetSet};

/// One agent-to-target assignment, the unit of output of the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub agent_id: String,
    pub label: char,
    pub target: Cell,
}

/// The closed set of assignment strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignStrategy {
    /// Per target, the idle agent at minimum Manhattan distance. O(T·A).
    Nearest,
    /// Targets handed to idle agents in registration order. O(T).
    RoundRobin,
    /// Per target, the idle agent with the fewest lifetime tasks. O(T·A).
    LoadBalanced,
    /// Minimum-total-Manhattan-distance matching (Kuhn–Munkres). Ignores
    /// obstacles — a lower-bound approximation. O(n³).
    SimpleHungarian,
    /// Same matching over true shortest-route lengths: O(n²) pathfinding
    /// calls feeding the O(n³) solve. Accurate and expensive.
    Hungarian,
    /// Decentralized iterative bidding with target prices. Near-optimal,
    /// not guaranteed optimal; converges without a global matrix solve.
    Bid,
}

impl AssignStrategy {
    /// Every strategy, in a stable order.
    pub const ALL: [AssignStrategy; 6] = [
        AssignStrategy::Nearest,
        AssignStrategy::RoundRobin,
        AssignStrategy::LoadBalanced,
        AssignStrategy::SimpleHungarian,
        AssignStrategy::Hungarian,
        AssignStrategy::Bid,
    ];

    /// The canonical strategy name.
    pub const fn name(self) -> &'static str {
        match self {
            AssignStrategy::Nearest => "nearest",
            AssignStrategy::RoundRobin => "round_robin",
            AssignStrategy::LoadBalanced => "load_balanced",
            AssignStrategy::SimpleHungarian => "simple_hungarian",
            AssignStrategy::Hungarian => "hungarian",
            AssignStrategy::Bid => "bid",
        }
    }
}

impl fmt::Display for AssignStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AssignStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "nearest" => Ok(AssignStrategy::Nearest),
            "round_robin" => Ok(AssignStrategy::RoundRobin),
            "load_balanced" => Ok(AssignStrategy::LoadBalanced),
            "simple_hungarian" => Ok(AssignStrategy::SimpleHungarian),
            "hungarian" => Ok(AssignStrategy::Hungarian),
            "bid" => Ok(AssignStrategy::Bid),
            other => Err(Error::UnknownStrategy(other.to_string())),
        }
    }
}

/// Run one assignment round with the named strategy.
///
/// Only idle agents take part; busy or inactive agents are untouched.
/// Fails only for an unknown strategy name.
pub fn assign(
    grid: &Grid,
    agents: &[AgentRecord],
    targets: &TargetSet,
    strategy: &str,
) -> Result<Vec<Task>, Error> {
    let strategy: AssignStrategy = strategy.parse()?;
    Ok(assign_with(grid, agents, targets, strategy))
}

/// Run one assignment round with an already-selected strategy.
pub fn assign_with(
    grid: &Grid,
    agents: &[AgentRecord],
    targets: &TargetSet,
    strategy: AssignStrategy,
) -> Vec<Task> {
    let idle: Vec<&AgentRecord> = agents.iter().filter(|a| a.is_idle()).collect();
    if idle.is_empty() || targets.is_empty() {
        return Vec::new();
    }

    let tasks = match strategy {
        AssignStrategy::Nearest => greedy::nearest(&idle, targets),
        AssignStrategy::RoundRobin => greedy::round_robin(&idle, targets),
        AssignStrategy::LoadBalanced => greedy::load_balanced(&idle, targets),
        AssignStrategy::SimpleHungarian => hungarian::manhattan_matching(&idle, targets),
        AssignStrategy::Hungarian => hungarian::route_matching(grid, &idle, targets),
        AssignStrategy::Bid => auction::bid(grid, &idle, targets),
    };
    log::debug!(
        "assignment round: strategy={strategy} idle={} targets={} tasks={}",
        idle.len(),
        targets.len(),
        tasks.len()
    );
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet(positions: &[(i32, i32)]) -> Vec<AgentRecord> {
        positions
            .iter()
            .enumerate()
            .map(|(i, &(r, c))| AgentRecord::new(format!("E{}", i + 1), Cell::new(r, c)))
            .collect()
    }

    fn targets(entries: &[(char, (i32, i32))]) -> TargetSet {
        entries
            .iter()
            .map(|&(label, (r, c))| (label, Cell::new(r, c)))
            .collect()
    }

    #[test]
    fn unknown_strategy_is_an_error() {
        let grid = Grid::open(3, 3);
        let err = assign(&grid, &[], &TargetSet::new(), "optimal").unwrap_err();
        assert_eq!(err, Error::UnknownStrategy("optimal".to_string()));
    }

    #[test]
    fn names_round_trip() {
        for s in AssignStrategy::ALL {
            assert_eq!(s.name().parse::<AssignStrategy>().unwrap(), s);
        }
    }

    #[test]
    fn empty_inputs_yield_empty_task_lists() {
        let grid = Grid::open(3, 3);
        let agents = fleet(&[(0, 0)]);
        let ts = targets(&[('A', (2, 2))]);
        for s in AssignStrategy::ALL {
            assert!(assign_with(&grid, &agents, &TargetSet::new(), s).is_empty());
            assert!(assign_with(&grid, &[], &ts, s).is_empty());
        }
    }

    #[test]
    fn busy_agents_are_never_assigned() {
        let grid = Grid::open(3, 3);
        let mut agents = fleet(&[(0, 0), (0, 2)]);
        agents[0].assign_task('Z', Cell::new(2, 2));
        let ts = targets(&[('A', (0, 0)), ('B', (0, 2))]);
        for s in AssignStrategy::ALL {
            let tasks = assign_with(&grid, &agents, &ts, s);
            assert!(tasks.iter().all(|t| t.agent_id == "E2"), "{s}");
            assert_eq!(tasks.len(), 1, "{s}");
        }
    }

    #[test]
    fn every_strategy_covers_the_smaller_side() {
        let grid = Grid::open(5, 5);
        let agents = fleet(&[(0, 0), (0, 1), (0, 2)]);
        let ts = targets(&[('A', (4, 0)), ('B', (4, 4))]);
        for s in AssignStrategy::ALL {
            let tasks = assign_with(&grid, &agents, &ts, s);
            assert_eq!(tasks.len(), 2, "{s}");
            // No agent or target repeated.
            let mut ids: Vec<_> = tasks.iter().map(|t| &t.agent_id).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), 2, "{s}");
            let mut labels: Vec<_> = tasks.iter().map(|t| t.label).collect();
            labels.sort();
            labels.dedup();
            assert_eq!(labels.len(), 2, "{s}");
        }
    }
}
