//! Decentralized auction assignment.
//!
//! Each round, every unassigned agent bids `route cost − target price` on
//! its cheapest remaining target. The globally lowest bid wins the round:
//! the winner takes its target and raises that target's price by the
//! winning bid, steering later rounds toward other agents. The loop ends
//! when either side is exhausted or no agent can form a finite bid, so a
//! partial assignment is a normal outcome. Near-optimal, not guaranteed
//! optimal.

use quarry_core::{AgentRecord, Cell, Grid, TargetSet};
use quarry_paths::Search;

use super::Task;
use super::hungarian::route_cost;

pub(super) fn bid(grid: &Grid, idle: &[&AgentRecord], targets: &TargetSet) -> Vec<Task> {
    let entries: Vec<(char, Cell)> = targets.iter().collect();

    // Route costs are computed once per pair; positions do not change
    // within a planning round.
    let mut search = Search::for_grid(grid);
    let cost: Vec<Vec<Option<i64>>> = idle
        .iter()
        .map(|a| {
            entries
                .iter()
                .map(|&(_, cell)| {
                    let c = route_cost(grid, &mut search, a.position(), cell);
                    (c < (1 << 30)).then_some(c)
                })
                .collect()
        })
        .collect();

    let mut prices = vec![0i64; entries.len()];
    let mut agent_taken = vec![false; idle.len()];
    let mut target_taken = vec![false; entries.len()];
    let mut tasks = Vec::new();

    let rounds = idle.len().min(entries.len());
    for round in 0..rounds {
        // Globally lowest minimum-bid wins; ties go to the earliest agent
        // and then the earliest target, keeping the auction deterministic.
        let mut winner: Option<(i64, usize, usize)> = None;
        for (i, taken) in agent_taken.iter().enumerate() {
            if *taken {
                continue;
            }
            let mut best: Option<(i64, usize)> = None;
            for (j, taken) in target_taken.iter().enumerate() {
                if *taken {
                    continue;
                }
                let Some(c) = cost[i][j] else {
                    continue;
                };
                let offer = c - prices[j];
                if best.is_none_or(|(b, _)| offer < b) {
                    best = Some((offer, j));
                }
            }
            let Some((offer, j)) = best else {
                continue; // no finite bid for this agent
            };
            if winner.is_none_or(|(w, _, _)| offer < w) {
                winner = Some((offer, i, j));
            }
        }

        let Some((offer, i, j)) = winner else {
            log::debug!("auction: no finite bids left after {round} rounds, stopping");
            break; // partial assignment
        };

        agent_taken[i] = true;
        target_taken[j] = true;
        prices[j] += offer;
        let (label, target) = entries[j];
        log::debug!(
            "auction round {round}: {} wins {label} with bid {offer} (price now {})",
            idle[i].id(),
            prices[j]
        );
        tasks.push(Task {
            agent_id: idle[i].id().to_string(),
            label,
            target,
        });
    }
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_paths::manhattan;

    fn fleet(positions: &[(i32, i32)]) -> Vec<AgentRecord> {
        positions
            .iter()
            .enumerate()
            .map(|(i, &(r, c))| AgentRecord::new(format!("E{}", i + 1), Cell::new(r, c)))
            .collect()
    }

    #[test]
    fn assigns_all_pairs_on_open_grid() {
        let grid = Grid::open(5, 5);
        let agents = fleet(&[(0, 0), (0, 4), (4, 0)]);
        let idle: Vec<&AgentRecord> = agents.iter().collect();
        let targets: TargetSet = [
            ('A', Cell::new(1, 0)),
            ('B', Cell::new(1, 4)),
            ('C', Cell::new(4, 1)),
        ]
        .into_iter()
        .collect();
        let tasks = bid(&grid, &idle, &targets);
        assert_eq!(tasks.len(), 3);
        let mut labels: Vec<char> = tasks.iter().map(|t| t.label).collect();
        labels.sort();
        assert_eq!(labels, vec!['A', 'B', 'C']);
    }

    #[test]
    fn cheapest_pair_wins_the_first_round() {
        let grid = Grid::open(5, 5);
        let agents = fleet(&[(0, 0), (4, 3)]);
        let idle: Vec<&AgentRecord> = agents.iter().collect();
        let targets: TargetSet = [('A', Cell::new(0, 3)), ('B', Cell::new(4, 4))]
            .into_iter()
            .collect();
        let tasks = bid(&grid, &idle, &targets);
        // E2 is one step from B: lowest bid anywhere, so it wins round 0.
        assert_eq!(tasks[0].agent_id, "E2");
        assert_eq!(tasks[0].label, 'B');
        assert_eq!(tasks[1].agent_id, "E1");
        assert_eq!(tasks[1].label, 'A');
    }

    #[test]
    fn unreachable_targets_leave_a_partial_assignment() {
        let grid = Grid::parse("..#.\n..#.\n..#.").unwrap();
        let agents = fleet(&[(0, 0), (1, 1)]);
        let idle: Vec<&AgentRecord> = agents.iter().collect();
        // B is sealed off: one agent stays unassigned.
        let targets: TargetSet = [('A', Cell::new(2, 1)), ('B', Cell::new(0, 3))]
            .into_iter()
            .collect();
        let tasks = bid(&grid, &idle, &targets);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].label, 'A');
    }

    #[test]
    fn near_optimal_on_the_axis_scenario() {
        let grid = Grid::open(3, 3);
        let agents = fleet(&[(0, 0), (0, 1), (0, 2)]);
        let idle: Vec<&AgentRecord> = agents.iter().collect();
        let targets: TargetSet = [
            ('A', Cell::new(2, 0)),
            ('B', Cell::new(2, 1)),
            ('C', Cell::new(2, 2)),
        ]
        .into_iter()
        .collect();
        let tasks = bid(&grid, &idle, &targets);
        let total: i32 = tasks
            .iter()
            .map(|t| {
                let agent = agents.iter().find(|a| a.id() == t.agent_id).unwrap();
                manhattan(agent.position(), t.target)
            })
            .sum();
        assert_eq!(total, 6);
    }
}
