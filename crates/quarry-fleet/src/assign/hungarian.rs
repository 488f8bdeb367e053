//! Optimal bipartite matching via the Kuhn–Munkres algorithm.
//!
//! Two cost models feed the same O(n³) solve: Manhattan distance (an
//! obstacle-blind lower bound) and true shortest-route length computed
//! with A* per agent–target pair.

use quarry_core::{AgentRecord, Cell, Grid, TargetSet};
use quarry_paths::{Search, manhattan};

use super::Task;

/// Cost marking an agent–target pair with no route. Large enough to lose
/// to any real route, small enough not to overflow the potentials.
const INFEASIBLE: i64 = 1 << 30;

/// Minimum-total-Manhattan-distance matching.
pub(super) fn manhattan_matching(idle: &[&AgentRecord], targets: &TargetSet) -> Vec<Task> {
    let entries: Vec<(char, Cell)> = targets.iter().collect();
    let cost: Vec<Vec<i64>> = idle
        .iter()
        .map(|a| {
            entries
                .iter()
                .map(|&(_, cell)| manhattan(a.position(), cell) as i64)
                .collect()
        })
        .collect();
    matching_tasks(idle, &entries, &cost)
}

/// Minimum-total-route-length matching: one A* query per pair.
pub(super) fn route_matching(
    grid: &Grid,
    idle: &[&AgentRecord],
    targets: &TargetSet,
) -> Vec<Task> {
    let entries: Vec<(char, Cell)> = targets.iter().collect();
    let mut search = Search::for_grid(grid);
    let cost: Vec<Vec<i64>> = idle
        .iter()
        .map(|a| {
            entries
                .iter()
                .map(|&(_, cell)| route_cost(grid, &mut search, a.position(), cell))
                .collect()
        })
        .collect();
    matching_tasks(idle, &entries, &cost)
}

/// Length in moves of the shortest route, or [`INFEASIBLE`].
pub(super) fn route_cost(grid: &Grid, search: &mut Search, from: Cell, to: Cell) -> i64 {
    match search.astar_path(grid, from, to) {
        Some(route) => route.len() as i64 - 1,
        None => INFEASIBLE,
    }
}

fn matching_tasks(idle: &[&AgentRecord], entries: &[(char, Cell)], cost: &[Vec<i64>]) -> Vec<Task> {
    let mut tasks = Vec::new();
    for (agent_idx, target_idx) in matching(cost) {
        if cost[agent_idx][target_idx] >= INFEASIBLE {
            continue; // matched for lack of alternatives, not reachable
        }
        let (label, target) = entries[target_idx];
        tasks.push(Task {
            agent_id: idle[agent_idx].id().to_string(),
            label,
            target,
        });
    }
    tasks.sort_by(|a, b| a.label.cmp(&b.label));
    tasks
}

/// Solve the rectangular assignment problem, returning `(row, col)` pairs
/// of a minimum-cost matching that saturates the smaller dimension.
fn matching(cost: &[Vec<i64>]) -> Vec<(usize, usize)> {
    let rows = cost.len();
    let cols = if rows == 0 { 0 } else { cost[0].len() };
    if rows == 0 || cols == 0 {
        return Vec::new();
    }
    if rows <= cols {
        kuhn_munkres(cost)
    } else {
        // Transpose so the row side is the smaller one.
        let transposed: Vec<Vec<i64>> = (0..cols)
            .map(|j| (0..rows).map(|i| cost[i][j]).collect())
            .collect();
        kuhn_munkres(&transposed)
            .into_iter()
            .map(|(j, i)| (i, j))
            .collect()
    }
}

/// Kuhn–Munkres with row/column potentials, O(rows² · cols).
/// Requires `rows <= cols`; every row ends up matched.
fn kuhn_munkres(cost: &[Vec<i64>]) -> Vec<(usize, usize)> {
    const INF: i64 = i64::MAX / 2;
    let n = cost.len();
    let m = cost[0].len();
    debug_assert!(n <= m);

    // 1-indexed potentials and matching, the classic formulation.
    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; m + 1];
    // p[j] = row matched to column j (0 = free).
    let mut p = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![INF; m + 1];
        let mut used = vec![false; m + 1];

        // Grow an alternating tree until a free column is found.
        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = INF;
            let mut j1 = 0usize;
            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let cur = cost[i0 - 1][j - 1] - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }
            for j in 0..=m {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }
            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        // Flip the augmenting path.
        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    (1..=m)
        .filter(|&j| p[j] != 0)
        .map(|j| (p[j] - 1, j - 1))
        .collect()
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

    fn total_manhattan(tasks: &[Task], agents: &[AgentRecord]) -> i32 {
        tasks
            .iter()
            .map(|t| {
                let agent = agents.iter().find(|a| a.id() == t.agent_id).unwrap();
                manhattan(agent.position(), t.target)
            })
            .sum()
    }

    #[test]
    fn axis_aligned_pairing_beats_crossed() {
        let agents = fleet(&[(0, 0), (0, 1), (0, 2)]);
        let idle: Vec<&AgentRecord> = agents.iter().collect();
        let targets: TargetSet = [
            ('A', Cell::new(2, 0)),
            ('B', Cell::new(2, 1)),
            ('C', Cell::new(2, 2)),
        ]
        .into_iter()
        .collect();
        let tasks = manhattan_matching(&idle, &targets);
        assert_eq!(tasks.len(), 3);
        assert_eq!(total_manhattan(&tasks, &agents), 6);
        for task in &tasks {
            // E1→A, E2→B, E3→C: straight down, never crossed.
            let agent = agents.iter().find(|a| a.id() == task.agent_id).unwrap();
            assert_eq!(agent.position().col, task.target.col);
        }
    }

    #[test]
    fn matching_total_never_exceeds_greedy() {
        let agents = fleet(&[(0, 0), (0, 4), (3, 2)]);
        let idle: Vec<&AgentRecord> = agents.iter().collect();
        let targets: TargetSet = [
            ('A', Cell::new(0, 3)),
            ('B', Cell::new(2, 0)),
            ('C', Cell::new(4, 4)),
        ]
        .into_iter()
        .collect();
        let optimal = manhattan_matching(&idle, &targets);
        let greedy = super::super::greedy::nearest(&idle, &targets);
        assert!(total_manhattan(&optimal, &agents) <= total_manhattan(&greedy, &agents));
    }

    #[test]
    fn rectangular_inputs_cover_the_smaller_side() {
        let agents = fleet(&[(0, 0), (0, 4)]);
        let idle: Vec<&AgentRecord> = agents.iter().collect();
        let targets: TargetSet = [
            ('A', Cell::new(1, 0)),
            ('B', Cell::new(1, 2)),
            ('C', Cell::new(1, 4)),
        ]
        .into_iter()
        .collect();
        let tasks = manhattan_matching(&idle, &targets);
        assert_eq!(tasks.len(), 2);

        // More agents than targets.
        let agents = fleet(&[(0, 0), (0, 2), (0, 4)]);
        let idle: Vec<&AgentRecord> = agents.iter().collect();
        let targets: TargetSet = [('A', Cell::new(1, 0))].into_iter().collect();
        let tasks = manhattan_matching(&idle, &targets);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].agent_id, "E1");
    }

    #[test]
    fn route_matching_respects_walls() {
        // Manhattan says E1 should take A, but a wall makes the true
        // route long; the route-aware matching swaps the pairing.
        let grid = Grid::parse(
            ".#.\n\
             .#.\n\
             ...",
        )
        .unwrap();
        let agents = fleet(&[(0, 0), (2, 1)]);
        let idle: Vec<&AgentRecord> = agents.iter().collect();
        let targets: TargetSet = [('A', Cell::new(0, 2)), ('B', Cell::new(2, 0))]
            .into_iter()
            .collect();

        let blind = manhattan_matching(&idle, &targets);
        let aware = route_matching(&grid, &idle, &targets);
        assert_eq!(blind.len(), 2);
        assert_eq!(aware.len(), 2);

        // Around the wall, E2 is the cheaper candidate for A.
        let a_task = aware.iter().find(|t| t.label == 'A').unwrap();
        assert_eq!(a_task.agent_id, "E2");
    }

    #[test]
    fn unreachable_pairs_are_dropped() {
        let grid = Grid::parse("..#.\n..#.\n..#.").unwrap();
        let agents = fleet(&[(0, 0), (1, 1)]);
        let idle: Vec<&AgentRecord> = agents.iter().collect();
        // B sits in the sealed right column.
        let targets: TargetSet = [('A', Cell::new(2, 0)), ('B', Cell::new(1, 3))]
            .into_iter()
            .collect();
        let tasks = route_matching(&grid, &idle, &targets);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].label, 'A');
    }
}
