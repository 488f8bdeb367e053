//! Random scenario generation.
//!
//! Mazes come from an iterative recursive-backtracker carve over a
//! wall-filled grid, which guarantees every corridor cell is reachable
//! from the start. Extra openings can then be knocked through interior
//! walls to turn the perfect maze into one with cycles, giving the
//! pathfinding strategies genuinely distinct routes to choose from.

use rand::Rng;
use rand::seq::SliceRandom;

use quarry_core::{Cell, Grid, Terrain};

/// Maze and scenario generator, deterministic for a given RNG state.
#[derive(Debug)]
pub struct MazeGen<R: Rng> {
    rng: R,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a maze with `labels` targets and the start marker in the
    /// lower-left corridor corner.
    ///
    /// Dimensions are rounded up to odd values (the carve works on a
    /// two-cell lattice) with a floor of 5. At most 26 targets are
    /// placed, one per letter.
    pub fn generate(&mut self, height: i32, width: i32, labels: usize, extra_openings: usize) -> Grid {
        let height = force_odd(height);
        let width = force_odd(width);
        let mut grid = Grid::new(height, width, Terrain::Wall);
        let start = Cell::new(height - 2, 1);

        self.carve(&mut grid, start);
        self.open_extra(&mut grid, extra_openings);
        self.place_targets(&mut grid, start, labels.min(26));
        grid.set(start, Terrain::Start);
        grid
    }

    /// Depth-first carve on the odd-coordinate lattice.
    fn carve(&mut self, grid: &mut Grid, start: Cell) {
        let mut stack = vec![start];
        grid.set(start, Terrain::Free);

        while let Some(&at) = stack.last() {
            let mut dirs = [(-2, 0), (2, 0), (0, -2), (0, 2)];
            dirs.shuffle(&mut self.rng);

            let next = dirs.iter().find_map(|&(dr, dc)| {
                let to = at.shift(dr, dc);
                (in_interior(grid, to) && grid.terrain(to) == Some(Terrain::Wall)).then_some(to)
            });
            match next {
                Some(to) => {
                    // Knock through the wall between the two lattice cells.
                    let wall = at.shift((to.row - at.row) / 2, (to.col - at.col) / 2);
                    grid.set(wall, Terrain::Free);
                    grid.set(to, Terrain::Free);
                    stack.push(to);
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    /// Knock up to `count` cycles into the maze. Only walls sitting
    /// between two opposite corridor cells qualify, so every opening
    /// creates a real shortcut.
    fn open_extra(&mut self, grid: &mut Grid, count: usize) {
        let mut candidates: Vec<Cell> = grid
            .iter()
            .filter(|&(cell, terrain)| {
                terrain == Terrain::Wall && in_interior(grid, cell) && bridges_corridors(grid, cell)
            })
            .map(|(cell, _)| cell)
            .collect();
        candidates.shuffle(&mut self.rng);
        for cell in candidates.into_iter().take(count) {
            grid.set(cell, Terrain::Free);
        }
    }

    fn place_targets(&mut self, grid: &mut Grid, start: Cell, labels: usize) {
        let mut open: Vec<Cell> = grid
            .walkable_cells()
            .into_iter()
            .filter(|&cell| cell != start)
            .collect();
        open.shuffle(&mut self.rng);
        for (i, cell) in open.into_iter().take(labels).enumerate() {
            grid.set(cell, Terrain::Target((b'A' + i as u8) as char));
        }
    }
}

fn force_odd(dim: i32) -> i32 {
    let dim = dim.max(5);
    if dim % 2 == 0 { dim + 1 } else { dim }
}

fn in_interior(grid: &Grid, cell: Cell) -> bool {
    cell.row >= 1 && cell.col >= 1 && cell.row < grid.height() - 1 && cell.col < grid.width() - 1
}

/// Whether removing this wall joins two corridor cells on opposite sides.
fn bridges_corridors(grid: &Grid, cell: Cell) -> bool {
    let open = |c: Cell| grid.terrain(c).is_some_and(|t| t.is_walkable());
    (open(cell.shift(-1, 0)) && open(cell.shift(1, 0)))
        || (open(cell.shift(0, -1)) && open(cell.shift(0, 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeSet;

    fn seeded(seed: u64) -> MazeGen<StdRng> {
        MazeGen::new(StdRng::seed_from_u64(seed))
    }

    fn reachable_from(grid: &Grid, start: Cell) -> BTreeSet<Cell> {
        let mut seen = BTreeSet::from([start]);
        let mut stack = vec![start];
        while let Some(at) = stack.pop() {
            let mut buf = Vec::new();
            grid.neighbors(at, &mut buf);
            for next in buf {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        seen
    }

    #[test]
    fn dimensions_are_forced_odd() {
        let grid = seeded(1).generate(10, 16, 0, 0);
        assert_eq!(grid.height(), 11);
        assert_eq!(grid.width(), 17);
        let grid = seeded(1).generate(9, 15, 0, 0);
        assert_eq!(grid.height(), 9);
        assert_eq!(grid.width(), 15);
    }

    #[test]
    fn every_open_cell_is_reachable_from_the_start() {
        for seed in 0..5 {
            let grid = seeded(seed).generate(15, 21, 4, 3);
            let start = grid.start().unwrap();
            assert_eq!(start, Cell::new(grid.height() - 2, 1));
            let reached = reachable_from(&grid, start);
            let open: BTreeSet<Cell> = grid.walkable_cells().into_iter().collect();
            assert_eq!(reached, open);
        }
    }

    #[test]
    fn requested_targets_are_placed_with_distinct_labels() {
        let grid = seeded(7).generate(15, 15, 5, 0);
        let targets = grid.targets();
        assert_eq!(targets.len(), 5);
        assert_eq!(
            targets.labels().collect::<Vec<_>>(),
            vec!['A', 'B', 'C', 'D', 'E']
        );
    }

    #[test]
    fn target_count_is_capped_by_the_alphabet() {
        let grid = seeded(7).generate(31, 31, 40, 10);
        assert_eq!(grid.targets().len(), 26);
    }

    #[test]
    fn extra_openings_only_remove_bridging_walls() {
        let sealed = seeded(3).generate(15, 15, 0, 0);
        let opened = seeded(3).generate(15, 15, 0, 6);
        assert_eq!(
            opened.walkable_cells().len(),
            sealed.walkable_cells().len() + 6
        );
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let a = seeded(42).generate(17, 23, 6, 4);
        let b = seeded(42).generate(17, 23, 6, 4);
        assert_eq!(a.to_string(), b.to_string());
        let c = seeded(43).generate(17, 23, 6, 4);
        assert_ne!(a.to_string(), c.to_string());
    }
}
