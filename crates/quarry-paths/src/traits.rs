use quarry_core::{Cell, Grid};

use crate::distance::manhattan;

/// Minimal pathfinding interface — provides neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `c` into `buf`. The caller clears `buf` before
    /// calling. The enumeration order must be stable for reproducibility.
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Cell, to: Cell) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Cell, to: Cell) -> i32;
}

impl Pather for Grid {
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        Grid::neighbors(self, c, buf);
    }
}

impl WeightedPather for Grid {
    /// Uniform cost: every orthogonal step costs 1.
    fn cost(&self, _from: Cell, _to: Cell) -> i32 {
        1
    }
}

impl AstarPather for Grid {
    /// Manhattan distance is admissible and consistent on a 4-connected
    /// uniform-cost grid.
    fn estimate(&self, from: Cell, to: Cell) -> i32 {
        manhattan(from, to)
    }
}
