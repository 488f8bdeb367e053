//! Grid coordinates and routes.

use std::fmt;
use std::ops::{Add, Sub};

/// A 2D integer grid coordinate. Rows grow downward, columns to the right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a cell shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four orthogonal neighbours, in the fixed order
    /// up, down, left, right.
    ///
    /// The order is part of the pathfinding contract: strategies expand
    /// neighbours in this order so that runs are reproducible.
    #[inline]
    pub fn neighbors_4(self) -> [Cell; 4] {
        [
            Self::new(self.row - 1, self.col),
            Self::new(self.row + 1, self.col),
            Self::new(self.row, self.col - 1),
            Self::new(self.row, self.col + 1),
        ]
    }

    /// Whether `other` is one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Cell {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

/// An ordered sequence of cells from a start to a goal.
///
/// `route[0]` is the start and `route[route.len() - 1]` the goal. An empty
/// route means the goal was unreachable. The time index of a route is its
/// sequence position, so `route.len()` bounds the agent's travel duration.
pub type Route = Vec<Cell>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_arithmetic() {
        let a = Cell::new(1, 2);
        let b = Cell::new(3, 4);
        assert_eq!(a + b, Cell::new(4, 6));
        assert_eq!(b - a, Cell::new(2, 2));
        assert_eq!(a.shift(-1, 1), Cell::new(0, 3));
    }

    #[test]
    fn neighbor_order_is_up_down_left_right() {
        let c = Cell::new(5, 5);
        assert_eq!(
            c.neighbors_4(),
            [
                Cell::new(4, 5),
                Cell::new(6, 5),
                Cell::new(5, 4),
                Cell::new(5, 6),
            ]
        );
    }

    #[test]
    fn adjacency() {
        let c = Cell::new(2, 2);
        for n in c.neighbors_4() {
            assert!(c.is_adjacent(n));
        }
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Cell::new(3, 3)));
    }

    #[test]
    fn ordering_is_row_major() {
        let mut cells = vec![Cell::new(1, 0), Cell::new(0, 9), Cell::new(1, 1)];
        cells.sort();
        assert_eq!(
            cells,
            vec![Cell::new(0, 9), Cell::new(1, 0), Cell::new(1, 1)]
        );
    }
}
