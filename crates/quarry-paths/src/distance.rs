use quarry_core::Cell;

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance() {
        assert_eq!(manhattan(Cell::new(0, 0), Cell::new(0, 0)), 0);
        assert_eq!(manhattan(Cell::new(0, 0), Cell::new(4, 4)), 8);
        assert_eq!(manhattan(Cell::new(2, -1), Cell::new(-1, 3)), 7);
    }
}
