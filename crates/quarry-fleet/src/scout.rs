//! Exploration scout.
//!
//! A scout wanders the grid and reports the target labels its radar can
//! see. Detection is geometric: the radar covers the square window of
//! radius `radar_range` around the scout, clipped to the grid, and walls
//! do not block it. Every scan is recorded so a run can be replayed.

use std::collections::BTreeSet;

use quarry_core::{Cell, Grid, TargetSet, Terrain};

/// One radar sweep: where it happened and what it saw.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanRecord {
    pub at: Cell,
    pub detected: Vec<char>,
}

/// A mobile agent that detects targets instead of collecting them.
#[derive(Clone, Debug)]
pub struct Scout {
    id: String,
    position: Cell,
    radar_range: i32,
    visited: BTreeSet<Cell>,
    history: Vec<ScanRecord>,
}

impl Scout {
    /// Create a scout at `position` with the given radar radius.
    pub fn new(id: impl Into<String>, position: Cell, radar_range: i32) -> Self {
        Self {
            id: id.into(),
            position,
            radar_range: radar_range.max(0),
            visited: BTreeSet::from([position]),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn radar_range(&self) -> i32 {
        self.radar_range
    }

    /// Past scans, oldest first.
    pub fn history(&self) -> &[ScanRecord] {
        &self.history
    }

    /// Whether the scout has ever stood on `cell`.
    pub fn has_visited(&self, cell: Cell) -> bool {
        self.visited.contains(&cell)
    }

    /// Sweep the radar window and report every target inside it.
    ///
    /// The scan is recorded with the labels in label order. Duplicate
    /// labels cannot occur within one grid, so the returned set holds
    /// every detection.
    pub fn scan(&mut self, grid: &Grid) -> TargetSet {
        let mut detected = TargetSet::new();
        let r = self.radar_range;
        for row in self.position.row - r..=self.position.row + r {
            for col in self.position.col - r..=self.position.col + r {
                let cell = Cell::new(row, col);
                if let Some(Terrain::Target(label)) = grid.terrain(cell) {
                    // First registration wins; a duplicate here would
                    // mean the grid itself carries one.
                    let _ = detected.register(label, cell);
                }
            }
        }
        log::debug!(
            "scout {} at {}: detected {} targets",
            self.id,
            self.position,
            detected.len()
        );
        self.history.push(ScanRecord {
            at: self.position,
            detected: detected.labels().collect(),
        });
        detected
    }

    /// Move the scout to an adjacent walkable cell.
    ///
    /// Returns `false` (and stays put) if `cell` is out of bounds, not
    /// walkable, or not adjacent to the current position.
    pub fn move_to(&mut self, grid: &Grid, cell: Cell) -> bool {
        if !grid.in_bounds(cell) || !grid.is_walkable(cell) || !self.position.is_adjacent(cell) {
            return false;
        }
        self.position = cell;
        self.visited.insert(cell);
        true
    }

    /// Adjacent walkable cells the scout has not visited yet, in the
    /// fixed neighbor order. Empty when the frontier around the scout is
    /// exhausted.
    pub fn unvisited_moves(&self, grid: &Grid) -> Vec<Cell> {
        self.position
            .neighbors_4()
            .into_iter()
            .filter(|&c| grid.in_bounds(c) && grid.is_walkable(c) && !self.visited.contains(&c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: &str = "A....\n\
                         .....\n\
                         ..s..\n\
                         .....\n\
                         ....B";

    #[test]
    fn radar_only_sees_inside_its_window() {
        let grid = Grid::parse(FIELD).unwrap();
        let mut scout = Scout::new("S1", Cell::new(2, 2), 1);
        // Both targets sit two cells out diagonally.
        assert!(scout.scan(&grid).is_empty());

        let mut scout = Scout::new("S2", Cell::new(2, 2), 2);
        let seen = scout.scan(&grid);
        assert_eq!(seen.len(), 2);
        assert_eq!(seen.get('A'), Some(Cell::new(0, 0)));
        assert_eq!(seen.get('B'), Some(Cell::new(4, 4)));
    }

    #[test]
    fn radar_ignores_walls() {
        let grid = Grid::parse("s#A").unwrap();
        let mut scout = Scout::new("S1", Cell::new(0, 0), 2);
        let seen = scout.scan(&grid);
        assert_eq!(seen.get('A'), Some(Cell::new(0, 2)));
    }

    #[test]
    fn scans_are_recorded() {
        let grid = Grid::parse(FIELD).unwrap();
        let mut scout = Scout::new("S1", Cell::new(0, 2), 2);
        scout.scan(&grid);
        scout.move_to(&grid, Cell::new(1, 2));
        scout.scan(&grid);
        assert_eq!(scout.history().len(), 2);
        assert_eq!(scout.history()[0].at, Cell::new(0, 2));
        assert_eq!(scout.history()[0].detected, vec!['A']);
        assert_eq!(scout.history()[1].detected, vec!['A']);
    }

    #[test]
    fn movement_is_step_by_step_and_legal() {
        let grid = Grid::parse("s.#\n...").unwrap();
        let mut scout = Scout::new("S1", Cell::new(0, 0), 1);
        assert!(!scout.move_to(&grid, Cell::new(1, 1)), "diagonal");
        assert!(!scout.move_to(&grid, Cell::new(0, 2)), "not adjacent");
        assert!(scout.move_to(&grid, Cell::new(0, 1)));
        assert!(!scout.move_to(&grid, Cell::new(0, 2)), "wall");
        assert_eq!(scout.position(), Cell::new(0, 1));
    }

    #[test]
    fn unvisited_moves_shrink_as_the_scout_walks() {
        let grid = Grid::open(2, 2);
        let mut scout = Scout::new("S1", Cell::new(0, 0), 1);
        assert_eq!(
            scout.unvisited_moves(&grid),
            vec![Cell::new(1, 0), Cell::new(0, 1)]
        );
        scout.move_to(&grid, Cell::new(0, 1));
        scout.move_to(&grid, Cell::new(0, 0));
        assert_eq!(scout.unvisited_moves(&grid), vec![Cell::new(1, 0)]);
    }
}
