use std::collections::BinaryHeap;

use quarry_core::{Cell, Route};

use crate::Search;
use crate::search::NodeRef;
use crate::traits::AstarPather;

impl Search {
    /// Greedy best-first search from `from` to `to`.
    ///
    /// The frontier is ordered purely by the heuristic distance to the
    /// goal, so routes are found quickly but carry no optimality
    /// guarantee. Kept for comparison against the optimal strategies.
    pub fn gbfs_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Cell,
        to: Cell,
    ) -> Option<Route> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        let cur_gen = self.begin();
        {
            let node = &mut self.nodes[start_idx];
            node.parent = usize::MAX;
            node.generation = cur_gen;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: pather.estimate(from, to),
            g: 0,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        while let Some(current) = open.pop() {
            let ci = current.idx;
            if ci == goal_idx {
                found = true;
                break;
            }
            let cp = self.cell(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                // A cell is discovered at most once; its first parent wins.
                if self.nodes[ni].generation == cur_gen {
                    continue;
                }
                let n = &mut self.nodes[ni];
                n.generation = cur_gen;
                n.parent = ci;
                open.push(NodeRef {
                    idx: ni,
                    f: pather.estimate(np, to),
                    g: 0,
                });
            }
        }

        self.nbuf = nbuf;

        if !found {
            return None;
        }
        Some(self.reconstruct(goal_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::Grid;

    #[test]
    fn route_is_valid_and_no_shorter_than_bfs() {
        let grid = Grid::parse("s....\n.###.\n...#.\n.#.#.\n....A").unwrap();
        let mut search = Search::for_grid(&grid);
        let from = Cell::new(0, 0);
        let to = Cell::new(4, 4);
        let bfs = search.bfs_path(&grid, from, to).unwrap();
        let gbfs = search.gbfs_path(&grid, from, to).unwrap();
        assert!(gbfs.len() >= bfs.len());
        assert_eq!(gbfs[0], from);
        assert_eq!(*gbfs.last().unwrap(), to);
        for pair in gbfs.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]));
            assert!(grid.is_walkable(pair[1]));
        }
    }

    #[test]
    fn straight_line_on_open_grid() {
        let grid = Grid::open(5, 5);
        let mut search = Search::for_grid(&grid);
        let route = search
            .gbfs_path(&grid, Cell::new(0, 0), Cell::new(4, 4))
            .unwrap();
        // Heuristic descent cannot do worse than the Manhattan distance
        // when nothing blocks the way.
        assert_eq!(route.len(), 9);
    }

    #[test]
    fn unreachable_goal() {
        let grid = Grid::parse("s#A").unwrap();
        let mut search = Search::for_grid(&grid);
        assert_eq!(search.gbfs_path(&grid, Cell::new(0, 0), Cell::new(0, 2)), None);
    }
}
