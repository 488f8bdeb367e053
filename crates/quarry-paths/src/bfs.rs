use std::collections::VecDeque;

use quarry_core::{Cell, Route};

use crate::Search;
use crate::traits::Pather;

impl Search {
    /// Breadth-first search from `from` to `to`.
    ///
    /// Guarantees a shortest path by hop count on an unweighted grid.
    /// Returns `None` when the frontier exhausts without reaching `to`.
    pub fn bfs_path<P: Pather>(&mut self, pather: &P, from: Cell, to: Cell) -> Option<Route> {
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

        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(start_idx);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        'search: while let Some(ci) = queue.pop_front() {
            let cp = self.cell(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                // Visited-set discipline: a cell is claimed when enqueued.
                if self.nodes[ni].generation == cur_gen {
                    continue;
                }
                let n = &mut self.nodes[ni];
                n.generation = cur_gen;
                n.parent = ci;
                if ni == goal_idx {
                    found = true;
                    break 'search;
                }
                queue.push_back(ni);
            }
        }

        self.nbuf = nbuf;

        if !found {
            return None;
        }
        Some(self.reconstruct(goal_idx))
    }
}
