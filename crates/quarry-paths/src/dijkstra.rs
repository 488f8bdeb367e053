use std::collections::BinaryHeap;

use quarry_core::{Cell, Route};

use crate::Search;
use crate::search::NodeRef;
use crate::traits::WeightedPather;

impl Search {
    /// Dijkstra search from `from` to `to`.
    ///
    /// On the uniform-cost fleet grid this behaves like BFS, but the
    /// min-priority frontier and running best-cost bookkeeping carry over
    /// unchanged to weighted grids.
    pub fn dijkstra_path<P: WeightedPather>(
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
            node.g = 0;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: 0,
            g: 0,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        while let Some(current) = open.pop() {
            let ci = current.idx;
            // Skip stale entries.
            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }
            if ci == goal_idx {
                found = true;
                break;
            }
            self.nodes[ci].open = false;
            let current_g = self.nodes[ci].g;
            let cp = self.cell(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = current_g + pather.cost(cp, np);

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if !n.open || tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative;
                n.parent = ci;
                n.open = true;
                open.push(NodeRef {
                    idx: ni,
                    f: tentative,
                    g: tentative,
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
