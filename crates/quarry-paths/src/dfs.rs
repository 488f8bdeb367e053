use quarry_core::{Cell, Route};

use crate::Search;
use crate::traits::Pather;

impl Search {
    /// Depth-first search from `from` to `to`.
    ///
    /// No optimality guarantee; kept as a worst-case comparator. Still
    /// terminates on finite grids and reports unreachability via frontier
    /// exhaustion.
    pub fn dfs_path<P: Pather>(&mut self, pather: &P, from: Cell, to: Cell) -> Option<Route> {
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
            node.open = true;
        }

        let mut stack: Vec<usize> = vec![start_idx];
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        while let Some(ci) = stack.pop() {
            if ci == goal_idx {
                found = true;
                break;
            }
            self.nodes[ci].open = false;
            let cp = self.cell(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                // Discovered cells keep their first parent so the
                // reconstructed route stays simple (no repeated cell).
                if self.nodes[ni].generation == cur_gen {
                    continue;
                }
                let n = &mut self.nodes[ni];
                n.generation = cur_gen;
                n.parent = ci;
                n.open = true;
                stack.push(ni);
            }
        }

        self.nbuf = nbuf;

        if !found {
            return None;
        }
        Some(self.reconstruct(goal_idx))
    }
}
