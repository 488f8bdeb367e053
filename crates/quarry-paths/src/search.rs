use quarry_core::{Cell, Grid, Route};

// ---------------------------------------------------------------------------
// Internal node bookkeeping
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    /// Accumulated cost from the start (unused by BFS/DFS).
    pub(crate) g: i32,
    pub(crate) parent: usize,
    /// Lazily invalidates stale entries: a node belongs to the current
    /// query only if its generation matches.
    pub(crate) generation: u32,
    /// Whether the node is still on the frontier.
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the node array for use in `BinaryHeap`.
///
/// Ordered so the heap pops the lowest `f` first; ties go to the lower
/// cost-so-far `g`, which keeps A* routes stable once optimality is
/// guaranteed.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) g: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first.
        other.f.cmp(&self.f).then(other.g.cmp(&self.g))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Reusable search state for one grid rectangle.
///
/// `Search` owns the node array and scratch buffers shared by all five
/// strategies, so repeated queries allocate nothing after the first use.
/// Each query bumps a generation counter instead of clearing the caches.
pub struct Search {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    /// Shared scratch buffer for neighbor queries.
    pub(crate) nbuf: Vec<Cell>,
}

impl Search {
    /// Create search state for a `height` x `width` grid.
    pub fn new(height: i32, width: i32) -> Self {
        let len = (height.max(0) as usize) * (width.max(0) as usize);
        Self {
            width,
            height,
            nodes: vec![Node::default(); len],
            generation: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Create search state sized to `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.height(), grid.width())
    }

    /// Start a new query: bump the generation so all nodes are stale.
    pub(crate) fn begin(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Convert a cell to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, c: Cell) -> Option<usize> {
        if c.row < 0 || c.row >= self.height || c.col < 0 || c.col >= self.width {
            return None;
        }
        Some((c.row * self.width + c.col) as usize)
    }

    /// Convert a flat index back to a cell.
    #[inline]
    pub(crate) fn cell(&self, idx: usize) -> Cell {
        Cell::new(idx as i32 / self.width, idx as i32 % self.width)
    }

    /// Walk parent pointers from `goal_idx` back to the start.
    pub(crate) fn reconstruct(&self, goal_idx: usize) -> Route {
        let mut route = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            route.push(self.cell(ci));
            ci = self.nodes[ci].parent;
        }
        route.reverse();
        route
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        let s = Search::new(4, 7);
        for row in 0..4 {
            for col in 0..7 {
                let c = Cell::new(row, col);
                let i = s.idx(c).unwrap();
                assert_eq!(s.cell(i), c);
            }
        }
    }

    #[test]
    fn out_of_range_has_no_index() {
        let s = Search::new(4, 7);
        assert_eq!(s.idx(Cell::new(-1, 0)), None);
        assert_eq!(s.idx(Cell::new(0, 7)), None);
        assert_eq!(s.idx(Cell::new(4, 0)), None);
    }

    #[test]
    fn generations_invalidate_lazily() {
        let mut s = Search::new(2, 2);
        let g1 = s.begin();
        let g2 = s.begin();
        assert_ne!(g1, g2);
        // No node was touched, so none belongs to the current query.
        assert!(s.nodes.iter().all(|n| n.generation != g2));
    }
}
