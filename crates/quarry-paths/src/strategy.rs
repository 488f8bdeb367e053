use std::fmt;
use std::str::FromStr;

use quarry_core::{Cell, Error, Grid, Route};

use crate::Search;
use crate::traits::AstarPather;

/// The closed set of pathfinding strategies, selectable per agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
    Gbfs,
}

impl Strategy {
    /// Every strategy, in a stable order.
    pub const ALL: [Strategy; 5] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Dijkstra,
        Strategy::AStar,
        Strategy::Gbfs,
    ];

    /// The canonical strategy name.
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
            Strategy::Dijkstra => "Dijkstra",
            Strategy::AStar => "AStar",
            Strategy::Gbfs => "GBFS",
        }
    }

    /// Run this strategy through `search` on `pather`.
    pub fn find_path<P: AstarPather>(
        self,
        search: &mut Search,
        pather: &P,
        from: Cell,
        to: Cell,
    ) -> Option<Route> {
        match self {
            Strategy::Bfs => search.bfs_path(pather, from, to),
            Strategy::Dfs => search.dfs_path(pather, from, to),
            Strategy::Dijkstra => search.dijkstra_path(pather, from, to),
            Strategy::AStar => search.astar_path(pather, from, to),
            Strategy::Gbfs => search.gbfs_path(pather, from, to),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    /// Parse a canonical strategy name. Unknown names are an error, never
    /// a silent fallback.
    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "BFS" => Ok(Strategy::Bfs),
            "DFS" => Ok(Strategy::Dfs),
            "Dijkstra" => Ok(Strategy::Dijkstra),
            "AStar" => Ok(Strategy::AStar),
            "GBFS" => Ok(Strategy::Gbfs),
            other => Err(Error::UnknownStrategy(other.to_string())),
        }
    }
}

/// Plan a route on `grid` using the named strategy.
///
/// Returns an empty route when the goal is unreachable. Fails for an
/// unknown strategy name or for endpoints outside the grid.
pub fn plan_route(grid: &Grid, start: Cell, goal: Cell, strategy: &str) -> Result<Route, Error> {
    let strategy: Strategy = strategy.parse()?;
    if !grid.in_bounds(start) {
        return Err(Error::OutOfBounds(start));
    }
    if !grid.in_bounds(goal) {
        return Err(Error::OutOfBounds(goal));
    }
    let mut search = Search::for_grid(grid);
    Ok(strategy
        .find_path(&mut search, grid, start, goal)
        .unwrap_or_default())
}
