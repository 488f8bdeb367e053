//! Shared error taxonomy.

use crate::cell::Cell;

/// Errors reported by the coordination core.
///
/// An unreachable goal is deliberately absent: pathfinding reports it as an
/// empty [`Route`](crate::Route) because callers routinely want to skip the
/// pair or retry with another strategy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A target label was registered twice. The first registration wins.
    #[error("target label {0:?} is already registered")]
    DuplicateTargetLabel(char),

    /// A strategy name that matches neither a pathfinding nor an
    /// assignment strategy. Never silently falls back to a default.
    #[error("unknown strategy {0:?}")]
    UnknownStrategy(String),

    /// A grid query outside the matrix. A contract violation at the call
    /// site, not a recoverable runtime condition.
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Cell),

    /// A grid text row with a width different from the first row.
    #[error("grid row {0} has inconsistent width")]
    RaggedRow(usize),

    /// A character in grid text that maps to no terrain.
    #[error("unknown terrain {ch:?} at {cell}")]
    UnknownTerrain { ch: char, cell: Cell },

    /// Grid text with no cells at all.
    #[error("grid text is empty")]
    EmptyGrid,
}
