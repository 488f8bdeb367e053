//! The immutable walkable/blocked cell matrix.
//!
//! A [`Grid`] is built once per scenario (programmatically or from ASCII
//! text) and is read-only during planning: every pathfinding and assignment
//! strategy shares it freely.

use std::fmt;

use crate::cell::Cell;
use crate::error::Error;
use crate::targets::TargetSet;

/// The kind of one grid cell.
///
/// Anything except a [`Wall`](Terrain::Wall) is walkable; in particular a
/// cell holding a target label is always walkable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    Wall,
    #[default]
    Free,
    /// The fleet's start/home cell.
    Start,
    /// A labelled target cell.
    Target(char),
}

impl Terrain {
    /// Whether an agent may stand on this terrain.
    #[inline]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Terrain::Wall)
    }

    /// Parse one grid text character.
    ///
    /// `#` wall, `.` free, `s` start, `A`–`Z` target label.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Terrain::Wall),
            '.' => Some(Terrain::Free),
            's' => Some(Terrain::Start),
            'A'..='Z' => Some(Terrain::Target(ch)),
            _ => None,
        }
    }

    /// The grid text character for this terrain.
    pub const fn to_char(self) -> char {
        match self {
            Terrain::Wall => '#',
            Terrain::Free => '.',
            Terrain::Start => 's',
            Terrain::Target(ch) => ch,
        }
    }
}

/// A rectangular matrix of [`Terrain`] with fixed dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Terrain>,
}

impl Grid {
    /// Create a grid of the given dimensions filled with `fill`.
    pub fn new(height: i32, width: i32, fill: Terrain) -> Self {
        assert!(height > 0 && width > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![fill; (width * height) as usize],
        }
    }

    /// Create a fully open grid (all cells [`Terrain::Free`]).
    pub fn open(height: i32, width: i32) -> Self {
        Self::new(height, width, Terrain::Free)
    }

    /// Parse a grid from ASCII text, one row per line.
    ///
    /// Cells may optionally be separated by spaces (both `#.#` and `# . #`
    /// forms are accepted). All rows must have the same width.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut cells = Vec::new();
        let mut width: i32 = -1;
        let mut height: i32 = 0;

        for line in text.lines() {
            let mut row_width: i32 = 0;
            for ch in line.chars() {
                if ch == ' ' || ch == '\t' || ch == '\r' {
                    continue;
                }
                let cell = Cell::new(height, row_width);
                let terrain =
                    Terrain::from_char(ch).ok_or(Error::UnknownTerrain { ch, cell })?;
                cells.push(terrain);
                row_width += 1;
            }
            if row_width == 0 {
                continue; // blank line
            }
            if width < 0 {
                width = row_width;
            } else if row_width != width {
                return Err(Error::RaggedRow(height as usize));
            }
            height += 1;
        }

        if cells.is_empty() {
            return Err(Error::EmptyGrid);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Whether `cell` lies inside the matrix.
    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.row < self.height && cell.col >= 0 && cell.col < self.width
    }

    #[inline]
    fn index(&self, cell: Cell) -> usize {
        (cell.row * self.width + cell.col) as usize
    }

    /// The terrain at `cell`, or `None` if out of bounds.
    #[inline]
    pub fn terrain(&self, cell: Cell) -> Option<Terrain> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(self.cells[self.index(cell)])
    }

    /// Set the terrain at `cell`. Out-of-bounds writes are a contract
    /// violation and panic in debug builds; release builds ignore them.
    pub fn set(&mut self, cell: Cell, terrain: Terrain) {
        debug_assert!(self.in_bounds(cell), "set out of bounds: {cell}");
        if self.in_bounds(cell) {
            let idx = self.index(cell);
            self.cells[idx] = terrain;
        }
    }

    /// Whether an agent may stand on `cell`.
    ///
    /// Out-of-bounds queries are a call-site contract violation; they
    /// trip a debug assertion and report `false` in release builds.
    #[inline]
    pub fn is_walkable(&self, cell: Cell) -> bool {
        debug_assert!(self.in_bounds(cell), "walkability query out of bounds: {cell}");
        matches!(self.terrain(cell), Some(t) if t.is_walkable())
    }

    /// Append the walkable orthogonal neighbours of `cell` to `buf`, in the
    /// fixed order up, down, left, right.
    pub fn neighbors(&self, cell: Cell, buf: &mut Vec<Cell>) {
        for n in cell.neighbors_4() {
            if self.in_bounds(n) && self.is_walkable(n) {
                buf.push(n);
            }
        }
    }

    /// The first [`Terrain::Start`] cell in row-major order, if any.
    pub fn start(&self) -> Option<Cell> {
        self.iter()
            .find(|&(_, t)| t == Terrain::Start)
            .map(|(c, _)| c)
    }

    /// Collect every labelled target cell into a [`TargetSet`].
    ///
    /// A label appearing on two cells keeps the first (row-major) cell,
    /// matching duplicate-registration semantics.
    pub fn targets(&self) -> TargetSet {
        let mut set = TargetSet::new();
        for (cell, terrain) in self.iter() {
            if let Terrain::Target(label) = terrain {
                // Ignore the duplicate; the first registration is kept.
                let _ = set.register(label, cell);
            }
        }
        set
    }

    /// Row-major iterator over `(cell, terrain)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Terrain)> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).map(move |col| {
                let cell = Cell::new(row, col);
                (cell, self.cells[self.index(cell)])
            })
        })
    }

    /// All walkable cells in row-major order.
    pub fn walkable_cells(&self) -> Vec<Cell> {
        self.iter()
            .filter(|&(_, t)| t.is_walkable())
            .map(|(c, _)| c)
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                write!(f, "{}", self.cells[self.index(Cell::new(row, col))].to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
