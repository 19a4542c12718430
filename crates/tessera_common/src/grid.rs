//! Grid geometry: positions, row-major scan order, and the reserved control cells.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tile coordinate. `x` is the column, `y` is the row.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Position {
    /// Column index.
    pub x: u32,
    /// Row index.
    pub y: u32,
}

impl Position {
    /// Creates a position from a column and a row.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Errors raised when constructing a [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// One of the dimensions is zero.
    #[error("grid dimensions must be at least 1x1, got {width}x{height}")]
    ZeroDimension {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The grid has no room for the CPU and I/O tiles.
    #[error("a {width}x{height} grid cannot hold the CPU and I/O tiles")]
    TooSmall {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

/// The rectangular tile grid of the SoC template.
///
/// Cells are scanned row-major (all columns of row 0, then row 1, ...). Two
/// cells are reserved: the CPU at `(0, 0)` and the I/O tile at `(0, 1)`, or
/// `(1, 0)` when the grid has a single row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
}

impl Grid {
    /// Creates a grid, rejecting shapes that cannot hold the two control tiles.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        if u64::from(width) * u64::from(height) < 2 {
            return Err(GridError::TooSmall { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of cells left after reserving the CPU and I/O tiles.
    pub fn free_slot_count(&self) -> usize {
        self.cell_count() - 2
    }

    /// The reserved CPU cell.
    pub fn cpu_cell(&self) -> Position {
        Position::new(0, 0)
    }

    /// The reserved I/O cell.
    pub fn io_cell(&self) -> Position {
        if self.height >= 2 {
            Position::new(0, 1)
        } else {
            Position::new(1, 0)
        }
    }

    /// Returns `true` if `pos` is one of the two reserved cells.
    pub fn is_reserved(&self, pos: Position) -> bool {
        pos == self.cpu_cell() || pos == self.io_cell()
    }

    /// Returns `true` if `pos` lies inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Row-major index of `pos`. The caller must ensure `pos` is in bounds.
    pub fn index_of(&self, pos: Position) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// Iterates over the non-reserved cells in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells().filter(move |&p| !self.is_reserved(p))
    }
}
