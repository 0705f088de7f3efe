//! Bidirectional mapping between linear frame indices and grid cells.
//!
//! Every surface (editor, per-frame editor, preview, exporter) resolves cells through these two
//! functions; nothing else re-derives row/column math.
//!
//! `rows` and `cols` must be >= 1. That is enforced by [`SpriteGridConfig`](crate::SpriteGridConfig)
//! and not re-checked here.

use serde::{Deserialize, Serialize};

/// Order in which linear indices walk the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Left to right, then top to bottom.
    #[default]
    RowMajor,
    /// Top to bottom, then left to right.
    ColumnMajor,
}

/// A zero-based grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Row, counted from the top.
    pub row: u32,
    /// Column, counted from the left.
    pub col: u32,
}

impl Cell {
    /// Construct a cell.
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Map a linear frame index to its grid cell.
pub fn index_to_cell(index: u32, rows: u32, cols: u32, direction: Direction) -> Cell {
    debug_assert!(rows >= 1 && cols >= 1, "grid dimensions must be >= 1");
    match direction {
        Direction::RowMajor => Cell::new(index / cols, index % cols),
        Direction::ColumnMajor => Cell::new(index % rows, index / rows),
    }
}

/// Map a grid cell back to its linear frame index. Inverse of [`index_to_cell`].
pub fn cell_to_index(cell: Cell, rows: u32, cols: u32, direction: Direction) -> u32 {
    debug_assert!(rows >= 1 && cols >= 1, "grid dimensions must be >= 1");
    match direction {
        Direction::RowMajor => cell.row * cols + cell.col,
        Direction::ColumnMajor => cell.col * rows + cell.row,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/addressing.rs"]
mod tests;
