use crate::foundation::error::{SpriteError, SpriteResult};
use crate::grid::addressing::Cell;

/// Cell geometry of a source image cut into a `rows x cols` grid.
///
/// Cell sizes stay fractional (`source / count`). Output frames are `floor(cell)` pixels on each
/// axis (never less than 1) and cell `(r, c)` samples from `(floor(c * cell_w), floor(r * cell_h))`.
/// All consumers go through this type so fractional grids round identically everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellGeometry {
    source_width: u32,
    source_height: u32,
    cell_w: f64,
    cell_h: f64,
    frame_width: u32,
    frame_height: u32,
}

impl CellGeometry {
    /// Compute geometry for a `source_width x source_height` image split into `rows x cols`.
    pub fn new(source_width: u32, source_height: u32, rows: u32, cols: u32) -> SpriteResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(SpriteError::validation("grid rows/cols must be >= 1"));
        }
        if source_width == 0 || source_height == 0 {
            return Err(SpriteError::validation(
                "source image width/height must be non-zero",
            ));
        }

        let cell_w = f64::from(source_width) / f64::from(cols);
        let cell_h = f64::from(source_height) / f64::from(rows);
        Ok(Self {
            source_width,
            source_height,
            cell_w,
            cell_h,
            frame_width: (cell_w.floor() as u32).max(1),
            frame_height: (cell_h.floor() as u32).max(1),
        })
    }

    /// Source width in pixels.
    pub fn source_width(&self) -> u32 {
        self.source_width
    }

    /// Source height in pixels.
    pub fn source_height(&self) -> u32 {
        self.source_height
    }

    /// Fractional cell width.
    pub fn cell_width(&self) -> f64 {
        self.cell_w
    }

    /// Fractional cell height.
    pub fn cell_height(&self) -> f64 {
        self.cell_h
    }

    /// Width of every composited frame.
    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    /// Height of every composited frame.
    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }

    /// Nominal top-left sample position of `cell` in source pixels, before offsets.
    pub fn origin(&self, cell: Cell) -> (i64, i64) {
        (
            (f64::from(cell.col) * self.cell_w).floor() as i64,
            (f64::from(cell.row) * self.cell_h).floor() as i64,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/geometry.rs"]
mod tests;
