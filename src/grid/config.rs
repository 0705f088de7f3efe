use serde::{Deserialize, Serialize};

use crate::foundation::core::{Fps, Rgb8};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::grid::addressing::{Cell, Direction, index_to_cell};

/// Integer upscale applied to exported frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ExportScale {
    /// Native cell size.
    #[default]
    X1,
    /// Twice the cell size.
    X2,
    /// Four times the cell size.
    X4,
}

impl ExportScale {
    /// Multiplier as an integer.
    pub fn factor(self) -> u32 {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
        }
    }
}

impl TryFrom<u32> for ExportScale {
    type Error = SpriteError;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(Self::X1),
            2 => Ok(Self::X2),
            4 => Ok(Self::X4),
            _ => Err(SpriteError::validation(format!(
                "export scale must be 1, 2 or 4 (got {v})"
            ))),
        }
    }
}

impl From<ExportScale> for u32 {
    fn from(v: ExportScale) -> Self {
        v.factor()
    }
}

/// How exported frames synthesize transparency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum TransparencyMode {
    /// Frames are exported as composited.
    #[default]
    None,
    /// Key out the colour sampled from each frame's top-left pixel.
    AutoKey,
    /// Key out a fixed colour.
    FixedHexColor {
        /// Colour treated as background.
        color: Rgb8,
    },
}

impl TransparencyMode {
    /// Return `true` when exports reserve a transparent colour.
    pub fn is_keyed(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Typed grid configuration owned by one [`Group`](crate::Group).
///
/// Fields are read through accessors and changed only through the validated `set_*` methods, so
/// an instance always satisfies `rows, cols >= 1` and `total_frames <= rows * cols`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SpriteGridConfigDef", rename_all = "camelCase")]
pub struct SpriteGridConfig {
    rows: u32,
    cols: u32,
    total_frames: u32,
    fps: Fps,
    direction: Direction,
    export_scale: ExportScale,
    transparency: TransparencyMode,
}

/// Unvalidated mirror of [`SpriteGridConfig`] used at the serde boundary.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpriteGridConfigDef {
    rows: u32,
    cols: u32,
    #[serde(default)]
    total_frames: Option<u32>,
    #[serde(default = "default_fps")]
    fps: Fps,
    #[serde(default)]
    direction: Direction,
    #[serde(default)]
    export_scale: ExportScale,
    #[serde(default)]
    transparency: TransparencyMode,
}

fn default_fps() -> Fps {
    Fps::default()
}

impl TryFrom<SpriteGridConfigDef> for SpriteGridConfig {
    type Error = SpriteError;

    fn try_from(def: SpriteGridConfigDef) -> Result<Self, Self::Error> {
        let mut cfg = Self::new(def.rows, def.cols)?;
        if let Some(total) = def.total_frames {
            cfg.set_total_frames(total)?;
        }
        cfg.fps = def.fps;
        cfg.direction = def.direction;
        cfg.export_scale = def.export_scale;
        cfg.transparency = def.transparency;
        Ok(cfg)
    }
}

impl Default for SpriteGridConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            total_frames: 16,
            fps: default_fps(),
            direction: Direction::RowMajor,
            export_scale: ExportScale::X1,
            transparency: TransparencyMode::None,
        }
    }
}

impl SpriteGridConfig {
    /// A `rows x cols` grid with every cell used and default playback settings.
    pub fn new(rows: u32, cols: u32) -> SpriteResult<Self> {
        let mut cfg = Self::default();
        cfg.set_grid(rows, cols)?;
        Ok(cfg)
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of addressable frames (`<= rows * cols`).
    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    /// Playback rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Traversal direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Export upscale.
    pub fn export_scale(&self) -> ExportScale {
        self.export_scale
    }

    /// Transparency synthesis mode.
    pub fn transparency(&self) -> TransparencyMode {
        self.transparency
    }

    /// Cell of frame `index` under this grid's dimensions and direction.
    pub fn cell_of(&self, index: u32) -> Cell {
        index_to_cell(index, self.rows, self.cols, self.direction)
    }

    /// Set grid dimensions; `total_frames` becomes `rows * cols`.
    pub fn set_grid(&mut self, rows: u32, cols: u32) -> SpriteResult<()> {
        if rows == 0 || cols == 0 {
            return Err(SpriteError::validation(format!(
                "grid must be at least 1x1 (got {rows}x{cols})"
            )));
        }
        let total = rows.checked_mul(cols).ok_or_else(|| {
            SpriteError::validation(format!("grid {rows}x{cols} has too many cells"))
        })?;
        self.rows = rows;
        self.cols = cols;
        self.total_frames = total;
        Ok(())
    }

    /// Use only the first `total` cells (a partially filled last row/column).
    pub fn set_total_frames(&mut self, total: u32) -> SpriteResult<()> {
        let cap = self.rows * self.cols;
        if total > cap {
            return Err(SpriteError::validation(format!(
                "total frames {total} exceeds grid capacity {cap}"
            )));
        }
        self.total_frames = total;
        Ok(())
    }

    /// Set the playback rate.
    pub fn set_fps(&mut self, fps: u32) -> SpriteResult<()> {
        self.fps = Fps::new(fps)?;
        Ok(())
    }

    /// Set the traversal direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Set the export upscale from its integer factor (1, 2 or 4).
    pub fn set_export_scale(&mut self, factor: u32) -> SpriteResult<()> {
        self.export_scale = ExportScale::try_from(factor)?;
        Ok(())
    }

    /// Set the transparency mode.
    pub fn set_transparency(&mut self, mode: TransparencyMode) {
        self.transparency = mode;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/config.rs"]
mod tests;
