//! Frame extraction with per-frame offsets.
//!
//! Sign convention: the frame's offset is *subtracted* from the nominal sample origin. A
//! positive `dx` moves the sampled window left, so picture content moves right in the output.
//! Samples that land outside the source are transparent black.

use crate::assets::decode::SourceImage;
use crate::edit::store::{FrameEditStore, FrameOffset};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::grid::config::SpriteGridConfig;
use crate::grid::geometry::CellGeometry;
use crate::render::frame::FrameRGBA;

/// Extracts frames of one source image under one grid configuration.
#[derive(Clone, Debug)]
pub struct FrameCompositor<'a> {
    source: &'a SourceImage,
    config: &'a SpriteGridConfig,
    geometry: CellGeometry,
}

impl<'a> FrameCompositor<'a> {
    /// Prepare compositing of `source` cut by `config`.
    pub fn new(source: &'a SourceImage, config: &'a SpriteGridConfig) -> SpriteResult<Self> {
        let geometry =
            CellGeometry::new(source.width(), source.height(), config.rows(), config.cols())?;
        Ok(Self {
            source,
            config,
            geometry,
        })
    }

    /// Cell geometry in use.
    pub fn geometry(&self) -> &CellGeometry {
        &self.geometry
    }

    /// Composite frame `index` using the offset recorded in `edits`.
    pub fn composite(&self, edits: &FrameEditStore, index: u32) -> SpriteResult<FrameRGBA> {
        self.composite_with_offset(index, edits.offset(index))
    }

    /// Composite frame `index` with an explicit offset.
    pub fn composite_with_offset(&self, index: u32, offset: FrameOffset) -> SpriteResult<FrameRGBA> {
        if index >= self.config.total_frames() {
            return Err(SpriteError::validation(format!(
                "frame {index} out of range (grid has {} frames)",
                self.config.total_frames()
            )));
        }

        let (ox, oy) = self.geometry.origin(self.config.cell_of(index));
        let x0 = ox - i64::from(offset.dx);
        let y0 = oy - i64::from(offset.dy);

        let w = self.geometry.frame_width();
        let h = self.geometry.frame_height();
        let mut out = FrameRGBA::transparent(w, h);
        copy_clipped(self.source, x0, y0, &mut out);
        Ok(out)
    }
}

/// Composite a single frame. Shorthand for [`FrameCompositor::composite`].
pub fn composite(
    source: &SourceImage,
    config: &SpriteGridConfig,
    edits: &FrameEditStore,
    index: u32,
) -> SpriteResult<FrameRGBA> {
    FrameCompositor::new(source, config)?.composite(edits, index)
}

/// Copy the `out`-sized window at `(x0, y0)` of `src` into `out`, leaving out-of-range pixels
/// untouched (transparent).
fn copy_clipped(src: &SourceImage, x0: i64, y0: i64, out: &mut FrameRGBA) {
    let src_w = i64::from(src.width());
    let src_h = i64::from(src.height());
    let w = i64::from(out.width);
    let h = i64::from(out.height);

    let sx_start = x0.max(0);
    let sx_end = (x0 + w).min(src_w);
    let sy_start = y0.max(0);
    let sy_end = (y0 + h).min(src_h);
    if sx_start >= sx_end || sy_start >= sy_end {
        return;
    }

    let span = ((sx_end - sx_start) * 4) as usize;
    let src_px = src.as_rgba8();
    for sy in sy_start..sy_end {
        let dy = sy - y0;
        let dx = sx_start - x0;
        let s = ((sy * src_w + sx_start) * 4) as usize;
        let d = ((dy * w + dx) * 4) as usize;
        out.data[d..d + span].copy_from_slice(&src_px[s..s + span]);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
