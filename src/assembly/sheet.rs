use image::{RgbaImage, imageops};

use crate::assembly::pipeline::ExportFrameRenderer;
use crate::effects::chroma_key::key_to_alpha;
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::group::model::Group;

/// Valid frames re-packed into a PNG sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetImage {
    /// Encoded PNG.
    pub png: Vec<u8>,
    /// Sheet width in pixels.
    pub width: u32,
    /// Sheet height in pixels.
    pub height: u32,
    /// Columns in the packed sheet.
    pub cols: u32,
    /// Rows in the packed sheet.
    pub rows: u32,
    /// Source frame indices in packed (row-major) order.
    pub frames: Vec<u32>,
}

/// Re-pack every valid frame of `group` (composited, keyed, scaled) into a row-major sheet.
///
/// The sheet keeps the group's column count (fewer when there are fewer frames). Keyed
/// background becomes real alpha.
#[tracing::instrument(skip_all, fields(group = %group.id()))]
pub fn export_sheet(group: &Group) -> SpriteResult<SheetImage> {
    let frames = group.valid_frames();
    if frames.is_empty() {
        return Err(SpriteError::NoFrames);
    }

    let renderer = ExportFrameRenderer::new(group.source(), group.config())?;
    let (fw, fh) = renderer.output_size();
    let n = frames.len() as u32;
    let cols = group.config().cols().min(n);
    let rows = n.div_ceil(cols);

    let keyed = group.config().transparency().is_keyed();
    let mut sheet = RgbaImage::new(fw * cols, fh * rows);
    for (slot, &index) in frames.iter().enumerate() {
        let mut frame = renderer.render(group.edits(), index)?;
        if keyed {
            key_to_alpha(&mut frame);
        }
        let slot = slot as u32;
        let x = i64::from((slot % cols) * fw);
        let y = i64::from((slot / cols) * fh);
        imageops::replace(&mut sheet, &frame.into_rgba_image()?, x, y);
    }

    let (width, height) = sheet.dimensions();
    let png = crate::assets::decode::encode_png(width, height, sheet.as_raw())?;
    tracing::info!(frames = n, width, height, "exported sheet");
    Ok(SheetImage {
        png,
        width,
        height,
        cols,
        rows,
        frames,
    })
}
