use image::imageops::{self, FilterType};

use crate::foundation::error::SpriteResult;
use crate::grid::config::ExportScale;
use crate::render::frame::FrameRGBA;

/// Upscale `frame` by `scale` with nearest-neighbour sampling. `X1` returns the frame unchanged.
pub fn scale_frame(frame: FrameRGBA, scale: ExportScale) -> SpriteResult<FrameRGBA> {
    let factor = scale.factor();
    if factor == 1 {
        return Ok(frame);
    }
    let (w, h) = (frame.width * factor, frame.height * factor);
    let img = frame.into_rgba_image()?;
    Ok(FrameRGBA::from_rgba_image(imageops::resize(
        &img,
        w,
        h,
        FilterType::Nearest,
    )))
}
