use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{SpriteError, SpriteResult};

/// Immutable decoded raster in straight-alpha RGBA8.
///
/// Pixels are shared through an `Arc` and never rewritten; edits live in overlays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Wrap raw row-major RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> SpriteResult<Self> {
        if width == 0 || height == 0 {
            return Err(SpriteError::validation(
                "source image width/height must be non-zero",
            ));
        }
        let expected = (width as usize) * (height as usize) * 4;
        if rgba8.len() != expected {
            return Err(SpriteError::validation(format!(
                "source pixel buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// Decode any raster container supported by `image` (PNG, JPEG, GIF, WebP, ...).
    pub fn decode(bytes: &[u8]) -> SpriteResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .map_err(|e| SpriteError::decode(format!("decode image from memory: {e}")))?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    /// Read and decode an image file.
    pub fn open(path: &Path) -> SpriteResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read source image '{}'", path.display()))?;
        Self::decode(&bytes)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major RGBA8 bytes.
    pub fn as_rgba8(&self) -> &[u8] {
        &self.rgba8
    }

    /// Pixel at `(x, y)`; coordinates outside the image read as transparent black.
    pub fn pixel(&self, x: i64, y: i64) -> Rgba8 {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return [0, 0, 0, 0];
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.rgba8[i],
            self.rgba8[i + 1],
            self.rgba8[i + 2],
            self.rgba8[i + 3],
        ]
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> SpriteResult<Vec<u8>> {
        encode_png(self.width, self.height, &self.rgba8)
    }
}

/// Encode straight-alpha RGBA8 pixels as PNG bytes.
pub(crate) fn encode_png(width: u32, height: u32, rgba8: &[u8]) -> SpriteResult<Vec<u8>> {
    let mut buf = Vec::new();
    image::write_buffer_with_format(
        &mut Cursor::new(&mut buf),
        rgba8,
        width,
        height,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| SpriteError::encode(format!("encode png: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
