use crate::assets::decode::encode_png;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{SpriteError, SpriteResult};

/// An owned frame of straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major pixel bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// A fully transparent frame.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Pixel at `(x, y)`. Panics when out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let i = self.offset_of(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Overwrite the pixel at `(x, y)`. Panics when out of range.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: Rgba8) {
        let i = self.offset_of(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// Iterate pixels mutably in row-major order.
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.data.chunks_exact_mut(4)
    }

    /// Convert into an `image` buffer.
    pub fn into_rgba_image(self) -> SpriteResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data)
            .ok_or_else(|| SpriteError::validation("frame.data size mismatch with width*height*4"))
    }

    /// Build from an `image` buffer.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> SpriteResult<Vec<u8>> {
        encode_png(self.width, self.height, &self.data)
    }

    fn offset_of(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} frame",
            self.width,
            self.height
        );
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}
