use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};

use crate::encode::codec::{AnimationCodec, CodecConfig, CodecProgress};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::render::frame::FrameRGBA;

/// Looping animated GIF encoder.
///
/// With a reserved key colour, pixels of exactly that colour become the transparent index and
/// everything else is opaque. Without one, every pixel is written opaque.
///
/// Frame delays are stored in centiseconds, distributed so the cumulative display time stays
/// within 5 ms of the sum of the requested delays (83 ms frames become 80, 90, 80, ...).
pub struct GifCodec {
    speed: i32,
    buf: SharedBuf,
    encoder: Option<GifEncoder<SharedBuf>>,
    cfg: Option<CodecConfig>,
    pushed: usize,
    elapsed_ms: u64,
    emitted_cs: u64,
}

impl Default for GifCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl GifCodec {
    /// Encoder with the default quantization speed.
    pub fn new() -> Self {
        Self::with_speed(10)
    }

    /// Encoder with an explicit NeuQuant speed (1 = best, 30 = fastest).
    pub fn with_speed(speed: i32) -> Self {
        Self {
            speed: speed.clamp(1, 30),
            buf: SharedBuf::default(),
            encoder: None,
            cfg: None,
            pushed: 0,
            elapsed_ms: 0,
            emitted_cs: 0,
        }
    }
}

impl AnimationCodec for GifCodec {
    fn extension(&self) -> &'static str {
        "gif"
    }

    fn begin(&mut self, cfg: CodecConfig) -> SpriteResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(SpriteError::validation(
                "gif width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(SpriteError::validation(format!(
                "gif frames are limited to 65535x65535 (got {}x{})",
                cfg.width, cfg.height
            )));
        }

        self.buf = SharedBuf::default();
        let mut encoder = GifEncoder::new_with_speed(self.buf.clone(), self.speed);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| SpriteError::encode(format!("gif set repeat: {e}")))?;
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.pushed = 0;
        self.elapsed_ms = 0;
        self.emitted_cs = 0;
        Ok(())
    }

    fn push_frame(
        &mut self,
        frame: &FrameRGBA,
        delay_ms: u32,
        progress: CodecProgress<'_>,
    ) -> SpriteResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SpriteError::encode("gif codec not started"))?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(SpriteError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| SpriteError::encode("gif codec is already finalized"))?;

        let mut rgba = frame.clone();
        match cfg.transparent_key {
            Some(key) => {
                for px in rgba.pixels_mut() {
                    if px[..3] == [key.r, key.g, key.b] {
                        px.copy_from_slice(&[0, 0, 0, 0]);
                    } else {
                        px[3] = 255;
                    }
                }
            }
            None => rgba.pixels_mut().for_each(|px| px[3] = 255),
        }

        // Whole centiseconds: emit the step between rounded running totals.
        self.elapsed_ms += u64::from(delay_ms);
        let target_cs = (self.elapsed_ms + 5) / 10;
        let step_cs = target_cs.saturating_sub(self.emitted_cs).max(1);
        self.emitted_cs += step_cs;
        let frame_ms = u32::try_from(step_cs * 10).map_err(|_| {
            SpriteError::validation(format!("gif frame delay {delay_ms} ms too long"))
        })?;

        let img = rgba.into_rgba_image()?;
        encoder
            .encode_frame(Frame::from_parts(
                img,
                0,
                0,
                Delay::from_numer_denom_ms(frame_ms, 1),
            ))
            .map_err(|e| SpriteError::encode(format!("gif encode frame: {e}")))?;

        self.pushed += 1;
        progress(self.pushed as f32 / cfg.frame_count.max(1) as f32);
        Ok(())
    }

    fn finish(&mut self, progress: CodecProgress<'_>) -> SpriteResult<Vec<u8>> {
        if self.cfg.take().is_none() {
            return Err(SpriteError::encode("gif codec not started"));
        }
        if self.pushed == 0 {
            return Err(SpriteError::encode("gif needs at least one frame"));
        }
        // Dropping the encoder writes the GIF trailer into the shared buffer.
        drop(self.encoder.take());
        progress(1.0);
        Ok(self.buf.take())
    }
}

/// `Write` sink shared between the codec and the `image` encoder it owns.
#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl Write for SharedBuf {
    fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
