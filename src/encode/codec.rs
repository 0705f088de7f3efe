use crate::foundation::core::Rgb8;
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::render::frame::FrameRGBA;

/// Configuration provided to an [`AnimationCodec`] before any frame is pushed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Number of frames that will be pushed.
    pub frame_count: usize,
    /// Reserved colour to encode as transparent, when transparency is reserved.
    pub transparent_key: Option<Rgb8>,
}

/// Progress callback receiving values in `[0.0, 1.0]`.
pub type CodecProgress<'a> = &'a mut dyn FnMut(f32);

/// Contract for encoders that turn a frame sequence into one binary asset.
///
/// Ordering contract: `begin` once, `push_frame` for each frame in display order, `finish`
/// once. Progress may be reported from `push_frame` and `finish`.
pub trait AnimationCodec {
    /// File extension of the produced asset, without the dot.
    fn extension(&self) -> &'static str;
    /// Called once before any frame is pushed.
    fn begin(&mut self, cfg: CodecConfig) -> SpriteResult<()>;
    /// Submit one frame shown for `delay_ms` milliseconds.
    fn push_frame(
        &mut self,
        frame: &FrameRGBA,
        delay_ms: u32,
        progress: CodecProgress<'_>,
    ) -> SpriteResult<()>;
    /// Finalize and return the encoded bytes.
    fn finish(&mut self, progress: CodecProgress<'_>) -> SpriteResult<Vec<u8>>;
}

/// Codec that records submissions; `finish` returns the concatenated pixel data.
#[derive(Debug, Default)]
pub struct InMemoryCodec {
    cfg: Option<CodecConfig>,
    frames: Vec<(FrameRGBA, u32)>,
    finished: bool,
}

impl InMemoryCodec {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&CodecConfig> {
        self.cfg.as_ref()
    }

    /// Submitted frames with their delays.
    pub fn frames(&self) -> &[(FrameRGBA, u32)] {
        &self.frames
    }

    /// Return `true` once `finish` succeeded.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl AnimationCodec for InMemoryCodec {
    fn extension(&self) -> &'static str {
        "rgba"
    }

    fn begin(&mut self, cfg: CodecConfig) -> SpriteResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
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
            .ok_or_else(|| SpriteError::encode("codec not started"))?;
        self.frames.push((frame.clone(), delay_ms));
        progress(self.frames.len() as f32 / cfg.frame_count.max(1) as f32);
        Ok(())
    }

    fn finish(&mut self, progress: CodecProgress<'_>) -> SpriteResult<Vec<u8>> {
        if self.cfg.is_none() {
            return Err(SpriteError::encode("codec not started"));
        }
        self.finished = true;
        progress(1.0);
        Ok(self
            .frames
            .iter()
            .flat_map(|(f, _)| f.data.iter().copied())
            .collect())
    }
}
