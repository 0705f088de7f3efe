use crate::assets::decode::SourceImage;
use crate::edit::store::FrameEditStore;
use crate::effects::chroma_key::{KEY_COLOR, apply_mode};
use crate::encode::codec::{AnimationCodec, CodecConfig};
use crate::foundation::core::GroupId;
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::grid::config::SpriteGridConfig;
use crate::group::model::Group;
use crate::render::compositor::FrameCompositor;
use crate::render::frame::FrameRGBA;
use crate::render::scale::scale_frame;

/// Encoded animation produced by [`assemble`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembledAnimation {
    /// Encoded bytes returned by the codec.
    pub bytes: Vec<u8>,
    /// Frame width after scaling.
    pub width: u32,
    /// Frame height after scaling.
    pub height: u32,
    /// Indices of the frames that were encoded, in order.
    pub frames: Vec<u32>,
    /// Per-frame display time in milliseconds.
    pub delay_ms: u32,
    /// File extension reported by the codec.
    pub extension: &'static str,
}

/// Export-ready frames: composite, then key (per transparency mode), then upscale.
///
/// Editors, preview and export all composite through the same [`FrameCompositor`]; this adds the
/// export-only steps on top.
#[derive(Clone, Debug)]
pub struct ExportFrameRenderer<'a> {
    compositor: FrameCompositor<'a>,
    config: &'a SpriteGridConfig,
}

impl<'a> ExportFrameRenderer<'a> {
    /// Prepare rendering of `source` under `config`.
    pub fn new(source: &'a SourceImage, config: &'a SpriteGridConfig) -> SpriteResult<Self> {
        Ok(Self {
            compositor: FrameCompositor::new(source, config)?,
            config,
        })
    }

    /// Size of every rendered frame after scaling.
    pub fn output_size(&self) -> (u32, u32) {
        let factor = self.config.export_scale().factor();
        let g = self.compositor.geometry();
        (g.frame_width() * factor, g.frame_height() * factor)
    }

    /// Render frame `index` for export.
    pub fn render(&self, edits: &FrameEditStore, index: u32) -> SpriteResult<FrameRGBA> {
        let mut frame = self.compositor.composite(edits, index)?;
        apply_mode(&mut frame, self.config.transparency());
        scale_frame(frame, self.config.export_scale())
    }
}

/// Render one export-ready frame of `group`.
pub fn render_export_frame(group: &Group, index: u32) -> SpriteResult<FrameRGBA> {
    ExportFrameRenderer::new(group.source(), group.config())?.render(group.edits(), index)
}

/// Assemble every valid frame of `group` into one encoded animation.
///
/// Frames are processed one at a time in ascending index order. Fails with
/// [`SpriteError::NoFrames`] before touching the codec when every frame is excluded, and with
/// [`SpriteError::Busy`] while another run holds the group. Codec progress (`0.0..=1.0`) is
/// forwarded to `on_progress` as a percentage.
#[tracing::instrument(skip_all, fields(group = %group.id()))]
pub fn assemble(
    group: &Group,
    codec: &mut dyn AnimationCodec,
    on_progress: &mut dyn FnMut(u8),
) -> SpriteResult<AssembledAnimation> {
    let _guard = group.begin_assembly()?;
    assemble_frames(group.source(), group.config(), group.edits(), codec, on_progress)
}

/// [`assemble`] over explicit inputs, without the per-group in-flight guard.
pub fn assemble_frames(
    source: &SourceImage,
    config: &SpriteGridConfig,
    edits: &FrameEditStore,
    codec: &mut dyn AnimationCodec,
    on_progress: &mut dyn FnMut(u8),
) -> SpriteResult<AssembledAnimation> {
    let frames = edits.valid_frames(config.total_frames());
    if frames.is_empty() {
        return Err(SpriteError::NoFrames);
    }

    let renderer = ExportFrameRenderer::new(source, config)?;
    let (width, height) = renderer.output_size();
    let delay_ms = config.fps().frame_delay_ms();
    let transparent_key = config.transparency().is_keyed().then_some(KEY_COLOR);

    codec.begin(CodecConfig {
        width,
        height,
        frame_count: frames.len(),
        transparent_key,
    })?;

    let mut forward = |p: f32| on_progress(percent(p));
    for &index in &frames {
        let frame = renderer.render(edits, index)?;
        tracing::debug!(index, width, height, "submitting frame");
        codec.push_frame(&frame, delay_ms, &mut forward)?;
    }
    let bytes = codec.finish(&mut forward)?;

    tracing::info!(
        frames = frames.len(),
        bytes = bytes.len(),
        "assembled animation"
    );
    Ok(AssembledAnimation {
        bytes,
        width,
        height,
        frames,
        delay_ms,
        extension: codec.extension(),
    })
}

/// Assemble several groups strictly one after another, in iteration order.
///
/// Each group gets a fresh codec from `make_codec`. A failing group does not stop the batch.
pub fn assemble_batch<'g>(
    groups: impl IntoIterator<Item = &'g Group>,
    make_codec: &mut dyn FnMut() -> Box<dyn AnimationCodec>,
    on_progress: &mut dyn FnMut(GroupId, u8),
) -> Vec<(GroupId, SpriteResult<AssembledAnimation>)> {
    groups
        .into_iter()
        .map(|group| {
            let id = group.id();
            let mut codec = make_codec();
            let result = assemble(group, codec.as_mut(), &mut |p| on_progress(id, p));
            (id, result)
        })
        .collect()
}

fn percent(p: f32) -> u8 {
    if !p.is_finite() {
        return 0;
    }
    (p.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/assembly/pipeline.rs"]
mod tests;
