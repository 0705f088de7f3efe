//! spriteloop treats one packed raster image, a grid of equally sized cells, as an addressable
//! and editable sequence of animation frames.
//!
//! Every surface goes through the same pieces:
//!
//! - [`index_to_cell`] / [`cell_to_index`] resolve frames to grid cells
//! - a [`Group`] owns the source, its [`SpriteGridConfig`] and its [`FrameEditStore`] overlays
//! - [`FrameCompositor`] extracts a frame with its offset applied
//! - [`apply_key`] synthesizes transparency by chroma keying
//! - [`PlaybackClock`] drives live preview; [`assemble`] drives export through an
//!   [`AnimationCodec`]
#![forbid(unsafe_code)]

mod foundation;

/// Export passes: animation assembly, sheet export, processing state.
pub mod assembly;
/// Source decoding and durable template storage.
pub mod assets;
/// Per-frame edit overlays.
pub mod edit;
/// Chroma-key transparency.
pub mod effects;
/// Animation codec seam.
pub mod encode;
/// Generative-image service seam.
pub mod generate;
/// Grid addressing, geometry and configuration.
pub mod grid;
/// Group aggregate, project files and the group library.
pub mod group;
/// Playback clock and live preview.
pub mod playback;
/// Frame buffers and compositing.
pub mod render;

pub use crate::foundation::core::{Fps, GroupId, Rgb8, Rgba8};
pub use crate::foundation::error::{SpriteError, SpriteResult};

pub use crate::assembly::pipeline::{
    AssembledAnimation, ExportFrameRenderer, assemble, assemble_batch, assemble_frames,
    render_export_frame,
};
pub use crate::assembly::sheet::{SheetImage, export_sheet};
pub use crate::assembly::state::{Phase, ProcessingState};
pub use crate::assets::decode::SourceImage;
pub use crate::assets::storage::{KeyValueStore, MemoryStore, TemplateSlot};
pub use crate::edit::store::{FrameEditStore, FrameOffset};
pub use crate::effects::chroma_key::{
    ALPHA_FLOOR, CHROMA_TOLERANCE, KEY_COLOR, KeyReference, apply_key, apply_mode, key_to_alpha,
};
pub use crate::encode::codec::{AnimationCodec, CodecConfig, CodecProgress, InMemoryCodec};
pub use crate::encode::gif::GifCodec;
pub use crate::generate::client::{
    AspectRatio, GenerationRequest, ImageGenerator, RetryPolicy, SizeClass, Sleeper,
    ThreadSleeper, generate_with_retry,
};
pub use crate::grid::addressing::{Cell, Direction, cell_to_index, index_to_cell};
pub use crate::grid::config::{ExportScale, SpriteGridConfig, TransparencyMode};
pub use crate::grid::geometry::CellGeometry;
pub use crate::group::library::{AssetId, AssetKind, ExportedAsset, GroupLibrary};
pub use crate::group::model::{AssemblyGuard, Group, OverlayPolicy};
pub use crate::group::project::SheetProject;
pub use crate::playback::clock::{PlaybackClock, PlaybackSession, PreviewFrame};
pub use crate::render::compositor::{FrameCompositor, composite};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::scale::scale_frame;
