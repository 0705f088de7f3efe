//! Frame buffers and the single compositing path shared by every view.

/// Offset-aware frame extraction.
pub mod compositor;
/// Owned frame pixel buffer.
pub mod frame;
/// Export upscaling.
pub mod scale;
