//! Animation codec seam.
//!
//! The assembly pipeline hands composited frames to an [`AnimationCodec`](codec::AnimationCodec)
//! in ascending frame order and collects the encoded blob at the end.

/// Codec trait and the in-memory recorder.
pub mod codec;
/// Animated GIF codec on top of `image`.
pub mod gif;
