//! Chroma-key transparency.
//!
//! Pixels matching the background are rewritten to [`KEY_COLOR`] at full opacity, so exactly one
//! reserved colour marks "background" and an encoder can map it to its transparent index.

use crate::foundation::core::{Rgb8, Rgba8};
use crate::grid::config::TransparencyMode;
use crate::render::frame::FrameRGBA;

/// Maximum per-channel distance from the reference colour that still counts as background.
///
/// Absorbs lossy-compression noise in generated sources.
pub const CHROMA_TOLERANCE: u8 = 20;

/// Pixels with alpha below this count as background regardless of colour.
pub const ALPHA_FLOOR: u8 = 10;

/// Reserved sentinel colour that marks background in keyed frames.
pub const KEY_COLOR: Rgb8 = Rgb8::new(255, 0, 255);

/// Where the background colour comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyReference {
    /// The frame's own top-left pixel, sampled per frame.
    TopLeft,
    /// A fixed colour.
    Fixed(Rgb8),
}

impl KeyReference {
    /// Reference implied by a transparency mode, or `None` when keying is off.
    pub fn for_mode(mode: TransparencyMode) -> Option<Self> {
        match mode {
            TransparencyMode::None => None,
            TransparencyMode::AutoKey => Some(Self::TopLeft),
            TransparencyMode::FixedHexColor { color } => Some(Self::Fixed(color)),
        }
    }
}

/// Rewrite background pixels of `frame` to [`KEY_COLOR`]. Returns the number of keyed pixels.
///
/// When the reference is an invisible top-left pixel (alpha below [`ALPHA_FLOOR`]), only the
/// alpha test applies: its RGB carries no meaning. This is the usual case for a frame whose
/// offset uncovers the corner. Only the uncovered area is keyed and the frame's painted
/// background stays opaque; use [`KeyReference::Fixed`] to key such frames by colour.
pub fn apply_key(frame: &mut FrameRGBA, reference: KeyReference) -> usize {
    let reference = match reference {
        KeyReference::Fixed(c) => Some(c),
        KeyReference::TopLeft => match frame.data.get(0..4) {
            Some(&[r, g, b, a]) if a >= ALPHA_FLOOR => Some(Rgb8::new(r, g, b)),
            Some(_) => None,
            None => return 0,
        },
    };

    let key = KEY_COLOR.opaque();
    let mut keyed = 0;
    for px in frame.pixels_mut() {
        if is_background([px[0], px[1], px[2], px[3]], reference) {
            px.copy_from_slice(&key);
            keyed += 1;
        }
    }
    keyed
}

/// Apply the keying implied by `mode`. Returns `true` when the frame was keyed.
pub fn apply_mode(frame: &mut FrameRGBA, mode: TransparencyMode) -> bool {
    match KeyReference::for_mode(mode) {
        Some(reference) => {
            apply_key(frame, reference);
            true
        }
        None => false,
    }
}

/// Turn [`KEY_COLOR`] pixels into fully transparent pixels, for formats with a real alpha
/// channel.
pub fn key_to_alpha(frame: &mut FrameRGBA) {
    let key = KEY_COLOR.opaque();
    for px in frame.pixels_mut() {
        if *px == key {
            px.copy_from_slice(&[0, 0, 0, 0]);
        }
    }
}

fn is_background(px: Rgba8, reference: Option<Rgb8>) -> bool {
    if px[3] < ALPHA_FLOOR {
        return true;
    }
    let Some(reference) = reference else {
        return false;
    };
    px[0].abs_diff(reference.r) <= CHROMA_TOLERANCE
        && px[1].abs_diff(reference.g) <= CHROMA_TOLERANCE
        && px[2].abs_diff(reference.b) <= CHROMA_TOLERANCE
}

#[cfg(test)]
#[path = "../../tests/unit/effects/chroma_key.rs"]
mod tests;
