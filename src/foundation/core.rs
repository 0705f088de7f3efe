use serde::{Deserialize, Serialize};

use crate::foundation::error::{SpriteError, SpriteResult};

/// Stable identifier of a [`Group`](crate::Group) within a [`GroupLibrary`](crate::GroupLibrary).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u64);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playback rate in whole frames per second (always >= 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Fps(u32);

impl Fps {
    /// Create a validated FPS value.
    pub fn new(fps: u32) -> SpriteResult<Self> {
        if fps == 0 {
            return Err(SpriteError::validation("fps must be >= 1"));
        }
        Ok(Self(fps))
    }

    /// Raw frames-per-second value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Duration of one frame in milliseconds (`1000 / fps`).
    pub fn frame_duration_ms(self) -> f64 {
        1000.0 / f64::from(self.0)
    }

    /// Per-frame delay handed to codecs, rounded to whole milliseconds.
    pub fn frame_delay_ms(self) -> u32 {
        (self.frame_duration_ms().round() as u32).max(1)
    }

    /// Number of whole frame steps elapsed at `time_ms`.
    ///
    /// Computed as `floor(time_ms * fps / 1000)` so exact multiples of a second land on exact
    /// step boundaries. Negative or non-finite times map to step 0.
    pub fn steps_at(self, time_ms: f64) -> u64 {
        if !time_ms.is_finite() || time_ms <= 0.0 {
            return 0;
        }
        (time_ms * f64::from(self.0) / 1000.0).floor() as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self(12)
    }
}

impl TryFrom<u32> for Fps {
    type Error = SpriteError;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<Fps> for u32 {
    fn from(v: Fps) -> Self {
        v.0
    }
}

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Opaque RGB colour, serialized as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb` (case-insensitive).
    pub fn parse_hex(s: &str) -> SpriteResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SpriteError::validation(format!(
                "invalid hex colour '{s}' (expected #rrggbb)"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| SpriteError::validation(format!("invalid hex colour '{s}': {e}")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Opaque RGBA8 pixel of this colour.
    pub fn opaque(self) -> Rgba8 {
        [self.r, self.g, self.b, 255]
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
