//! Playback clock.
//!
//! The active frame is derived purely from absolute elapsed time, so ticks carry no state
//! between them and exclusions take effect on the very next tick.

use std::time::{Duration, Instant};

use crate::edit::store::FrameEditStore;
use crate::foundation::core::Fps;
use crate::foundation::error::SpriteResult;
use crate::group::model::Group;
use crate::render::compositor::FrameCompositor;
use crate::render::frame::FrameRGBA;

/// Maps elapsed milliseconds to a frame index at a fixed rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackClock {
    fps: Fps,
}

impl PlaybackClock {
    /// A clock ticking at `fps`.
    pub fn new(fps: Fps) -> Self {
        Self { fps }
    }

    /// Playback rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Frame shown at `time_ms` when cycling through `valid_frames` in order.
    ///
    /// `None` when no frame is valid; that means "render nothing", not an error.
    pub fn active_frame(&self, time_ms: f64, valid_frames: &[u32]) -> Option<u32> {
        if valid_frames.is_empty() {
            return None;
        }
        let step = self.fps.steps_at(time_ms) % valid_frames.len() as u64;
        valid_frames.get(step as usize).copied()
    }

    /// Frame shown at `time_ms` given the current overlays. The valid-frame list is rebuilt on
    /// every call.
    pub fn active_frame_for(
        &self,
        time_ms: f64,
        total_frames: u32,
        edits: &FrameEditStore,
    ) -> Option<u32> {
        self.active_frame(time_ms, &edits.valid_frames(total_frames))
    }

    /// Length of one full loop over `valid_count` frames.
    pub fn period(&self, valid_count: usize) -> Duration {
        Duration::from_secs_f64(valid_count as f64 / f64::from(self.fps.get()))
    }
}

/// A frame produced by a preview tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewFrame {
    /// Frame index that is showing.
    pub index: u32,
    /// Composited pixels.
    pub frame: FrameRGBA,
}

/// Live preview over one group, started at a fixed instant.
///
/// Stopping is dropping the session; each tick is computed from scratch.
#[derive(Clone, Copy, Debug)]
pub struct PlaybackSession {
    started_at: Instant,
}

impl PlaybackSession {
    /// Start playback now.
    pub fn start() -> Self {
        Self::start_at(Instant::now())
    }

    /// Start playback at `started_at`.
    pub fn start_at(started_at: Instant) -> Self {
        Self { started_at }
    }

    /// Milliseconds elapsed between start and `now` (0 if `now` is earlier).
    pub fn elapsed_ms(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.started_at).as_secs_f64() * 1000.0
    }

    /// Composite the frame active at `now`, reading the group's current config and overlays.
    pub fn tick(&self, group: &Group, now: Instant) -> SpriteResult<Option<PreviewFrame>> {
        let config = group.config();
        let clock = PlaybackClock::new(config.fps());
        let Some(index) =
            clock.active_frame_for(self.elapsed_ms(now), config.total_frames(), group.edits())
        else {
            return Ok(None);
        };
        let frame = FrameCompositor::new(group.source(), config)?.composite(group.edits(), index)?;
        Ok(Some(PreviewFrame { index, frame }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/clock.rs"]
mod tests;
