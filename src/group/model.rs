use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use crate::assets::decode::SourceImage;
use crate::edit::store::{FrameEditStore, FrameOffset};
use crate::foundation::core::GroupId;
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::grid::addressing::Direction;
use crate::grid::config::{SpriteGridConfig, TransparencyMode};

/// What happens to per-index overlays when grid dimensions change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayPolicy {
    /// Keep offsets and exclusions keyed by index; they now refer to whatever frame holds that
    /// index under the new grid.
    #[default]
    Keep,
    /// Drop every offset and exclusion.
    Clear,
}

/// One source image, its grid configuration and its edit overlays.
///
/// A group exclusively owns its config and overlays. Every mutation goes through a method here
/// and bumps [`Group::version`], so holders of an older snapshot can detect staleness.
#[derive(Debug)]
pub struct Group {
    id: GroupId,
    source: Arc<SourceImage>,
    config: SpriteGridConfig,
    edits: FrameEditStore,
    reference: Option<Arc<SourceImage>>,
    created_at: SystemTime,
    version: u64,
    assembling: AtomicBool,
}

impl Group {
    /// A new group over `source` with the default grid.
    pub fn new(id: GroupId, source: Arc<SourceImage>) -> Self {
        Self::with_config(id, source, SpriteGridConfig::default())
    }

    /// A new group over `source` with an explicit grid.
    pub fn with_config(id: GroupId, source: Arc<SourceImage>, config: SpriteGridConfig) -> Self {
        Self {
            id,
            source,
            config,
            edits: FrameEditStore::new(),
            reference: None,
            created_at: SystemTime::now(),
            version: 0,
            assembling: AtomicBool::new(false),
        }
    }

    /// Identifier.
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Source image.
    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    /// Shared handle to the source image.
    pub fn source_arc(&self) -> Arc<SourceImage> {
        Arc::clone(&self.source)
    }

    /// Grid configuration.
    pub fn config(&self) -> &SpriteGridConfig {
        &self.config
    }

    /// Offset and exclusion overlays.
    pub fn edits(&self) -> &FrameEditStore {
        &self.edits
    }

    /// Optional comparison image.
    pub fn reference(&self) -> Option<&SourceImage> {
        self.reference.as_deref()
    }

    /// Creation time.
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Monotonic mutation counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Ascending non-excluded frame indices under the current grid.
    pub fn valid_frames(&self) -> Vec<u32> {
        self.edits.valid_frames(self.config.total_frames())
    }

    /// Change grid dimensions. `total_frames` becomes `rows * cols`.
    pub fn set_grid(&mut self, rows: u32, cols: u32, policy: OverlayPolicy) -> SpriteResult<()> {
        self.config.set_grid(rows, cols)?;
        if policy == OverlayPolicy::Clear {
            self.edits.clear();
        }
        self.touch();
        Ok(())
    }

    /// Limit the number of addressable frames.
    pub fn set_total_frames(&mut self, total: u32) -> SpriteResult<()> {
        self.config.set_total_frames(total)?;
        self.touch();
        Ok(())
    }

    /// Change playback rate.
    pub fn set_fps(&mut self, fps: u32) -> SpriteResult<()> {
        self.config.set_fps(fps)?;
        self.touch();
        Ok(())
    }

    /// Change traversal direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.config.set_direction(direction);
        self.touch();
    }

    /// Change export upscale (1, 2 or 4).
    pub fn set_export_scale(&mut self, factor: u32) -> SpriteResult<()> {
        self.config.set_export_scale(factor)?;
        self.touch();
        Ok(())
    }

    /// Change transparency mode.
    pub fn set_transparency(&mut self, mode: TransparencyMode) {
        self.config.set_transparency(mode);
        self.touch();
    }

    /// Nudge frame `index` by `(dx, dy)`; nudges accumulate.
    pub fn set_offset(&mut self, index: u32, dx: i32, dy: i32) -> FrameOffset {
        let next = self.edits.set_offset(index, dx, dy);
        self.touch();
        next
    }

    /// Return frame `index` to no offset. The version only changes when an offset was removed.
    pub fn reset_offset(&mut self, index: u32) -> bool {
        let removed = self.edits.reset_offset(index);
        if removed {
            self.touch();
        }
        removed
    }

    /// Flip exclusion of frame `index`. Returns `true` when now excluded.
    pub fn toggle_exclusion(&mut self, index: u32) -> bool {
        let excluded = self.edits.toggle_exclusion(index);
        self.touch();
        excluded
    }

    /// Replace config and overlays at once (project load).
    pub fn replace_state(&mut self, config: SpriteGridConfig, edits: FrameEditStore) {
        self.config = config;
        self.edits = edits;
        self.touch();
    }

    /// Set or clear the comparison image.
    pub fn set_reference(&mut self, reference: Option<Arc<SourceImage>>) {
        self.reference = reference;
        self.touch();
    }

    /// Mark an assembly run as in flight.
    ///
    /// Fails with [`SpriteError::Busy`] while another guard for this group is alive.
    pub fn begin_assembly(&self) -> SpriteResult<AssemblyGuard<'_>> {
        if self
            .assembling
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SpriteError::Busy(self.id));
        }
        Ok(AssemblyGuard { group: self })
    }

    /// Return `true` while an assembly run holds the guard.
    pub fn is_assembling(&self) -> bool {
        self.assembling.load(Ordering::Acquire)
    }

    fn touch(&mut self) {
        self.version += 1;
    }
}

/// Clears the group's in-flight flag when dropped.
#[derive(Debug)]
pub struct AssemblyGuard<'a> {
    group: &'a Group,
}

impl Drop for AssemblyGuard<'_> {
    fn drop(&mut self) {
        self.group.assembling.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/group/model.rs"]
mod tests;
