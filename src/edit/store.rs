//! Sparse per-frame edit overlays.
//!
//! Edits never touch source pixels: a frame is changed by recording an offset (applied at
//! sampling time) or by excluding it from playback and export.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Per-frame displacement in source pixels. Absent entries mean `(0, 0)`.
///
/// A positive offset moves the sampled window up/left, which moves the picture down/right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct FrameOffset {
    /// Horizontal displacement.
    pub dx: i32,
    /// Vertical displacement.
    pub dy: i32,
}

impl FrameOffset {
    /// No displacement.
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    /// Construct an offset.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Return `true` for `(0, 0)`.
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

impl From<(i32, i32)> for FrameOffset {
    fn from((dx, dy): (i32, i32)) -> Self {
        Self { dx, dy }
    }
}

impl From<FrameOffset> for (i32, i32) {
    fn from(o: FrameOffset) -> Self {
        (o.dx, o.dy)
    }
}

/// Offset map plus excluded-frame set for one group.
///
/// Both overlays live behind `Arc`s: cloning the store is O(1) and yields a snapshot that later
/// mutations never change. Mutations take `&mut self` and swap in the updated map, so a reader
/// sees either the whole previous overlay or the whole next one.
///
/// Indices are not bounded by the grid here; only indices below the current frame count take
/// part in enumeration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EditsDef", into = "EditsDef")]
pub struct FrameEditStore {
    offsets: Arc<BTreeMap<u32, FrameOffset>>,
    excluded: Arc<BTreeSet<u32>>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
struct EditsDef {
    #[serde(default)]
    offsets: BTreeMap<u32, FrameOffset>,
    #[serde(default)]
    excluded: BTreeSet<u32>,
}

impl From<EditsDef> for FrameEditStore {
    fn from(def: EditsDef) -> Self {
        Self::from_parts(def.offsets, def.excluded)
    }
}

impl From<FrameEditStore> for EditsDef {
    fn from(store: FrameEditStore) -> Self {
        Self {
            offsets: (*store.offsets).clone(),
            excluded: (*store.excluded).clone(),
        }
    }
}

impl FrameEditStore {
    /// Empty overlays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit maps. Zero offsets are dropped.
    pub fn from_parts(
        mut offsets: BTreeMap<u32, FrameOffset>,
        excluded: BTreeSet<u32>,
    ) -> Self {
        offsets.retain(|_, o| !o.is_zero());
        Self {
            offsets: Arc::new(offsets),
            excluded: Arc::new(excluded),
        }
    }

    /// Offset of `index`, `(0, 0)` when none is recorded.
    pub fn offset(&self, index: u32) -> FrameOffset {
        self.offsets.get(&index).copied().unwrap_or_default()
    }

    /// Add `(dx, dy)` to the offset of `index` and return the accumulated value.
    pub fn set_offset(&mut self, index: u32, dx: i32, dy: i32) -> FrameOffset {
        let current = self.offset(index);
        let next = FrameOffset::new(current.dx.saturating_add(dx), current.dy.saturating_add(dy));
        let offsets = Arc::make_mut(&mut self.offsets);
        if next.is_zero() {
            offsets.remove(&index);
        } else {
            offsets.insert(index, next);
        }
        next
    }

    /// Drop the offset of `index`. Returns `true` when an entry existed.
    pub fn reset_offset(&mut self, index: u32) -> bool {
        if !self.offsets.contains_key(&index) {
            return false;
        }
        Arc::make_mut(&mut self.offsets).remove(&index);
        true
    }

    /// Flip exclusion of `index`. Returns `true` when the frame is now excluded.
    pub fn toggle_exclusion(&mut self, index: u32) -> bool {
        let excluded = Arc::make_mut(&mut self.excluded);
        if excluded.remove(&index) {
            false
        } else {
            excluded.insert(index);
            true
        }
    }

    /// Return `true` when `index` is excluded.
    pub fn is_excluded(&self, index: u32) -> bool {
        self.excluded.contains(&index)
    }

    /// Recorded offsets, keyed by frame index.
    pub fn offsets(&self) -> &BTreeMap<u32, FrameOffset> {
        &self.offsets
    }

    /// Excluded frame indices.
    pub fn excluded(&self) -> &BTreeSet<u32> {
        &self.excluded
    }

    /// Ascending indices in `[0, total_frames)` that are not excluded.
    pub fn valid_frames(&self, total_frames: u32) -> Vec<u32> {
        (0..total_frames).filter(|i| !self.is_excluded(*i)).collect()
    }

    /// Drop every offset and exclusion.
    pub fn clear(&mut self) {
        self.offsets = Arc::default();
        self.excluded = Arc::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/store.rs"]
mod tests;
