use std::sync::Arc;
use std::time::SystemTime;

use crate::assembly::pipeline::{AssembledAnimation, assemble, assemble_batch};
use crate::assembly::sheet::export_sheet;
use crate::assembly::state::{Phase, ProcessingState};
use crate::assets::decode::SourceImage;
use crate::encode::codec::AnimationCodec;
use crate::foundation::core::GroupId;
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::generate::client::{
    GenerationRequest, ImageGenerator, RetryPolicy, Sleeper, generate_with_retry,
};
use crate::group::model::Group;

/// Identifier of an [`ExportedAsset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetId(pub u64);

/// Kind of an exported asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// A packed raster sheet (PNG).
    RasterSheet,
    /// An encoded animation.
    AnimatedOutput,
}

/// An export kept in memory until its group is deleted.
#[derive(Clone, Debug)]
pub struct ExportedAsset {
    /// Identifier.
    pub id: AssetId,
    /// Group it was exported from.
    pub group: GroupId,
    /// Asset kind.
    pub kind: AssetKind,
    /// Encoded bytes.
    pub bytes: Arc<Vec<u8>>,
    /// Display name, including extension.
    pub name: String,
    /// Creation time.
    pub created_at: SystemTime,
    /// Pixel width of one frame (animations) or of the sheet.
    pub width: u32,
    /// Pixel height of one frame (animations) or of the sheet.
    pub height: u32,
}

/// Owns groups in creation order plus the assets exported from them.
#[derive(Debug, Default)]
pub struct GroupLibrary {
    groups: Vec<Group>,
    assets: Vec<ExportedAsset>,
    next_group: u64,
    next_asset: u64,
}

impl GroupLibrary {
    /// Empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group over a freshly loaded source with the default grid.
    pub fn create_group(&mut self, source: SourceImage) -> GroupId {
        let id = GroupId(self.next_group);
        self.next_group += 1;
        self.groups.push(Group::new(id, Arc::new(source)));
        tracing::debug!(group = %id, "created group");
        id
    }

    /// Generate a source image and create a group for it.
    ///
    /// Transient service failures are retried per `policy`; `state` tracks the
    /// [`Phase::Generating`] phase.
    pub fn generate_group(
        &mut self,
        generator: &dyn ImageGenerator,
        request: &GenerationRequest,
        policy: RetryPolicy,
        sleeper: &dyn Sleeper,
        state: &mut ProcessingState,
    ) -> SpriteResult<GroupId> {
        let source = state.run(Phase::Generating, |_| {
            generate_with_retry(generator, request, policy, sleeper)
        })?;
        Ok(self.create_group(source))
    }

    /// Groups in creation order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Group by id.
    pub fn get(&self, id: GroupId) -> SpriteResult<&Group> {
        self.groups
            .iter()
            .find(|g| g.id() == id)
            .ok_or_else(|| unknown_group(id))
    }

    /// Mutable group by id.
    pub fn get_mut(&mut self, id: GroupId) -> SpriteResult<&mut Group> {
        self.groups
            .iter_mut()
            .find(|g| g.id() == id)
            .ok_or_else(|| unknown_group(id))
    }

    /// Delete a group and evict every asset exported from it.
    pub fn remove_group(&mut self, id: GroupId) -> SpriteResult<Group> {
        let pos = self
            .groups
            .iter()
            .position(|g| g.id() == id)
            .ok_or_else(|| unknown_group(id))?;
        let group = self.groups.remove(pos);
        self.assets.retain(|a| a.group != id);
        tracing::debug!(group = %id, "removed group");
        Ok(group)
    }

    /// All exported assets, oldest first.
    pub fn assets(&self) -> &[ExportedAsset] {
        &self.assets
    }

    /// Asset by id.
    pub fn asset(&self, id: AssetId) -> Option<&ExportedAsset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Assets exported from `group`.
    pub fn assets_for(&self, group: GroupId) -> impl Iterator<Item = &ExportedAsset> {
        self.assets.iter().filter(move |a| a.group == group)
    }

    /// Assemble `id` into an animation and record it as an asset.
    pub fn export_animation(
        &mut self,
        id: GroupId,
        codec: &mut dyn AnimationCodec,
        state: &mut ProcessingState,
    ) -> SpriteResult<AssetId> {
        let group = self.get(id)?;
        let anim = state.run(Phase::Rendering, |progress| assemble(group, codec, progress))?;
        Ok(self.record_animation(id, anim))
    }

    /// Export `id` as a packed PNG sheet and record it as an asset.
    pub fn export_sheet(
        &mut self,
        id: GroupId,
        state: &mut ProcessingState,
    ) -> SpriteResult<AssetId> {
        let group = self.get(id)?;
        let sheet = state.run(Phase::Rendering, |_| export_sheet(group))?;
        Ok(self.record(
            id,
            AssetKind::RasterSheet,
            sheet.png,
            format!("group-{id}-sheet.png"),
            (sheet.width, sheet.height),
        ))
    }

    /// Assemble every group one at a time, in creation order, recording each success.
    ///
    /// A failing group does not stop the batch; its error is returned in its slot.
    pub fn export_all(
        &mut self,
        make_codec: &mut dyn FnMut() -> Box<dyn AnimationCodec>,
        on_progress: &mut dyn FnMut(GroupId, u8),
    ) -> Vec<(GroupId, SpriteResult<AssetId>)> {
        assemble_batch(&self.groups, make_codec, on_progress)
            .into_iter()
            .map(|(id, result)| (id, result.map(|anim| self.record_animation(id, anim))))
            .collect()
    }

    fn record_animation(&mut self, id: GroupId, anim: AssembledAnimation) -> AssetId {
        let name = format!("group-{id}-animation.{}", anim.extension);
        self.record(
            id,
            AssetKind::AnimatedOutput,
            anim.bytes,
            name,
            (anim.width, anim.height),
        )
    }

    fn record(
        &mut self,
        group: GroupId,
        kind: AssetKind,
        bytes: Vec<u8>,
        name: String,
        (width, height): (u32, u32),
    ) -> AssetId {
        let id = AssetId(self.next_asset);
        self.next_asset += 1;
        tracing::info!(group = %group, asset = id.0, %name, bytes = bytes.len(), "recorded export");
        self.assets.push(ExportedAsset {
            id,
            group,
            kind,
            bytes: Arc::new(bytes),
            name,
            created_at: SystemTime::now(),
            width,
            height,
        });
        id
    }
}

fn unknown_group(id: GroupId) -> SpriteError {
    SpriteError::validation(format!("unknown group {id}"))
}

#[cfg(test)]
#[path = "../../tests/unit/group/library.rs"]
mod tests;
