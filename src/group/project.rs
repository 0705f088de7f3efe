use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::edit::store::FrameEditStore;
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::grid::config::SpriteGridConfig;
use crate::group::model::Group;

/// Persisted grid configuration and overlays of one group.
///
/// ```json
/// {
///   "grid": { "rows": 2, "cols": 4, "fps": 12, "transparency": { "mode": "autoKey" } },
///   "edits": { "offsets": { "3": [2, -1] }, "excluded": [5] }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetProject {
    /// Grid configuration.
    pub grid: SpriteGridConfig,
    /// Offset and exclusion overlays.
    #[serde(default)]
    pub edits: FrameEditStore,
}

impl SheetProject {
    /// Capture the current state of `group`.
    pub fn from_group(group: &Group) -> Self {
        Self {
            grid: group.config().clone(),
            edits: group.edits().clone(),
        }
    }

    /// Apply to `group`, replacing its config and overlays.
    pub fn apply_to(self, group: &mut Group) {
        group.replace_state(self.grid, self.edits);
    }

    /// Parse from JSON text.
    pub fn from_json(json: &str) -> SpriteResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SpriteError::validation(format!("parse sheet project JSON: {e}")))
    }

    /// Read from a JSON file.
    pub fn load(path: &Path) -> SpriteResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read sheet project '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Pretty JSON text.
    pub fn to_json(&self) -> SpriteResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SpriteError::validation(format!("serialize sheet project: {e}")))
    }

    /// Write as pretty JSON.
    pub fn save(&self, path: &Path) -> SpriteResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("write sheet project '{}'", path.display()))?;
        Ok(())
    }
}
