//! JSON rig description: a bone list plus its clips.
//!
//! Everything deserialized here is re-validated by the library's
//! constructors, so a hand-edited rig fails with a proper error instead of
//! sampling garbage.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use rig_anim::{AnimationClip, Bone, ClipRegistry, Skeleton};

/// On-disk rig description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigFile {
    /// Bones, parents before children
    pub bones: Vec<Bone>,
    /// Clips keyed against those bones
    pub clips: Vec<AnimationClip>,
}

impl RigFile {
    /// Load a rig from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading rig file {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("parsing rig file {}", path.display()))
    }

    /// Write the rig as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("serializing rig")?;
        fs::write(path, data).with_context(|| format!("writing rig file {}", path.display()))
    }

    /// Validate into a skeleton and clip registry
    pub fn into_parts(self) -> Result<(Skeleton, ClipRegistry)> {
        let skeleton = Skeleton::new(self.bones).context("building skeleton")?;

        let mut registry = ClipRegistry::new();
        for clip in self.clips {
            let name = clip.name().to_string();
            registry
                .register(clip)
                .with_context(|| format!("registering clip '{name}'"))?;
        }

        Ok((skeleton, registry))
    }
}
