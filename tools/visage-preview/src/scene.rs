//! Scene configuration file
//!
//! A TOML file bundling the material, overlay configuration, and named
//! poses for a preview render. Every section is optional:
//!
//! ```toml
//! [material]
//! base_color = [0.8, 0.7, 0.6, 1.0]
//! unlit = true
//!
//! [overlay]
//! alpha_threshold = 0.5
//!
//! [overlay.region]
//! min_u = 0.0
//! min_v = 0.75
//! max_u = 0.25
//! max_v = 1.0
//!
//! [poses]
//! idle = 0
//! open = 1
//! cheer-a = 2
//! cheer-b = 3
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use visage_shade::expression::{OverlayConfig, PoseTable};
use visage_shade::material::MaterialConfig;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub material: MaterialConfig,
    pub overlay: OverlayConfig,
    pub poses: PoseTable,
}

impl SceneConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing scene file {}", path.display()))
    }

    /// Resolve a pose argument: a bare integer is used directly
    /// (unvalidated, like the uniform it feeds); anything else must name a
    /// pose in the table.
    pub fn resolve_pose(&self, pose: &str) -> Result<u32> {
        if let Ok(index) = pose.parse::<u32>() {
            return Ok(index);
        }
        self.poses.get(pose).with_context(|| {
            let mut known: Vec<&str> = self.poses.names().collect();
            known.sort_unstable();
            format!("unknown pose '{pose}' (known poses: {})", known.join(", "))
        })
    }
}
