use serde::{Deserialize, Serialize};

use super::documents::AnimationSet;

/// User configuration from SkinPack Config.yaml
///
/// Contains output preferences and animation binding overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(rename = "SkinPack_Settings")]
    pub settings: PackSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackSettings {
    #[serde(rename = "Output Directory", default)]
    pub output_dir: String,

    #[serde(rename = "Open After Generate", default = "default_open_after_generate")]
    pub open_after_generate: bool,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    #[serde(rename = "Animation Overrides", default)]
    pub animation_overrides: AnimationSet,
}

impl Default for PackSettings {
    fn default() -> Self {
        Self {
            output_dir: String::new(),
            open_after_generate: true,
            debug_mode: false,
            animation_overrides: AnimationSet::new(),
        }
    }
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            settings: PackSettings::default(),
        }
    }
}

fn default_open_after_generate() -> bool {
    true
}
