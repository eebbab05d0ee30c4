//! Builder for the skin index document (`skins.json`).
//!
//! One skin entry is emitted per selected texture. The entry's
//! `localization_name` is the file stem, its `texture` is the original file
//! name, and every entry carries the full animation map and the geometry
//! label chosen by the pack-wide body type and armor options.

use crate::models::{AnimationSet, Entry, SkinDocument, SkinEntry};

/// Geometry for the classic (wide-arm) player model
pub const GEOMETRY_CUSTOM: &str = "geometry.humanoid.custom";

/// Geometry for the slim-arm player model
pub const GEOMETRY_CUSTOM_SLIM: &str = "geometry.humanoid.customSlim";

const NO_ARMOR_SUFFIX: &str = "NoArmor";
const SKIN_TYPE_FREE: &str = "free";

/// Picks the geometry identifier for the given body type and armor options.
///
/// `slim` selects the slim-arm model; `no_armor` appends the `NoArmor`
/// variant suffix, which also disables armor attachables on the entries.
pub fn geometry_label(slim: bool, no_armor: bool) -> String {
    let base = if slim {
        GEOMETRY_CUSTOM_SLIM
    } else {
        GEOMETRY_CUSTOM
    };

    if no_armor {
        format!("{base}{NO_ARMOR_SUFFIX}")
    } else {
        base.to_string()
    }
}

/// Builds the skin index for one generation run.
///
/// `assets` must already be filtered to file entries; the pipeline enforces
/// that before calling. Each entry gets its own copy of `animations` so the
/// document owns all of its data.
pub fn build_skin_document(
    pack_name: &str,
    assets: &[&Entry],
    no_armor: bool,
    slim: bool,
    animations: &AnimationSet,
) -> SkinDocument {
    let geometry = geometry_label(slim, no_armor);

    let skins = assets
        .iter()
        .map(|asset| SkinEntry {
            localization_name: asset.file_stem().to_string(),
            geometry: geometry.clone(),
            texture: asset.file_name().to_string(),
            animations: animations.clone(),
            enable_attachables: !no_armor,
            skin_type: SKIN_TYPE_FREE.to_string(),
        })
        .collect();

    SkinDocument {
        serialize_name: pack_name.to_string(),
        localization_name: pack_name.to_string(),
        skins,
    }
}
