use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Animation slot -> animation identifier map embedded in every skin entry.
///
/// `IndexMap` keeps the slots in their seeded order so generated documents are
/// byte-stable across runs with the same bindings.
pub type AnimationSet = IndexMap<String, String>;

/// Pack identity document, written as `manifest.json` at the archive root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub format_version: u32,
    pub header: ManifestHeader,
    pub modules: Vec<ManifestModule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub name: String,
    pub description: String,
    pub version: [u32; 3],
    pub uuid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestModule {
    #[serde(rename = "type")]
    pub module_type: String,
    pub uuid: String,
    pub version: [u32; 3],
}

/// Skin index document, written as `skins.json` at the archive root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinDocument {
    pub serialize_name: String,
    pub localization_name: String,
    pub skins: Vec<SkinEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinEntry {
    pub localization_name: String,
    pub geometry: String,
    pub texture: String,
    pub animations: AnimationSet,
    pub enable_attachables: bool,

    #[serde(rename = "type")]
    pub skin_type: String,
}
