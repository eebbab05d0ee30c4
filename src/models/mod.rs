//! Data models for the skin pack generator.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`Entry`]: One row of a scanned directory listing (texture, folder, or parent)
//! - [`PackRequest`]: Input to a single pack generation run
//! - [`Manifest`] / [`SkinDocument`]: The two JSON documents written into every pack
//! - [`UserConfig`]: Preferences and animation overrides from `SkinPack Config.yaml`
//!
//! Everything here is plain owned data. The documents derive
//! `Serialize`/`Deserialize` so the pack files can be written and read back
//! with serde; mutation and notification live in
//! [`BindingStore`](crate::state::BindingStore), not in the models.

pub mod documents;
pub mod entry;
pub mod settings;

pub use documents::{
    AnimationSet, Manifest, ManifestHeader, ManifestModule, SkinDocument, SkinEntry,
};
pub use entry::{Entry, FOLDER_PREFIX, PARENT_LABEL, PackRequest};
pub use settings::{PackSettings, UserConfig};
