//! Services module - Pure business logic for skin pack generation.
//!
//! This module contains the core logic for turning a directory of `.png`
//! textures into an importable Bedrock skin pack. The services are
//! **framework-agnostic** and have no dependencies on the front end, making
//! them testable and reusable.
//!
//! # Components
//!
//! - [`scanner`]: Single-level directory listing (parent row, folders, `.png`
//!   files) for browsing texture directories
//! - [`manifest`]: Builds the pack identity document with fresh UUIDs per run
//! - [`skin_document`]: Builds the skin index, one entry per selected texture,
//!   including the geometry label for the body type and armor options
//! - [`packaging`]: The [`PackagingPipeline`] that stages documents and
//!   textures in a scratch directory and compresses them into a `.mcpack`
//!   archive, cleaning the staging directory up on every path
//!
//! # Usage Example
//!
//! ```ignore
//! use skinpack::models::PackRequest;
//! use skinpack::services::{PackagingPipeline, scan_directory};
//!
//! let entries = scan_directory(Utf8Path::new("textures"))?;
//! let selected = entries.into_iter().filter(|e| !e.is_folder).collect();
//!
//! let pipeline = PackagingPipeline::new()?;
//! let archive = pipeline.generate(&PackRequest {
//!     pack_name: "My Pack".to_string(),
//!     selected,
//!     no_armor: false,
//!     slim: false,
//!     animations: store.snapshot(),
//! })?;
//! ```

pub mod manifest;
pub mod packaging;
pub mod scanner;
pub mod skin_document;

pub use manifest::{MANIFEST_FORMAT_VERSION, PACK_VERSION, build_manifest};
pub use packaging::{
    MANIFEST_FILE, PACK_EXTENSION, PackagingError, PackagingPipeline, SKINS_FILE, StagingArea,
};
pub use scanner::{IMAGE_EXTENSION, ScanError, scan_directory};
pub use skin_document::{
    GEOMETRY_CUSTOM, GEOMETRY_CUSTOM_SLIM, build_skin_document, geometry_label,
};
