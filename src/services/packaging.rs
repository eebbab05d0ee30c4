//! Pack assembly pipeline.
//!
//! Turns a [`PackRequest`] into a finished `.mcpack` archive:
//!
//! 1. Filter the selection down to file entries
//! 2. Create a unique staging directory under the scratch root
//! 3. Write `manifest.json` and `skins.json` into it
//! 4. Copy every selected texture next to them
//! 5. Compress the staging tree into `<name>_<uuid>.mcpack` in the scratch root
//! 6. Remove the staging directory
//!
//! The staging directory is owned by a [`StagingArea`] guard, so it is removed
//! even when a step in the middle fails; only the archive survives a
//! successful run.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::fs::{self, File};
use std::io;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use uuid::Uuid;
use walkdir::WalkDir;
use zip::write::FileOptions;

use crate::metrics::Metrics;
use crate::models::{Entry, PackRequest};
use crate::services::manifest::build_manifest;
use crate::services::skin_document::build_skin_document;

/// File name of the pack identity document inside the archive
pub const MANIFEST_FILE: &str = "manifest.json";

/// File name of the skin index document inside the archive
pub const SKINS_FILE: &str = "skins.json";

/// Extension the Bedrock client registers for importable packs
pub const PACK_EXTENSION: &str = "mcpack";

const STAGING_PREFIX: &str = "SkinPack_";

/// Errors surfaced by a generation run
#[derive(Error, Debug)]
pub enum PackagingError {
    #[error("No texture files selected")]
    NoSelection,

    #[error("Pack generation failed: {0:#}")]
    Staging(anyhow::Error),
}

/// Scratch directory guard for one generation run.
///
/// The directory is created under the scratch root with a unique
/// `SkinPack_<uuid>` name. [`close()`](Self::close) removes it on the success
/// path and surfaces the error if removal fails; dropping the guard on any
/// other path removes it too, downgrading a removal failure to a warning.
pub struct StagingArea {
    path: Utf8PathBuf,
    removed: bool,
}

impl StagingArea {
    /// Creates a fresh staging directory under `scratch_root`.
    pub fn create(scratch_root: &Utf8Path) -> Result<Self> {
        let path = scratch_root.join(format!("{}{}", STAGING_PREFIX, Uuid::new_v4()));
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create staging directory {path}"))?;
        Ok(Self {
            path,
            removed: false,
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Removes the staging directory, consuming the guard.
    pub fn close(mut self) -> Result<()> {
        self.removed = true;
        fs::remove_dir_all(&self.path)
            .with_context(|| format!("Failed to remove staging directory {}", self.path))
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(err) = fs::remove_dir_all(&self.path) {
            tracing::warn!("Failed to remove staging directory {}: {}", self.path, err);
        }
    }
}

/// Assembles `.mcpack` archives from pack requests.
///
/// Staging trees and finished archives both live under the scratch root, the
/// system temp directory by default. The pipeline is synchronous; each call to
/// [`generate()`](Self::generate) is one complete run.
pub struct PackagingPipeline {
    /// Where staging directories and finished archives are created
    scratch_root: Utf8PathBuf,

    /// Counters shared with the rest of the application
    metrics: Arc<Metrics>,
}

impl PackagingPipeline {
    /// Creates a pipeline writing into the system temp directory.
    pub fn new() -> Result<Self> {
        let scratch_root = Utf8PathBuf::from_path_buf(std::env::temp_dir()).map_err(|path| {
            anyhow!(
                "System temp directory is not valid UTF-8: {}",
                path.display()
            )
        })?;
        Ok(Self::with_scratch_dir(scratch_root))
    }

    /// Creates a pipeline writing into the given directory.
    ///
    /// The directory does not have to exist yet; staging creation brings the
    /// whole chain into existence.
    pub fn with_scratch_dir(scratch_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            scratch_root: scratch_root.into(),
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Shares an existing metrics handle with this pipeline.
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn scratch_root(&self) -> &Utf8Path {
        &self.scratch_root
    }

    /// Runs one generation and returns the archive path.
    ///
    /// Folder entries in the selection are ignored; a selection with no file
    /// entries is refused with [`PackagingError::NoSelection`]. On success the
    /// staging directory is gone and only the archive remains in the scratch
    /// root. On failure the staging directory is removed as well.
    pub fn generate(&self, request: &PackRequest) -> Result<Utf8PathBuf, PackagingError> {
        let assets: Vec<&Entry> = request.selected.iter().filter(|e| !e.is_folder).collect();
        if assets.is_empty() {
            self.metrics.record_pack_failed();
            return Err(PackagingError::NoSelection);
        }

        let started = Instant::now();
        match self.run(request, &assets) {
            Ok(archive_path) => {
                self.metrics
                    .record_pack_generated(assets.len(), started.elapsed());
                tracing::info!(
                    "Generated {} with {} skin(s) in {:?}",
                    archive_path,
                    assets.len(),
                    started.elapsed()
                );
                Ok(archive_path)
            }
            Err(err) => {
                self.metrics.record_pack_failed();
                Err(PackagingError::Staging(err))
            }
        }
    }

    fn run(&self, request: &PackRequest, assets: &[&Entry]) -> Result<Utf8PathBuf> {
        let staging = StagingArea::create(&self.scratch_root)?;
        tracing::info!("Staging pack '{}' in {}", request.pack_name, staging.path());

        let manifest = build_manifest(&request.pack_name);
        write_document(&staging.path().join(MANIFEST_FILE), &manifest)?;

        let skins = build_skin_document(
            &request.pack_name,
            assets,
            request.no_armor,
            request.slim,
            &request.animations,
        );
        write_document(&staging.path().join(SKINS_FILE), &skins)?;

        for asset in assets {
            let destination = staging.path().join(asset.file_name());
            fs::copy(&asset.full_path, &destination)
                .with_context(|| format!("Failed to copy {} into staging", asset.full_path))?;
        }

        let archive_path = self.scratch_root.join(format!(
            "{}_{}.{}",
            request.pack_name,
            Uuid::new_v4(),
            PACK_EXTENSION
        ));
        compress_directory(&archive_path, staging.path())?;

        staging.close()?;

        Ok(archive_path)
    }
}

/// Serializes a document as pretty-printed JSON and writes it out.
///
/// serde_json leaves non-ASCII text as UTF-8 rather than `\u` escapes, so
/// pack and texture names survive byte-for-byte.
fn write_document<T: Serialize>(path: &Utf8Path, document: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(document)
        .with_context(|| format!("Failed to serialize {path}"))?;
    fs::write(path, json).with_context(|| format!("Failed to write {path}"))
}

/// Compresses the staging tree into a zip archive at `archive_path`.
///
/// Entry names are relative to `source_dir` with forward slashes, which is
/// what the importer expects regardless of host platform.
fn compress_directory(archive_path: &Utf8Path, source_dir: &Utf8Path) -> Result<()> {
    let file = File::create(archive_path)
        .with_context(|| format!("Failed to create archive {archive_path}"))?;
    let mut zip = zip::ZipWriter::new(file);

    for entry in WalkDir::new(source_dir).min_depth(1) {
        let entry = entry.with_context(|| format!("Failed to walk {source_dir}"))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry
            .path()
            .strip_prefix(source_dir)
            .context("Staged file is outside the staging directory")?
            .to_string_lossy()
            .replace('\\', "/");

        let options = FileOptions::<()>::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .unix_permissions(0o644);
        zip.start_file(&name, options)
            .with_context(|| format!("Failed to start archive entry {name}"))?;

        let mut staged = File::open(entry.path())
            .with_context(|| format!("Failed to open staged file {name}"))?;
        io::copy(&mut staged, &mut zip)
            .with_context(|| format!("Failed to compress {name}"))?;
    }

    zip.finish()
        .with_context(|| format!("Failed to finalize archive {archive_path}"))?;
    Ok(())
}
