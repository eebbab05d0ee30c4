//! Directory scanning for packagable textures.
//!
//! Produces the single-level listing a front end shows while the user browses
//! for skin textures: a `..` row for the parent directory, every subfolder
//! with the `[Folder] ` display prefix, then every `.png` file. The extension
//! check is case-insensitive (`steve.PNG` is packagable) and nothing is
//! recursed into; a folder row exists so the caller can scan it next.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use thiserror::Error;

use crate::models::Entry;

/// File extension recognized as a packagable texture
pub const IMAGE_EXTENSION: &str = "png";

/// Errors that can occur while scanning a directory
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {0}")]
    PathNotFound(Utf8PathBuf),

    #[error("Failed to read directory {path}")]
    ReadDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Scans a single directory level and returns its listing.
///
/// The listing always starts with a parent entry when the directory has a
/// parent, followed by subfolders and then packagable files, each group
/// sorted by name so repeated scans of the same tree produce the same order.
/// Entries whose names are not valid UTF-8 are skipped with a warning.
///
/// # Arguments
///
/// * `path` - Directory to scan
///
/// # Returns
///
/// The listing entries, or [`ScanError`] if the directory is missing or
/// unreadable
pub fn scan_directory(path: &Utf8Path) -> Result<Vec<Entry>, ScanError> {
    if !path.is_dir() {
        return Err(ScanError::PathNotFound(path.to_path_buf()));
    }

    let read_dir = fs::read_dir(path).map_err(|source| ScanError::ReadDir {
        path: path.to_path_buf(),
        source,
    })?;

    let mut folders = Vec::new();
    let mut files = Vec::new();

    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|source| ScanError::ReadDir {
            path: path.to_path_buf(),
            source,
        })?;

        let Ok(entry_path) = Utf8PathBuf::from_path_buf(dir_entry.path()) else {
            tracing::warn!(
                "Skipping entry with non-UTF-8 name under {}: {}",
                path,
                dir_entry.path().display()
            );
            continue;
        };

        if entry_path.is_dir() {
            folders.push(Entry::folder(entry_path));
        } else if is_packagable(&entry_path) {
            files.push(Entry::file(entry_path));
        }
    }

    folders.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::debug!(
        "Scanned {}: {} folder(s), {} texture(s)",
        path,
        folders.len(),
        files.len()
    );

    let mut entries = Vec::with_capacity(folders.len() + files.len() + 1);
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        entries.push(Entry::parent(parent.to_path_buf()));
    }
    entries.extend(folders);
    entries.extend(files);

    Ok(entries)
}

/// Checks whether a path carries the recognized texture extension.
pub fn is_packagable(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(IMAGE_EXTENSION))
}
