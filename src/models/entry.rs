use camino::{Utf8Path, Utf8PathBuf};

use super::documents::AnimationSet;

/// Display prefix for folder rows in a directory listing.
pub const FOLDER_PREFIX: &str = "[Folder] ";

/// Display name of the parent-directory row.
pub const PARENT_LABEL: &str = "..";

/// One row of a directory listing: a packagable texture, a subfolder, or the
/// parent directory.
///
/// `name` is the display form (folders carry the `[Folder] ` prefix, the
/// parent row is `..`); `full_path` is always the undecorated filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub full_path: Utf8PathBuf,
    pub is_folder: bool,
}

impl Entry {
    /// Entry for a packagable texture file.
    pub fn file(path: impl Into<Utf8PathBuf>) -> Self {
        let full_path = path.into();
        Self {
            name: leaf_name(&full_path),
            full_path,
            is_folder: false,
        }
    }

    /// Entry for a subfolder, displayed with [`FOLDER_PREFIX`].
    pub fn folder(path: impl Into<Utf8PathBuf>) -> Self {
        let full_path = path.into();
        Self {
            name: format!("{}{}", FOLDER_PREFIX, leaf_name(&full_path)),
            full_path,
            is_folder: true,
        }
    }

    /// Entry navigating up to the given parent directory, displayed as `..`.
    pub fn parent(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            name: PARENT_LABEL.to_string(),
            full_path: path.into(),
            is_folder: true,
        }
    }

    /// File name including the extension.
    pub fn file_name(&self) -> &str {
        self.full_path
            .file_name()
            .unwrap_or(self.full_path.as_str())
    }

    /// File name with the final extension stripped.
    pub fn file_stem(&self) -> &str {
        self.full_path
            .file_stem()
            .unwrap_or(self.full_path.as_str())
    }
}

fn leaf_name(path: &Utf8Path) -> String {
    path.file_name().unwrap_or(path.as_str()).to_string()
}

/// Everything the packaging pipeline needs for one generation run.
///
/// `animations` is a snapshot taken from the binding store when the request is
/// built; rebinding after that point does not affect an in-flight request.
#[derive(Debug, Clone)]
pub struct PackRequest {
    pub pack_name: String,
    pub selected: Vec<Entry>,
    pub no_armor: bool,
    pub slim: bool,
    pub animations: AnimationSet,
}
