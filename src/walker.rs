//! Directory enumeration.
//!
//! [`read_entries`] lists one directory level and is what the build pipeline
//! recurses with. [`source_files`] walks a whole tree lazily, depth first,
//! for counting and listing.

use crate::error::BuildError;
use crate::utils::path::{MAX_PATH_LEN, join_paths};
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Entries whose name starts with this are never walked or compiled.
pub const HIDDEN_MARKER: u8 = b'.';

/// One direct child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub full_path: String,
    pub is_directory: bool,
}

/// Checked on the raw name, so hidden entries are skipped even when their
/// names are not valid UTF-8.
#[inline]
pub fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&HIDDEN_MARKER)
}

/// List the non-hidden direct children of `dir`.
///
/// Order is whatever the file system yields. `is_directory` comes from a
/// `stat` of the entry (symlinks followed), so a broken link counts as a file.
///
/// # Errors
/// - [`BuildError::DirectoryNotFound`] if `dir` cannot be opened as a directory
/// - [`BuildError::PathTooLong`] if an entry's full path exceeds [`MAX_PATH_LEN`]
/// - [`BuildError::InvalidPath`] for names that are not valid UTF-8
pub fn read_entries(dir: &str) -> Result<Vec<DirectoryEntry>, BuildError> {
    let read_dir = fs::read_dir(dir).map_err(|source| BuildError::DirectoryNotFound {
        path: dir.to_owned(),
        source,
    })?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| BuildError::Io {
            path: dir.to_owned(),
            source,
        })?;

        let name = entry.file_name();
        if is_hidden(&name) {
            continue;
        }
        let name = name.into_string().map_err(|name| {
            BuildError::InvalidPath(Path::new(dir).join(name).display().to_string())
        })?;

        let full_path = join_paths(&[dir, name.as_str()]);
        if full_path.len() > MAX_PATH_LEN {
            return Err(BuildError::PathTooLong(full_path));
        }

        let is_directory = Path::new(&full_path).is_dir();
        entries.push(DirectoryEntry {
            name,
            full_path,
            is_directory,
        });
    }

    Ok(entries)
}

/// Lazily yield every non-hidden file below `root`, depth first.
///
/// Hidden directories are pruned, not just filtered. Unreadable entries are
/// skipped.
pub fn source_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !is_hidden(e.file_name())
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
}

// ============================================================================
// Tests
// ============================================================================
