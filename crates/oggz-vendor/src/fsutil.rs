// Copyright 2026 The oggz-arduino Developers

//! Directory walking and atomic writes shared by vendoring and patching.

use crate::{AtomicWriteError, ScanError};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;
use walkdir::WalkDir;

/// How deep [`list_files`] descends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Depth {
    /// Only the direct children of the root.
    Shallow,
    /// The whole tree below the root.
    Recursive,
}

/// Lists regular files below `root` whose extension is one of
/// `extensions`.
///
/// Siblings are visited in file-name order, so the result is the same on
/// every platform regardless of how the OS orders directory entries.
///
/// Symlinks to files are listed. Symlinked directories are not descended
/// into, so a link cycle cannot abort the walk.
pub(crate) fn list_files(
    root: &Utf8Path,
    depth: Depth,
    extensions: &[&str],
) -> Result<Vec<Utf8PathBuf>, ScanError> {
    let mut walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
    if depth == Depth::Shallow {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Walk {
            root: root.to_owned(),
            source,
        })?;
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }
        let path = Utf8PathBuf::from_path_buf(entry.into_path())
            .map_err(|path| ScanError::NonUtf8Path { path })?;
        if path.extension().is_some_and(|ext| extensions.contains(&ext)) {
            files.push(path);
        }
    }
    Ok(files)
}

/// Writes `contents` to `path`, replacing any existing file in a single
/// rename.
pub(crate) fn write_atomic(
    path: &Utf8Path,
    contents: &[u8],
) -> Result<(), AtomicWriteError> {
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(contents))
        .map_err(|error| match error {
            atomicwrites::Error::Internal(e) => AtomicWriteError::Rename(e),
            atomicwrites::Error::User(e) => AtomicWriteError::Write(e),
        })
}
