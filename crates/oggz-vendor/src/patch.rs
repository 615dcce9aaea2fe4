// Copyright 2026 The oggz-arduino Developers

//! Rewriting quoted `#include` directives to match the vendored layout.
//!
//! Vendoring flattens upstream's directory structure, so an include such as
//! `#include "ogg/ogg.h"` may no longer point at a real file relative to
//! the including source. The Arduino build adds the vendored `src/`
//! directory to the include path, so every header can be addressed by its
//! path relative to `src/`. [`HeaderMap`] records that path for each header
//! basename, and [`patch_includes`] rewrites includes to use it.

use crate::{
    PatchError, ScanError,
    fsutil::{Depth, list_files, write_atomic},
};
use camino::Utf8Path;
use fs_err as fs;
use std::{
    collections::{BTreeMap, btree_map},
    ops::AddAssign,
};
use tracing::{debug, info, warn};

const INCLUDE_MARKER: &str = "#include \"";

/// Two headers with the same basename found while building a
/// [`HeaderMap`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderCollision {
    /// The shared basename.
    pub file_name: String,
    /// The path that was recorded first and then replaced.
    pub discarded: String,
    /// The path that is recorded in the map.
    pub kept: String,
}

/// A map from header basename to its path relative to a root directory.
///
/// Paths always use `/` as the separator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderMap {
    locations: BTreeMap<String, String>,
    collisions: Vec<HeaderCollision>,
}

impl HeaderMap {
    /// Records every `.h` file below `root`.
    ///
    /// The tree is walked in file-name order. When the same basename occurs
    /// more than once, the path visited last is kept and the collision is
    /// reported through [`collisions`](Self::collisions) and a warning.
    pub fn scan(root: &Utf8Path) -> Result<Self, ScanError> {
        let mut map = HeaderMap::default();
        for path in list_files(root, Depth::Recursive, &["h"])? {
            // Paths from list_files are always below root.
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            let Some(file_name) = relative.file_name() else {
                continue;
            };
            map.insert(file_name.to_owned(), to_slash(relative));
        }
        debug!("found {} headers below {root}", map.locations.len());
        Ok(map)
    }

    fn insert(&mut self, file_name: String, path: String) {
        match self.locations.entry(file_name) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(path);
            }
            btree_map::Entry::Occupied(mut entry) => {
                warn!(
                    "header {} exists at both {} and {}; \
                     includes will resolve to {}",
                    entry.key(),
                    entry.get(),
                    path,
                    path,
                );
                let discarded = entry.insert(path.clone());
                self.collisions.push(HeaderCollision {
                    file_name: entry.key().clone(),
                    discarded,
                    kept: path,
                });
            }
        }
    }

    /// Returns the recorded path for a header basename.
    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.locations.get(file_name).map(String::as_str)
    }

    /// Returns the number of distinct header basenames.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns true if no headers were found.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Iterates over `(basename, path)` pairs in basename order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.locations.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the basenames that were found more than once.
    pub fn collisions(&self) -> &[HeaderCollision] {
        &self.collisions
    }
}

fn to_slash(path: &Utf8Path) -> String {
    path.components()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join("/")
}

/// Counts from a [`patch_includes`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatchSummary {
    /// Source and header files examined.
    pub files_scanned: usize,
    /// Files written back because at least one include changed.
    pub files_rewritten: usize,
    /// Individual include directives rewritten.
    pub includes_rewritten: usize,
    /// Files skipped because they are not valid UTF-8.
    pub files_skipped: usize,
}

impl AddAssign for PatchSummary {
    fn add_assign(&mut self, other: Self) {
        self.files_scanned += other.files_scanned;
        self.files_rewritten += other.files_rewritten;
        self.includes_rewritten += other.includes_rewritten;
        self.files_skipped += other.files_skipped;
    }
}

/// Rewrites quoted includes in every `.c` and `.h` file below `dir`.
///
/// For each line whose trimmed text starts with `#include "`:
///
/// - if the quoted path exists relative to the including file's directory,
///   the line is left alone;
/// - otherwise, if the quoted path's basename is in `headers` and the
///   recorded path differs from the quoted text, the quoted text is
///   replaced by the recorded path.
///
/// Files are only written when at least one line changed, so untouched
/// files keep their timestamps.
pub fn patch_includes(
    dir: &Utf8Path,
    headers: &HeaderMap,
) -> Result<PatchSummary, PatchError> {
    let mut summary = PatchSummary::default();

    for path in list_files(dir, Depth::Recursive, &["c", "h"])? {
        summary.files_scanned += 1;
        let bytes = fs::read(&path)
            .map_err(|source| PatchError::Read { path: path.clone(), source })?;
        let Ok(text) = String::from_utf8(bytes) else {
            warn!("{path} is not valid UTF-8, leaving its includes alone");
            summary.files_skipped += 1;
            continue;
        };

        let file_dir = path.parent().unwrap_or(dir);
        let (patched, rewritten) = patch_source(&text, file_dir, headers)?;
        if rewritten == 0 {
            continue;
        }

        write_atomic(&path, patched.as_bytes()).map_err(|error| {
            PatchError::Write { path: path.clone(), error }
        })?;
        debug!("rewrote {rewritten} include(s) in {path}");
        summary.files_rewritten += 1;
        summary.includes_rewritten += rewritten;
    }

    info!(
        "Patched includes in {dir}: {} of {} files rewritten.",
        summary.files_rewritten, summary.files_scanned
    );
    Ok(summary)
}

/// Returns the patched text and the number of includes rewritten.
fn patch_source(
    text: &str,
    file_dir: &Utf8Path,
    headers: &HeaderMap,
) -> Result<(String, usize), PatchError> {
    let mut out = String::with_capacity(text.len());
    let mut rewritten = 0;

    for line in text.split_inclusive('\n') {
        match rewrite_line(line, file_dir, headers)? {
            Some(new_line) => {
                out.push_str(&new_line);
                rewritten += 1;
            }
            None => out.push_str(line),
        }
    }
    Ok((out, rewritten))
}

fn rewrite_line(
    line: &str,
    file_dir: &Utf8Path,
    headers: &HeaderMap,
) -> Result<Option<String>, PatchError> {
    let Some((start, end)) = quoted_include(line) else {
        return Ok(None);
    };
    let included = &line[start..end];

    let local = file_dir.join(included);
    let exists = local
        .try_exists()
        .map_err(|source| PatchError::Probe { path: local.clone(), source })?;
    if exists {
        return Ok(None);
    }

    let base = Utf8Path::new(included).file_name().unwrap_or(included);
    match headers.get(base) {
        Some(recorded) if recorded != included => {
            debug!("#include \"{included}\" -> \"{recorded}\"");
            Ok(Some(format!("{}{}{}", &line[..start], recorded, &line[end..])))
        }
        _ => Ok(None),
    }
}

/// Returns the byte range of the quoted path in an include directive.
///
/// Lines without a closing quote are not treated as includes.
fn quoted_include(line: &str) -> Option<(usize, usize)> {
    if !line.trim_start().starts_with(INCLUDE_MARKER) {
        return None;
    }
    let start = line.find('"')? + 1;
    let end = start + line[start..].find('"')?;
    Some((start, end))
}
