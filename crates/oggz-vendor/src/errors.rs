// Copyright 2026 The oggz-arduino Developers

//! Error types for vendoring and include patching.

use camino::Utf8PathBuf;
use std::{io, path::PathBuf};
use thiserror::Error;

/// An error that occurs while walking a directory tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScanError {
    /// Walking the directory tree failed.
    #[error("failed to walk {root}")]
    Walk {
        /// The root of the walk.
        root: Utf8PathBuf,
        /// The underlying walk error.
        #[source]
        source: walkdir::Error,
    },

    /// An entry in the tree does not have a UTF-8 path.
    #[error("path is not valid UTF-8: {path:?}")]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },
}

/// An error that occurred during an atomic file write.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AtomicWriteError {
    /// Writing contents to the temporary file failed.
    #[error("writing file contents failed")]
    Write(#[source] io::Error),

    /// The atomic write infrastructure failed (e.g., creating the
    /// temporary file, or renaming it into place).
    #[error("atomic create or rename failed")]
    Rename(#[source] io::Error),
}

/// Errors that can occur while copying upstream sources into a
/// destination tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VendorError {
    /// Failed to create a destination directory.
    #[error("failed to create directory {path}")]
    CreateDir {
        /// The directory path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to list an upstream directory.
    #[error("failed to list upstream files")]
    Scan(#[from] ScanError),

    /// Failed to copy a file into the destination.
    #[error("failed to copy {from} to {to}")]
    Copy {
        /// The upstream file.
        from: Utf8PathBuf,
        /// The destination path.
        to: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to check whether a path exists.
    #[error("I/O error while checking for {path}")]
    Probe {
        /// The path being checked.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write a generated header.
    #[error("failed to write generated header {path}")]
    WriteGenerated {
        /// The header path.
        path: Utf8PathBuf,
        /// The underlying write error.
        #[source]
        error: AtomicWriteError,
    },
}

/// Errors that can occur while rewriting include directives.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PatchError {
    /// Failed to walk the tree being patched.
    #[error("failed to find source files to patch")]
    Scan(#[from] ScanError),

    /// Failed to read a source file.
    #[error("failed to read {path}")]
    Read {
        /// The source file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to check whether an included file exists locally.
    #[error("I/O error while checking for {path}")]
    Probe {
        /// The path being checked.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write a patched source file.
    #[error("failed to write patched file {path}")]
    Write {
        /// The source file.
        path: Utf8PathBuf,
        /// The underlying write error.
        #[source]
        error: AtomicWriteError,
    },
}
