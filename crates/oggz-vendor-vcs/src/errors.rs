// Copyright 2026 The oggz-arduino Developers

//! Error types for git invocation, library setup and tag replication.

use camino::Utf8PathBuf;
use oggz_vendor::{PatchError, ScanError, UpstreamTag, VendorError};
use std::{ffi::OsString, io};
use thiserror::Error;

// ---- VCS errors ----

/// An error from reading the git binary path from the environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VcsEnvError {
    /// The environment variable is set but is not valid UTF-8.
    #[error(
        "${var} environment variable is not valid \
         UTF-8: {value:?}"
    )]
    NonUtf8 {
        /// The environment variable name.
        var: &'static str,
        /// The non-UTF-8 value.
        value: OsString,
    },
}

/// An error from running a git command.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GitCommandError {
    /// Failed to spawn the git process.
    #[error("failed to run git at {binary_path:?} in {repo_root}")]
    SpawnFailed {
        /// The path to the git executable.
        binary_path: String,
        /// The working directory where the command was run.
        repo_root: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The git command exited unsuccessfully.
    #[error("`git {args}` failed in {repo_root} ({exit_status}): {stderr}")]
    Failed {
        /// The arguments passed to git, space-separated.
        args: String,
        /// The working directory where the command was run.
        repo_root: Utf8PathBuf,
        /// The exit code, if the process exited normally.
        exit_code: Option<i32>,
        /// A human-readable description of the exit status (e.g.,
        /// "exit status: 128" or "signal: 9").
        exit_status: String,
        /// The stderr output from git, trimmed.
        stderr: String,
    },
}

// ---- Setup errors ----

/// Errors that can occur while setting up the vendored libraries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SetupError {
    /// Failed to check whether an upstream clone exists.
    #[error("I/O error while checking for {path}")]
    Probe {
        /// The path being checked.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to create the directory holding upstream clones.
    #[error("failed to create directory {path}")]
    CreateDir {
        /// The directory path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Cloning an upstream repository failed.
    #[error("failed to clone {url} into {dest}")]
    Clone {
        /// The repository URL.
        url: String,
        /// The clone destination.
        dest: Utf8PathBuf,
        /// The underlying git error.
        #[source]
        error: GitCommandError,
    },

    /// Listing upstream tags failed.
    #[error("failed to list tags in {repo}")]
    ListTags {
        /// The repository whose tags were listed.
        repo: Utf8PathBuf,
        /// The underlying git error.
        #[source]
        error: GitCommandError,
    },

    /// Checking out an upstream tag failed.
    #[error("failed to check out {tag} in {repo}")]
    Checkout {
        /// The tag being checked out.
        tag: UpstreamTag,
        /// The repository.
        repo: Utf8PathBuf,
        /// The underlying git error.
        #[source]
        error: GitCommandError,
    },

    /// Copying ogg sources failed.
    #[error("failed to vendor ogg")]
    VendorOgg(#[source] VendorError),

    /// Copying oggz sources failed.
    #[error("failed to vendor oggz")]
    VendorOggz(#[source] VendorError),

    /// Scanning the vendored tree for headers failed.
    #[error("failed to scan vendored headers")]
    ScanHeaders(#[from] ScanError),

    /// Rewriting include directives failed.
    #[error("failed to patch includes")]
    Patch(#[from] PatchError),
}

// ---- Replication errors ----

/// Fatal errors that abort a replication run.
///
/// Publishing failures are not fatal; they are retried and then recorded
/// in the [`ReplicationReport`](crate::ReplicationReport).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReplicateError {
    /// Preparing the upstream clones failed.
    #[error("failed to prepare upstream repositories")]
    Prepare(#[source] SetupError),

    /// Listing upstream tags failed.
    #[error("failed to list upstream tags")]
    UpstreamTags(#[source] GitCommandError),

    /// Listing downstream tags failed.
    #[error("failed to list downstream tags")]
    DownstreamTags(#[source] GitCommandError),

    /// Checking out an upstream tag failed.
    #[error("failed to check out upstream tag {tag}")]
    Checkout {
        /// The tag being checked out.
        tag: UpstreamTag,
        /// The underlying git error.
        #[source]
        error: GitCommandError,
    },

    /// Vendoring the checked-out upstream state failed.
    #[error("failed to vendor upstream tag {tag}")]
    Vendor {
        /// The tag being vendored.
        tag: UpstreamTag,
        /// The underlying setup error.
        #[source]
        error: SetupError,
    },
}
