// Copyright 2026 The oggz-arduino Developers

//! CLI definitions using clap.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use oggz_vendor::ProjectLayout;
use oggz_vendor_vcs::{RetryPolicy, UpstreamUrls};
use std::time::Duration;

/// Vendor the ogg and oggz C libraries into an Arduino library and mirror
/// upstream release tags
#[derive(Debug, Parser)]
#[command(name = "oggz-vendor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Root of the downstream Arduino library
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        env = "OGGZ_VENDOR_PROJECT_ROOT",
        default_value = "."
    )]
    pub project_root: Utf8PathBuf,

    /// Directory holding the upstream clones (defaults to
    /// <PROJECT_ROOT>/original)
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        env = "OGGZ_VENDOR_UPSTREAM_DIR"
    )]
    pub upstream_dir: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn layout(&self) -> ProjectLayout {
        let layout = ProjectLayout::new(self.project_root.clone());
        match &self.upstream_dir {
            Some(dir) => layout.with_upstream_dir(dir.clone()),
            None => layout,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clone upstream if needed and vendor the latest oggz release
    Setup(SetupArgs),

    /// Vendor and tag every upstream release missing downstream
    Replicate(ReplicateArgs),

    /// Rewrite quoted includes in a directory to match the vendored layout
    PatchIncludes(PatchIncludesArgs),
}

#[derive(Debug, Args)]
pub struct SetupArgs {
    /// URL of the ogg repository
    #[arg(long, default_value = UpstreamUrls::OGG)]
    pub ogg_url: String,

    /// URL of the oggz repository
    #[arg(long, default_value = UpstreamUrls::OGGZ)]
    pub oggz_url: String,
}

impl SetupArgs {
    pub fn urls(&self) -> UpstreamUrls {
        UpstreamUrls { ogg: self.ogg_url.clone(), oggz: self.oggz_url.clone() }
    }
}

#[derive(Debug, Args)]
pub struct ReplicateArgs {
    /// URL of the ogg repository
    #[arg(long, default_value = UpstreamUrls::OGG)]
    pub ogg_url: String,

    /// URL of the oggz repository whose tags are replicated
    #[arg(long, default_value = UpstreamUrls::OGGZ_MIRROR)]
    pub oggz_url: String,

    /// Remote to push tags to
    #[arg(long, value_name = "NAME", default_value = "origin")]
    pub remote: String,

    /// Number of push attempts per tag
    #[arg(long, default_value_t = 3)]
    pub attempts: u32,

    /// Seconds to wait between push attempts
    #[arg(long, default_value_t = 5)]
    pub retry_delay_secs: u64,
}

impl ReplicateArgs {
    pub fn urls(&self) -> UpstreamUrls {
        UpstreamUrls { ogg: self.ogg_url.clone(), oggz: self.oggz_url.clone() }
    }

    pub fn retry(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.attempts,
            delay: Duration::from_secs(self.retry_delay_secs),
        }
    }
}

#[derive(Debug, Args)]
pub struct PatchIncludesArgs {
    /// Directory whose .c and .h files are rewritten
    pub dir: Utf8PathBuf,

    /// Directory include paths are made relative to (defaults to the
    /// parent of DIR)
    #[arg(long, value_name = "DIR")]
    pub header_root: Option<Utf8PathBuf>,
}

impl PatchIncludesArgs {
    pub fn header_root(&self) -> Utf8PathBuf {
        if let Some(root) = &self.header_root {
            return root.clone();
        }
        match self.dir.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent.to_owned(),
            _ => Utf8PathBuf::from("."),
        }
    }
}
