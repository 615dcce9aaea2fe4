// Copyright 2026 The oggz-arduino Developers

//! Where upstream clones live and where vendored files go.

use camino::{Utf8Path, Utf8PathBuf};

/// Paths used by a single setup or replication run.
///
/// The downstream project root holds the vendored `src/` tree. Upstream
/// clones live in `upstream_dir`, which defaults to `original/` below the
/// project root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectLayout {
    project_root: Utf8PathBuf,
    upstream_dir: Utf8PathBuf,
}

impl ProjectLayout {
    /// Creates a layout with upstream clones in `<project_root>/original`.
    pub fn new(project_root: impl Into<Utf8PathBuf>) -> Self {
        let project_root = project_root.into();
        let upstream_dir = project_root.join("original");
        ProjectLayout { project_root, upstream_dir }
    }

    /// Overrides the directory holding the upstream clones.
    pub fn with_upstream_dir(
        mut self,
        upstream_dir: impl Into<Utf8PathBuf>,
    ) -> Self {
        self.upstream_dir = upstream_dir.into();
        self
    }

    /// The downstream repository's working tree.
    pub fn project_root(&self) -> &Utf8Path {
        &self.project_root
    }

    /// The directory holding both upstream clones.
    pub fn upstream_dir(&self) -> &Utf8Path {
        &self.upstream_dir
    }

    /// The upstream ogg clone.
    pub fn ogg_upstream(&self) -> Utf8PathBuf {
        self.upstream_dir.join("ogg")
    }

    /// The upstream oggz clone.
    pub fn oggz_upstream(&self) -> Utf8PathBuf {
        self.upstream_dir.join("oggz")
    }

    /// Root of the vendored tree; include paths are relative to this.
    pub fn source_root(&self) -> Utf8PathBuf {
        self.project_root.join("src")
    }

    /// Destination for ogg sources and headers.
    pub fn ogg_dest(&self) -> Utf8PathBuf {
        self.source_root().join("ogg")
    }

    /// Destination for oggz public headers and generated config.
    pub fn oggz_dest(&self) -> Utf8PathBuf {
        self.source_root().join("oggz")
    }

    /// Destination for oggz private implementation files.
    pub fn liboggz_dest(&self) -> Utf8PathBuf {
        self.oggz_dest().join("liboggz")
    }
}
