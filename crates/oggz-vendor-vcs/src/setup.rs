// Copyright 2026 The oggz-arduino Developers

//! Creating and updating the vendored library from upstream clones.

use crate::{SetupError, Vcs};
use camino::Utf8Path;
use fs_err as fs;
use oggz_vendor::{
    HeaderCollision, HeaderMap, PatchSummary, ProjectLayout, UpstreamTag,
    VendorSummary, latest_tag, patch_includes, vendor_ogg, vendor_oggz,
};
use tracing::info;

/// Where to clone the upstream repositories from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamUrls {
    /// The ogg repository.
    pub ogg: String,
    /// The oggz repository.
    pub oggz: String,
}

impl UpstreamUrls {
    /// The canonical ogg repository.
    pub const OGG: &'static str = "https://github.com/xiph/ogg.git";
    /// The oggz repository used when setting up the library.
    pub const OGGZ: &'static str = "https://gitlab.xiph.org/xiph/liboggz.git";
    /// The oggz mirror whose tags are replicated.
    pub const OGGZ_MIRROR: &'static str = "https://github.com/xiph/oggz.git";

    /// URLs used by a standalone setup run.
    pub fn for_setup() -> Self {
        UpstreamUrls { ogg: Self::OGG.to_owned(), oggz: Self::OGGZ.to_owned() }
    }

    /// URLs used when replicating tags.
    pub fn for_replication() -> Self {
        UpstreamUrls {
            ogg: Self::OGG.to_owned(),
            oggz: Self::OGGZ_MIRROR.to_owned(),
        }
    }
}

/// Which oggz revision to vendor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodecRevision {
    /// Check out the newest oggz tag first.
    Latest,
    /// Vendor whatever is currently checked out.
    CheckedOut,
}

/// What a [`LibrarySetup::run`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetupReport {
    /// The oggz tag that was checked out, if any.
    pub oggz_tag: Option<UpstreamTag>,
    /// Results of vendoring ogg.
    pub ogg: VendorSummary,
    /// Results of vendoring oggz.
    pub oggz: VendorSummary,
    /// Header basenames found more than once in the vendored tree.
    pub header_collisions: Vec<HeaderCollision>,
    /// Include rewriting across both libraries.
    pub patch: PatchSummary,
}

/// Creates or updates the vendored ogg and oggz sources.
#[derive(Clone, Debug)]
pub struct LibrarySetup {
    layout: ProjectLayout,
    vcs: Vcs,
    urls: UpstreamUrls,
}

impl LibrarySetup {
    /// Creates a setup for `layout`.
    pub fn new(layout: ProjectLayout, vcs: Vcs, urls: UpstreamUrls) -> Self {
        LibrarySetup { layout, vcs, urls }
    }

    /// Returns the paths this setup works on.
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Returns the git binary this setup runs.
    pub fn vcs(&self) -> &Vcs {
        &self.vcs
    }

    /// Clones ogg and oggz unless a working copy already exists.
    pub fn ensure_clones(&self) -> Result<(), SetupError> {
        self.ensure_clone("ogg", &self.urls.ogg, &self.layout.ogg_upstream())?;
        self.ensure_clone(
            "oggz",
            &self.urls.oggz,
            &self.layout.oggz_upstream(),
        )
    }

    fn ensure_clone(
        &self,
        name: &str,
        url: &str,
        dest: &Utf8Path,
    ) -> Result<(), SetupError> {
        let exists = dest.try_exists().map_err(|source| SetupError::Probe {
            path: dest.to_owned(),
            source,
        })?;
        if exists {
            return Ok(());
        }

        let parent = self.layout.upstream_dir();
        fs::create_dir_all(parent).map_err(|source| SetupError::CreateDir {
            path: parent.to_owned(),
            source,
        })?;
        info!("Cloning {name} repository into {parent}...");
        self.vcs.clone_repo(url, dest).map_err(|error| SetupError::Clone {
            url: url.to_owned(),
            dest: dest.to_owned(),
            error,
        })
    }

    /// Checks out the newest oggz tag and returns it.
    ///
    /// Returns `None` without touching the checkout if oggz has no tags.
    pub fn checkout_latest_oggz(
        &self,
    ) -> Result<Option<UpstreamTag>, SetupError> {
        let repo = self.layout.oggz_upstream();
        let tags = self.vcs.list_tags(&repo).map_err(|error| {
            SetupError::ListTags { repo: repo.clone(), error }
        })?;
        let Some(latest) = latest_tag(&tags) else {
            info!("oggz has no tags, vendoring the current checkout");
            return Ok(None);
        };

        info!("Checking out latest tag {latest} in oggz...");
        self.vcs.checkout(&repo, latest).map_err(|error| {
            SetupError::Checkout { tag: latest.clone(), repo, error }
        })?;
        Ok(Some(latest.clone()))
    }

    /// Clones upstream if needed, vendors both libraries and patches their
    /// includes.
    ///
    /// With [`CodecRevision::Latest`] the newest oggz tag is checked out
    /// first; with [`CodecRevision::CheckedOut`] the oggz working tree is
    /// used as is. The ogg working tree is always used as is.
    pub fn run(
        &self,
        revision: CodecRevision,
    ) -> Result<SetupReport, SetupError> {
        self.ensure_clones()?;

        let oggz_tag = match revision {
            CodecRevision::Latest => self.checkout_latest_oggz()?,
            CodecRevision::CheckedOut => None,
        };

        let layout = &self.layout;
        let ogg = vendor_ogg(&layout.ogg_upstream(), &layout.ogg_dest())
            .map_err(SetupError::VendorOgg)?;
        let oggz = vendor_oggz(
            &layout.oggz_upstream(),
            &layout.oggz_dest(),
            &layout.liboggz_dest(),
        )
        .map_err(SetupError::VendorOggz)?;

        // Build the map once all files are in place, so headers from both
        // libraries are visible to each other.
        let headers = HeaderMap::scan(&layout.source_root())?;
        let mut patch = PatchSummary::default();
        for dir in [layout.ogg_dest(), layout.oggz_dest()] {
            patch += patch_includes(&dir, &headers)?;
        }

        Ok(SetupReport {
            oggz_tag,
            ogg,
            oggz,
            header_collisions: headers.collisions().to_vec(),
            patch,
        })
    }
}

// Tests that need real upstream clones are in tests/integration/setup.rs.
