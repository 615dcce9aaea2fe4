// Copyright 2026 The oggz-arduino Developers

//! Mirroring upstream oggz release tags into the downstream repository.

use crate::{
    CodecRevision, GitCommandError, LibrarySetup, ReplicateError, Vcs,
};
use oggz_vendor::UpstreamTag;
use std::{collections::BTreeSet, thread, time::Duration};
use tracing::{info, warn};

/// The repository operations a [`Replicator`] drives.
///
/// [`GitBackend`] is the real implementation. The trait exists so the
/// replication policy can be exercised without touching git.
pub trait ReplicationBackend {
    /// Gets the upstream and downstream repositories into a usable state.
    fn prepare(&mut self) -> Result<(), ReplicateError> {
        Ok(())
    }

    /// Lists upstream tags, in the order they should be replicated.
    fn upstream_tags(&mut self) -> Result<Vec<UpstreamTag>, ReplicateError>;

    /// Lists tags that already exist downstream.
    fn downstream_tags(
        &mut self,
    ) -> Result<BTreeSet<UpstreamTag>, ReplicateError>;

    /// Checks out `tag` in the upstream working tree.
    fn checkout_upstream(
        &mut self,
        tag: &UpstreamTag,
    ) -> Result<(), ReplicateError>;

    /// Regenerates the vendored sources from the checked-out upstream.
    fn vendor(&mut self, tag: &UpstreamTag) -> Result<(), ReplicateError>;

    /// Records the vendored sources downstream as `tag` and pushes it.
    ///
    /// May be called again for the same tag after a failure, so it must
    /// not fail just because an earlier attempt got partway.
    fn publish(&mut self, tag: &UpstreamTag) -> Result<(), GitCommandError>;

    /// Undoes whatever a failed [`publish`](Self::publish) left behind that
    /// would make `tag` look present downstream, so a later run tries it
    /// again.
    fn abandon(&mut self, tag: &UpstreamTag) -> Result<(), GitCommandError> {
        let _ = tag;
        Ok(())
    }
}

/// How often to try publishing a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first. Zero is treated as
    /// one.
    pub attempts: u32,
    /// Time to wait after a failed attempt before the next one.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy { attempts: 3, delay: Duration::from_secs(5) }
    }
}

/// A tag that could not be published.
#[derive(Debug)]
pub struct FailedTag {
    /// The tag.
    pub tag: UpstreamTag,
    /// How many attempts were made.
    pub attempts: u32,
    /// The error from the last attempt.
    pub error: GitCommandError,
}

/// The outcome of a [`Replicator::run`].
///
/// Every list is in upstream order.
#[derive(Debug, Default)]
pub struct ReplicationReport {
    /// Tags created and pushed downstream.
    pub published: Vec<UpstreamTag>,
    /// Tags skipped because they look like betas or release candidates.
    pub skipped_prerelease: Vec<UpstreamTag>,
    /// Tags skipped because they already exist downstream.
    pub skipped_existing: Vec<UpstreamTag>,
    /// Tags that were vendored but could not be published.
    pub failed: Vec<FailedTag>,
}

impl ReplicationReport {
    /// Returns true if every eligible tag was published.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Replays upstream tags into the downstream repository.
///
/// For each upstream tag that is neither a prerelease nor already present
/// downstream, the upstream tag is checked out, the library is vendored
/// from it, and the result is published downstream. Checkout and vendoring
/// failures abort the run; publishing failures are retried according to
/// the [`RetryPolicy`] and then recorded in the report.
#[derive(Debug)]
pub struct Replicator<B> {
    backend: B,
    retry: RetryPolicy,
}

impl<B: ReplicationBackend> Replicator<B> {
    /// Creates a replicator with the default retry policy (three attempts,
    /// five seconds apart).
    pub fn new(backend: B) -> Self {
        Replicator { backend, retry: RetryPolicy::default() }
    }

    /// Overrides the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consumes the replicator and returns the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Replicates every eligible upstream tag.
    pub fn run(&mut self) -> Result<ReplicationReport, ReplicateError> {
        self.backend.prepare()?;
        let upstream = self.backend.upstream_tags()?;
        let mut downstream = self.backend.downstream_tags()?;
        let mut report = ReplicationReport::default();

        for tag in upstream {
            if tag.is_prerelease() {
                info!("Tag '{tag}' contains 'beta' or 'rc', skipping.");
                report.skipped_prerelease.push(tag);
                continue;
            }
            if downstream.contains(&tag) {
                info!("Tag '{tag}' already exists downstream, skipping.");
                report.skipped_existing.push(tag);
                continue;
            }

            info!("Checking out upstream tag '{tag}'...");
            self.backend.checkout_upstream(&tag)?;
            info!("Vendoring sources for tag '{tag}'...");
            self.backend.vendor(&tag)?;
            info!("Creating and pushing tag '{tag}'...");
            match self.publish_with_retry(&tag) {
                Ok(()) => {
                    downstream.insert(tag.clone());
                    report.published.push(tag);
                }
                Err((attempts, error)) => {
                    if let Err(abandon_error) = self.backend.abandon(&tag) {
                        warn!(
                            "Could not clean up after failing to publish \
                             '{tag}'; it may be skipped on the next run: \
                             {abandon_error}"
                        );
                    }
                    report.failed.push(FailedTag { tag, attempts, error });
                }
            }
        }

        Ok(report)
    }

    fn publish_with_retry(
        &mut self,
        tag: &UpstreamTag,
    ) -> Result<(), (u32, GitCommandError)> {
        let attempts = self.retry.attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.backend.publish(tag) {
                Ok(()) => return Ok(()),
                Err(error) if attempt < attempts => {
                    warn!(
                        "Push failed for tag '{tag}': {error}; retrying in \
                         {:?} (attempt {}/{attempts})",
                        self.retry.delay,
                        attempt + 1,
                    );
                    thread::sleep(self.retry.delay);
                    attempt += 1;
                }
                Err(error) => {
                    warn!(
                        "Push failed for tag '{tag}' after {attempts} \
                         attempts, skipping: {error}"
                    );
                    return Err((attempt, error));
                }
            }
        }
    }
}

/// The production [`ReplicationBackend`]: git working trees on disk.
///
/// Upstream tags come from the oggz clone. Each tag is vendored with
/// [`LibrarySetup::run`] against the checked-out oggz tree, then committed,
/// tagged and pushed in the downstream repository.
#[derive(Clone, Debug)]
pub struct GitBackend {
    setup: LibrarySetup,
    remote: String,
}

impl GitBackend {
    /// The directory below the project root that holds vendored sources.
    const VENDORED_PATHSPEC: &'static str = "src";

    /// Creates a backend that pushes to `remote`.
    pub fn new(setup: LibrarySetup, remote: impl Into<String>) -> Self {
        GitBackend { setup, remote: remote.into() }
    }

    /// Returns the remote tags are pushed to.
    pub fn remote(&self) -> &str {
        &self.remote
    }

    fn vcs(&self) -> &Vcs {
        self.setup.vcs()
    }
}

impl ReplicationBackend for GitBackend {
    fn prepare(&mut self) -> Result<(), ReplicateError> {
        self.setup.ensure_clones().map_err(ReplicateError::Prepare)
    }

    fn upstream_tags(&mut self) -> Result<Vec<UpstreamTag>, ReplicateError> {
        let repo = self.setup.layout().oggz_upstream();
        self.vcs().list_tags(&repo).map_err(ReplicateError::UpstreamTags)
    }

    fn downstream_tags(
        &mut self,
    ) -> Result<BTreeSet<UpstreamTag>, ReplicateError> {
        let repo = self.setup.layout().project_root();
        let tags = self
            .vcs()
            .list_tags(repo)
            .map_err(ReplicateError::DownstreamTags)?;
        Ok(tags.into_iter().collect())
    }

    fn checkout_upstream(
        &mut self,
        tag: &UpstreamTag,
    ) -> Result<(), ReplicateError> {
        let repo = self.setup.layout().oggz_upstream();
        self.vcs().checkout(&repo, tag).map_err(|error| {
            ReplicateError::Checkout { tag: tag.clone(), error }
        })
    }

    fn vendor(&mut self, tag: &UpstreamTag) -> Result<(), ReplicateError> {
        let report =
            self.setup.run(CodecRevision::CheckedOut).map_err(|error| {
                ReplicateError::Vendor { tag: tag.clone(), error }
            })?;
        info!(
            "Vendored {} ogg and {} oggz files, rewrote {} includes.",
            report.ogg.files_copied,
            report.oggz.files_copied,
            report.patch.includes_rewritten,
        );
        Ok(())
    }

    fn publish(&mut self, tag: &UpstreamTag) -> Result<(), GitCommandError> {
        let repo = self.setup.layout().project_root();
        let vcs = self.vcs();

        vcs.stage(repo, Self::VENDORED_PATHSPEC)?;
        if vcs.has_staged_changes(repo)? {
            vcs.commit(repo, &format!("Update vendored sources to {tag}"))?;
        }
        if !vcs.tag_exists(repo, tag)? {
            vcs.create_tag(repo, tag)?;
        }
        vcs.push_tag(repo, &self.remote, tag)
    }

    /// Deletes the local tag, since downstream tags are read from the local
    /// repository. The commit stays; the next publish finds nothing to
    /// stage and only recreates the tag.
    fn abandon(&mut self, tag: &UpstreamTag) -> Result<(), GitCommandError> {
        let repo = self.setup.layout().project_root();
        if self.vcs().tag_exists(repo, tag)? {
            self.vcs().delete_tag(repo, tag)?;
        }
        Ok(())
    }
}
