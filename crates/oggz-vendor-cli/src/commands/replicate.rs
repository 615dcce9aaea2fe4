// Copyright 2026 The oggz-arduino Developers

//! `oggz-vendor replicate` command

use anyhow::{Context, Result};
use oggz_vendor::ProjectLayout;
use oggz_vendor_vcs::{GitBackend, LibrarySetup, Replicator, Vcs};

use crate::cli::ReplicateArgs;

pub fn execute(layout: ProjectLayout, args: ReplicateArgs) -> Result<()> {
    let vcs = Vcs::git()?;
    let setup = LibrarySetup::new(layout, vcs, args.urls());
    let backend = GitBackend::new(setup, args.remote.clone());
    let mut replicator = Replicator::new(backend).with_retry(args.retry());

    let report = replicator.run().context("tag replication failed")?;

    eprintln!(
        "    Published {} tags ({} already present, {} prereleases skipped)",
        report.published.len(),
        report.skipped_existing.len(),
        report.skipped_prerelease.len(),
    );
    for tag in &report.published {
        eprintln!("    Published {tag}");
    }
    // Failed pushes are reported but do not fail the run.
    for failed in &report.failed {
        eprintln!(
            "    Failed to publish {} after {} attempts: {}",
            failed.tag, failed.attempts, failed.error
        );
    }
    Ok(())
}
