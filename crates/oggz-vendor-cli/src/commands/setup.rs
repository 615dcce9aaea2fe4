// Copyright 2026 The oggz-arduino Developers

//! `oggz-vendor setup` command

use anyhow::{Context, Result};
use oggz_vendor::ProjectLayout;
use oggz_vendor_vcs::{CodecRevision, LibrarySetup, Vcs};

use crate::cli::SetupArgs;

pub fn execute(layout: ProjectLayout, args: SetupArgs) -> Result<()> {
    let vcs = Vcs::git()?;
    let setup = LibrarySetup::new(layout, vcs, args.urls());
    let report = setup
        .run(CodecRevision::Latest)
        .context("library setup failed")?;

    match &report.oggz_tag {
        Some(tag) => eprintln!("    Vendored oggz {tag}"),
        None => eprintln!("    Vendored oggz from the current checkout"),
    }
    eprintln!(
        "    Copied {} ogg and {} oggz files, rewrote {} includes in {} files",
        report.ogg.files_copied,
        report.oggz.files_copied,
        report.patch.includes_rewritten,
        report.patch.files_rewritten,
    );
    for collision in &report.header_collisions {
        eprintln!(
            "    Warning: {} resolves to {} (also at {})",
            collision.file_name, collision.kept, collision.discarded
        );
    }
    Ok(())
}
