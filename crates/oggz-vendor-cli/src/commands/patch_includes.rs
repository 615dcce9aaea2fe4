// Copyright 2026 The oggz-arduino Developers

//! `oggz-vendor patch-includes` command

use anyhow::{Context, Result};
use oggz_vendor::{HeaderMap, patch_includes};

use crate::cli::PatchIncludesArgs;

pub fn execute(args: PatchIncludesArgs) -> Result<()> {
    let header_root = args.header_root();
    let headers = HeaderMap::scan(&header_root)
        .with_context(|| format!("failed to scan headers in {header_root}"))?;
    let summary = patch_includes(&args.dir, &headers)
        .with_context(|| format!("failed to patch includes in {}", args.dir))?;

    eprintln!(
        "    Rewrote {} includes in {} of {} files",
        summary.includes_rewritten,
        summary.files_rewritten,
        summary.files_scanned,
    );
    if summary.files_skipped > 0 {
        eprintln!("    Skipped {} non-UTF-8 files", summary.files_skipped);
    }
    Ok(())
}
