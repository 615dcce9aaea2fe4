// Copyright 2026 The oggz-arduino Developers

//! Vendoring of the ogg and oggz C libraries into an Arduino library tree.
//!
//! The Arduino build system compiles everything below a library's `src/`
//! directory and adds `src/` to the include path. Upstream ogg and oggz use
//! autotools layouts instead, so vendoring them means:
//!
//! 1. copying a curated subset of each upstream tree into `src/`
//!    ([`vendor_ogg`], [`vendor_oggz`]);
//! 2. synthesizing the headers autotools would normally generate
//!    ([`ensure_if_absent`], [`always_regenerate`]);
//! 3. rewriting quoted `#include` directives so they resolve against the
//!    new layout ([`HeaderMap`], [`patch_includes`]).
//!
//! This crate only touches the filesystem. Cloning upstream, checking out
//! tags and publishing downstream tags live in
//! [`oggz-vendor-vcs`](https://docs.rs/oggz-vendor-vcs).
//!
//! # Examples
//!
//! ```no_run
//! use oggz_vendor::{HeaderMap, ProjectLayout, patch_includes, vendor_ogg};
//!
//! let layout = ProjectLayout::new("/work/oggz-arduino");
//! vendor_ogg(&layout.ogg_upstream(), &layout.ogg_dest())?;
//!
//! let headers = HeaderMap::scan(&layout.source_root())?;
//! patch_includes(&layout.ogg_dest(), &headers)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

mod errors;
mod fsutil;
mod generated;
mod layout;
mod patch;
mod tag;
mod vendor;

pub use errors::{AtomicWriteError, PatchError, ScanError, VendorError};
pub use generated::{
    GeneratedHeader, GeneratedOutcome, OGG_CONFIG_TYPES_H, OGGZ_CONFIG_H,
    OGGZ_OFF_T_GENERATED_H, always_regenerate, ensure_if_absent,
};
pub use layout::ProjectLayout;
pub use patch::{HeaderCollision, HeaderMap, PatchSummary, patch_includes};
pub use tag::{TagVersionKey, UpstreamTag, latest_tag};
pub use vendor::{FlattenCollision, VendorSummary, vendor_ogg, vendor_oggz};
