// Copyright 2026 The oggz-arduino Developers

//! Git invocation, library setup and tag replication for oggz-vendor.
//!
//! [`oggz_vendor`] knows how to turn upstream ogg and oggz checkouts into an
//! Arduino library tree. This crate supplies the checkouts and publishes the
//! result:
//!
//! * [`Vcs`] runs git as a subprocess, honoring `$GIT`.
//! * [`LibrarySetup`] clones upstream if needed, optionally checks out the
//!   newest oggz tag, and vendors both libraries.
//! * [`Replicator`] walks the upstream oggz tags and, for every release not
//!   yet present downstream, vendors it and pushes a matching tag.
//!
//! # Setting up the library
//!
//! ```no_run
//! use oggz_vendor::ProjectLayout;
//! use oggz_vendor_vcs::{CodecRevision, LibrarySetup, UpstreamUrls, Vcs};
//!
//! let setup = LibrarySetup::new(
//!     ProjectLayout::new("."),
//!     Vcs::git()?,
//!     UpstreamUrls::for_setup(),
//! );
//! let report = setup.run(CodecRevision::Latest)?;
//! println!("vendored oggz {:?}", report.oggz_tag);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Replicating tags
//!
//! ```no_run
//! use oggz_vendor::ProjectLayout;
//! use oggz_vendor_vcs::{
//!     GitBackend, LibrarySetup, Replicator, UpstreamUrls, Vcs,
//! };
//!
//! let setup = LibrarySetup::new(
//!     ProjectLayout::new("."),
//!     Vcs::git()?,
//!     UpstreamUrls::for_replication(),
//! );
//! let mut replicator = Replicator::new(GitBackend::new(setup, "origin"));
//! let report = replicator.run()?;
//! for failed in &report.failed {
//!     eprintln!("could not publish {}: {}", failed.tag, failed.error);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

mod errors;
mod replicate;
mod setup;
mod vcs;

pub use errors::{
    GitCommandError, ReplicateError, SetupError, VcsEnvError,
};
pub use replicate::{
    FailedTag, GitBackend, ReplicationBackend, ReplicationReport,
    Replicator, RetryPolicy,
};
pub use setup::{CodecRevision, LibrarySetup, SetupReport, UpstreamUrls};
pub use vcs::{CommandOutput, Vcs};
