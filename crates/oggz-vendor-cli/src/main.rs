// Copyright 2026 The oggz-arduino Developers

//! oggz-vendor: vendor ogg and oggz into an Arduino library.

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --verbose.
    let default_filter =
        if cli.verbose { "oggz_vendor=debug" } else { "oggz_vendor=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let layout = cli.layout();
    debug!(
        "project root {}, upstream clones in {}",
        layout.project_root(),
        layout.upstream_dir()
    );

    match cli.command {
        Commands::Setup(args) => commands::setup::execute(layout, args),
        Commands::Replicate(args) => {
            commands::replicate::execute(layout, args)
        }
        Commands::PatchIncludes(args) => {
            commands::patch_includes::execute(args)
        }
    }
}
