// Copyright 2026 The oggz-arduino Developers

//! Command implementations.

pub mod patch_includes;
pub mod replicate;
pub mod setup;
