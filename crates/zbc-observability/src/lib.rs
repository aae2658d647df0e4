// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # zbc-observability
//!
//! Logging setup shared by the ZBC crates, with per-crate debug flags
//! (`--debug-zbc-synapse`, `ZBC_DEBUG=zbc-noise`, ...).

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known ZBC crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "zbc-an",
    "zbc-complex",
    "zbc-config",
    "zbc-noise",
    "zbc-synapse",
];
