// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! One human-readable console layer filtered by an `EnvFilter`. `RUST_LOG`,
//! when set, takes precedence over the computed directives.

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

/// Build the filter for the given debug flags and default level
pub fn build_filter(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<EnvFilter> {
    if let Ok(directives) = std::env::var(EnvFilter::DEFAULT_ENV) {
        return EnvFilter::try_new(&directives)
            .with_context(|| format!("Invalid {} directives: {}", EnvFilter::DEFAULT_ENV, directives));
    }

    let filter = debug_flags.to_filter_string(default_level);
    EnvFilter::try_new(&filter).with_context(|| format!("Invalid log filter: {}", filter))
}

/// Initialize console logging
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags
/// * `default_level` - Level for everything not raised by a flag (e.g. `"info"`)
///
/// # Errors
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn init_logging(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<()> {
    let env_filter = build_filter(debug_flags, default_level)?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_filter(env_filter);

    Registry::default()
        .with(console_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::debug!(
        crates = ?debug_flags.enabled_crates,
        default_level,
        "logging initialised"
    );
    Ok(())
}

/// Initialize logging from process arguments and `ZBC_DEBUG` at `info` level
pub fn init_logging_default() -> Result<()> {
    init_logging(&crate::cli::parse_debug_flags(), "info")
}
