// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! AN-rate command-line driver.
//!
//! Reads an IHC waveform (whitespace-separated floats) and prints the
//! synapse output rate, one sample per line.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use zbc_an::config::{apply_cli_overrides, apply_environment_overrides, load_config, ConfigError, ZbcConfig};
use zbc_an::observability::{debug_flags_help, init_logging, parse_debug_flags};
use zbc_an::AnRateSimulation;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: anrate <ihc-file> [--config <path>] [--set key=value ...] [--debug-<crate>]\n\n\
         Keys: cf, sample_rate, nrep, fiber_type, power_law, synapse_sample_rate,\n\
         \x20     noise_type, seed, log_level\n\n{}",
        debug_flags_help()
    );
    process::exit(2);
}

struct Args {
    input: PathBuf,
    config: Option<PathBuf>,
    overrides: HashMap<String, String>,
}

fn parse_args() -> Args {
    let mut input = None;
    let mut config = None;
    let mut overrides = HashMap::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                config = Some(PathBuf::from(v));
            }
            "--set" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                let Some((key, value)) = v.split_once('=') else {
                    eprintln!("Expected key=value, got: {v}");
                    usage_and_exit();
                };
                overrides.insert(key.trim().to_string(), value.trim().to_string());
            }
            "-h" | "--help" => usage_and_exit(),
            other if other.starts_with("--debug-") => {}
            other if input.is_none() && !other.starts_with("--") => {
                input = Some(PathBuf::from(other));
            }
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    Args {
        input: input.unwrap_or_else(|| usage_and_exit()),
        config,
        overrides,
    }
}

fn read_waveform(path: &Path) -> Result<Vec<f64>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read IHC waveform {}", path.display()))?;
    raw.split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            token
                .parse::<f64>()
                .with_context(|| format!("Sample {i} is not a number: {token}"))
        })
        .collect()
}

fn main() -> Result<()> {
    let args = parse_args();

    let config = match &args.config {
        Some(path) => load_config(Some(path.as_path()), Some(&args.overrides))?,
        None => match load_config(None, Some(&args.overrides)) {
            Ok(config) => config,
            Err(ConfigError::FileNotFound(_)) => {
                let mut config = ZbcConfig::default();
                apply_environment_overrides(&mut config);
                apply_cli_overrides(&mut config, &args.overrides);
                config
            }
            Err(e) => return Err(e.into()),
        },
    };

    let mut debug_flags = parse_debug_flags();
    for crate_name in &config.logging.debug_crates {
        debug_flags.enable(crate_name);
    }
    init_logging(&debug_flags, &config.logging.log_level)?;

    let simulation = AnRateSimulation::from_config(&config)?;
    let ihc = read_waveform(&args.input)?;
    let rate = simulation.run(&ihc)?;

    let output: String = rate.iter().map(|r| format!("{r}\n")).collect();
    print!("{output}");
    Ok(())
}
