// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Three tiers, later ones winning:
//! 1. TOML file (base values)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, ZbcConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "zbc_configuration.toml";

/// Environment variable pointing at an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "ZBC_CONFIG_PATH";

/// Find the configuration file
///
/// Search order:
/// 1. `ZBC_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        search_paths.extend(cwd.ancestors().skip(1).take(5).map(|dir| dir.join(CONFIG_FILE_NAME)));
    }

    if let Some(found) = search_paths.iter().find(|path| path.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if the config file is not found or contains invalid TOML.
/// Value ranges are checked separately by [`validate_config`](crate::validate_config).
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<ZbcConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: ZbcConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `ZBC_CF` -> `model.cf`
/// - `ZBC_SAMPLE_RATE` -> `model.sample_rate`
/// - `ZBC_NREP` -> `model.nrep`
/// - `ZBC_FIBER_TYPE` -> `model.fiber_type`
/// - `ZBC_POWER_LAW` -> `model.power_law`
/// - `ZBC_SYNAPSE_SAMPLE_RATE` -> `model.synapse_sample_rate`
/// - `ZBC_NOISE_TYPE` -> `noise.noise_type`
/// - `ZBC_NOISE_SEED` -> `noise.seed`
/// - `ZBC_LOG_LEVEL` -> `logging.log_level`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut ZbcConfig) {
    let overrides: HashMap<String, String> = OVERRIDE_KEYS
        .iter()
        .filter_map(|&(key, env_var)| env::var(env_var).ok().map(|v| (key.to_string(), v)))
        .collect();
    apply_overrides(config, &overrides);
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - Map of CLI arguments (e.g., `{"cf": "4000", "fiber_type": "msr"}`)
pub fn apply_cli_overrides(config: &mut ZbcConfig, cli_args: &HashMap<String, String>) {
    apply_overrides(config, cli_args);
}

/// Override key and the environment variable that feeds it
const OVERRIDE_KEYS: [(&str, &str); 9] = [
    ("cf", "ZBC_CF"),
    ("sample_rate", "ZBC_SAMPLE_RATE"),
    ("nrep", "ZBC_NREP"),
    ("fiber_type", "ZBC_FIBER_TYPE"),
    ("power_law", "ZBC_POWER_LAW"),
    ("synapse_sample_rate", "ZBC_SYNAPSE_SAMPLE_RATE"),
    ("noise_type", "ZBC_NOISE_TYPE"),
    ("seed", "ZBC_NOISE_SEED"),
    ("log_level", "ZBC_LOG_LEVEL"),
];

fn apply_overrides(config: &mut ZbcConfig, values: &HashMap<String, String>) {
    set_parsed(values, "cf", &mut config.model.cf);
    set_parsed(values, "sample_rate", &mut config.model.sample_rate);
    set_parsed(values, "nrep", &mut config.model.nrep);
    set_parsed(values, "fiber_type", &mut config.model.fiber_type);
    set_parsed(values, "power_law", &mut config.model.power_law);
    set_parsed(values, "synapse_sample_rate", &mut config.model.synapse_sample_rate);
    set_parsed(values, "noise_type", &mut config.noise.noise_type);
    if let Some(seed) = values.get("seed").and_then(|v| v.trim().parse::<u64>().ok()) {
        config.noise.seed = Some(seed);
    }
    if let Some(value) = values.get("log_level") {
        config.logging.log_level = value.trim().to_lowercase();
    }
}

fn set_parsed<T: FromStr>(values: &HashMap<String, String>, key: &str, target: &mut T) {
    if let Some(parsed) = values.get(key).and_then(|v| v.trim().parse::<T>().ok()) {
        *target = parsed;
    }
}
