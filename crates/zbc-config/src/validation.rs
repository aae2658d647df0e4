// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Every check runs; the failures are reported together.

use crate::{ConfigError, ConfigResult, ZbcConfig};
use zbc_noise::NoiseType;

/// Characteristic-frequency range the model was fitted for (Hz)
pub const CF_RANGE: (f64, f64) = (125.0, 40e3);

/// Ratio between the IHC rate and the highest usable synapse rate
const DECIMATION_HEADROOM: f64 = 10.0;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    OutOfRange { field: String, value: f64, min: f64, max: f64 },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { field, value, min, max } => {
                write!(f, "{} = {} is outside [{}, {}]", field, value, min, max)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - CF inside the fitted range
/// - Positive, finite sampling rates with room for lazy decimation
/// - At least one repetition
/// - Hurst exponent in `[0, 2]` when fresh noise is requested
/// - A known log level
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every failed check
pub fn validate_config(config: &ZbcConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_model(config, &mut errors);
    validate_noise(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_model(config: &ZbcConfig, errors: &mut Vec<ConfigValidationError>) {
    let model = &config.model;

    let (cf_min, cf_max) = CF_RANGE;
    if !(cf_min..=cf_max).contains(&model.cf) {
        errors.push(ConfigValidationError::OutOfRange {
            field: "model.cf".to_string(),
            value: model.cf,
            min: cf_min,
            max: cf_max,
        });
    }

    for (field, value) in [
        ("model.sample_rate", model.sample_rate),
        ("model.synapse_sample_rate", model.synapse_sample_rate),
    ] {
        if !value.is_finite() || value <= 0.0 {
            errors.push(ConfigValidationError::InvalidValue {
                field: field.to_string(),
                reason: format!("must be finite and > 0, got {}", value),
            });
        }
    }

    if model.synapse_sample_rate * DECIMATION_HEADROOM > model.sample_rate {
        errors.push(ConfigValidationError::InvalidValue {
            field: "model.synapse_sample_rate".to_string(),
            reason: format!(
                "{} Hz exceeds sample_rate / {} = {} Hz",
                model.synapse_sample_rate,
                DECIMATION_HEADROOM,
                model.sample_rate / DECIMATION_HEADROOM
            ),
        });
    }

    if model.nrep == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "model.nrep".to_string(),
            reason: "must be >= 1".to_string(),
        });
    }
}

fn validate_noise(config: &ZbcConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.noise.noise_type == NoiseType::Fresh && !(0.0..=2.0).contains(&config.noise.hurst) {
        errors.push(ConfigValidationError::OutOfRange {
            field: "noise.hurst".to_string(),
            value: config.noise.hurst,
            min: 0.0,
            max: 2.0,
        });
    }
}

fn validate_logging(config: &ZbcConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.log_level".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.logging.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ZbcConfig::default()).is_ok());
    }

    #[test]
    fn test_cf_outside_fitted_range() {
        let mut config = ZbcConfig::default();
        config.model.cf = 50e3;

        let result = validate_config(&config);
        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("model.cf"));
            assert!(msg.contains("40000"));
        } else {
            panic!("expected validation error");
        }
    }

    #[test]
    fn test_synapse_rate_needs_decimation_headroom() {
        let mut config = ZbcConfig::default();
        config.model.sample_rate = 50e3;

        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(msg)) if msg.contains("synapse_sample_rate")));
    }

    #[test]
    fn test_all_failures_reported_together() {
        let mut config = ZbcConfig::default();
        config.model.nrep = 0;
        config.noise.hurst = 3.0;
        config.logging.log_level = "verbose".to_string();

        let result = validate_config(&config);
        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("model.nrep"));
            assert!(msg.contains("noise.hurst"));
            assert!(msg.contains("logging.log_level"));
        } else {
            panic!("expected validation error");
        }
    }

    #[test]
    fn test_hurst_ignored_without_fresh_noise() {
        let mut config = ZbcConfig::default();
        config.noise.noise_type = NoiseType::None;
        config.noise.hurst = 3.0;
        assert!(validate_config(&config).is_ok());
    }
}
