// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to one section of `zbc_configuration.toml`. Missing
//! sections and keys fall back to the defaults below.

use serde::{Deserialize, Serialize};
use zbc_noise::{NoiseType, FRESH_NOISE_HURST};
use zbc_synapse::{PowerLawMode, SpontRateClass, SynapseParams};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ZbcConfig {
    pub model: ModelConfig,
    pub noise: NoiseConfig,
    pub logging: LoggingConfig,
}

/// Fiber and sampling parameters of the synapse stage
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Characteristic frequency (Hz)
    pub cf: f64,
    /// Sampling rate of the IHC waveform (Hz)
    pub sample_rate: f64,
    /// Repetitions concatenated in the IHC waveform
    pub nrep: usize,
    pub fiber_type: SpontRateClass,
    pub power_law: PowerLawMode,
    /// Sampling rate of the power-law stage (Hz)
    pub synapse_sample_rate: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            cf: 1e3,
            sample_rate: 100e3,
            nrep: 1,
            fiber_type: SpontRateClass::High,
            power_law: PowerLawMode::Exact,
            synapse_sample_rate: SynapseParams::DEFAULT_SYNAPSE_SAMPLE_RATE,
        }
    }
}

impl ModelConfig {
    /// Seconds per IHC sample
    pub fn tdres(&self) -> f64 {
        1.0 / self.sample_rate
    }
}

/// Fast-branch noise settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub noise_type: NoiseType,
    /// Hurst exponent of fresh noise
    pub hurst: f64,
    /// Fixed RNG seed; fresh entropy when absent
    pub seed: Option<u64>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            noise_type: NoiseType::Fresh,
            hurst: FRESH_NOISE_HURST,
            seed: None,
        }
    }
}

/// Tracing output settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level: trace, debug, info, warn or error
    pub log_level: String,
    /// Crates whose events are raised to debug regardless of `log_level`
    pub debug_crates: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_crates: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_setup() {
        let config = ZbcConfig::default();
        assert_eq!(config.model.cf, 1e3);
        assert_eq!(config.model.sample_rate, 100e3);
        assert_eq!(config.model.fiber_type, SpontRateClass::High);
        assert_eq!(config.model.power_law, PowerLawMode::Exact);
        assert_eq!(config.noise.noise_type, NoiseType::Fresh);
        assert_eq!(config.noise.hurst, 0.9);
        assert!((config.model.tdres() - 1e-5).abs() < 1e-20);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ZbcConfig = toml::from_str(
            r#"
            [model]
            cf = 4000.0
            fiber_type = "lsr"
            power_law = "approx"

            [noise]
            noise_type = "none"
            "#,
        )
        .unwrap();

        assert_eq!(config.model.cf, 4000.0);
        assert_eq!(config.model.fiber_type, SpontRateClass::Low);
        assert_eq!(config.model.power_law, PowerLawMode::Approximate);
        assert_eq!(config.model.nrep, 1);
        assert_eq!(config.noise.noise_type, NoiseType::None);
        assert_eq!(config.noise.seed, None);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_serialized_config_round_trips() {
        let mut config = ZbcConfig::default();
        config.noise.seed = Some(17);
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("fiber_type = \"hsr\""));
        assert!(text.contains("power_law = \"true\""));
        assert_eq!(toml::from_str::<ZbcConfig>(&text).unwrap(), config);
    }
}
