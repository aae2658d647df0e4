// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # ZBC Noise
//!
//! Fractional Gaussian noise feeding the fast branch of the power-law
//! synapse stage.
//!
//! - [`ffgn`]: fGn / fBn synthesis on a coarse grid, Fourier-resampled to
//!   the model's time resolution and scaled per fiber class
//! - [`fourier_resample`]: band-limited resampling used by `ffgn`
//! - [`NoiseType`]: `none` (silent) or `fresh` (new fGn per call)

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use zbc_synapse::SpontRateClass;

pub mod ffgn;
pub mod resample;

pub use ffgn::{ffgn, FRESH_NOISE_HURST};
pub use resample::fourier_resample;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NoiseError {
    #[error("Invalid noise parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Autocovariance spectrum is negative at bin {bin} ({value}); Hurst {hurst} is not embeddable")]
    NegativeSpectrum { bin: usize, value: f64, hurst: f64 },

    #[error("Unknown noise type: {0} (expected none or fresh)")]
    UnknownNoiseType(String),
}

pub type Result<T> = core::result::Result<T, NoiseError>;

/// Source of the fast-branch noise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NoiseType {
    /// All-zero noise; the model is deterministic
    None,
    /// Freshly synthesised fGn on every run
    #[default]
    Fresh,
}

impl FromStr for NoiseType {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "fresh" => Ok(Self::Fresh),
            _ => Err(NoiseError::UnknownNoiseType(s.to_string())),
        }
    }
}

impl fmt::Display for NoiseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Fresh => f.write_str("fresh"),
        }
    }
}

/// Standard deviation applied to unit fGn for a fiber class
pub const fn noise_sigma(fiber: SpontRateClass) -> f64 {
    match fiber {
        SpontRateClass::Low => 3.0,
        SpontRateClass::Medium => 30.0,
        SpontRateClass::High => 200.0,
    }
}
