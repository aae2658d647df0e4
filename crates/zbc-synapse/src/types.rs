// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Parameter types for the synapse stage
//!
//! The model's historical calling convention passes the fiber class and the
//! power-law implementation as raw doubles (`spont ∈ {100, 4, 0.1}`,
//! `implnt ∈ {0, 1}`). Those are converted once, at the boundary, into the
//! enums below so that no stage ever sees an unsupported value.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynapseError};

/// Spontaneous-rate class of an auditory-nerve fiber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpontRateClass {
    /// High spontaneous rate (100 spikes/s)
    #[cfg_attr(feature = "serde", serde(rename = "hsr"))]
    High,
    /// Medium spontaneous rate (4 spikes/s)
    #[cfg_attr(feature = "serde", serde(rename = "msr"))]
    Medium,
    /// Low spontaneous rate (0.1 spikes/s)
    #[cfg_attr(feature = "serde", serde(rename = "lsr"))]
    Low,
}

impl SpontRateClass {
    pub const ALL: [SpontRateClass; 3] = [Self::High, Self::Medium, Self::Low];

    /// Nominal spontaneous discharge rate (spikes/s)
    #[inline]
    pub const fn spont_rate(self) -> f64 {
        match self {
            Self::High => 100.0,
            Self::Medium => 4.0,
            Self::Low => 0.1,
        }
    }

    /// Short fiber-type label (`hsr`, `msr`, `lsr`)
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "hsr",
            Self::Medium => "msr",
            Self::Low => "lsr",
        }
    }
}

impl TryFrom<f64> for SpontRateClass {
    type Error = SynapseError;

    fn try_from(spont: f64) -> Result<Self> {
        // Exact comparison: the class is encoded by these literal constants
        if spont == 100.0 {
            Ok(Self::High)
        } else if spont == 4.0 {
            Ok(Self::Medium)
        } else if spont == 0.1 {
            Ok(Self::Low)
        } else {
            Err(SynapseError::UnsupportedSpontRate(spont))
        }
    }
}

impl FromStr for SpontRateClass {
    type Err = SynapseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hsr" | "high" => Ok(Self::High),
            "msr" | "medium" => Ok(Self::Medium),
            "lsr" | "low" => Ok(Self::Low),
            _ => Err(SynapseError::UnknownFiberType(s.to_string())),
        }
    }
}

impl fmt::Display for SpontRateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which power-law adaptation algorithm to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PowerLawMode {
    /// Fitted IIR cascade, constant cost per sample
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "approx"))]
    Approximate,
    /// Full hyperbolic-kernel convolution, quadratic cost
    #[cfg_attr(feature = "serde", serde(rename = "true"))]
    Exact,
}

impl PowerLawMode {
    /// Legacy implementation flag (`0.0` approximate, `1.0` exact)
    #[inline]
    pub const fn flag(self) -> f64 {
        match self {
            Self::Approximate => 0.0,
            Self::Exact => 1.0,
        }
    }

    /// Scale applied to the class rate to obtain `Asp`.
    ///
    /// The approximate cascade adapts slightly less than the exact kernel,
    /// so it starts from a lower spontaneous drive.
    #[inline]
    pub const fn spont_scale(self) -> f64 {
        match self {
            Self::Approximate => 2.75,
            Self::Exact => 3.0,
        }
    }
}

impl TryFrom<f64> for PowerLawMode {
    type Error = SynapseError;

    fn try_from(flag: f64) -> Result<Self> {
        if flag == 1.0 {
            Ok(Self::Exact)
        } else if flag == 0.0 {
            Ok(Self::Approximate)
        } else {
            Err(SynapseError::UnsupportedImplementation(flag))
        }
    }
}

impl FromStr for PowerLawMode {
    type Err = SynapseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" | "exact" | "actual" => Ok(Self::Exact),
            "approx" | "approximate" => Ok(Self::Approximate),
            _ => Err(SynapseError::UnknownPowerLawMode(s.to_string())),
        }
    }
}

impl fmt::Display for PowerLawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approximate => f.write_str("approx"),
            Self::Exact => f.write_str("true"),
        }
    }
}

/// Transmission delay in high-rate samples for a characteristic frequency.
///
/// `floor(7500 / (cf / 1000))`, i.e. 7.5 ms·kHz of place-dependent latency.
/// Strictly decreasing in `cf` wherever the floor steps.
#[inline]
pub fn delay_samples(cf: f64) -> usize {
    (7500.0 / (cf / 1e3)).floor() as usize
}

/// Scalar inputs of one synapse call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynapseParams {
    /// Seconds per high-rate sample
    pub tdres: f64,
    /// Characteristic frequency (Hz)
    pub cf: f64,
    /// Samples per stimulus repetition
    pub stimulus_length: usize,
    /// Number of repetitions concatenated in the input
    pub repetitions: usize,
    pub spont: SpontRateClass,
    pub power_law: PowerLawMode,
    /// Sampling frequency of the power-law stage (Hz)
    pub synapse_sample_rate: f64,
}

impl SynapseParams {
    /// Default synapse-stage sampling frequency (Hz)
    pub const DEFAULT_SYNAPSE_SAMPLE_RATE: f64 = 10e3;

    pub fn new(
        tdres: f64,
        cf: f64,
        stimulus_length: usize,
        repetitions: usize,
        spont: SpontRateClass,
        power_law: PowerLawMode,
        synapse_sample_rate: f64,
    ) -> Self {
        Self {
            tdres,
            cf,
            stimulus_length,
            repetitions,
            spont,
            power_law,
            synapse_sample_rate,
        }
    }

    /// Build parameters from the legacy all-numeric calling convention.
    ///
    /// # Errors
    /// - [`SynapseError::UnsupportedSpontRate`] if `spont ∉ {100, 4, 0.1}`
    /// - [`SynapseError::UnsupportedImplementation`] if `implnt ∉ {0, 1}`
    /// - [`SynapseError::InvalidParameter`] for non-positive counts or rates
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        tdres: f64,
        cf: f64,
        stimulus_length: i64,
        repetitions: i64,
        spont: f64,
        implnt: f64,
        synapse_sample_rate: f64,
    ) -> Result<Self> {
        let stimulus_length = usize::try_from(stimulus_length)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                SynapseError::invalid("stimulus_length", format!("must be > 0, got {stimulus_length}"))
            })?;
        let repetitions = usize::try_from(repetitions)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                SynapseError::invalid("repetitions", format!("must be > 0, got {repetitions}"))
            })?;

        let params = Self::new(
            tdres,
            cf,
            stimulus_length,
            repetitions,
            SpontRateClass::try_from(spont)?,
            PowerLawMode::try_from(implnt)?,
            synapse_sample_rate,
        );
        params.validate()?;
        Ok(params)
    }

    /// Check that every scalar is finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        check_positive("tdres", self.tdres)?;
        check_positive("cf", self.cf)?;
        check_positive("synapse_sample_rate", self.synapse_sample_rate)?;
        if self.stimulus_length == 0 {
            return Err(SynapseError::invalid("stimulus_length", "must be > 0"));
        }
        if self.repetitions == 0 {
            return Err(SynapseError::invalid("repetitions", "must be > 0"));
        }
        self.stimulus_length
            .checked_mul(self.repetitions)
            .ok_or_else(|| SynapseError::invalid("repetitions", "total sample count overflows"))?;
        Ok(())
    }

    /// `N = stimulus_length × repetitions`
    #[inline]
    pub fn total_samples(&self) -> usize {
        self.stimulus_length.saturating_mul(self.repetitions)
    }

    #[inline]
    pub fn delay_samples(&self) -> usize {
        delay_samples(self.cf)
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SynapseError::invalid(
            name,
            format!("must be finite and > 0, got {value}"),
        ));
    }
    Ok(())
}
