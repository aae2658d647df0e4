// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Buffer sizing for one synapse call
//!
//! Every intermediate buffer length is a pure function of the scalar
//! parameters, so the whole memory footprint is known (and validated) before
//! any stage runs.
//!
//! ```text
//! N        = stimulus_length × repetitions
//! delay    = floor(7500 / (cf / 1000))
//! padded   = N + 3·delay                      (delay-padded Stage B output)
//! span     = N + 2·delay                      (part of `padded` that is decimated)
//! K        = floor(span · tdres · fs_syn)     (power-law timeline)
//! resamp   = ceil(1 / (tdres · fs_syn))       (upsampling ratio)
//! ```

use crate::error::{Result, SynapseError};
use crate::resample::LAZY_DECIMATION_FACTOR;
use crate::types::SynapseParams;

/// Derived sizes of every buffer used by one call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynapseLayout {
    /// Output length `N`
    pub total_samples: usize,
    /// Propagation delay in high-rate samples
    pub delay: usize,
    /// Length of the delay-padded buffer
    pub padded_len: usize,
    /// Leading part of the padded buffer fed to the decimator
    pub decimation_span: usize,
    /// Samples produced by lazy decimation of the span
    pub decimated_len: usize,
    /// Number of power-law steps (also the minimum noise length)
    pub synapse_len: usize,
    /// High-rate samples reconstructed per decimated interval
    pub resamp: usize,
    /// Length of the upsampled buffer before the delay is trimmed off
    pub upsampled_len: usize,
}

impl SynapseLayout {
    /// Compute and validate the layout for a parameter set.
    ///
    /// # Errors
    /// [`SynapseError::InvalidParameter`] when the parameters are not
    /// positive and finite, or when the implied synapse timeline is empty or
    /// longer than what lazy decimation produces.
    pub fn from_params(params: &SynapseParams) -> Result<Self> {
        params.validate()?;

        let total_samples = params.total_samples();
        let delay = params.delay_samples();
        let padded_len = checked_len(total_samples, delay, 3)?;
        let decimation_span = checked_len(total_samples, delay, 2)?;
        let decimated_len = decimation_span.div_ceil(LAZY_DECIMATION_FACTOR);

        let steps = (decimation_span as f64 * params.tdres * params.synapse_sample_rate).floor();
        if !steps.is_finite() || steps < 1.0 {
            return Err(SynapseError::invalid(
                "synapse_sample_rate",
                format!("synapse timeline is empty ({steps} samples)"),
            ));
        }
        let synapse_len = steps as usize;
        if synapse_len > decimated_len {
            return Err(SynapseError::invalid(
                "synapse_sample_rate",
                format!(
                    "{} Hz needs {synapse_len} decimated samples but lazy decimation by {} yields {decimated_len}",
                    params.synapse_sample_rate, LAZY_DECIMATION_FACTOR
                ),
            ));
        }

        let ratio = (1.0 / (params.tdres * params.synapse_sample_rate)).ceil();
        if !ratio.is_finite() || ratio < 1.0 {
            return Err(SynapseError::invalid(
                "tdres",
                format!("upsampling ratio {ratio} is not a positive integer"),
            ));
        }
        let resamp = ratio as usize;
        let upsampled_len = decimation_span.max((synapse_len - 1).saturating_mul(resamp));

        Ok(Self {
            total_samples,
            delay,
            padded_len,
            decimation_span,
            decimated_len,
            synapse_len,
            resamp,
            upsampled_len,
        })
    }
}

fn checked_len(total: usize, delay: usize, copies: usize) -> Result<usize> {
    delay
        .checked_mul(copies)
        .and_then(|pad| pad.checked_add(total))
        .ok_or_else(|| SynapseError::invalid("cf", "delay padding overflows the buffer size"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PowerLawMode, SpontRateClass};

    fn params(n: usize, cf: f64, fs: f64) -> SynapseParams {
        SynapseParams::new(1e-5, cf, n, 1, SpontRateClass::High, PowerLawMode::Approximate, fs)
    }

    #[test]
    fn test_nominal_layout() {
        let layout = SynapseLayout::from_params(&params(1000, 1000.0, 10e3)).unwrap();
        assert_eq!(layout.total_samples, 1000);
        assert_eq!(layout.delay, 7500);
        assert_eq!(layout.padded_len, 1000 + 3 * 7500);
        assert_eq!(layout.decimation_span, 16_000);
        assert_eq!(layout.decimated_len, 1600);
        assert_eq!(layout.synapse_len, 1600);
        assert_eq!(layout.resamp, 10);
        assert!(layout.upsampled_len >= layout.delay + layout.total_samples);
    }

    #[test]
    fn test_repetitions_scale_total() {
        let mut p = params(500, 4000.0, 10e3);
        p.repetitions = 4;
        let layout = SynapseLayout::from_params(&p).unwrap();
        assert_eq!(layout.total_samples, 2000);
        assert_eq!(layout.delay, 1875);
    }

    #[test]
    fn test_synapse_rate_above_decimation_rate_is_rejected() {
        let err = SynapseLayout::from_params(&params(1000, 1000.0, 20e3)).unwrap_err();
        assert!(matches!(
            err,
            SynapseError::InvalidParameter { name: "synapse_sample_rate", .. }
        ));
    }

    #[test]
    fn test_lower_synapse_rate_is_accepted() {
        let layout = SynapseLayout::from_params(&params(1000, 1000.0, 5e3)).unwrap();
        assert_eq!(layout.synapse_len, 800);
        assert_eq!(layout.resamp, 20);
        assert!(layout.upsampled_len >= layout.delay + layout.total_samples);
    }
}
