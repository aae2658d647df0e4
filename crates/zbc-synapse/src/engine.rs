// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Synapse transduction engine
//!
//! Runs the six stages in strict order for one fiber:
//!
//! 1. equilibrium derivation ([`SynapseEquilibrium::derive`])
//! 2. exponential adaptation at the high rate
//! 3. delay padding
//! 4. lazy decimation to the synapse rate
//! 5. power-law adaptation (exact or approximate, picked once per call)
//! 6. linear upsampling and delay removal
//!
//! Every buffer is owned by the call; nothing is shared between calls, so
//! independent fibers can run concurrently (see [`synapse_population`]).

use rayon::prelude::*;
use tracing::{debug, debug_span, trace};

use crate::equilibrium::SynapseEquilibrium;
use crate::error::{Result, SynapseError};
use crate::exponential::ExponentialAdaptation;
use crate::layout::SynapseLayout;
use crate::power_law::{run_power_law, ApproximatePowerLaw, ExactPowerLaw, PowerLawAdaptation};
use crate::resample::{lazy_decimate, pad_with_delay, trim_delay, upsample_linear};
use crate::types::{PowerLawMode, SynapseParams};

/// Minimum number of noise samples [`synapse`] consumes for `params`.
pub fn required_noise_len(params: &SynapseParams) -> Result<usize> {
    Ok(SynapseLayout::from_params(params)?.synapse_len)
}

/// Synapse output rate for one fiber.
///
/// `ihc` holds `stimulus_length × repetitions` IHC potentials sampled every
/// `tdres` seconds; `noise` holds at least [`required_noise_len`] samples at
/// the synapse rate and is added to the fast branch only. Returns one rate
/// per input sample.
///
/// # Errors
/// - [`SynapseError::InvalidParameter`] if the parameters are unusable
/// - [`SynapseError::InputLengthMismatch`] if `ihc.len() != N`
/// - [`SynapseError::InsufficientNoise`] if `noise` is too short
pub fn synapse(ihc: &[f64], noise: &[f64], params: &SynapseParams) -> Result<Vec<f64>> {
    let layout = SynapseLayout::from_params(params)?;

    if ihc.len() != layout.total_samples {
        return Err(SynapseError::InputLengthMismatch {
            expected: layout.total_samples,
            actual: ihc.len(),
        });
    }
    if noise.len() < layout.synapse_len {
        return Err(SynapseError::InsufficientNoise {
            required: layout.synapse_len,
            actual: noise.len(),
        });
    }

    let span = debug_span!(
        "synapse",
        cf = params.cf,
        fiber = %params.spont,
        power_law = %params.power_law
    );
    let _guard = span.enter();

    let equilibrium = SynapseEquilibrium::derive(params.spont, params.power_law, params.cf);
    debug!(
        samples = layout.total_samples,
        delay = layout.delay,
        synapse_len = layout.synapse_len,
        resamp = layout.resamp,
        asp = equilibrium.asp,
        synstrength = equilibrium.synstrength,
        "synapse layout resolved"
    );

    let release = ExponentialAdaptation::run(&equilibrium, params.tdres, ihc);
    trace!(samples = release.len(), "exponential adaptation complete");

    let padded = pad_with_delay(&release, layout.delay);
    let decimated = lazy_decimate(&padded, layout.decimation_span);

    let mut adaptation: Box<dyn PowerLawAdaptation> = match params.power_law {
        PowerLawMode::Exact => Box::new(ExactPowerLaw::new(1.0 / params.synapse_sample_rate)),
        PowerLawMode::Approximate => Box::new(ApproximatePowerLaw::new()),
    };
    let power_law = run_power_law(adaptation.as_mut(), &decimated, noise, layout.synapse_len);

    let upsampled = upsample_linear(&power_law.rate, layout.resamp, layout.upsampled_len);
    Ok(trim_delay(&upsampled, layout.delay, layout.total_samples))
}

/// [`synapse`] with the all-numeric calling convention.
///
/// `spont` must be one of `100`, `4` or `0.1`; `implnt` is `0` for the
/// approximate power law and `1` for the exact one.
#[allow(clippy::too_many_arguments)]
pub fn synapse_raw(
    ihc: &[f64],
    noise: &[f64],
    tdres: f64,
    cf: f64,
    stimulus_length: i64,
    repetitions: i64,
    spont: f64,
    implnt: f64,
    synapse_sample_rate: f64,
) -> Result<Vec<f64>> {
    let params = SynapseParams::from_raw(
        tdres,
        cf,
        stimulus_length,
        repetitions,
        spont,
        implnt,
        synapse_sample_rate,
    )?;
    synapse(ihc, noise, &params)
}

/// Inputs of one fiber in a population run
#[derive(Debug, Clone, Copy)]
pub struct FiberInput<'a> {
    pub ihc: &'a [f64],
    pub noise: &'a [f64],
    pub params: SynapseParams,
}

impl<'a> FiberInput<'a> {
    pub fn new(ihc: &'a [f64], noise: &'a [f64], params: SynapseParams) -> Self {
        Self { ihc, noise, params }
    }
}

/// Evaluate independent fibers in parallel.
///
/// Results come back in input order; one failing fiber does not affect the
/// others.
pub fn synapse_population(fibers: &[FiberInput<'_>]) -> Vec<Result<Vec<f64>>> {
    trace!(
        fibers = fibers.len(),
        threads = rayon::current_num_threads(),
        "population run"
    );
    fibers
        .par_iter()
        .map(|fiber| synapse(fiber.ihc, fiber.noise, &fiber.params))
        .collect()
}
