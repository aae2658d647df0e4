// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! AN-rate simulation driver
//!
//! Turns a validated [`ZbcConfig`] and an IHC waveform into a synapse output
//! rate: sizes the call, synthesises the fast-branch noise and runs the
//! engine. Post-synaptic refractoriness is not modelled; the returned rate
//! is the synapse output itself.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info_span, warn};
use zbc_config::{validate_config, ConfigError, ModelConfig, NoiseConfig, ZbcConfig};
use zbc_noise::{ffgn, NoiseError, NoiseType};
use zbc_synapse::{
    delay_samples, required_noise_len, synapse, synapse_population, FiberInput, SpontRateClass,
    SynapseError, SynapseParams,
};

/// IHC sampling rates below this lose accuracy (Hz)
pub const RECOMMENDED_SAMPLE_RATE: f64 = 100e3;

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Synapse(#[from] SynapseError),

    #[error(transparent)]
    Noise(#[from] NoiseError),

    #[error("Invalid IHC input: {0}")]
    InvalidInput(String),
}

pub type SimulationResult<T> = Result<T, SimulationError>;

/// Configured AN-rate simulation
#[derive(Debug, Clone, PartialEq)]
pub struct AnRateSimulation {
    model: ModelConfig,
    noise: NoiseConfig,
}

impl AnRateSimulation {
    /// Build from a configuration, validating it first.
    pub fn from_config(config: &ZbcConfig) -> SimulationResult<Self> {
        validate_config(config)?;
        Ok(Self {
            model: config.model.clone(),
            noise: config.noise.clone(),
        })
    }

    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    pub fn noise(&self) -> &NoiseConfig {
        &self.noise
    }

    /// Engine parameters for an IHC waveform of `ihc_len` samples.
    ///
    /// The waveform holds `nrep` back-to-back repetitions, so its length must
    /// divide evenly.
    pub fn params(&self, ihc_len: usize) -> SimulationResult<SynapseParams> {
        self.params_for(ihc_len, self.model.fiber_type)
    }

    fn params_for(&self, ihc_len: usize, fiber: SpontRateClass) -> SimulationResult<SynapseParams> {
        let nrep = self.model.nrep;
        if ihc_len == 0 || nrep == 0 || ihc_len % nrep != 0 {
            return Err(SimulationError::InvalidInput(format!(
                "{} samples cannot be split into {} repetitions",
                ihc_len, nrep
            )));
        }

        let params = SynapseParams::new(
            self.model.tdres(),
            self.model.cf,
            ihc_len / nrep,
            nrep,
            fiber,
            self.model.power_law,
            self.model.synapse_sample_rate,
        );
        params.validate()?;
        Ok(params)
    }

    /// Noise samples allocated for an IHC waveform of `ihc_len` samples.
    ///
    /// `ceil((len + 2·delay) · tdres · fs_syn)`, never less than what the
    /// engine consumes.
    pub fn noise_len(&self, ihc_len: usize) -> SimulationResult<usize> {
        let params = self.params(ihc_len)?;
        let span = (ihc_len + 2 * delay_samples(self.model.cf)) as f64;
        let allocated = (span * self.model.tdres() * self.model.synapse_sample_rate).ceil() as usize;
        Ok(allocated.max(required_noise_len(&params)?))
    }

    /// Noise for one fiber: zeros, or fresh fGn scaled for `fiber`.
    pub fn synthesize_noise<R: Rng + ?Sized>(
        &self,
        ihc_len: usize,
        fiber: SpontRateClass,
        rng: &mut R,
    ) -> SimulationResult<Vec<f64>> {
        let len = self.noise_len(ihc_len)?;
        match self.noise.noise_type {
            NoiseType::None => Ok(vec![0.0; len]),
            NoiseType::Fresh => {
                let mut noise = ffgn(
                    len.max(ihc_len),
                    self.model.tdres(),
                    self.noise.hurst,
                    fiber,
                    rng,
                )?;
                noise.truncate(len);
                Ok(noise)
            }
        }
    }

    /// Run the configured fiber on `ihc` with noise drawn from `rng`.
    pub fn run_with_rng<R: Rng + ?Sized>(&self, ihc: &[f64], rng: &mut R) -> SimulationResult<Vec<f64>> {
        let span = info_span!("anrate", cf = self.model.cf, fiber = %self.model.fiber_type);
        let _guard = span.enter();

        self.warn_on_coarse_resolution();
        let params = self.params(ihc.len())?;
        let noise = self.synthesize_noise(ihc.len(), self.model.fiber_type, rng)?;
        debug!(
            samples = ihc.len(),
            noise = noise.len(),
            noise_type = %self.noise.noise_type,
            "running synapse"
        );
        Ok(synapse(ihc, &noise, &params)?)
    }

    /// Run the configured fiber, seeding from `noise.seed` or entropy.
    pub fn run(&self, ihc: &[f64]) -> SimulationResult<Vec<f64>> {
        let mut rng = self.rng();
        self.run_with_rng(ihc, &mut rng)
    }

    /// Run several fiber classes on the same IHC waveform in parallel.
    ///
    /// Noise is drawn up front, in fiber order, so a fixed seed gives
    /// repeatable output.
    pub fn run_fibers(&self, ihc: &[f64], fibers: &[SpontRateClass]) -> SimulationResult<Vec<Vec<f64>>> {
        self.warn_on_coarse_resolution();
        let mut rng = self.rng();

        let mut prepared = Vec::with_capacity(fibers.len());
        for &fiber in fibers {
            let params = self.params_for(ihc.len(), fiber)?;
            let noise = self.synthesize_noise(ihc.len(), fiber, &mut rng)?;
            prepared.push((params, noise));
        }

        let inputs: Vec<FiberInput<'_>> = prepared
            .iter()
            .map(|(params, noise)| FiberInput::new(ihc, noise, *params))
            .collect();

        synapse_population(&inputs)
            .into_iter()
            .map(|result| result.map_err(SimulationError::from))
            .collect()
    }

    fn rng(&self) -> StdRng {
        match self.noise.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn warn_on_coarse_resolution(&self) {
        if self.model.sample_rate < RECOMMENDED_SAMPLE_RATE {
            warn!(
                sample_rate = self.model.sample_rate,
                recommended = RECOMMENDED_SAMPLE_RATE,
                "time-domain resolution is coarser than recommended"
            );
        }
    }
}
