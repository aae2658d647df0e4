// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # ZBC Synapse
//!
//! Inner-hair-cell → auditory-nerve synapse stage of the Zilany, Bruce &
//! Carney (2014) auditory-periphery model.
//!
//! Converts an IHC receptor-potential waveform into a synaptic output rate:
//! - **Equilibrium**: closed-form resting state of the release model
//! - **Exponential adaptation**: rapid + short-term depletion at the high rate
//! - **Power-law adaptation**: long-memory feedback at the synapse rate,
//!   exact or approximate
//! - **Resampling**: delay padding, lazy decimation, linear upsampling
//!
//! ## Example
//!
//! ```
//! use zbc_synapse::{required_noise_len, synapse, PowerLawMode, SpontRateClass, SynapseParams};
//!
//! let params = SynapseParams::new(1e-5, 1e3, 1000, 1, SpontRateClass::High, PowerLawMode::Approximate, 10e3);
//! let noise = vec![0.0; required_noise_len(&params)?];
//! let rate = synapse(&vec![0.0; 1000], &noise, &params)?;
//! assert_eq!(rate.len(), 1000);
//! # Ok::<(), zbc_synapse::SynapseError>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod engine;
pub mod equilibrium;
pub mod error;
pub mod exponential;
pub mod layout;
pub mod power_law;
pub mod resample;
pub mod types;

pub use engine::{required_noise_len, synapse, synapse_population, synapse_raw, FiberInput};
pub use equilibrium::SynapseEquilibrium;
pub use error::{Result, SynapseError};
pub use exponential::ExponentialAdaptation;
pub use layout::SynapseLayout;
pub use power_law::{
    ApproximatePowerLaw, ExactPowerLaw, PowerLawAdaptation, PowerLawOutput,
};
pub use types::{delay_samples, PowerLawMode, SpontRateClass, SynapseParams};
