// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # zbc-an
//!
//! Auditory-nerve synapse stage of the Zilany, Bruce & Carney (2014)
//! auditory-periphery model, as a Rust workspace.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zbc_an::prelude::*;
//!
//! let mut config = ZbcConfig::default();
//! config.model.cf = 2e3;
//! config.model.fiber_type = SpontRateClass::Medium;
//! config.noise.seed = Some(7);
//!
//! let simulation = AnRateSimulation::from_config(&config)?;
//! let ihc = vec![0.0; 10_000]; // IHC potential at 100 kHz
//! let rate = simulation.run(&ihc)?;
//! assert_eq!(rate.len(), ihc.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │  Foundation: zbc-config, zbc-observability             │
//! │  (TOML + overrides, tracing setup)                     │
//! └────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌────────────────────────────────────────────────────────┐
//! │  Model stages: zbc-synapse, zbc-noise, zbc-complex     │
//! │  (adaptation, fGn synthesis, complex helpers)          │
//! └────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌────────────────────────────────────────────────────────┐
//! │  Driver: zbc_an::simulation                            │
//! │  (config → params → noise → synapse)                   │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

pub mod simulation;

pub use zbc_complex as complex;
pub use zbc_config as config;
pub use zbc_noise as noise;
pub use zbc_observability as observability;
pub use zbc_synapse as synapse;

pub use simulation::{AnRateSimulation, SimulationError, SimulationResult};

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::simulation::{AnRateSimulation, SimulationError};
    pub use zbc_config::{load_config, validate_config, ZbcConfig};
    pub use zbc_noise::{ffgn, NoiseType};
    pub use zbc_synapse::{
        required_noise_len, synapse, synapse_population, FiberInput, PowerLawMode,
        SpontRateClass, SynapseError, SynapseParams,
    };
}
