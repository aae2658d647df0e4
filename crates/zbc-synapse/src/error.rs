// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for the synapse stage

/// Failures detected before the synapse computation starts.
///
/// The numerically anticipated branches (the softplus overflow guard and the
/// negative-concentration clamp) are ordinary control flow and never show up
/// here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynapseError {
    #[error("Unsupported spontaneous-rate class: {0} (expected 100, 4 or 0.1)")]
    UnsupportedSpontRate(f64),

    #[error("Unsupported power-law implementation flag: {0} (expected 0 or 1)")]
    UnsupportedImplementation(f64),

    #[error("Unknown fiber type: {0} (expected hsr, msr or lsr)")]
    UnknownFiberType(String),

    #[error("Unknown power-law mode: {0} (expected true or approx)")]
    UnknownPowerLawMode(String),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("IHC input length mismatch: expected {expected}, got {actual}")]
    InputLengthMismatch { expected: usize, actual: usize },

    #[error("Insufficient noise samples: need {required}, got {actual}")]
    InsufficientNoise { required: usize, actual: usize },
}

impl SynapseError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SynapseError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = core::result::Result<T, SynapseError>;
