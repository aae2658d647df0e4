// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Power-law adaptation
//!
//! Two release branches run at the synapse sampling rate, each inhibited by
//! a long-memory feedback term:
//!
//! ```text
//! fast[k] = max(0, x[k] + noise[k] − α1·I1)
//! slow[k] = max(0, x[k] − α2·I2)
//! rate[k] = fast[k] + slow[k]
//! ```
//!
//! `I1`/`I2` are the branch histories filtered by a hyperbolic kernel
//! `binwidth / (t + β)`. They start at zero and are refreshed after every
//! step, so step `k` sees the feedback computed from steps `< k`.
//!
//! ## Implementations
//!
//! Both implement [`PowerLawAdaptation`] and are interchangeable:
//! - [`ExactPowerLaw`]: full convolution with the kernel, quadratic cost
//! - [`ApproximatePowerLaw`]: fitted IIR cascades, constant cost per step
//!
//! The engine picks one per call from [`PowerLawMode`](crate::PowerLawMode).

pub mod approximate;
pub mod exact;

pub use approximate::{
    ApproximatePowerLaw, RecursiveCascade, RecursiveSection, SectionCoefficients, FAST_CASCADE,
    SLOW_CASCADE,
};
pub use exact::ExactPowerLaw;

/// Feedback gain of the fast branch
pub const ALPHA1: f64 = 2.5e-6 * 100e3;
/// Kernel offset of the fast branch (s)
pub const BETA1: f64 = 5e-4;
/// Feedback gain of the slow branch
pub const ALPHA2: f64 = 1e-2 * 100e3;
/// Kernel offset of the slow branch (s)
pub const BETA2: f64 = 1e-1;

/// Long-memory feedback pair `(I1, I2)`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdaptationFeedback {
    /// `I1`, drives the fast branch
    pub fast: f64,
    /// `I2`, drives the slow branch
    pub slow: f64,
}

/// Strategy producing the power-law feedback terms.
///
/// `update` is called once per step, after `fast_history[k]` and
/// `slow_history[k]` have been appended; both slices therefore hold steps
/// `0..=k`. The returned feedback is used at step `k + 1`.
pub trait PowerLawAdaptation {
    fn name(&self) -> &'static str;

    fn update(&mut self, fast_history: &[f64], slow_history: &[f64]) -> AdaptationFeedback;
}

/// Branch outputs of a power-law run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerLawOutput {
    pub fast: Vec<f64>,
    pub slow: Vec<f64>,
    /// `fast + slow`, the synapse rate at the synapse sampling rate
    pub rate: Vec<f64>,
}

/// Run `steps` power-law steps over the decimated drive and noise.
///
/// Stops early if either input is shorter than `steps`; callers size the
/// inputs from [`SynapseLayout`](crate::SynapseLayout).
pub fn run_power_law<A: PowerLawAdaptation + ?Sized>(
    adaptation: &mut A,
    decimated: &[f64],
    noise: &[f64],
    steps: usize,
) -> PowerLawOutput {
    let mut fast = Vec::with_capacity(steps);
    let mut slow = Vec::with_capacity(steps);
    let mut rate = Vec::with_capacity(steps);
    let mut feedback = AdaptationFeedback::default();

    for (&x, &n) in decimated.iter().zip(noise).take(steps) {
        let f = f64::max(0.0, x + n - ALPHA1 * feedback.fast);
        let s = f64::max(0.0, x - ALPHA2 * feedback.slow);
        fast.push(f);
        slow.push(s);
        rate.push(f + s);

        feedback = adaptation.update(&fast, &slow);
    }

    tracing::trace!(
        algorithm = adaptation.name(),
        steps = rate.len(),
        "power-law adaptation complete"
    );

    PowerLawOutput { fast, slow, rate }
}
