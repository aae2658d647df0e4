// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Exact power-law feedback: the hyperbolic kernel convolved with the full
//! branch history, recomputed from scratch at every step.
//!
//! ```text
//! I1[k] = Σ_{j=0..k} fast[j] · binwidth / ((k − j)·binwidth + β1)
//! I2[k] = Σ_{j=0..k} slow[j] · binwidth / ((k − j)·binwidth + β2)
//! ```

use super::{AdaptationFeedback, PowerLawAdaptation, BETA1, BETA2};

/// Reference implementation, `O(k)` per step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExactPowerLaw {
    binwidth: f64,
}

impl ExactPowerLaw {
    /// `binwidth` is the synapse-rate sample period (`1 / fs_syn`).
    pub fn new(binwidth: f64) -> Self {
        Self { binwidth }
    }

    pub fn binwidth(&self) -> f64 {
        self.binwidth
    }
}

impl PowerLawAdaptation for ExactPowerLaw {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn update(&mut self, fast_history: &[f64], slow_history: &[f64]) -> AdaptationFeedback {
        let Some(k) = fast_history.len().checked_sub(1) else {
            return AdaptationFeedback::default();
        };
        let binwidth = self.binwidth;

        let mut feedback = AdaptationFeedback::default();
        for (j, (&f, &s)) in fast_history.iter().zip(slow_history).enumerate() {
            let lag = (k - j) as f64 * binwidth;
            feedback.fast += f * binwidth / (lag + BETA1);
            feedback.slow += s * binwidth / (lag + BETA2);
        }
        feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sample_kernel() {
        let mut exact = ExactPowerLaw::new(1e-4);
        let fb = exact.update(&[2.0], &[3.0]);
        assert!((fb.fast - 2.0 * 1e-4 / BETA1).abs() < 1e-15);
        assert!((fb.slow - 3.0 * 1e-4 / BETA2).abs() < 1e-15);
    }

    #[test]
    fn test_older_samples_weigh_less() {
        let mut exact = ExactPowerLaw::new(1e-4);
        let recent = exact.update(&[0.0, 0.0, 1.0], &[0.0, 0.0, 1.0]);
        let old = exact.update(&[1.0, 0.0, 0.0], &[1.0, 0.0, 0.0]);
        assert!(old.fast < recent.fast);
        assert!(old.slow < recent.slow);
    }

    #[test]
    fn test_empty_history_gives_no_feedback() {
        let mut exact = ExactPowerLaw::new(1e-4);
        assert_eq!(exact.update(&[], &[]), AdaptationFeedback::default());
    }
}
