// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Approximate power-law feedback
//!
//! The hyperbolic kernels are replaced by cascades of second-order recursive
//! sections whose cascaded impulse response was fitted to them at a 10 kHz
//! synapse rate: five sections for `I1` (driven by the fast branch) and three
//! for `I2` (driven by the slow branch).
//!
//! Each section computes
//!
//! ```text
//! y[k] = a1·y[k−1] + a2·y[k−2] + gain·(x[k] + b1·x[k−1] + b2·x[k−2])
//! ```
//!
//! with the first two steps bootstrapped from the history that exists:
//!
//! ```text
//! k = 0:  y = gain·x
//! k = 1:  y = a1·y[0] + gain·(x + b1·x[0])
//! ```
//!
//! The coefficients are fitted values, not derived ones; keep them verbatim.

use super::{AdaptationFeedback, PowerLawAdaptation};

/// Coefficients of one recursive section (signs folded in)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionCoefficients {
    pub gain: f64,
    pub a1: f64,
    pub a2: f64,
    pub b1: f64,
    pub b2: f64,
}

impl SectionCoefficients {
    const fn new(gain: f64, a1: f64, a2: f64, b1: f64, b2: f64) -> Self {
        Self { gain, a1, a2, b1, b2 }
    }
}

/// Cascade producing `I1` from the fast branch
pub const FAST_CASCADE: [SectionCoefficients; 5] = [
    SectionCoefficients::new(
        0.2,
        0.491115852967412,
        -0.055050209956838,
        -0.173492003319319,
        0.000000172983796,
    ),
    SectionCoefficients::new(
        1.0,
        1.084520302502860,
        -0.288760329320566,
        -0.803462163297112,
        0.154962026341513,
    ),
    SectionCoefficients::new(
        1.0,
        1.588427084535629,
        -0.628138993662508,
        -1.416084732997016,
        0.496615555008723,
    ),
    SectionCoefficients::new(
        1.0,
        1.886287488516458,
        -0.888972875389923,
        -1.830362725074550,
        0.836399964176882,
    ),
    SectionCoefficients::new(
        1.0,
        1.989549282714008,
        -0.989558985673023,
        -1.983165053215032,
        0.983193027347456,
    ),
];

/// Cascade producing `I2` from the slow branch
pub const SLOW_CASCADE: [SectionCoefficients; 3] = [
    SectionCoefficients::new(
        1.0e-3,
        1.992127932802320,
        -0.992140616993846,
        -0.994466986569624,
        0.000000000002347,
    ),
    SectionCoefficients::new(
        1.0,
        1.999195329360981,
        -0.999195402928777,
        -1.997855276593802,
        0.997855827934345,
    ),
    SectionCoefficients::new(
        1.0,
        -0.798261718183851,
        -0.199131619873480,
        0.798261718184977,
        0.199131619874064,
    ),
];

/// One second-order recursive section with its two-step history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecursiveSection {
    coeffs: SectionCoefficients,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
    /// Steps seen so far, saturating at 2
    primed: u8,
}

impl RecursiveSection {
    pub fn new(coeffs: SectionCoefficients) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
            primed: 0,
        }
    }

    #[inline]
    pub fn step(&mut self, x: f64) -> f64 {
        let c = &self.coeffs;
        let y = match self.primed {
            0 => c.gain * x,
            1 => c.a1 * self.y1 + c.gain * (x + c.b1 * self.x1),
            _ => {
                c.a1 * self.y1 + c.a2 * self.y2 + c.gain * (x + c.b1 * self.x1 + c.b2 * self.x2)
            }
        };

        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        self.primed = (self.primed + 1).min(2);
        y
    }
}

/// Series connection of `N` sections
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecursiveCascade<const N: usize> {
    sections: [RecursiveSection; N],
}

impl<const N: usize> RecursiveCascade<N> {
    pub fn new(coeffs: [SectionCoefficients; N]) -> Self {
        Self {
            sections: coeffs.map(RecursiveSection::new),
        }
    }

    /// Feed one sample through every section; returns the last output.
    #[inline]
    pub fn step(&mut self, x: f64) -> f64 {
        self.sections
            .iter_mut()
            .fold(x, |signal, section| section.step(signal))
    }
}

/// Constant-cost substitute for [`ExactPowerLaw`](super::ExactPowerLaw)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximatePowerLaw {
    fast: RecursiveCascade<5>,
    slow: RecursiveCascade<3>,
}

impl ApproximatePowerLaw {
    pub fn new() -> Self {
        Self {
            fast: RecursiveCascade::new(FAST_CASCADE),
            slow: RecursiveCascade::new(SLOW_CASCADE),
        }
    }
}

impl Default for ApproximatePowerLaw {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerLawAdaptation for ApproximatePowerLaw {
    fn name(&self) -> &'static str {
        "approximate"
    }

    fn update(&mut self, fast_history: &[f64], slow_history: &[f64]) -> AdaptationFeedback {
        let fast = fast_history.last().copied().unwrap_or(0.0);
        let slow = slow_history.last().copied().unwrap_or(0.0);
        AdaptationFeedback {
            fast: self.fast.step(fast),
            slow: self.slow.step(slow),
        }
    }
}
