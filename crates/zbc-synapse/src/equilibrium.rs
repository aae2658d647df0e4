// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Equilibrium of the two-compartment release model
//!
//! Closed-form derivation of the resting state of the exponential-adaptation
//! stage (Zilany et al. 2009, eqs. 1–10 and A3–A24).
//!
//! ## Model
//!
//! ```text
//! Immediate pool (volume VI, concentration CI) ← permeability PL ← local pool (VL, CL)
//!                                               ← permeability PG ← global store (CG)
//! release rate = CI · PI(t)
//! ```
//!
//! The targets are the PSTH shape parameters: steady-state rate `Ass`,
//! onset rate `Aon = PTS·Ass`, rapid and short-term magnitudes `AR`, `AST`
//! with time constants `TauR`, `TauST`, and the spontaneous rate `Asp`.
//!
//! The expressions below keep the published grouping and order of
//! evaluation; later stages are sensitive to the last bits of these values.

use std::f64::consts::LN_2;

use crate::types::{PowerLawMode, SpontRateClass};

/// Exponent arguments at or above this value skip `exp` and use the linear
/// asymptote of the softplus instead.
pub const SOFTPLUS_OVERFLOW_GUARD: f64 = 400.0;

/// Maximum release permeability (PI at saturation)
pub const PI_MAX: f64 = 0.6;
/// Rapid adaptation time constant (s)
pub const TAU_RAPID: f64 = 2e-3;
/// Short-term adaptation time constant (s)
pub const TAU_SHORT_TERM: f64 = 60e-3;
/// Ratio of rapid to short-term component magnitudes
pub const RAPID_TO_SHORT_TERM_RATIO: f64 = 6.0;
/// Peak-to-steady-state ratio of the PSTH
pub const PEAK_TO_STEADY_STATE: f64 = 3.0;

/// `ln(1 + e^x)` with the overflow guard: returns `x` unchanged once
/// `x >= 400`, where the two agree to double precision.
#[inline]
pub fn softplus(x: f64) -> f64 {
    if x < SOFTPLUS_OVERFLOW_GUARD {
        (1.0 + x.exp()).ln()
    } else {
        x
    }
}

/// `ln(e^x − 1)`, the inverse of [`softplus`], with the same guard.
#[inline]
pub fn inverse_softplus(x: f64) -> f64 {
    if x < SOFTPLUS_OVERFLOW_GUARD {
        (x.exp() - 1.0).ln()
    } else {
        x
    }
}

/// CF-dependent scaling of the release-permeability slope.
///
/// One piecewise formula per spontaneous-rate class.
pub fn cf_factor(spont: SpontRateClass, cf: f64) -> f64 {
    match spont {
        SpontRateClass::High => f64::min(800.0, 10f64.powf(0.29 * cf / 1e3 + 0.7)),
        SpontRateClass::Medium => f64::min(50.0, 2.5e-4 * cf * 4.0 + 0.2),
        SpontRateClass::Low => f64::min(1.0, 2.5e-4 * cf * 0.1 + 0.15),
    }
}

/// Resting state and constants of the exponential-adaptation stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynapseEquilibrium {
    pub cf_factor: f64,
    /// Slope of the release permeability vs. IHC drive
    pub kslope: f64,
    /// Steady-state rate
    pub ass: f64,
    /// Spontaneous rate
    pub asp: f64,
    /// Onset rate
    pub aon: f64,
    /// Rapid component magnitude
    pub ar: f64,
    /// Short-term component magnitude
    pub ast: f64,
    /// Resting release permeability
    pub prest: f64,
    /// Global store concentration
    pub cg: f64,
    /// Immediate pool volume
    pub vi: f64,
    /// Local pool volume
    pub vl: f64,
    /// Local → immediate permeability
    pub pl: f64,
    /// Global → local permeability
    pub pg: f64,
    /// Immediate pool concentration at rest
    pub ci_rest: f64,
    /// Local pool concentration at rest
    pub cl_rest: f64,
    /// Gain of the IHC drive inside the softplus
    pub synstrength: f64,
    /// Output gain of the softplus, `Prest / ln2 · synstrength`
    pub synslope: f64,
}

impl SynapseEquilibrium {
    /// Solve the equilibrium for one fiber.
    ///
    /// `power_law` only enters through `Asp` (see [`PowerLawMode::spont_scale`]).
    pub fn derive(spont: SpontRateClass, power_law: PowerLawMode, cf: f64) -> Self {
        let cf_factor = cf_factor(spont, cf);

        let kslope = (1.0 + 50.0) / (5.0 + 50.0) * cf_factor * 20.0 * PI_MAX;
        let ass = 800.0 * (1.0 + cf / 100e3);
        let asp = spont.spont_rate() * power_law.spont_scale();

        let aon = PEAK_TO_STEADY_STATE * ass;
        let ar = (aon - ass) * RAPID_TO_SHORT_TERM_RATIO / (1.0 + RAPID_TO_SHORT_TERM_RATIO);
        let ast = aon - ass - ar;
        let prest = PI_MAX / aon * asp;
        let cg = (asp * (aon - asp)) / (aon * prest * (1.0 - asp / ass));
        let gamma1 = cg / asp;
        let gamma2 = cg / ass;
        let k1 = -1.0 / TAU_RAPID;
        let k2 = -1.0 / TAU_SHORT_TERM;

        let vi0 = (1.0 - PI_MAX / prest)
            / (gamma1
                * (ar * (k1 - k2) / cg / PI_MAX + k2 / prest / gamma1
                    - k2 / PI_MAX / gamma2));
        let vi1 = (1.0 - PI_MAX / prest)
            / (gamma1
                * (ast * (k2 - k1) / cg / PI_MAX + k1 / prest / gamma1
                    - k1 / PI_MAX / gamma2));
        let vi = (vi0 + vi1) / 2.0;

        let alpha = gamma2 / k1 / k2;
        let beta = -(k1 + k2) * alpha;
        let theta1 = alpha * PI_MAX / vi;
        let theta2 = vi / PI_MAX;
        let theta3 = gamma2 - 1.0 / PI_MAX;

        let pl = ((beta - theta2 * theta3) / theta1 - 1.0) * PI_MAX;
        let pg = 1.0 / (theta3 - 1.0 / pl);
        let vl = theta1 * pl * pg;
        let ci_rest = asp / prest;
        let cl_rest = ci_rest * (prest + pl) / pl;

        let vsat = kslope + prest;
        let tmpst = LN_2 * vsat / prest;
        let synstrength = inverse_softplus(tmpst);
        let synslope = prest / LN_2 * synstrength;

        Self {
            cf_factor,
            kslope,
            ass,
            asp,
            aon,
            ar,
            ast,
            prest,
            cg,
            vi,
            vl,
            pl,
            pg,
            ci_rest,
            cl_rest,
            synstrength,
            synslope,
        }
    }

    /// Release permeability `PPI` for one IHC sample.
    #[inline]
    pub fn release_permeability(&self, ihc: f64) -> f64 {
        let drive = softplus(self.synstrength * ihc);
        self.synslope / self.synstrength * drive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cf_factor_caps() {
        assert_eq!(cf_factor(SpontRateClass::High, 40e3), 800.0);
        assert_eq!(cf_factor(SpontRateClass::Medium, 1e6), 50.0);
        assert_eq!(cf_factor(SpontRateClass::Low, 40e3), 1.0);

        let low = cf_factor(SpontRateClass::Low, 1e3);
        assert!((low - (2.5e-4 * 1e3 * 0.1 + 0.15)).abs() < 1e-15);
    }

    #[test]
    fn test_equilibrium_targets() {
        let eq = SynapseEquilibrium::derive(SpontRateClass::High, PowerLawMode::Exact, 1e3);
        assert!((eq.ass - 808.0).abs() < 1e-9);
        assert!((eq.aon - 3.0 * 808.0).abs() < 1e-9);
        assert!((eq.ar + eq.ast + eq.ass - eq.aon).abs() < 1e-9);
        assert!((eq.ar / eq.ast - RAPID_TO_SHORT_TERM_RATIO).abs() < 1e-9);
        assert_eq!(eq.asp, 300.0);
    }

    #[test]
    fn test_rest_state_releases_at_spontaneous_rate() {
        for spont in SpontRateClass::ALL {
            for mode in [PowerLawMode::Exact, PowerLawMode::Approximate] {
                let eq = SynapseEquilibrium::derive(spont, mode, 2e3);
                let ppi = eq.release_permeability(0.0);
                assert!((ppi - eq.prest).abs() / eq.prest < 1e-12);
                assert!((eq.ci_rest * ppi - eq.asp).abs() / eq.asp < 1e-12);
            }
        }
    }

    #[test]
    fn test_derived_constants_are_physical() {
        for spont in SpontRateClass::ALL {
            let eq = SynapseEquilibrium::derive(spont, PowerLawMode::Approximate, 5e3);
            for (name, value) in [
                ("vi", eq.vi),
                ("vl", eq.vl),
                ("pl", eq.pl),
                ("pg", eq.pg),
                ("ci_rest", eq.ci_rest),
                ("cl_rest", eq.cl_rest),
                ("synstrength", eq.synstrength),
            ] {
                assert!(value.is_finite() && value > 0.0, "{name} = {value} for {spont}");
            }
        }
    }

    #[test]
    fn test_softplus_guard_is_continuous() {
        let below = (1.0 + SOFTPLUS_OVERFLOW_GUARD.exp()).ln();
        let at = softplus(SOFTPLUS_OVERFLOW_GUARD);
        assert!((below - at).abs() <= 1e-12 * at);

        let inv_below = (SOFTPLUS_OVERFLOW_GUARD.exp() - 1.0).ln();
        assert!((inv_below - inverse_softplus(SOFTPLUS_OVERFLOW_GUARD)).abs() <= 1e-12 * at);
    }

    #[test]
    fn test_inverse_softplus_round_trip() {
        for x in [0.1, 1.0, 5.0, 30.0] {
            assert!((softplus(inverse_softplus(x)) - x).abs() < 1e-9);
        }
    }
}
