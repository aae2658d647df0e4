// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Exponential (rapid + short-term) adaptation
//!
//! Forward-Euler integration of the two coupled pool concentrations, one
//! step per high-rate sample:
//!
//! ```text
//! PPI   = synslope / synstrength · softplus(synstrength · ihc)
//! CI'   = CI + tdres/VI · (−PPI·CI + PL·(CL − CI))
//! CL'   = CL + tdres/VL · (−PL·(CL − CI) + PG·(CG − CL))     (CI before update)
//! out   = CI' · PPI
//! ```
//!
//! When the Euler step would make `CI` negative (strong onsets), both
//! concentrations are replaced by the quasi-steady-state solution for the
//! current `PPI`:
//!
//! ```text
//! CI = CG / (PPI · (1/PG + 1/PL + 1/PPI))
//! CL = CI · (PPI + PL) / PL
//! ```

use crate::equilibrium::SynapseEquilibrium;

/// Integrator state for one fiber
#[derive(Debug, Clone)]
pub struct ExponentialAdaptation<'a> {
    equilibrium: &'a SynapseEquilibrium,
    tdres: f64,
    /// Immediate pool concentration
    ci: f64,
    /// Local pool concentration
    cl: f64,
    clamp_count: usize,
}

impl<'a> ExponentialAdaptation<'a> {
    /// Start at the resting concentrations
    pub fn new(equilibrium: &'a SynapseEquilibrium, tdres: f64) -> Self {
        Self {
            equilibrium,
            tdres,
            ci: equilibrium.ci_rest,
            cl: equilibrium.cl_rest,
            clamp_count: 0,
        }
    }

    /// Advance one sample and return the instantaneous release.
    #[inline]
    pub fn step(&mut self, ihc: f64) -> f64 {
        let eq = self.equilibrium;
        let ppi = eq.release_permeability(ihc);

        let ci_last = self.ci;
        self.ci += (self.tdres / eq.vi) * (-ppi * self.ci + eq.pl * (self.cl - self.ci));
        self.cl += (self.tdres / eq.vl) * (-eq.pl * (self.cl - ci_last) + eq.pg * (eq.cg - self.cl));

        if self.ci < 0.0 {
            let temp = 1.0 / eq.pg + 1.0 / eq.pl + 1.0 / ppi;
            self.ci = eq.cg / (ppi * temp);
            self.cl = self.ci * (ppi + eq.pl) / eq.pl;
            self.clamp_count += 1;
        }

        self.ci * ppi
    }

    /// Immediate and local pool concentrations
    pub fn concentrations(&self) -> (f64, f64) {
        (self.ci, self.cl)
    }

    /// How many steps took the negative-concentration branch so far
    pub fn clamp_count(&self) -> usize {
        self.clamp_count
    }

    /// Integrate a whole IHC sequence from rest.
    pub fn run(equilibrium: &SynapseEquilibrium, tdres: f64, ihc: &[f64]) -> Vec<f64> {
        let mut stage = ExponentialAdaptation::new(equilibrium, tdres);
        let release: Vec<f64> = ihc.iter().map(|&x| stage.step(x)).collect();
        if stage.clamp_count > 0 {
            tracing::trace!(
                clamps = stage.clamp_count,
                samples = ihc.len(),
                "immediate pool re-derived after negative Euler step"
            );
        }
        release
    }
}
