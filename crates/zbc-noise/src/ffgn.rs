// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Fast fractional Gaussian noise
//!
//! Exact fGn synthesis by circulant embedding of the autocovariance
//!
//! ```text
//! γ(k) = ½·((k+1)^{2H} − 2·k^{2H} + |k−1|^{2H})
//! ```
//!
//! on a coarse grid (one point per 100 ms), then Fourier-resampled to the
//! model resolution and scaled to the fiber's noise level.
//!
//! `hurst` in `(1, 2]` produces fractional Brownian noise: the fGn of
//! `hurst − 1`, cumulatively summed.

use num_complex::Complex64;
use rand::Rng;
use rand_distr::StandardNormal;
use rustfft::FftPlanner;
use tracing::trace;
use zbc_synapse::SpontRateClass;

use crate::resample::fourier_resample;
use crate::{noise_sigma, NoiseError, Result};

/// Hurst exponent used for fresh synapse noise
pub const FRESH_NOISE_HURST: f64 = 0.9;

/// Coarse-grid spacing (s)
const COARSE_PERIOD: f64 = 1e-1;

/// Fewest coarse points ever synthesised
const MIN_COARSE_POINTS: usize = 10;

/// Generate `n` samples of scaled fGn at resolution `tdres`.
///
/// # Errors
/// [`NoiseError::InvalidParameter`] unless `n > 0`, `0 < tdres < 1` and
/// `0 <= hurst <= 2`; [`NoiseError::NegativeSpectrum`] if the circulant
/// embedding is not positive semi-definite.
pub fn ffgn<R: Rng + ?Sized>(
    n: usize,
    tdres: f64,
    hurst: f64,
    fiber: SpontRateClass,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if n == 0 {
        return Err(invalid("n", "must be > 0".to_string()));
    }
    if !(tdres > 0.0 && tdres < 1.0) {
        return Err(invalid("tdres", format!("must lie in (0, 1), got {tdres}")));
    }
    if !(0.0..=2.0).contains(&hurst) {
        return Err(invalid("hurst", format!("must lie in [0, 2], got {hurst}")));
    }

    let resamp = (COARSE_PERIOD / tdres).ceil() as usize;
    let coarse_len = (n.div_ceil(resamp) + 1).max(MIN_COARSE_POINTS);

    let (h, brownian) = if hurst <= 1.0 {
        (hurst, false)
    } else {
        (hurst - 1.0, true)
    };

    let mut coarse = if h == 0.5 {
        (0..coarse_len).map(|_| rng.sample::<f64, _>(StandardNormal)).collect()
    } else {
        circulant_fgn(coarse_len, h, rng)?
    };

    if brownian {
        let mut total = 0.0;
        for y in coarse.iter_mut() {
            total += *y;
            *y = total;
        }
    }

    let mut noise = fourier_resample(&coarse, resamp * coarse_len)?;
    let sigma = noise_sigma(fiber);
    noise.truncate(n);
    noise.iter_mut().for_each(|y| *y *= sigma);

    trace!(n, coarse_len, resamp, hurst, %fiber, "fGn synthesised");
    Ok(noise)
}

/// Unit-variance fGn of length `len` for `0 <= h <= 1`, `h != 0.5`.
fn circulant_fgn<R: Rng + ?Sized>(len: usize, h: f64, rng: &mut R) -> Result<Vec<f64>> {
    let nfft = (2 * (len - 1)).next_power_of_two();
    let half = nfft / 2;

    let mut spectrum: Vec<Complex64> = (0..half)
        .chain((1..=half).rev())
        .map(|k| Complex64::new(autocovariance(k as f64, h), 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(nfft).process(&mut spectrum);

    let mut z = Vec::with_capacity(nfft);
    for (bin, s) in spectrum.iter().enumerate() {
        if s.re < 0.0 {
            return Err(NoiseError::NegativeSpectrum {
                bin,
                value: s.re,
                hurst: h,
            });
        }
        let magnitude = s.re.sqrt();
        let re: f64 = rng.sample(StandardNormal);
        let im: f64 = rng.sample(StandardNormal);
        z.push(Complex64::new(re, im) * magnitude);
    }

    planner.plan_fft_inverse(nfft).process(&mut z);

    // ifft(Z)·√nfft with an unnormalised inverse
    let scale = 1.0 / (nfft as f64).sqrt();
    Ok(z.iter().take(len).map(|c| c.re * scale).collect())
}

#[inline]
fn autocovariance(k: f64, h: f64) -> f64 {
    let two_h = 2.0 * h;
    0.5 * ((k + 1.0).powf(two_h) - 2.0 * k.powf(two_h) + (k - 1.0).abs().powf(two_h))
}

fn invalid(name: &'static str, reason: String) -> NoiseError {
    NoiseError::InvalidParameter { name, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_autocovariance_at_zero_lag_is_one() {
        for h in [0.1, 0.5, 0.9] {
            assert!((autocovariance(0.0, h) - 1.0).abs() < 1e-12);
        }
        // white noise is uncorrelated at every other lag
        assert!(autocovariance(3.0, 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_output_length_and_seeded_repeatability() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let x = ffgn(5000, 1e-5, 0.9, SpontRateClass::High, &mut a).unwrap();
        let y = ffgn(5000, 1e-5, 0.9, SpontRateClass::High, &mut b).unwrap();
        assert_eq!(x.len(), 5000);
        assert_eq!(x, y);
        assert!(x.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_white_noise_branch_produces_samples() {
        let mut rng = StdRng::seed_from_u64(11);
        let x = ffgn(300, 1e-4, 0.5, SpontRateClass::Medium, &mut rng).unwrap();
        assert_eq!(x.len(), 300);
        assert!(x.iter().any(|&v| v != 0.0));
    }

    #[test]
    fn test_brownian_range_is_accepted() {
        let mut rng = StdRng::seed_from_u64(3);
        let x = ffgn(2000, 1e-5, 1.7, SpontRateClass::Low, &mut rng).unwrap();
        assert_eq!(x.len(), 2000);
    }

    #[test]
    fn test_invalid_arguments() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(ffgn(0, 1e-5, 0.9, SpontRateClass::High, &mut rng).is_err());
        assert!(ffgn(10, 1.0, 0.9, SpontRateClass::High, &mut rng).is_err());
        assert!(ffgn(10, 1e-5, 2.5, SpontRateClass::High, &mut rng).is_err());
        assert!(ffgn(10, 1e-5, -0.1, SpontRateClass::High, &mut rng).is_err());
    }
}
