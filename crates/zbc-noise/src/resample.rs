// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Band-limited (Fourier) upsampling of a real sequence.
//!
//! The spectrum is zero-extended to the target length and inverse
//! transformed. For even input lengths the Nyquist bin is split evenly
//! between the positive and negative frequency slots so the result stays
//! real.

use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::{NoiseError, Result};

/// Resample `samples` to `len` points (`len >= samples.len()`).
pub fn fourier_resample(samples: &[f64], len: usize) -> Result<Vec<f64>> {
    let n = samples.len();
    if n == 0 {
        return Err(NoiseError::InvalidParameter {
            name: "samples",
            reason: "cannot resample an empty sequence".to_string(),
        });
    }
    if len < n {
        return Err(NoiseError::InvalidParameter {
            name: "len",
            reason: format!("only upsampling is supported ({n} -> {len})"),
        });
    }
    if len == n {
        return Ok(samples.to_vec());
    }

    let mut planner = FftPlanner::<f64>::new();

    let mut spectrum: Vec<Complex64> = samples.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    planner.plan_fft_forward(n).process(&mut spectrum);

    let mut extended = vec![Complex64::new(0.0, 0.0); len];
    let positive = n / 2 + 1;
    extended[..positive].copy_from_slice(&spectrum[..positive]);
    for j in 1..=(n - positive) {
        extended[len - j] = spectrum[n - j];
    }
    if n % 2 == 0 {
        let nyquist = extended[n / 2] * 0.5;
        extended[n / 2] = nyquist;
        extended[len - n / 2] = nyquist;
    }

    planner.plan_fft_inverse(len).process(&mut extended);

    // Unnormalised inverse carries a factor `len`; the rescale to the new
    // length contributes `len / n`.
    let scale = 1.0 / n as f64;
    Ok(extended.iter().map(|c| c.re * scale).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_stays_constant() {
        let out = fourier_resample(&[3.0; 8], 40).unwrap();
        assert_eq!(out.len(), 40);
        assert!(out.iter().all(|&v| (v - 3.0).abs() < 1e-12));
    }

    #[test]
    fn test_input_samples_are_preserved() {
        let x = [0.0, 1.0, 0.5, -0.25, 2.0, -1.0, 0.75];
        let factor = 4;
        let out = fourier_resample(&x, x.len() * factor).unwrap();
        for (i, &v) in x.iter().enumerate() {
            assert!((out[i * factor] - v).abs() < 1e-12, "sample {i}");
        }
    }

    #[test]
    fn test_sinusoid_is_interpolated_exactly() {
        let n = 16;
        let x: Vec<f64> = (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * 2.0 * i as f64 / n as f64).cos())
            .collect();
        let out = fourier_resample(&x, n * 5).unwrap();
        for (i, &v) in out.iter().enumerate() {
            let t = i as f64 / (n * 5) as f64;
            let expected = (2.0 * std::f64::consts::PI * 2.0 * t).cos();
            assert!((v - expected).abs() < 1e-10, "point {i}");
        }
    }

    #[test]
    fn test_downsampling_is_rejected() {
        assert!(fourier_resample(&[1.0, 2.0, 3.0], 2).is_err());
        assert!(fourier_resample(&[], 2).is_err());
    }
}
