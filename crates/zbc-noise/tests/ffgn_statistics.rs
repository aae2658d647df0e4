// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for zbc-noise

use rand::rngs::StdRng;
use rand::SeedableRng;
use zbc_noise::*;
use zbc_synapse::SpontRateClass;

#[test]
fn test_sigma_scales_identical_draws() {
    let high = ffgn(4000, 1e-4, FRESH_NOISE_HURST, SpontRateClass::High, &mut StdRng::seed_from_u64(42)).unwrap();
    let medium = ffgn(4000, 1e-4, FRESH_NOISE_HURST, SpontRateClass::Medium, &mut StdRng::seed_from_u64(42)).unwrap();

    for (h, m) in high.iter().zip(&medium) {
        assert!((h * 30.0 / 200.0 - m).abs() <= 1e-9 * h.abs().max(1.0));
    }
}

#[test]
fn test_coarse_grid_has_unit_variance_before_scaling() {
    let tdres = 1e-3;
    let n = 100_000;
    let resamp = (0.1_f64 / tdres).ceil() as usize;
    let sigma = noise_sigma(SpontRateClass::High);

    let mut rng = StdRng::seed_from_u64(2024);
    let mut sum_sq = 0.0;
    let mut count = 0usize;
    for _ in 0..20 {
        let noise = ffgn(n, tdres, FRESH_NOISE_HURST, SpontRateClass::High, &mut rng).unwrap();
        for v in noise.iter().step_by(resamp) {
            sum_sq += (v / sigma).powi(2);
            count += 1;
        }
    }
    let mean_sq = sum_sq / count as f64;
    assert!((0.6..1.4).contains(&mean_sq), "mean square {mean_sq}");
}

#[test]
fn test_fresh_draws_differ() {
    let mut rng = StdRng::seed_from_u64(5);
    let a = ffgn(1000, 1e-5, FRESH_NOISE_HURST, SpontRateClass::High, &mut rng).unwrap();
    let b = ffgn(1000, 1e-5, FRESH_NOISE_HURST, SpontRateClass::High, &mut rng).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_noise_is_smooth_between_grid_points() {
    // Band-limited to the coarse grid, so neighbouring samples barely move
    let noise = ffgn(20_000, 1e-5, FRESH_NOISE_HURST, SpontRateClass::Low, &mut StdRng::seed_from_u64(9)).unwrap();
    let max_step = noise.windows(2).map(|w| (w[1] - w[0]).abs()).fold(0.0, f64::max);
    let peak = noise.iter().map(|v| v.abs()).fold(0.0, f64::max);
    assert!(max_step < 0.01 * peak.max(1e-12));
}
