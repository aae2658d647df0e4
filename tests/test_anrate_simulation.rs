// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests: configuration file → simulation → synapse rate

use std::fs;

use tempfile::tempdir;
use zbc_an::prelude::*;

fn write_config(body: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("zbc_configuration.toml");
    fs::write(&path, body).unwrap();
    (dir, path)
}

#[test]
fn test_silent_simulation_from_file_matches_reference() {
    let (_dir, path) = write_config(
        r#"
        [model]
        cf = 1000.0
        fiber_type = "hsr"
        power_law = "approx"

        [noise]
        noise_type = "none"
        "#,
    );
    let config = load_config(Some(&path), None).unwrap();
    let simulation = AnRateSimulation::from_config(&config).unwrap();

    let rate = simulation.run(&vec![0.0; 1000]).unwrap();
    assert_eq!(rate.len(), 1000);
    let expected = 115.4114559;
    assert!((rate[999] - expected).abs() / expected < 1e-6, "got {}", rate[999]);
}

#[test]
fn test_seeded_fresh_noise_is_repeatable() {
    let mut config = ZbcConfig::default();
    config.model.power_law = PowerLawMode::Approximate;
    config.noise.seed = Some(2014);

    let ihc: Vec<f64> = (0..5000)
        .map(|i| 0.005 * (2.0 * std::f64::consts::PI * 1e3 * i as f64 * 1e-5).sin().max(0.0))
        .collect();

    let first = AnRateSimulation::from_config(&config).unwrap().run(&ihc).unwrap();
    let second = AnRateSimulation::from_config(&config).unwrap().run(&ihc).unwrap();
    assert_eq!(first, second);
    assert!(first.iter().all(|&r| r >= 0.0 && r.is_finite()));

    config.noise.seed = Some(2015);
    let other = AnRateSimulation::from_config(&config).unwrap().run(&ihc).unwrap();
    assert_ne!(first, other);
}

#[test]
fn test_fiber_classes_run_in_parallel_and_keep_order() {
    let mut config = ZbcConfig::default();
    config.model.power_law = PowerLawMode::Approximate;
    config.noise.noise_type = NoiseType::None;
    let simulation = AnRateSimulation::from_config(&config).unwrap();

    let ihc = vec![0.0; 2000];
    let rates = simulation
        .run_fibers(&ihc, &[SpontRateClass::High, SpontRateClass::Medium, SpontRateClass::Low])
        .unwrap();

    assert_eq!(rates.len(), 3);
    assert!(rates[0][1999] > rates[1][1999]);
    assert!(rates[1][1999] > rates[2][1999]);

    let high_alone = simulation.run(&ihc).unwrap();
    assert_eq!(rates[0], high_alone);
}

#[test]
fn test_repetitions_are_simulated_back_to_back() {
    let mut config = ZbcConfig::default();
    config.model.power_law = PowerLawMode::Approximate;
    config.model.nrep = 2;
    config.noise.noise_type = NoiseType::None;
    let simulation = AnRateSimulation::from_config(&config).unwrap();

    let rate = simulation.run(&vec![0.0; 3000]).unwrap();
    assert_eq!(rate.len(), 3000);
    assert!(matches!(
        simulation.run(&vec![0.0; 3001]),
        Err(SimulationError::InvalidInput(_))
    ));
}

#[test]
fn test_coarse_sample_rate_still_runs() {
    let mut config = ZbcConfig::default();
    config.model.sample_rate = 50e3;
    config.model.synapse_sample_rate = 5e3;
    config.model.power_law = PowerLawMode::Approximate;
    config.noise.noise_type = NoiseType::None;
    let simulation = AnRateSimulation::from_config(&config).unwrap();

    let rate = simulation.run(&vec![0.0; 1000]).unwrap();
    assert_eq!(rate.len(), 1000);
    assert!(rate.iter().all(|&r| r > 0.0));
}

#[test]
fn test_exact_power_law_from_defaults() {
    let mut config = ZbcConfig::default();
    config.noise.noise_type = NoiseType::None;
    let simulation = AnRateSimulation::from_config(&config).unwrap();

    let rate = simulation.run(&vec![0.0; 1000]).unwrap();
    let expected = 127.2545246;
    assert!((rate[999] - expected).abs() / expected < 1e-6, "got {}", rate[999]);
}
