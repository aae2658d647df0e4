// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Delay padding and the multi-rate chain around the power-law stage
//!
//! ```text
//! release (N)  ──pad──▶  padded (N + 3·delay)
//!              ──every 10th of first N + 2·delay──▶  decimated
//!              ──power law──▶  rate (K)
//!              ──linear interpolation ×resamp──▶  upsampled
//!              ──drop `delay`, keep N──▶  output
//! ```

/// Fixed decimation step of the lazy downsampler.
///
/// This is the model's nominal `100 kHz → 10 kHz` ratio taken literally,
/// independent of the requested synapse sampling rate; no anti-aliasing is
/// applied.
pub const LAZY_DECIMATION_FACTOR: usize = 10;

/// Surround `samples` with `delay` copies of its first value in front and
/// `2·delay` copies of its last value behind.
///
/// An empty input pads with zeros.
pub fn pad_with_delay(samples: &[f64], delay: usize) -> Vec<f64> {
    let first = samples.first().copied().unwrap_or(0.0);
    let last = samples.last().copied().unwrap_or(0.0);

    let mut padded = Vec::with_capacity(samples.len() + 3 * delay);
    padded.extend(std::iter::repeat(first).take(delay));
    padded.extend_from_slice(samples);
    padded.extend(std::iter::repeat(last).take(2 * delay));
    padded
}

/// Nearest-sample decimation: every [`LAZY_DECIMATION_FACTOR`]th sample of
/// the first `span` entries.
pub fn lazy_decimate(padded: &[f64], span: usize) -> Vec<f64> {
    padded[..span.min(padded.len())]
        .iter()
        .step_by(LAZY_DECIMATION_FACTOR)
        .copied()
        .collect()
}

/// Linear interpolation of `rates` by an integer factor into a buffer of
/// `len` samples.
///
/// Interval `z` fills `rates[z] + b·(rates[z+1] − rates[z]) / resamp` for
/// `b in 0..resamp`. Positions past the last complete interval stay zero.
pub fn upsample_linear(rates: &[f64], resamp: usize, len: usize) -> Vec<f64> {
    let mut upsampled = vec![0.0; len];
    if resamp == 0 {
        return upsampled;
    }

    for (chunk, pair) in upsampled.chunks_mut(resamp).zip(rates.windows(2)) {
        let incr = (pair[1] - pair[0]) / resamp as f64;
        for (b, sample) in chunk.iter_mut().enumerate() {
            *sample = pair[0] + b as f64 * incr;
        }
    }
    upsampled
}

/// Drop the leading `delay` samples and keep exactly `total` samples.
///
/// Missing tail samples (only possible with inconsistent sizes) read as zero.
pub fn trim_delay(upsampled: &[f64], delay: usize, total: usize) -> Vec<f64> {
    let mut output: Vec<f64> = upsampled.iter().skip(delay).take(total).copied().collect();
    output.resize(total, 0.0);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_with_delay_layout() {
        let padded = pad_with_delay(&[1.0, 2.0, 3.0], 2);
        assert_eq!(padded, vec![1.0, 1.0, 1.0, 2.0, 3.0, 3.0, 3.0, 3.0, 3.0]);
        assert_eq!(padded.len(), 3 + 3 * 2);
    }

    #[test]
    fn test_pad_without_delay_is_identity() {
        assert_eq!(pad_with_delay(&[4.0, 5.0], 0), vec![4.0, 5.0]);
    }

    #[test]
    fn test_lazy_decimate_takes_every_tenth() {
        let padded: Vec<f64> = (0..35).map(|i| i as f64).collect();
        assert_eq!(lazy_decimate(&padded, 30), vec![0.0, 10.0, 20.0]);
        assert_eq!(lazy_decimate(&padded, 31), vec![0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_upsample_interpolates_linearly() {
        let up = upsample_linear(&[0.0, 10.0, 20.0], 5, 10);
        let expected: Vec<f64> = (0..10).map(|i| i as f64 * 2.0).collect();
        assert_eq!(up, expected);
    }

    #[test]
    fn test_upsample_constant_round_trip() {
        let c = 42.5;
        let rates = vec![c; 50];
        let up = upsample_linear(&rates, 10, 500);
        // last interval has no right neighbour
        assert!(up[..490].iter().all(|&v| v == c));
        assert!(up[490..].iter().all(|&v| v == 0.0));

        let out = trim_delay(&up, 25, 400);
        assert_eq!(out.len(), 400);
        assert!(out.iter().all(|&v| v == c));
    }

    #[test]
    fn test_trim_delay_pads_short_input() {
        assert_eq!(trim_delay(&[1.0, 2.0, 3.0], 1, 4), vec![2.0, 3.0, 0.0, 0.0]);
    }
}
