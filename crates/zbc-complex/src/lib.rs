// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # ZBC Complex Arithmetic
//!
//! Scalar helpers over a (real, imaginary) pair, consumed by the cochlear
//! filter stages that sit upstream of the synapse. The pair itself is
//! [`num_complex::Complex64`]; these functions pin down the exact formulas
//! the filters were fitted with (notably [`divide`], which goes through the
//! squared magnitude of the denominator rather than `num-complex`'s scaled
//! division).
//!
//! All functions are pure. Dividing by a zero-magnitude denominator yields
//! non-finite components; callers must avoid it.
//!
//! ```
//! use zbc_complex::{multiply, unit_phasor, conjugate, Complex64};
//!
//! let z = unit_phasor(std::f64::consts::FRAC_PI_2);
//! let one = multiply(z, conjugate(z));
//! assert!((one.re - 1.0).abs() < 1e-12);
//! assert!(one.im.abs() < 1e-12);
//! ```

pub use num_complex::Complex64;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Component-wise sum of two complex numbers
#[inline]
pub fn add(a: Complex64, b: Complex64) -> Complex64 {
    Complex64::new(a.re + b.re, a.im + b.im)
}

/// Component-wise sum of three complex numbers
#[inline]
pub fn add3(a: Complex64, b: Complex64, c: Complex64) -> Complex64 {
    Complex64::new(a.re + b.re + c.re, a.im + b.im + c.im)
}

/// `a - b`
#[inline]
pub fn subtract(a: Complex64, b: Complex64) -> Complex64 {
    Complex64::new(a.re - b.re, a.im - b.im)
}

/// Scale both components by a real factor
#[inline]
pub fn multiply_by_scalar(scalar: f64, a: Complex64) -> Complex64 {
    Complex64::new(scalar * a.re, scalar * a.im)
}

/// Complex product
#[inline]
pub fn multiply(a: Complex64, b: Complex64) -> Complex64 {
    Complex64::new(a.re * b.re - a.im * b.im, a.re * b.im + a.im * b.re)
}

/// Complex quotient `numerator / denominator`
///
/// # Formula
/// ```text
/// d  = de.re² + de.im²
/// re = (ne.re·de.re + ne.im·de.im) / d
/// im = (ne.im·de.re − ne.re·de.im) / d
/// ```
#[inline]
pub fn divide(numerator: Complex64, denominator: Complex64) -> Complex64 {
    let d = denominator.re * denominator.re + denominator.im * denominator.im;
    Complex64::new(
        (numerator.re * denominator.re + numerator.im * denominator.im) / d,
        (numerator.im * denominator.re - numerator.re * denominator.im) / d,
    )
}

/// `exp(iθ)`, i.e. `(cos θ, sin θ)`
#[inline]
pub fn unit_phasor(theta: f64) -> Complex64 {
    Complex64::new(theta.cos(), theta.sin())
}

/// Negate the imaginary part
#[inline]
pub fn conjugate(a: Complex64) -> Complex64 {
    Complex64::new(a.re, -a.im)
}

#[inline]
pub fn real_part(a: Complex64) -> f64 {
    a.re
}

#[inline]
pub fn imag_part(a: Complex64) -> f64 {
    a.im
}
