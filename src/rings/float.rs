use std::fmt::Display;

use rand::Rng;

use super::{Field, Ring};

/// The default tolerance below which a floating point coefficient counts as zero.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Double precision coefficients, where every value with a magnitude
/// below `epsilon` is considered to be zero.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FloatField {
    epsilon: f64,
}

impl Default for FloatField {
    fn default() -> Self {
        FloatField {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl FloatField {
    pub fn new(epsilon: f64) -> FloatField {
        debug_assert!(epsilon >= 0.);
        FloatField { epsilon }
    }

    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Display for FloatField {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

impl Ring for FloatField {
    type Element = f64;

    #[inline]
    fn add(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }

    #[inline]
    fn sub(&self, a: &f64, b: &f64) -> f64 {
        a - b
    }

    #[inline]
    fn mul(&self, a: &f64, b: &f64) -> f64 {
        a * b
    }

    #[inline]
    fn add_assign(&self, a: &mut f64, b: &f64) {
        *a += b;
    }

    #[inline]
    fn sub_assign(&self, a: &mut f64, b: &f64) {
        *a -= b;
    }

    #[inline]
    fn mul_assign(&self, a: &mut f64, b: &f64) {
        *a *= b;
    }

    #[inline]
    fn neg(&self, a: &f64) -> f64 {
        -a
    }

    #[inline]
    fn zero(&self) -> f64 {
        0.
    }

    #[inline]
    fn one(&self) -> f64 {
        1.
    }

    fn pow(&self, b: &f64, e: u64) -> f64 {
        if e > i32::MAX as u64 {
            b.powf(e as f64)
        } else {
            b.powi(e as i32)
        }
    }

    #[inline]
    fn is_zero(&self, a: &f64) -> bool {
        a.abs() < self.epsilon
    }

    #[inline]
    fn is_one(&self, a: &f64) -> bool {
        (a - 1.).abs() < self.epsilon
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> f64 {
        rng.gen_range(range.0..range.1) as f64
    }
}

impl Field for FloatField {
    #[inline]
    fn div(&self, a: &f64, b: &f64) -> f64 {
        a / b
    }

    #[inline]
    fn div_assign(&self, a: &mut f64, b: &f64) {
        *a /= b;
    }

    #[inline]
    fn inv(&self, a: &f64) -> f64 {
        1. / a
    }
}
