use std::{cmp::Ordering, fmt::Display};

use rand::Rng;
use rug::{ops::Pow, Integer, Rational as ArbitraryPrecisionRational};

use crate::utils;

use super::{Field, Ring};

/// The field of rational numbers.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct RationalField;

impl RationalField {
    pub fn new() -> RationalField {
        RationalField
    }
}

/// An exact rational number.
///
/// A `Natural(n, d)` always has `d > 0` and `gcd(n, d) = 1`, and a rational is
/// only stored as `Large` if it does not fit in a `Natural`. The representation
/// of every value is therefore unique and `==` is exact.
#[derive(Clone, PartialEq, Debug)]
pub enum Rational {
    Natural(i64, i64),
    Large(ArbitraryPrecisionRational),
}

impl Rational {
    /// Create the normalized rational `num/den`. Panics if `den` is zero.
    pub fn new(num: i64, den: i64) -> Rational {
        if den == 0 {
            panic!("Rational with zero denominator: {}/{}", num, den);
        }

        if num == 0 {
            return Rational::Natural(0, 1);
        }

        // the gcd does not fit in i64 only if both are i64::MIN
        if num == i64::MIN && den == i64::MIN {
            return Rational::Natural(1, 1);
        }

        let g = utils::gcd_signed(num, den);
        if g == 1 && den > 0 {
            return Rational::Natural(num, den);
        }

        let g = g as i64;
        let (n, d) = (num / g, den / g);
        if d > 0 {
            Rational::Natural(n, d)
        } else {
            match (n.checked_neg(), d.checked_neg()) {
                (Some(nn), Some(nd)) => Rational::Natural(nn, nd),
                _ => Rational::from_large(ArbitraryPrecisionRational::from((n, d))),
            }
        }
    }

    /// Store an arbitrary precision rational, using the inline representation if it fits.
    pub fn from_large(r: ArbitraryPrecisionRational) -> Rational {
        match (r.numer().to_i64(), r.denom().to_i64()) {
            (Some(n), Some(d)) => Rational::Natural(n, d),
            _ => Rational::Large(r),
        }
    }

    pub fn to_large(&self) -> ArbitraryPrecisionRational {
        match self {
            Rational::Natural(n, d) => ArbitraryPrecisionRational::from((*n, *d)),
            Rational::Large(r) => r.clone(),
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Rational::Natural(n, _) => *n < 0,
            Rational::Large(r) => r.cmp0() == Ordering::Less,
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Rational::Natural(n, d) => *n as f64 / *d as f64,
            Rational::Large(r) => r.to_f64(),
        }
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Rational::Natural(value, 1)
    }
}

impl From<(i64, i64)> for Rational {
    fn from(value: (i64, i64)) -> Self {
        Rational::new(value.0, value.1)
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rational::Natural(n, d) => {
                if *d == 1 {
                    f.write_fmt(format_args!("{}", n))
                } else {
                    f.write_fmt(format_args!("{}/{}", n, d))
                }
            }
            Rational::Large(r) => r.fmt(f),
        }
    }
}

impl Display for RationalField {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

impl Ring for RationalField {
    type Element = Rational;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        match (a, b) {
            (Rational::Natural(n1, d1), Rational::Natural(n2, d2)) => {
                let g = utils::gcd_signed(*d1, *d2) as i64;
                if let Some(lcm) = d2.checked_mul(d1 / g) {
                    if let Some(num2) = n2.checked_mul(lcm / d2) {
                        if let Some(num1) = n1.checked_mul(lcm / d1) {
                            if let Some(num) = num1.checked_add(num2) {
                                return Rational::new(num, lcm);
                            }
                        }
                    }
                }
                Rational::from_large(
                    ArbitraryPrecisionRational::from((*n1, *d1))
                        + ArbitraryPrecisionRational::from((*n2, *d2)),
                )
            }
            (Rational::Natural(n1, d1), Rational::Large(r2))
            | (Rational::Large(r2), Rational::Natural(n1, d1)) => {
                let r1 = ArbitraryPrecisionRational::from((*n1, *d1));
                Rational::from_large(r1 + r2)
            }
            (Rational::Large(r1), Rational::Large(r2)) => Rational::from_large((r1 + r2).into()),
        }
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.add(a, &self.neg(b))
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        match (a, b) {
            (Rational::Natural(n1, d1), Rational::Natural(n2, d2)) => {
                if *n1 == 0 || *n2 == 0 {
                    return self.zero();
                }

                // both inputs are reduced, so cross-cancelling suffices
                let gcd1 = utils::gcd_signed(*n1, *d2) as i64;
                let gcd2 = utils::gcd_signed(*d1, *n2) as i64;

                match (n2 / gcd2).checked_mul(n1 / gcd1) {
                    Some(nn) => match (d1 / gcd2).checked_mul(d2 / gcd1) {
                        Some(nd) => Rational::Natural(nn, nd),
                        None => Rational::from_large(ArbitraryPrecisionRational::from((
                            Integer::from(nn),
                            Integer::from(d1 / gcd2) * Integer::from(d2 / gcd1),
                        ))),
                    },
                    None => Rational::from_large(ArbitraryPrecisionRational::from((
                        Integer::from(n1 / gcd1) * Integer::from(n2 / gcd2),
                        Integer::from(d1 / gcd2) * Integer::from(d2 / gcd1),
                    ))),
                }
            }
            (Rational::Natural(n1, d1), Rational::Large(r2))
            | (Rational::Large(r2), Rational::Natural(n1, d1)) => {
                let r1 = ArbitraryPrecisionRational::from((*n1, *d1));
                Rational::from_large(r1 * r2)
            }
            (Rational::Large(r1), Rational::Large(r2)) => Rational::from_large((r1 * r2).into()),
        }
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        match a {
            Rational::Natural(n, d) => {
                if let Some(neg) = n.checked_neg() {
                    Rational::Natural(neg, *d)
                } else {
                    Rational::Large(-ArbitraryPrecisionRational::from((*n, *d)))
                }
            }
            Rational::Large(r) => Rational::from_large((-r).into()),
        }
    }

    fn zero(&self) -> Self::Element {
        Rational::Natural(0, 1)
    }

    fn one(&self) -> Self::Element {
        Rational::Natural(1, 1)
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        if e > u32::MAX as u64 {
            panic!("Power of exponentation is larger than 2^32: {}", e);
        }
        let e = e as u32;

        match b {
            Rational::Natural(n1, d1) => {
                if let Some(pn) = n1.checked_pow(e) {
                    if let Some(pd) = d1.checked_pow(e) {
                        return Rational::Natural(pn, pd);
                    }
                }

                Rational::from_large(ArbitraryPrecisionRational::from((*n1, *d1)).pow(e))
            }
            Rational::Large(r) => Rational::from_large(r.pow(e).into()),
        }
    }

    fn is_zero(&self, a: &Self::Element) -> bool {
        match a {
            Rational::Natural(r, _) => *r == 0,
            Rational::Large(_) => false,
        }
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        match a {
            Rational::Natural(r, d) => *r == 1 && *d == 1,
            Rational::Large(_) => false,
        }
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        Rational::Natural(rng.gen_range(range.0..range.1), 1)
    }
}

impl Field for RationalField {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.mul(a, &self.inv(b))
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.div(a, b);
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        match a {
            Rational::Natural(n, d) => {
                if *n == 0 {
                    panic!("Division by zero");
                }

                if *n < 0 {
                    match (d.checked_neg(), n.checked_neg()) {
                        (Some(nd), Some(nn)) => Rational::Natural(nd, nn),
                        _ => Rational::from_large(ArbitraryPrecisionRational::from((*n, *d)).recip()),
                    }
                } else {
                    Rational::Natural(*d, *n)
                }
            }
            Rational::Large(r) => Rational::from_large(r.clone().recip()),
        }
    }
}
