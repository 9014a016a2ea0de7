//! Binary export and import of polynomials.
//!
//! A polynomial is written as a flag byte and the byte length of the data,
//! followed by the data itself: the domain, the number of terms and every term from
//! the leading term down. Symbolic variables are stored by their index in the
//! [`VariableRegistry`](crate::state::VariableRegistry), so polynomials with symbolic
//! variables should be imported with [`Polynomial::import_with_map`] in a new session.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use bytes::{Buf, BufMut};
use rug::integer::Order;
use rug::{Integer, Rational as ArbitraryPrecisionRational};

use crate::error::{ArithmeticError, ArithmeticResult};
use crate::rings::float::FloatField;
use crate::rings::rational::{Rational, RationalField};
use crate::rings::Ring;
use crate::state::VariableMap;
use crate::utils;

use super::polynomial::Polynomial;
use super::power::Power;
use super::term::{Monomial, Term};
use super::{Domain, VarKind, Variable};

const FORMAT_VERSION: u8 = 0;

const RATIONAL_NATURAL: u8 = 0;
const RATIONAL_LARGE: u8 = 1;

/// A coefficient ring whose elements can be written to a byte buffer.
pub trait CoefficientCodec: Ring {
    fn write_coefficient(&self, c: &Self::Element, dest: &mut Vec<u8>);
    fn read_coefficient(&self, source: &mut &[u8]) -> ArithmeticResult<Self::Element>;
}

#[inline]
fn ensure(source: &[u8], n: usize, what: &str) -> ArithmeticResult<()> {
    if source.remaining() < n {
        Err(ArithmeticError::Malformed(format!(
            "unexpected end of data while reading {}",
            what
        )))
    } else {
        Ok(())
    }
}

impl CoefficientCodec for FloatField {
    fn write_coefficient(&self, c: &f64, dest: &mut Vec<u8>) {
        dest.put_f64_le(*c);
    }

    fn read_coefficient(&self, source: &mut &[u8]) -> ArithmeticResult<f64> {
        ensure(source, 8, "a coefficient")?;
        Ok(source.get_f64_le())
    }
}

fn write_integer(i: &Integer, dest: &mut Vec<u8>) {
    let digits = i.to_digits::<u8>(Order::Lsf);
    dest.put_u8(u8::from(i.cmp0() == std::cmp::Ordering::Less));
    dest.put_u64_le(digits.len() as u64);
    dest.put_slice(&digits);
}

fn read_integer(source: &mut &[u8]) -> ArithmeticResult<Integer> {
    ensure(source, 9, "an integer")?;
    let negative = source.get_u8() != 0;
    let len = source.get_u64_le() as usize;
    ensure(source, len, "the digits of an integer")?;

    let i = Integer::from_digits(&source[..len], Order::Lsf);
    source.advance(len);
    Ok(if negative { -i } else { i })
}

impl CoefficientCodec for RationalField {
    fn write_coefficient(&self, c: &Rational, dest: &mut Vec<u8>) {
        match c {
            Rational::Natural(n, d) => {
                dest.put_u8(RATIONAL_NATURAL);
                dest.put_i64_le(*n);
                dest.put_i64_le(*d);
            }
            Rational::Large(r) => {
                dest.put_u8(RATIONAL_LARGE);
                write_integer(r.numer(), dest);
                write_integer(r.denom(), dest);
            }
        }
    }

    fn read_coefficient(&self, source: &mut &[u8]) -> ArithmeticResult<Rational> {
        ensure(source, 1, "a coefficient")?;
        match source.get_u8() {
            RATIONAL_NATURAL => {
                ensure(source, 16, "a coefficient")?;
                let (n, d) = (source.get_i64_le(), source.get_i64_le());
                if d <= 0 {
                    return Err(ArithmeticError::Malformed(format!(
                        "invalid denominator {}",
                        d
                    )));
                }
                Ok(Rational::new(n, d))
            }
            RATIONAL_LARGE => {
                let n = read_integer(source)?;
                let d = read_integer(source)?;
                if d.cmp0() != std::cmp::Ordering::Greater {
                    return Err(ArithmeticError::Malformed(format!(
                        "invalid denominator {}",
                        d
                    )));
                }
                Ok(Rational::from_large(ArbitraryPrecisionRational::from((
                    n, d,
                ))))
            }
            tag => Err(ArithmeticError::Malformed(format!(
                "unknown coefficient tag {}",
                tag
            ))),
        }
    }
}

impl<F: CoefficientCodec> Polynomial<F> {
    /// Write the polynomial to `dest`.
    pub fn export<W: Write>(&self, mut dest: W) -> ArithmeticResult<()> {
        let mut data = vec![];
        data.put_u8(self.domain().to_u8());
        data.put_u64_le(self.nterms() as u64);

        for (m, c) in self.iter() {
            data.put_u32_le(m.len() as u32);
            for p in m.powers() {
                data.put_u8(p.var().kind().to_u8());
                data.put_i64_le(p.var().index());
                data.put_i32_le(p.exponent());
            }
            self.field().write_coefficient(c, &mut data);
        }

        dest.write_u8(FORMAT_VERSION)?;
        dest.write_u64::<LittleEndian>(data.len() as u64)?;
        dest.write_all(&data)?;
        Ok(())
    }

    /// Read a polynomial that was written with [`Polynomial::export`] in the same session.
    pub fn import<R: Read>(field: &F, source: R) -> ArithmeticResult<Self> {
        Self::import_impl(field, source, |v| v)
    }

    /// Read a polynomial that was written with [`Polynomial::export`], renaming its symbolic
    /// variables with a map obtained from [`VariableRegistry::import`](crate::state::VariableRegistry::import).
    pub fn import_with_map<R: Read>(
        field: &F,
        source: R,
        variable_map: &VariableMap,
    ) -> ArithmeticResult<Self> {
        Self::import_impl(field, source, |v| variable_map.map(v))
    }

    fn import_impl<R: Read>(
        field: &F,
        mut source: R,
        rename: impl Fn(Variable) -> Variable,
    ) -> ArithmeticResult<Self> {
        let version = source.read_u8()?;
        if version != FORMAT_VERSION {
            return Err(ArithmeticError::Malformed(format!(
                "unsupported format version {}",
                version
            )));
        }

        let len = source.read_u64::<LittleEndian>()?;
        let data = utils::read_bytes(&mut source, len, "polynomial data")?;
        let mut data = data.as_slice();

        ensure(data, 9, "the header")?;
        let domain = Domain::from_u8(data.get_u8()).ok_or_else(|| {
            ArithmeticError::Malformed("unknown domain".to_owned())
        })?;
        let nterms = data.get_u64_le();

        let mut p = Polynomial::new(field, domain);
        for _ in 0..nterms {
            ensure(data, 4, "a term")?;
            let npowers = data.get_u32_le();

            let mut powers = Vec::with_capacity(npowers.min(64) as usize);
            for _ in 0..npowers {
                ensure(data, 13, "a power")?;
                let kind = VarKind::from_u8(data.get_u8()).ok_or_else(|| {
                    ArithmeticError::Malformed("unknown variable kind".to_owned())
                })?;
                let var = rename(Variable::new(kind, data.get_i64_le()));
                let exponent = data.get_i32_le();

                if exponent <= 0 || var.domain() != domain {
                    return Err(ArithmeticError::Malformed(format!(
                        "invalid power {}^{} in a polynomial of domain {}",
                        var, exponent, domain
                    )));
                }
                powers.push(Power::new_unchecked(var, exponent));
            }

            let c = field.read_coefficient(&mut data)?;
            p.add_term(Term::from_parts(
                field,
                domain,
                c,
                Monomial::from_powers(powers)?,
            ))?;
        }

        if data.has_remaining() {
            return Err(ArithmeticError::Malformed(format!(
                "{} trailing bytes",
                data.remaining()
            )));
        }

        Ok(p)
    }
}
