use std::fmt::{self, Display, Write};

use crate::{
    poly::{
        polynomial::Polynomial,
        power::Power,
        term::{Monomial, Term},
        VarKind, Variable,
    },
    rings::Ring,
    state::VariableRegistry,
};

/// Prints a variable, resolving symbolic variables to point coordinates
/// such as `x_A` if a registry is available.
pub struct VariablePrinter<'a> {
    pub var: Variable,
    pub registry: Option<&'a VariableRegistry>,
}

impl<'a> fmt::Display for VariablePrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.var.kind() == VarKind::Symbolic {
            if let Some((point, coordinate)) = self.registry.and_then(|r| r.label_of(self.var)) {
                return write!(f, "{}_{}", coordinate, point);
            }
        }

        write!(f, "{}", self.var)
    }
}

fn fmt_power(p: &Power, f: &mut fmt::Formatter, registry: Option<&VariableRegistry>) -> fmt::Result {
    let var = VariablePrinter {
        var: p.var(),
        registry,
    };

    if p.exponent() == 1 {
        write!(f, "{}", var)
    } else {
        write!(f, "{}^{}", var, p.exponent())
    }
}

/// Format a coefficient and split off its sign.
fn split_sign<E: Display>(coeff: &E) -> (bool, String) {
    let c = coeff.to_string();
    match c.strip_prefix('-') {
        Some(abs) => (true, abs.to_owned()),
        None => (false, c),
    }
}

/// Write `abs*monomial`, where `abs` is an unsigned coefficient that is omitted if it is one.
fn fmt_unsigned(
    abs: &str,
    monomial: &Monomial,
    f: &mut fmt::Formatter,
    registry: Option<&VariableRegistry>,
) -> fmt::Result {
    if monomial.is_constant() {
        return f.write_str(abs);
    }

    if abs != "1" {
        f.write_str(abs)?;
        f.write_char('*')?;
    }

    // variables are printed in ascending order
    for (i, p) in monomial.powers().iter().rev().enumerate() {
        if i > 0 {
            f.write_char('*')?;
        }
        fmt_power(p, f, registry)?;
    }

    Ok(())
}

/// A term that is printed in a format like `-3*x1^2*x3` or `2*x_A`.
pub struct TermPrinter<'a, 'b, F: Ring> {
    pub term: &'a Term<F>,
    pub registry: Option<&'b VariableRegistry>,
}

impl<'a, 'b, F: Ring> TermPrinter<'a, 'b, F> {
    pub fn new(term: &'a Term<F>, registry: Option<&'b VariableRegistry>) -> TermPrinter<'a, 'b, F> {
        TermPrinter { term, registry }
    }
}

impl<'a, 'b, F: Ring> fmt::Display for TermPrinter<'a, 'b, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.term.is_zero() {
            return f.write_char('0');
        }

        let (negative, abs) = split_sign(&self.term.coefficient);
        if negative {
            f.write_char('-')?;
        }
        fmt_unsigned(&abs, self.term.monomial(), f, self.registry)
    }
}

/// A polynomial that is printed from the leading term down, in a format like
/// `3*x1^2*x3 - x2 + 1`.
pub struct PolynomialPrinter<'a, 'b, F: Ring> {
    pub poly: &'a Polynomial<F>,
    pub registry: Option<&'b VariableRegistry>,
}

impl<'a, 'b, F: Ring> PolynomialPrinter<'a, 'b, F> {
    pub fn new(
        poly: &'a Polynomial<F>,
        registry: Option<&'b VariableRegistry>,
    ) -> PolynomialPrinter<'a, 'b, F> {
        PolynomialPrinter { poly, registry }
    }
}

impl<'a, 'b, F: Ring> fmt::Display for PolynomialPrinter<'a, 'b, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.poly.is_zero() {
            return f.write_char('0');
        }

        for (i, (m, c)) in self.poly.iter().enumerate() {
            let (negative, abs) = split_sign(c);
            match (i, negative) {
                (0, true) => f.write_char('-')?,
                (0, false) => {}
                (_, true) => f.write_str(" - ")?,
                (_, false) => f.write_str(" + ")?,
            }
            fmt_unsigned(&abs, m, f, self.registry)?;
        }

        Ok(())
    }
}

impl<F: Ring> fmt::Display for Term<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        TermPrinter::new(self, None).fmt(f)
    }
}

impl<F: Ring> fmt::Display for Polynomial<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        PolynomialPrinter::new(self, None).fmt(f)
    }
}
