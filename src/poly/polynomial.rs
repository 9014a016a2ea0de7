use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use rand::Rng;

use crate::error::{ArithmeticError, ArithmeticResult};
use crate::rings::{Field, Ring};

use super::power::Power;
use super::term::{Monomial, Term};
use super::{Domain, Variable};

/// A sparse multivariate polynomial.
///
/// The terms are stored in a map from monomial to coefficient, so the terms are
/// sorted by the monomial order and every monomial occurs at most once. No stored
/// coefficient is zero: a term that cancels is removed from the map. As a
/// result, the zero polynomial is the empty map.
///
/// All mutating operations work in place and return `self`, so that they can be chained:
/// ```
/// use geoprove::poly::{polynomial::Polynomial, term::Term, Domain, Variable};
/// use geoprove::rings::rational::{Rational, RationalField};
///
/// let x1 = Term::from_powers(&RationalField, Domain::Dependent, Rational::from(1), [(Variable::x(1), 1)])
///     .unwrap();
/// let one = Term::new(&RationalField, Domain::Dependent, Rational::from(1));
///
/// let mut p = Polynomial::new(&RationalField, Domain::Dependent);
/// p.add_term(x1.clone()).unwrap().add_term(one.clone()).unwrap();
/// let mut q = p.clone();
/// q.add_term(one.clone()).unwrap().add_term(one).unwrap().invert();
///
/// p.multiply_by_polynomial(&q).unwrap();
/// assert_eq!(p.to_string(), "-x1^2 - 4*x1 - 3");
/// ```
#[derive(Clone)]
pub struct Polynomial<F: Ring> {
    terms: BTreeMap<Monomial, F::Element>,
    domain: Domain,
    field: F,
}

impl<F: Ring> Polynomial<F> {
    /// Constructs a zero polynomial.
    #[inline]
    pub fn new(field: &F, domain: Domain) -> Self {
        Self {
            terms: BTreeMap::new(),
            domain,
            field: *field,
        }
    }

    /// Constructs a polynomial from a list of terms, which are added one by one.
    pub fn from_terms(
        field: &F,
        domain: Domain,
        terms: impl IntoIterator<Item = Term<F>>,
    ) -> ArithmeticResult<Self> {
        let mut p = Self::new(field, domain);
        for t in terms {
            p.add_term(t)?;
        }
        Ok(p)
    }

    /// Constructs a zero polynomial, inheriting the field and domain from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self::new(&self.field, self.domain)
    }

    /// Constructs a constant polynomial, inheriting the field and domain from `self`.
    pub fn constant(&self, coeff: F::Element) -> Self {
        let mut p = self.zero();
        p.insert_monomial(Monomial::one(), coeff);
        p
    }

    /// Constructs the polynomial that is one, inheriting the field and domain from `self`.
    pub fn one(&self) -> Self {
        self.constant(self.field.one())
    }

    #[inline]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    #[inline]
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Returns the number of terms in the polynomial.
    #[inline]
    pub fn nterms(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if the polynomial is constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        match self.terms.len() {
            0 => true,
            1 => self.terms.keys().all(|m| m.is_constant()),
            _ => false,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.terms.clear();
    }

    /// Iterate over the monomials and coefficients, from the leading term down.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Monomial, &F::Element)> + '_ {
        self.terms.iter().rev()
    }

    /// Get the coefficient of the monomial `m`, if it occurs.
    #[inline]
    pub fn coefficient(&self, m: &Monomial) -> Option<&F::Element> {
        self.terms.get(m)
    }

    /// Add `coeff * m`, merging with an existing term of the same monomial
    /// and removing the term if it cancels.
    fn insert_monomial(&mut self, m: Monomial, coeff: F::Element) {
        if self.field.is_zero(&coeff) {
            return;
        }

        match self.terms.entry(m) {
            Entry::Vacant(v) => {
                v.insert(coeff);
            }
            Entry::Occupied(mut o) => {
                self.field.add_assign(o.get_mut(), &coeff);
                if self.field.is_zero(o.get()) {
                    o.remove();
                }
            }
        }
    }

    /// Add the product of two terms, given as monomial and coefficient.
    #[inline]
    pub(crate) fn add_monomial_product(
        &mut self,
        ma: &Monomial,
        ca: &F::Element,
        mb: &Monomial,
        cb: &F::Element,
    ) -> ArithmeticResult<()> {
        let mut m = mb.clone();
        m.merge(ma, true)?;
        let c = self.field.mul(cb, ca);
        self.insert_monomial(m, c);
        Ok(())
    }

    /// Add a term to the polynomial.
    pub fn add_term(&mut self, t: Term<F>) -> ArithmeticResult<&mut Self> {
        ArithmeticError::check_domain(self.domain, t.domain())?;
        debug_assert_eq!(&self.field, t.field());

        let (m, c) = t.into_parts();
        self.insert_monomial(m, c);
        Ok(self)
    }

    pub fn add_polynomial(&mut self, p: &Self) -> ArithmeticResult<&mut Self> {
        ArithmeticError::check_domain(self.domain, p.domain)?;

        for (m, c) in &p.terms {
            self.insert_monomial(m.clone(), c.clone());
        }
        Ok(self)
    }

    pub fn subtract_polynomial(&mut self, p: &Self) -> ArithmeticResult<&mut Self> {
        ArithmeticError::check_domain(self.domain, p.domain)?;

        for (m, c) in &p.terms {
            let neg = self.field.neg(c);
            self.insert_monomial(m.clone(), neg);
        }
        Ok(self)
    }

    /// Multiply every coefficient by `c`.
    pub fn multiply_by_constant(&mut self, c: &F::Element) -> &mut Self {
        if self.is_zero() {
            return self;
        }

        if self.field.is_zero(c) {
            self.clear();
            return self;
        }

        let field = self.field;
        self.terms.retain(|_, v| {
            field.mul_assign(v, c);
            !field.is_zero(v)
        });
        self
    }

    pub fn multiply_by_term(&mut self, t: &Term<F>) -> ArithmeticResult<&mut Self> {
        ArithmeticError::check_domain(self.domain, t.domain())?;

        if self.is_zero() {
            return Ok(self);
        }

        if t.is_zero() {
            self.clear();
            return Ok(self);
        }

        let mut result = self.zero();
        for (m, c) in &self.terms {
            result.add_monomial_product(t.monomial(), &t.coefficient, m, c)?;
        }
        *self = result;
        Ok(self)
    }

    /// Multiply by `p` by expanding all products of terms.
    pub fn multiply_by_polynomial(&mut self, p: &Self) -> ArithmeticResult<&mut Self> {
        ArithmeticError::check_domain(self.domain, p.domain)?;
        self.mul_serial(p)?;
        Ok(self)
    }

    /// Expand the product into a new accumulator, so that `self` is not
    /// changed when an exponent overflows.
    pub(crate) fn mul_serial(&mut self, p: &Self) -> ArithmeticResult<()> {
        if self.is_zero() {
            return Ok(());
        }

        if p.is_zero() {
            self.clear();
            return Ok(());
        }

        let mut result = self.zero();
        for (ma, ca) in &self.terms {
            for (mb, cb) in &p.terms {
                result.add_monomial_product(ma, ca, mb, cb)?;
            }
        }
        *self = result;
        Ok(())
    }

    /// Negate every coefficient.
    pub fn invert(&mut self) -> &mut Self {
        for c in self.terms.values_mut() {
            *c = self.field.neg(c);
        }
        self
    }

    /// Get the largest term. Fails on the zero polynomial.
    pub fn leading_term(&self) -> ArithmeticResult<Term<F>> {
        self.terms
            .last_key_value()
            .map(|(m, c)| Term::from_parts(&self.field, self.domain, c.clone(), m.clone()))
            .ok_or(ArithmeticError::MissingOperand(
                "the zero polynomial has no leading term",
            ))
    }

    /// The largest total degree of the terms. The zero polynomial has degree zero.
    pub fn degree(&self) -> i64 {
        self.terms.keys().map(|m| m.degree()).max().unwrap_or(0)
    }

    /// A snapshot of the terms, from the leading term down.
    pub fn terms_desc(&self) -> std::vec::IntoIter<Term<F>> {
        self.terms
            .iter()
            .rev()
            .map(|(m, c)| Term::from_parts(&self.field, self.domain, c.clone(), m.clone()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// Returns true if `var` occurs in any term.
    pub fn contains_variable(&self, var: Variable) -> bool {
        self.terms.keys().any(|m| m.power_of(var).is_some())
    }

    /// The highest power of `var` in the polynomial.
    pub fn degree_in(&self, var: Variable) -> i32 {
        self.terms
            .keys()
            .map(|m| m.exponent_of(var))
            .max()
            .unwrap_or(0)
    }

    /// The largest variable that occurs in the polynomial.
    pub fn leading_variable(&self) -> Option<Variable> {
        // in a lexicographic order, the largest monomial contains the largest variable
        self.terms
            .last_key_value()
            .and_then(|(m, _)| m.leading_variable())
    }

    /// Split the polynomial into the coefficient of `var^k` and the terms that do not
    /// have `var` to the power `k`.
    fn split_at_power(&self, var: Variable, k: i32) -> (Self, Self) {
        let mut coeff = self.zero();
        let mut rest = self.zero();
        for (m, c) in &self.terms {
            if m.exponent_of(var) == k {
                let mut m = m.clone();
                m.remove_power(var);
                coeff.terms.insert(m, c.clone());
            } else {
                rest.terms.insert(m.clone(), c.clone());
            }
        }
        (coeff, rest)
    }

    /// The coefficient of `var^k`, when the polynomial is seen as a polynomial in `var`.
    pub fn coefficient_in(&self, var: Variable, k: i32) -> Self {
        self.split_at_power(var, k).0
    }

    /// Compute the pseudo-remainder `r` of `self` divided by `divisor` with respect to `var`,
    /// which satisfies `lc^s * self = q * divisor + r` where `lc` is the leading coefficient
    /// of `divisor` in `var` and the degree of `r` in `var` is smaller than that of `divisor`.
    pub fn pseudo_remainder(&self, divisor: &Self, var: Variable) -> ArithmeticResult<Self> {
        ArithmeticError::check_domain(self.domain, divisor.domain)?;

        if divisor.is_zero() {
            return Err(ArithmeticError::MissingOperand(
                "pseudo-division by the zero polynomial",
            ));
        }

        let d = divisor.degree_in(var);
        if d == 0 {
            return Ok(self.zero());
        }

        let (lc, divisor_rest) = divisor.split_at_power(var, d);

        let mut r = self.clone();
        loop {
            let k = r.degree_in(var);
            if r.is_zero() || k < d {
                return Ok(r);
            }

            // r <- lc * (r - lc_r * var^k) - lc_r * var^(k - d) * (divisor - lc * var^d)
            let (mut lc_r, rest) = r.split_at_power(var, k);
            r = rest;
            r.mul_serial(&lc)?;

            lc_r.mul_serial(&divisor_rest)?;
            if k > d {
                let shift = Term::from_parts(
                    &self.field,
                    self.domain,
                    self.field.one(),
                    Monomial::from_powers([Power::new(var, k - d)?])?,
                );
                lc_r.multiply_by_term(&shift)?;
            }
            r.subtract_polynomial(&lc_r)?;
        }
    }

    /// Raise the polynomial to the power `n`.
    pub fn pow(&self, mut n: usize) -> ArithmeticResult<Self> {
        let mut result = self.one();
        let mut base = self.clone();
        while n > 0 {
            if n % 2 == 1 {
                result.mul_serial(&base)?;
            }
            n /= 2;
            if n > 0 {
                let b = base.clone();
                base.mul_serial(&b)?;
            }
        }
        Ok(result)
    }

    /// The greatest common divisor of the monomials of all terms, with coefficient one.
    pub fn term_gcd(&self) -> Option<Term<F>> {
        let mut keys = self.terms.keys();
        let mut gcd = keys.next()?.clone();
        for m in keys {
            if gcd.is_constant() {
                break;
            }
            gcd.gcd(m);
        }

        Some(Term::from_parts(
            &self.field,
            self.domain,
            self.field.one(),
            gcd,
        ))
    }

    /// Create a random polynomial with up to `nterms` terms in the variables `vars`, each with an exponent
    /// of at most `max_exp` and coefficients sampled from `coeff_range`.
    /// Fails if a variable does not belong to `domain`.
    pub fn random(
        field: &F,
        domain: Domain,
        rng: &mut impl rand::RngCore,
        nterms: usize,
        vars: &[Variable],
        max_exp: i32,
        coeff_range: (i64, i64),
    ) -> ArithmeticResult<Self> {
        for v in vars {
            ArithmeticError::check_domain(domain, v.domain())?;
        }
        let max_exp = max_exp.max(0);

        let mut p = Self::new(field, domain);
        let mut attempts = 0;
        while p.nterms() < nterms && attempts < 10 * nterms {
            attempts += 1;

            let m = Monomial::from_powers(vars.iter().filter_map(|v| {
                let e = rng.gen_range(0..=max_exp);
                (e > 0).then(|| Power::new_unchecked(*v, e))
            }))?;

            if p.terms.contains_key(&m) {
                continue;
            }

            let c = field.sample(rng, coeff_range);
            p.insert_monomial(m, c);
        }
        Ok(p)
    }

    /// Check if the polynomial is canonical: only non-zero coefficients and
    /// monomials with positive exponents in strictly descending variable order.
    pub fn check_consistency(&self) {
        for (m, c) in &self.terms {
            if self.field.is_zero(c) {
                panic!("Inconsistent polynomial (0 coefficient): {}", self);
            }

            for p in m.powers() {
                if p.exponent() <= 0 {
                    panic!("Inconsistent polynomial (exponent {}): {}", p.exponent(), self);
                }
                if p.domain() != self.domain {
                    panic!("Inconsistent polynomial (variable {}): {}", p.var(), self);
                }
            }

            for w in m.powers().windows(2) {
                if w[0].var() <= w[1].var() {
                    panic!("Inconsistent polynomial (wrong variable ordering): {}", self);
                }
            }
        }
    }
}

impl<F: Field> Polynomial<F> {
    /// Divide every term by `t`, whose monomial must divide every monomial of `self`.
    pub fn divide_by_term(&mut self, t: &Term<F>) -> ArithmeticResult<&mut Self> {
        ArithmeticError::check_domain(self.domain, t.domain())?;

        if t.is_zero() {
            return Err(ArithmeticError::DivisionPrecondition {
                dividend: self.to_string(),
                divisor: t.to_string(),
            });
        }

        if let Some((m, c)) = self
            .terms
            .iter()
            .find(|(m, _)| !m.is_divisible_by(t.monomial()))
        {
            return Err(ArithmeticError::DivisionPrecondition {
                dividend: Term::from_parts(&self.field, self.domain, c.clone(), m.clone())
                    .to_string(),
                divisor: t.to_string(),
            });
        }

        let mut result = self.zero();
        for (m, c) in &self.terms {
            let mut m = m.clone();
            m.merge(t.monomial(), false)?;
            result.insert_monomial(m, self.field.div(c, &t.coefficient));
        }
        *self = result;
        Ok(self)
    }
}

impl<F: Ring> PartialEq for Polynomial<F> {
    /// Polynomials are equal if their difference is zero.
    fn eq(&self, other: &Self) -> bool {
        if self.domain != other.domain {
            return false;
        }

        let mut diff = self.clone();
        diff.subtract_polynomial(other)
            .map(|d| d.is_zero())
            .unwrap_or(false)
    }
}

impl<F: Ring> std::fmt::Debug for Polynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "[]");
        }
        let mut first = true;
        write!(f, "[ ")?;
        for (m, c) in self.iter() {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{{ {:?}, {:?} }}", c, m.powers())?;
        }
        write!(f, " ]")
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    use crate::error::ArithmeticError;
    use crate::poly::term::Term;
    use crate::poly::{Domain, Variable};
    use crate::rings::float::FloatField;
    use crate::rings::rational::{Rational, RationalField};

    use super::Polynomial;

    fn term(c: i64, powers: &[(Variable, i32)]) -> Term<RationalField> {
        Term::from_powers(
            &RationalField,
            Domain::Dependent,
            Rational::from(c),
            powers.iter().cloned(),
        )
        .unwrap()
    }

    fn poly(terms: &[(i64, &[(Variable, i32)])]) -> Polynomial<RationalField> {
        Polynomial::from_terms(
            &RationalField,
            Domain::Dependent,
            terms.iter().map(|(c, p)| term(*c, p)),
        )
        .unwrap()
    }

    #[test]
    fn cancellation() {
        let x1 = Variable::x(1);
        let mut p = Polynomial::new(&RationalField, Domain::Dependent);
        p.add_term(term(2, &[(x1, 1)])).unwrap();
        assert_eq!(p.nterms(), 1);
        p.add_term(term(-2, &[(x1, 1)])).unwrap();
        assert!(p.is_zero());

        p.add_term(term(0, &[(x1, 3)])).unwrap();
        assert!(p.is_zero());
    }

    #[test]
    fn float_cancellation() {
        let field = FloatField::default();
        let x1 = Variable::x(1);
        let mut p = Polynomial::new(&field, Domain::Dependent);
        p.add_term(Term::from_powers(&field, Domain::Dependent, 0.3, [(x1, 1)]).unwrap())
            .unwrap();
        p.add_term(Term::from_powers(&field, Domain::Dependent, -0.3 + 1e-9, [(x1, 1)]).unwrap())
            .unwrap();
        assert!(p.is_zero());

        p.add_term(Term::new(&field, Domain::Dependent, 1e-3)).unwrap();
        p.multiply_by_constant(&1e-4);
        assert!(p.is_zero());
    }

    #[test]
    fn domain_mismatch() {
        let mut p = poly(&[(1, &[(Variable::x(1), 1)])]);
        let s = Polynomial::new(&RationalField, Domain::Symbolic);
        assert!(matches!(
            p.add_polynomial(&s),
            Err(ArithmeticError::DomainMismatch {
                expected: Domain::Dependent,
                found: Domain::Symbolic
            })
        ));
        assert!(p.multiply_by_polynomial(&s).is_err());
        assert!(p.add_term(Term::new(&RationalField, Domain::Symbolic, Rational::from(1))).is_err());
        assert_eq!(p.nterms(), 1);
        assert!(p != s);
    }

    #[test]
    fn independent_and_dependent() {
        let (u1, x1) = (Variable::u(1), Variable::x(1));
        let mut p = poly(&[(1, &[(x1, 1)])]);
        let ut = Term::from_powers(&RationalField, Domain::Independent, Rational::from(1), [(u1, 1)])
            .unwrap();
        let up = Polynomial::from_terms(&RationalField, Domain::Independent, [ut.clone()]).unwrap();

        assert!(matches!(
            p.add_polynomial(&up),
            Err(ArithmeticError::DomainMismatch {
                expected: Domain::Dependent,
                found: Domain::Independent
            })
        ));
        assert!(p.subtract_polynomial(&up).is_err());
        assert!(p.add_term(ut.clone()).is_err());
        assert!(p.multiply_by_term(&ut).is_err());
        assert!(p.multiply_by_polynomial(&up).is_err());
        assert!(p.pseudo_remainder(&up, u1).is_err());
        assert!(p.divide_by_term(&ut).is_err());
        assert!(Polynomial::from_terms(&RationalField, Domain::Dependent, [ut]).is_err());

        assert_eq!(p, poly(&[(1, &[(x1, 1)])]));
        assert_ne!(p.one(), up.one());
    }

    #[test]
    fn difference_of_squares() {
        let x1 = Variable::x(1);
        let mut p = poly(&[(1, &[(x1, 1)]), (1, &[])]);
        let q = poly(&[(1, &[(x1, 1)]), (-1, &[])]);
        p.multiply_by_polynomial(&q).unwrap();

        assert_eq!(p, poly(&[(1, &[(x1, 2)]), (-1, &[])]));
        assert_eq!(p.nterms(), 2);
        p.check_consistency();
    }

    #[test]
    fn multiply_by_term_and_constant() {
        let (x1, x2) = (Variable::x(1), Variable::x(2));
        let mut p = poly(&[(1, &[(x1, 1)]), (3, &[(x2, 2)])]);
        p.multiply_by_term(&term(2, &[(x1, 1), (x2, 1)])).unwrap();
        assert_eq!(p, poly(&[(2, &[(x1, 2), (x2, 1)]), (6, &[(x2, 3), (x1, 1)])]));

        p.multiply_by_constant(&Rational::new(1, 2));
        assert_eq!(p, poly(&[(1, &[(x1, 2), (x2, 1)]), (3, &[(x2, 3), (x1, 1)])]));

        p.multiply_by_term(&term(0, &[(x1, 1)])).unwrap();
        assert!(p.is_zero());
    }

    #[test]
    fn exponent_overflow() {
        let x1 = Variable::x(1);
        let mut p = poly(&[(1, &[(x1, 2_000_000_000)]), (1, &[])]);
        let orig = p.clone();

        assert!(matches!(
            p.multiply_by_polynomial(&orig),
            Err(ArithmeticError::ExponentOverflow(v)) if v == x1
        ));
        assert!(p.multiply_by_term(&term(1, &[(x1, 2_000_000_000)])).is_err());
        assert!(p.pow(2).is_err());
        assert_eq!(p, orig);
        p.check_consistency();
    }

    #[test]
    fn leading_term_and_degree() {
        let (x0, x1, x2) = (Variable::x(0), Variable::x(1), Variable::x(2));
        let p = poly(&[(5, &[(x0, 7)]), (1, &[(x1, 3)]), (-2, &[(x2, 1)]), (4, &[])]);

        let lt = p.leading_term().unwrap();
        assert_eq!(lt.powers().len(), 1);
        assert_eq!(lt.exponent_of(x2), 1);
        assert_eq!(lt.coefficient, Rational::from(-2));
        assert_eq!(p.degree(), 7);
        assert_eq!(p.leading_variable(), Some(x2));

        let desc: Vec<_> = p.terms_desc().collect();
        assert_eq!(desc.len(), 4);
        assert!(desc.windows(2).all(|w| w[0] > w[1]));

        assert!(matches!(
            p.zero().leading_term(),
            Err(ArithmeticError::MissingOperand(_))
        ));
        assert_eq!(p.zero().degree(), 0);
    }

    #[test]
    fn univariate_view() {
        let (x0, x1, x2) = (Variable::x(0), Variable::x(1), Variable::x(2));
        // (x0 + 1)*x2^2 + x1*x2 - 3
        let p = poly(&[
            (1, &[(x0, 1), (x2, 2)]),
            (1, &[(x2, 2)]),
            (1, &[(x1, 1), (x2, 1)]),
            (-3, &[]),
        ]);

        assert_eq!(p.degree_in(x2), 2);
        assert!(p.contains_variable(x1));
        assert!(!p.contains_variable(Variable::x(3)));
        assert_eq!(p.coefficient_in(x2, 2), poly(&[(1, &[(x0, 1)]), (1, &[])]));
        assert_eq!(p.coefficient_in(x2, 1), poly(&[(1, &[(x1, 1)])]));
        assert_eq!(p.coefficient_in(x2, 0), poly(&[(-3, &[])]));
    }

    #[test]
    fn pseudo_remainder() {
        let (x1, x2) = (Variable::x(1), Variable::x(2));

        // x2^2 - x1 modulo x2 - x1 leaves x1^2 - x1
        let f = poly(&[(1, &[(x2, 2)]), (-1, &[(x1, 1)])]);
        let g = poly(&[(1, &[(x2, 1)]), (-1, &[(x1, 1)])]);
        assert_eq!(
            f.pseudo_remainder(&g, x2).unwrap(),
            poly(&[(1, &[(x1, 2)]), (-1, &[(x1, 1)])])
        );

        // x2^2 modulo x1*x2 - 1 leaves 1, since x1^2*x2^2 = (x1*x2 + 1)(x1*x2 - 1) + 1
        let f = poly(&[(1, &[(x2, 2)])]);
        let g = poly(&[(1, &[(x1, 1), (x2, 1)]), (-1, &[])]);
        assert_eq!(f.pseudo_remainder(&g, x2).unwrap(), poly(&[(1, &[])]));

        // a divisor without the variable gives zero
        assert!(f.pseudo_remainder(&poly(&[(2, &[(x1, 1)])]), x2).unwrap().is_zero());
        assert!(f.pseudo_remainder(&f.zero(), x2).is_err());
    }

    #[test]
    fn power() {
        let x1 = Variable::x(1);
        let p = poly(&[(1, &[(x1, 1)]), (1, &[])]);
        let cube = p.pow(3).unwrap();
        assert_eq!(
            cube,
            poly(&[(1, &[(x1, 3)]), (3, &[(x1, 2)]), (3, &[(x1, 1)]), (1, &[])])
        );
        assert_eq!(p.pow(0).unwrap(), p.one());
    }

    #[test]
    fn term_gcd_and_division() {
        let (x0, x1, x2) = (Variable::x(0), Variable::x(1), Variable::x(2));
        let mut p = poly(&[(4, &[(x2, 2), (x1, 1), (x0, 1)]), (6, &[(x2, 1), (x1, 3)])]);
        let g = p.term_gcd().unwrap();
        assert_eq!(g.exponent_of(x2), 1);
        assert_eq!(g.exponent_of(x1), 1);
        assert_eq!(g.exponent_of(x0), 0);

        let mut two_g = g.clone();
        two_g.mul_coeff(&Rational::from(2));
        p.divide_by_term(&two_g).unwrap();
        assert_eq!(p, poly(&[(2, &[(x2, 1), (x0, 1)]), (3, &[(x1, 2)])]));

        assert!(matches!(
            p.divide_by_term(&term(1, &[(x2, 1)])),
            Err(ArithmeticError::DivisionPrecondition { .. })
        ));
        assert!(p.zero().term_gcd().is_none());
    }

    #[test]
    fn random() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(9);
        let vars = [Variable::x(2), Variable::x(1)];
        let p = Polynomial::random(&RationalField, Domain::Dependent, &mut rng, 8, &vars, 3, (1, 5))
            .unwrap();
        assert!(p.nterms() > 0);
        p.check_consistency();

        assert!(matches!(
            Polynomial::random(&RationalField, Domain::Dependent, &mut rng, 8, &[Variable::u(1)], 3, (1, 5)),
            Err(ArithmeticError::DomainMismatch { .. })
        ));

        // a negative maximum exponent only allows constants
        let c = Polynomial::random(&RationalField, Domain::Dependent, &mut rng, 8, &vars, -4, (1, 5))
            .unwrap();
        assert!(c.is_constant());
    }

    #[test]
    fn algebraic_equality() {
        let x1 = Variable::x(1);
        let mut a = poly(&[(1, &[(x1, 1)])]);
        a.add_term(term(1, &[])).unwrap();
        let b = poly(&[(1, &[]), (1, &[(x1, 1)])]);
        assert_eq!(a, b);
        assert_ne!(a, b.zero());
    }
}
