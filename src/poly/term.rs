use std::cmp::Ordering;

use smallvec::SmallVec;
use tracing::warn;

use crate::error::{ArithmeticError, ArithmeticResult};
use crate::rings::{Field, Ring};

use super::power::Power;
use super::{Domain, Variable, INLINED_POWERS};

/// A product of powers of distinct variables.
///
/// The powers are kept sorted by strictly descending variable, and every
/// exponent is positive. Monomials are compared lexicographically on their
/// powers, so that the monomial with the highest variable to the highest
/// power is the largest. The constant monomial is the smallest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Monomial {
    powers: SmallVec<[Power; INLINED_POWERS]>,
}

impl Monomial {
    /// The constant monomial `1`.
    #[inline]
    pub fn one() -> Monomial {
        Monomial {
            powers: SmallVec::new(),
        }
    }

    /// Create a monomial from powers in any order. Powers of the same variable are multiplied.
    pub fn from_powers(powers: impl IntoIterator<Item = Power>) -> ArithmeticResult<Monomial> {
        let mut m = Monomial::one();
        for p in powers {
            m.add_power(p)?;
        }
        Ok(m)
    }

    #[inline]
    pub fn powers(&self) -> &[Power] {
        &self.powers
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        self.powers.is_empty()
    }

    /// The number of distinct variables.
    #[inline]
    pub fn len(&self) -> usize {
        self.powers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    /// The total degree.
    pub fn degree(&self) -> i64 {
        self.powers.iter().map(|p| p.exponent() as i64).sum()
    }

    /// The largest variable in the monomial.
    #[inline]
    pub fn leading_variable(&self) -> Option<Variable> {
        self.powers.first().map(|p| p.var())
    }

    /// Find the position of the power of `var` with a binary search. If
    /// there is no such power, the position where it should be inserted is returned
    /// as the error.
    #[inline]
    pub fn position_of(&self, var: Variable) -> Result<usize, usize> {
        // the list is descending, hence the reversed comparison
        self.powers.binary_search_by(|p| var.cmp(&p.var()))
    }

    #[inline]
    pub fn power_of(&self, var: Variable) -> Option<&Power> {
        self.position_of(var).ok().map(|i| &self.powers[i])
    }

    /// The exponent of `var`, which is zero if the variable does not occur.
    #[inline]
    pub fn exponent_of(&self, var: Variable) -> i32 {
        self.power_of(var).map(|p| p.exponent()).unwrap_or(0)
    }

    /// Multiply by a single power.
    pub fn add_power(&mut self, p: Power) -> ArithmeticResult<()> {
        match self.position_of(p.var()) {
            Ok(i) => {
                self.powers[i].add_to_exponent(p.exponent())?;
            }
            Err(i) => self.powers.insert(i, p),
        }
        Ok(())
    }

    /// Add `delta` to the exponent of `var`, removing the power when the exponent
    /// is no longer positive. A missing variable is inserted if `delta` is positive.
    pub fn change_exponent(&mut self, var: Variable, delta: i32) -> ArithmeticResult<()> {
        match self.position_of(var) {
            Ok(i) => {
                if self.powers[i].add_to_exponent(delta)? <= 0 {
                    self.powers.remove(i);
                }
            }
            Err(i) => {
                if delta > 0 {
                    self.powers.insert(i, Power::new_unchecked(var, delta));
                }
            }
        }
        Ok(())
    }

    /// Remove the power of `var` and return it.
    #[inline]
    pub(crate) fn remove_power(&mut self, var: Variable) -> Option<Power> {
        self.position_of(var).ok().map(|i| self.powers.remove(i))
    }

    /// Merge the powers of `other` into `self` by walking both lists in lock-step.
    ///
    /// If `add` is true, exponents of shared variables are added and variables that
    /// only occur in `other` are copied. Otherwise, exponents of shared variables are
    /// subtracted, dropping powers that do not stay positive, and variables that
    /// only occur in `other` are ignored.
    ///
    /// Fails if an exponent overflows, in which case `self` is not changed.
    pub fn merge(&mut self, other: &Monomial, add: bool) -> ArithmeticResult<()> {
        if other.is_constant() {
            return Ok(());
        }

        let mut merged: SmallVec<[Power; INLINED_POWERS]> =
            SmallVec::with_capacity(self.len() + if add { other.len() } else { 0 });

        let mut i = 0;
        let mut j = 0;
        while i < self.powers.len() && j < other.powers.len() {
            let (a, b) = (self.powers[i], other.powers[j]);
            match a.var().cmp(&b.var()) {
                Ordering::Greater => {
                    merged.push(a);
                    i += 1;
                }
                Ordering::Less => {
                    if add {
                        merged.push(b);
                    }
                    j += 1;
                }
                Ordering::Equal => {
                    let mut p = a;
                    let delta = if add { b.exponent() } else { -b.exponent() };
                    if p.add_to_exponent(delta)? > 0 {
                        merged.push(p);
                    }
                    i += 1;
                    j += 1;
                }
            }
        }

        merged.extend_from_slice(&self.powers[i..]);
        if add {
            merged.extend_from_slice(&other.powers[j..]);
        }

        self.powers = merged;
        Ok(())
    }

    /// Check if every variable of `other` occurs in `self` with at least the same exponent.
    pub fn is_divisible_by(&self, other: &Monomial) -> bool {
        if other.is_constant() {
            return true;
        }

        if self.is_constant() || other.len() > self.len() {
            return false;
        }

        let mut i = 0;
        for q in &other.powers {
            while i < self.powers.len() && self.powers[i].var() > q.var() {
                i += 1;
            }

            if i == self.powers.len()
                || self.powers[i].var() != q.var()
                || self.powers[i].exponent() < q.exponent()
            {
                return false;
            }

            i += 1;
        }

        true
    }

    /// Replace `self` by the greatest common divisor of `self` and `other`.
    pub fn gcd(&mut self, other: &Monomial) {
        let mut common: SmallVec<[Power; INLINED_POWERS]> = SmallVec::new();

        let mut i = 0;
        let mut j = 0;
        while i < self.powers.len() && j < other.powers.len() {
            let (a, b) = (self.powers[i], other.powers[j]);
            match a.var().cmp(&b.var()) {
                Ordering::Greater => i += 1,
                Ordering::Less => j += 1,
                Ordering::Equal => {
                    let e = a.exponent().min(b.exponent());
                    if e > 0 {
                        common.push(Power::new_unchecked(a.var(), e));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }

        self.powers = common;
    }
}

/// A coefficient times a monomial.
///
/// Equality and ordering of terms only consider the domain and the monomial,
/// not the coefficient.
#[derive(Clone, Debug)]
pub struct Term<F: Ring> {
    pub coefficient: F::Element,
    monomial: Monomial,
    domain: Domain,
    field: F,
}

impl<F: Ring> Term<F> {
    /// Create a constant term.
    #[inline]
    pub fn new(field: &F, domain: Domain, coefficient: F::Element) -> Term<F> {
        Term {
            coefficient,
            monomial: Monomial::one(),
            domain,
            field: *field,
        }
    }

    /// Create a term from a coefficient and a list of `(variable, exponent)` pairs in any order.
    /// Zero exponents are skipped. Every variable has to belong to `domain`.
    pub fn from_powers(
        field: &F,
        domain: Domain,
        coefficient: F::Element,
        powers: impl IntoIterator<Item = (Variable, i32)>,
    ) -> ArithmeticResult<Term<F>> {
        let mut t = Term::new(field, domain, coefficient);
        for (var, exponent) in powers {
            ArithmeticError::check_domain(domain, var.domain())?;

            if exponent != 0 {
                t.monomial.add_power(Power::new(var, exponent)?)?;
            }
        }
        Ok(t)
    }

    #[inline]
    pub(crate) fn from_parts(
        field: &F,
        domain: Domain,
        coefficient: F::Element,
        monomial: Monomial,
    ) -> Term<F> {
        Term {
            coefficient,
            monomial,
            domain,
            field: *field,
        }
    }

    #[inline]
    pub(crate) fn into_parts(self) -> (Monomial, F::Element) {
        (self.monomial, self.coefficient)
    }

    #[inline]
    pub fn monomial(&self) -> &Monomial {
        &self.monomial
    }

    #[inline]
    pub fn powers(&self) -> &[Power] {
        self.monomial.powers()
    }

    #[inline]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    #[inline]
    pub fn field(&self) -> &F {
        &self.field
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.field.is_zero(&self.coefficient)
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        self.monomial.is_constant()
    }

    /// The total degree of the term.
    #[inline]
    pub fn degree(&self) -> i64 {
        self.monomial.degree()
    }

    /// Multiply the term by the power `p`. A power of another domain is rejected
    /// and leaves the term unchanged.
    pub fn add_power(&mut self, p: Power) -> ArithmeticResult<&mut Self> {
        if p.domain() != self.domain {
            warn!(
                "Rejecting power {} of domain {} in a term of domain {}",
                p,
                p.domain(),
                self.domain
            );
            return Err(ArithmeticError::DomainMismatch {
                expected: self.domain,
                found: p.domain(),
            });
        }

        self.monomial.add_power(p)?;
        Ok(self)
    }

    /// Combine the powers of `other` with those of `self`, adding exponents if `add` is true and
    /// subtracting them otherwise. See [`Monomial::merge`].
    pub fn merge_powers(&mut self, other: &Term<F>, add: bool) -> ArithmeticResult<&mut Self> {
        ArithmeticError::check_domain(self.domain, other.domain)?;
        self.monomial.merge(&other.monomial, add)?;
        Ok(self)
    }

    /// Check if the monomial of `other` divides the monomial of `self`.
    pub fn is_divisible_by(&self, other: &Term<F>) -> bool {
        self.domain == other.domain && self.monomial.is_divisible_by(&other.monomial)
    }

    /// The position of the power of `var` in the power list.
    #[inline]
    pub fn position_of(&self, var: Variable) -> Option<usize> {
        self.monomial.position_of(var).ok()
    }

    #[inline]
    pub fn power_of(&self, var: Variable) -> Option<&Power> {
        self.monomial.power_of(var)
    }

    #[inline]
    pub fn exponent_of(&self, var: Variable) -> i32 {
        self.monomial.exponent_of(var)
    }

    /// Add `delta` to the exponent of `var`, removing the power if its exponent drops to zero.
    pub fn change_power_exponent(&mut self, var: Variable, delta: i32) -> ArithmeticResult<&mut Self> {
        ArithmeticError::check_domain(self.domain, var.domain())?;
        self.monomial.change_exponent(var, delta)?;
        Ok(self)
    }

    /// Replace `self` by the greatest common divisor of the monomials of `self` and `other`,
    /// with coefficient one.
    pub fn gcd(&mut self, other: &Term<F>) -> ArithmeticResult<&mut Self> {
        ArithmeticError::check_domain(self.domain, other.domain)?;
        self.monomial.gcd(&other.monomial);
        self.coefficient = self.field.one();
        Ok(self)
    }

    /// Add the coefficient of `other`, which must have the same monomial.
    #[inline]
    pub fn merge(&mut self, other: &Term<F>) -> &mut Self {
        debug_assert_eq!(self.monomial, other.monomial);
        self.field
            .add_assign(&mut self.coefficient, &other.coefficient);
        self
    }

    pub fn mul(&mut self, other: &Term<F>) -> ArithmeticResult<&mut Self> {
        ArithmeticError::check_domain(self.domain, other.domain)?;
        self.monomial.merge(&other.monomial, true)?;
        self.field
            .mul_assign(&mut self.coefficient, &other.coefficient);
        Ok(self)
    }

    #[inline]
    pub fn mul_coeff(&mut self, c: &F::Element) -> &mut Self {
        self.field.mul_assign(&mut self.coefficient, c);
        self
    }

    /// Negate the coefficient.
    #[inline]
    pub fn invert(&mut self) -> &mut Self {
        self.coefficient = self.field.neg(&self.coefficient);
        self
    }
}

impl<F: Field> Term<F> {
    /// Divide by `other`. The monomial of `other` must divide the monomial of `self`
    /// and the coefficient of `other` may not be zero.
    pub fn divide(&mut self, other: &Term<F>) -> ArithmeticResult<&mut Self> {
        ArithmeticError::check_domain(self.domain, other.domain)?;

        if other.is_zero() || !self.monomial.is_divisible_by(&other.monomial) {
            return Err(ArithmeticError::DivisionPrecondition {
                dividend: self.to_string(),
                divisor: other.to_string(),
            });
        }

        self.monomial.merge(&other.monomial, false)?;
        self.field
            .div_assign(&mut self.coefficient, &other.coefficient);
        Ok(self)
    }
}

impl<F: Ring> PartialEq for Term<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.domain == other.domain && self.monomial == other.monomial
    }
}

impl<F: Ring> Eq for Term<F> {}

impl<F: Ring> PartialOrd for Term<F> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Ring> Ord for Term<F> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.domain
            .cmp(&other.domain)
            .then_with(|| self.monomial.cmp(&other.monomial))
    }
}

#[cfg(test)]
mod test {
    use std::cmp::Ordering;

    use crate::error::ArithmeticError;
    use crate::poly::power::Power;
    use crate::poly::{Domain, Variable};
    use crate::rings::rational::{Rational, RationalField};

    use super::{Monomial, Term};

    fn term(c: i64, powers: &[(Variable, i32)]) -> Term<RationalField> {
        Term::from_powers(
            &RationalField,
            Domain::Dependent,
            Rational::from(c),
            powers.iter().cloned(),
        )
        .unwrap()
    }

    fn vars(t: &Term<RationalField>) -> Vec<(Variable, i32)> {
        t.powers().iter().map(|p| (p.var(), p.exponent())).collect()
    }

    #[test]
    fn sorted_insertion() {
        let (x1, x2, x3, x4) = (Variable::x(1), Variable::x(2), Variable::x(3), Variable::x(4));
        let mut t = term(1, &[(x2, 1), (x4, 2), (x1, 1)]);
        assert_eq!(vars(&t), vec![(x4, 2), (x2, 1), (x1, 1)]);

        t.add_power(Power::new(x3, 4).unwrap()).unwrap();
        t.add_power(Power::new(x4, 1).unwrap()).unwrap();
        assert_eq!(vars(&t), vec![(x4, 3), (x3, 4), (x2, 1), (x1, 1)]);

        // a power of another family is rejected
        assert!(matches!(
            t.add_power(Power::new(Variable::u(1), 1).unwrap()),
            Err(ArithmeticError::DomainMismatch {
                expected: Domain::Dependent,
                found: Domain::Independent
            })
        ));
        assert!(t.add_power(Power::new(Variable::symbolic(0), 1).unwrap()).is_err());
        assert_eq!(t.powers().len(), 4);

        assert_eq!(t.position_of(x3), Some(1));
        assert_eq!(t.position_of(Variable::x(5)), None);
        assert_eq!(t.exponent_of(x3), 4);
        assert_eq!(t.exponent_of(Variable::x(7)), 0);
        assert_eq!(t.degree(), 9);
    }

    #[test]
    fn product() {
        // 3*x1^2*x3 times 2*x2*x3^2
        let mut a = term(3, &[(Variable::x(1), 2), (Variable::x(3), 1)]);
        let b = term(2, &[(Variable::x(2), 1), (Variable::x(3), 2)]);
        a.mul(&b).unwrap();

        assert_eq!(
            vars(&a),
            vec![(Variable::x(3), 3), (Variable::x(2), 1), (Variable::x(1), 2)]
        );
        assert_eq!(a.coefficient, Rational::from(6));
    }

    #[test]
    fn mixed_families() {
        let (u1, x1) = (Variable::u(1), Variable::x(1));
        assert!(matches!(
            Term::from_powers(&RationalField, Domain::Dependent, Rational::from(1), [(x1, 1), (u1, 1)]),
            Err(ArithmeticError::DomainMismatch {
                expected: Domain::Dependent,
                found: Domain::Independent
            })
        ));

        let mut a = term(2, &[(x1, 1)]);
        let u = Term::from_powers(&RationalField, Domain::Independent, Rational::from(3), [(u1, 2)])
            .unwrap();
        assert!(matches!(a.mul(&u), Err(ArithmeticError::DomainMismatch { .. })));
        assert!(a.gcd(&u).is_err());
        assert!(a.change_power_exponent(u1, 1).is_err());
        assert!(!a.is_divisible_by(&u));
        assert_eq!(vars(&a), vec![(x1, 1)]);
        assert_eq!(a.coefficient, Rational::from(2));
    }

    #[test]
    fn exponent_overflow() {
        let x1 = Variable::x(1);
        let mut a = term(1, &[(x1, 2_000_000_000)]);
        let b = a.clone();

        assert!(matches!(
            a.mul(&b),
            Err(ArithmeticError::ExponentOverflow(v)) if v == x1
        ));
        assert!(a.merge_powers(&b, true).is_err());
        assert!(a.add_power(Power::new(x1, 2_000_000_000).unwrap()).is_err());
        assert!(a.change_power_exponent(x1, i32::MAX).is_err());
        assert!(Term::from_powers(&RationalField, Domain::Dependent, Rational::from(1), [(x1, i32::MAX), (x1, 1)])
            .is_err());

        // the failed operations leave the term intact
        assert_eq!(vars(&a), vec![(x1, 2_000_000_000)]);
        assert_eq!(a.coefficient, Rational::from(1));
    }

    #[test]
    fn merge_subtract() {
        let mut a = term(1, &[(Variable::x(2), 3), (Variable::x(1), 1)]);
        let b = term(1, &[(Variable::x(5), 1), (Variable::x(2), 1), (Variable::x(1), 2)]);
        a.merge_powers(&b, false).unwrap();
        assert_eq!(vars(&a), vec![(Variable::x(2), 2)]);

        let c = Term::new(&RationalField, Domain::Symbolic, Rational::from(1));
        assert!(matches!(
            a.merge_powers(&c, true),
            Err(ArithmeticError::DomainMismatch { .. })
        ));
    }

    #[test]
    fn divisibility() {
        let t = term(1, &[(Variable::x(4), 2), (Variable::x(2), 1), (Variable::x(1), 4)]);
        assert!(t.is_divisible_by(&term(5, &[])));
        assert!(t.is_divisible_by(&term(1, &[(Variable::x(4), 2), (Variable::x(1), 1)])));
        assert!(!t.is_divisible_by(&term(1, &[(Variable::x(4), 3)])));
        assert!(!t.is_divisible_by(&term(1, &[(Variable::x(3), 1)])));
        assert!(!term(1, &[]).is_divisible_by(&term(1, &[(Variable::x(3), 1)])));
        assert!(!term(1, &[(Variable::x(3), 1)]).is_divisible_by(&term(
            1,
            &[(Variable::x(3), 1), (Variable::x(2), 1)]
        )));
    }

    #[test]
    fn division() {
        let mut t = term(6, &[(Variable::x(4), 2), (Variable::x(1), 1)]);
        t.divide(&term(4, &[(Variable::x(4), 2)])).unwrap();
        assert_eq!(vars(&t), vec![(Variable::x(1), 1)]);
        assert_eq!(t.coefficient, Rational::new(3, 2));

        assert!(matches!(
            t.divide(&term(1, &[(Variable::x(4), 1)])),
            Err(ArithmeticError::DivisionPrecondition { .. })
        ));
    }

    #[test]
    fn gcd() {
        let mut a = term(4, &[(Variable::x(4), 2), (Variable::x(3), 5), (Variable::x(1), 1)]);
        let b = term(6, &[(Variable::x(4), 3), (Variable::x(2), 1), (Variable::x(1), 2)]);
        let a_orig = a.clone();
        a.gcd(&b).unwrap();
        assert_eq!(vars(&a), vec![(Variable::x(4), 2), (Variable::x(1), 1)]);
        assert_eq!(a.coefficient, Rational::from(1));
        assert!(a_orig.is_divisible_by(&a) && b.is_divisible_by(&a));

        let mut c = term(1, &[(Variable::x(3), 1)]);
        c.gcd(&term(1, &[(Variable::x(2), 1)])).unwrap();
        assert!(c.is_constant());
    }

    #[test]
    fn change_exponent() {
        let mut t = term(1, &[(Variable::x(2), 2)]);
        t.change_power_exponent(Variable::x(2), -1).unwrap();
        assert_eq!(t.exponent_of(Variable::x(2)), 1);
        t.change_power_exponent(Variable::x(2), -1).unwrap();
        assert!(t.is_constant());
        t.change_power_exponent(Variable::x(3), 2).unwrap();
        assert_eq!(vars(&t), vec![(Variable::x(3), 2)]);
    }

    #[test]
    fn ordering() {
        let one = term(1, &[]);
        let x0 = term(1, &[(Variable::x(0), 3)]);
        let x1 = term(1, &[(Variable::x(1), 1)]);
        let x1_2 = term(1, &[(Variable::x(1), 2)]);
        let x2 = term(1, &[(Variable::x(2), 1)]);
        let x2x1 = term(1, &[(Variable::x(2), 1), (Variable::x(1), 1)]);

        let mut terms = vec![x2.clone(), one.clone(), x1_2.clone(), x0.clone(), x2x1.clone(), x1.clone()];
        terms.sort();
        assert_eq!(terms, vec![one.clone(), x0, x1, x1_2, x2, x2x1]);

        // the coefficient does not participate
        assert_eq!(term(2, &[(Variable::x(1), 1)]).cmp(&term(-7, &[(Variable::x(1), 1)])), Ordering::Equal);

        // the domain is compared first
        let u = Term::from_powers(&RationalField, Domain::Independent, Rational::from(1), [(Variable::u(9), 9)])
            .unwrap();
        assert!(u < one);
    }

    #[test]
    fn monomial_from_unsorted() {
        let m = Monomial::from_powers([
            Power::new(Variable::x(1), 1).unwrap(),
            Power::new(Variable::x(4), 2).unwrap(),
            Power::new(Variable::x(1), 2).unwrap(),
        ])
        .unwrap();
        assert_eq!(m.exponent_of(Variable::x(1)), 3);
        assert_eq!(m.leading_variable(), Some(Variable::x(4)));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn invalid_construction() {
        assert!(Term::from_powers(
            &RationalField,
            Domain::Dependent,
            Rational::from(1),
            [(Variable::symbolic(1), 1)]
        )
        .is_err());
        assert!(matches!(
            Term::from_powers(
                &RationalField,
                Domain::Dependent,
                Rational::from(1),
                [(Variable::x(1), -1)]
            ),
            Err(ArithmeticError::InvalidExponent { exponent: -1, .. })
        ));
    }
}
