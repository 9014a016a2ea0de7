//! Sparse multivariate polynomials over the variables of a geometry problem.
//!
//! A [`Polynomial`](polynomial::Polynomial) is a canonical sum of [`Term`](term::Term)s.
//! Each term is a coefficient times a [`Monomial`](term::Monomial), which is
//! a list of [`Power`](power::Power)s sorted by descending variable.

pub mod export;
pub mod parallel;
pub mod polynomial;
pub mod power;
pub mod term;

use std::fmt::Display;

/// The number of powers that are stored inline in a monomial.
pub const INLINED_POWERS: usize = 6;

/// The family of a variable.
///
/// Independent variables (`u`) are the free parameters of a construction,
/// dependent variables (`x`) are constrained by the hypotheses and symbolic
/// variables are coordinates of named points before instantiation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VarKind {
    Independent,
    Dependent,
    Symbolic,
}

impl VarKind {
    /// The domain that terms with variables of this kind belong to.
    #[inline]
    pub fn domain(&self) -> Domain {
        match self {
            VarKind::Independent => Domain::Independent,
            VarKind::Dependent => Domain::Dependent,
            VarKind::Symbolic => Domain::Symbolic,
        }
    }

    pub(crate) fn to_u8(self) -> u8 {
        match self {
            VarKind::Independent => 0,
            VarKind::Dependent => 1,
            VarKind::Symbolic => 2,
        }
    }

    pub(crate) fn from_u8(tag: u8) -> Option<VarKind> {
        match tag {
            0 => Some(VarKind::Independent),
            1 => Some(VarKind::Dependent),
            2 => Some(VarKind::Symbolic),
            _ => None,
        }
    }
}

/// A variable, ordered first by its kind and then by its index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    kind: VarKind,
    index: i64,
}

impl Variable {
    #[inline]
    pub const fn new(kind: VarKind, index: i64) -> Variable {
        Variable { kind, index }
    }

    /// The independent variable `u_index`.
    #[inline]
    pub const fn u(index: i64) -> Variable {
        Variable::new(VarKind::Independent, index)
    }

    /// The dependent variable `x_index`.
    #[inline]
    pub const fn x(index: i64) -> Variable {
        Variable::new(VarKind::Dependent, index)
    }

    /// A symbolic variable. Use a [`VariableRegistry`](crate::state::VariableRegistry)
    /// to obtain the variable of a point coordinate.
    #[inline]
    pub const fn symbolic(index: i64) -> Variable {
        Variable::new(VarKind::Symbolic, index)
    }

    #[inline]
    pub fn kind(&self) -> VarKind {
        self.kind
    }

    #[inline]
    pub fn index(&self) -> i64 {
        self.index
    }

    #[inline]
    pub fn domain(&self) -> Domain {
        self.kind.domain()
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            VarKind::Independent => write!(f, "u{}", self.index),
            VarKind::Dependent => write!(f, "x{}", self.index),
            VarKind::Symbolic => write!(f, "s{}", self.index),
        }
    }
}

/// The domain of a term or polynomial: the family of all of its variables.
/// Operands of different domains can not be combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    Independent,
    Dependent,
    Symbolic,
}

impl Domain {
    pub(crate) fn to_u8(self) -> u8 {
        match self {
            Domain::Independent => 0,
            Domain::Dependent => 1,
            Domain::Symbolic => 2,
        }
    }

    pub(crate) fn from_u8(tag: u8) -> Option<Domain> {
        match tag {
            0 => Some(Domain::Independent),
            1 => Some(Domain::Dependent),
            2 => Some(Domain::Symbolic),
            _ => None,
        }
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::Independent => f.write_str("independent"),
            Domain::Dependent => f.write_str("dependent"),
            Domain::Symbolic => f.write_str("symbolic"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Domain, VarKind, Variable};

    #[test]
    fn variable_order() {
        assert!(Variable::x(1) > Variable::u(100));
        assert!(Variable::x(3) > Variable::x(2));
        assert!(Variable::symbolic(0) > Variable::x(7));
        assert_eq!(Variable::u(4).domain(), Domain::Independent);
        assert_eq!(Variable::x(4).domain(), Domain::Dependent);
        assert_eq!(Variable::symbolic(4).domain(), Domain::Symbolic);
        assert_eq!(Domain::from_u8(Domain::Dependent.to_u8()), Some(Domain::Dependent));
        assert_eq!(VarKind::from_u8(VarKind::Dependent.to_u8()), Some(VarKind::Dependent));
        assert_eq!(format!("{} {}", Variable::u(2), Variable::x(5)), "u2 x5");
    }
}
