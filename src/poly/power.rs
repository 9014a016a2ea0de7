use std::fmt::Display;

use crate::error::{ArithmeticError, ArithmeticResult};

use super::{Domain, Variable};

/// A variable raised to a positive exponent.
///
/// Powers are ordered by their variable first and by their exponent second,
/// so that sorting by descending power sorts by descending variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Power {
    var: Variable,
    exponent: i32,
}

impl Power {
    /// Create `var^exponent`. Fails if the exponent is not positive.
    #[inline]
    pub fn new(var: Variable, exponent: i32) -> ArithmeticResult<Power> {
        if exponent <= 0 {
            return Err(ArithmeticError::InvalidExponent { var, exponent });
        }

        Ok(Power { var, exponent })
    }

    #[inline]
    pub(crate) fn new_unchecked(var: Variable, exponent: i32) -> Power {
        debug_assert!(exponent > 0, "Power {}^{} is not positive", var, exponent);
        Power { var, exponent }
    }

    #[inline]
    pub fn var(&self) -> Variable {
        self.var
    }

    #[inline]
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    #[inline]
    pub fn domain(&self) -> Domain {
        self.var.domain()
    }

    /// Add `delta` to the exponent and return the new exponent. On overflow the
    /// power is not changed. The owner has to remove the power if the result is not positive.
    #[inline]
    pub fn add_to_exponent(&mut self, delta: i32) -> ArithmeticResult<i32> {
        self.exponent = self
            .exponent
            .checked_add(delta)
            .ok_or(ArithmeticError::ExponentOverflow(self.var))?;
        Ok(self.exponent)
    }
}

impl Display for Power {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.exponent == 1 {
            write!(f, "{}", self.var)
        } else {
            write!(f, "{}^{}", self.var, self.exponent)
        }
    }
}
