//! Errors reported by the arithmetic core.

use std::time::Duration;

use thiserror::Error;

use crate::poly::{Domain, Variable};

/// Errors that can occur during polynomial arithmetic.
///
/// All of them leave the operands in a valid state: a failed operation is
/// never reported as a (zero) polynomial.
#[derive(Error, Debug)]
pub enum ArithmeticError {
    #[error("Missing operand: {0}")]
    MissingOperand(&'static str),

    #[error("Domain mismatch: expected a {expected} operand, found a {found} operand")]
    DomainMismatch { expected: Domain, found: Domain },

    #[error("Invalid thread count {0}: at least one worker is required")]
    InvalidThreadCount(usize),

    #[error("Concurrent multiplication did not finish within {0:?}")]
    ConcurrencyTimeout(Duration),

    #[error("Term {dividend} is not divisible by {divisor}")]
    DivisionPrecondition { dividend: String, divisor: String },

    #[error("Invalid exponent {exponent} of {var}: exponents must be positive")]
    InvalidExponent { var: Variable, exponent: i32 },

    #[error("Exponent of {0} overflows")]
    ExponentOverflow(Variable),

    #[error("Could not build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Worker {0} panicked")]
    WorkerFailed(usize),

    #[error("The workers stopped without reporting all results")]
    WorkersDisconnected,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed input: {0}")]
    Malformed(String),
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

impl ArithmeticError {
    #[inline]
    pub(crate) fn check_domain(expected: Domain, found: Domain) -> ArithmeticResult<()> {
        if expected == found {
            Ok(())
        } else {
            Err(ArithmeticError::DomainMismatch { expected, found })
        }
    }
}
