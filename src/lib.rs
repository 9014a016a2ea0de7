//! Geoprove is the arithmetic core of an algebraic geometry theorem prover.
//!
//! It provides exact sparse multivariate polynomials over the independent (`u`),
//! dependent (`x`) or symbolic variables of a geometric construction, with
//! rational or floating point coefficients. Each polynomial belongs to one of these
//! three domains and only combines with polynomials of the same domain. Every polynomial is kept in a canonical
//! form: terms are sorted by a monomial order and no two terms share a monomial,
//! so that structurally equal polynomials are algebraically equal.
//!
//! For example:
//!
//! ```
//! use geoprove::poly::{polynomial::Polynomial, term::Term, Domain, Variable};
//! use geoprove::rings::rational::{Rational, RationalField};
//!
//! let (x1, x2) = (Variable::x(1), Variable::x(2));
//! let field = RationalField::new();
//! let t = |c: i64, powers: &[(Variable, i32)]| {
//!     Term::from_powers(&field, Domain::Dependent, Rational::from(c), powers.iter().cloned())
//!         .unwrap()
//! };
//!
//! // reduce x2^2 - x1 by x2 - x1 with respect to x2
//! let f = Polynomial::from_terms(&field, Domain::Dependent, [t(1, &[(x2, 2)]), t(-1, &[(x1, 1)])])
//!     .unwrap();
//! let g = Polynomial::from_terms(&field, Domain::Dependent, [t(1, &[(x2, 1)]), t(-1, &[(x1, 1)])])
//!     .unwrap();
//!
//! assert_eq!(f.pseudo_remainder(&g, x2).unwrap().to_string(), "x1^2 - x1");
//!
//! // independent and dependent variables do not mix
//! let u = Term::from_powers(&field, Domain::Independent, Rational::from(1), [(Variable::u(1), 1)])
//!     .unwrap();
//! assert!(f.clone().add_term(u).is_err());
//! ```
//!
//! Large products can be computed with several workers, see
//! [`Polynomial::multiply`](poly::polynomial::Polynomial::multiply) and [`Settings`](settings::Settings).
//! Diagnostics are emitted through [`tracing`].

pub mod error;
pub mod poly;
pub mod printer;
pub mod rings;
pub mod settings;
pub mod state;
pub mod utils;
