//! Ringtower is a library for exact arithmetic over rings that are composed at runtime.
//!
//! A ring is built bottom-up from the integers, machine words, residues, fractions,
//! polynomials, matrices and complex extensions, and every generic operation works over
//! any such composition. For example, the product `(x + 1/2)(x - 1/2)` over
//! polynomials with rational coefficients:
//!
//! ```
//! use ringtower::domains::{generic::Domain, Field, Ring};
//!
//! let q = Domain::fraction(Domain::integer());
//! let qx = Domain::polynomial(q.clone(), "x");
//! let r = qx.as_polynomial_ring();
//!
//! let half = q.div(&q.one(), &q.nth(2));
//! let a = r.from_coefficients(vec![half.clone(), q.one()]);
//! let b = r.from_coefficients(vec![q.neg(&half), q.one()]);
//!
//! let p = r.mul(&a, &b);
//! assert_eq!(qx.printer(&p.into()).to_string(), "x^2-1/4");
//! ```
//!
//! Matrices over any ring support fraction-free linear algebra, where solutions
//! are returned with a shared denominator instead of as fractions.

pub mod domains;
pub mod poly;
pub mod printer;
pub mod tensors;
pub mod utils;
