//! Matrices over any [Domain](crate::domains::generic::Domain) and fraction-free linear algebra.
//!
//! No algorithm in this module assumes that the entries form a field: elimination uses
//! Bareiss's fraction-free scheme, where every intermediate division is exact.
//! Results that would require fractions are returned as a matrix together with a
//! single shared denominator.

pub mod linear_system;
pub mod matrix;
