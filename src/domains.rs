//! Defines core algebraic traits and the ring descriptors.
//!
//! The core trait is [Ring], which has two binary operations, addition and multiplication.
//! Each ring has an associated element type, that should not be confused with the ring type itself.
//! For example:
//! - The ring of integers [Z](constant@integer::Z) has elements of type [Integer](rug::Integer).
//! - The ring of machine words [WordRing](word::WordRing) has elements of type [u64].
//! - The polynomial ring [PolynomialRing](crate::poly::dense::PolynomialRing) has elements of type [Polynomial](crate::poly::dense::Polynomial).
//!
//! Rings are composed at runtime through the closed sum type [Domain](generic::Domain), whose
//! elements are of type [Element](generic::Element). A polynomial ring over fractions of polynomials
//! over the integers is built bottom-up:
//!
//! ```
//! use ringtower::domains::generic::Domain;
//!
//! let zx = Domain::polynomial(Domain::integer(), "x");
//! let frac = Domain::fraction(zx);
//! let ring = Domain::polynomial(frac, "y");
//! assert_eq!(ring.to_string(), "Frac(Z[x])[y]");
//! ```
//!
//! In general, the ring elements do not implement operations such as addition or multiplication,
//! but rather the ring itself does. Elements carry no reference to their ring.
//!
//! An extension of the ring trait is the [`EuclideanDomain`] trait, which adds the ability to compute remainders, quotients, and gcds.
//! Another extension is the [`Field`] trait, which adds the ability to divide and invert elements.
pub mod complex;
pub mod fraction;
pub mod generic;
pub mod integer;
pub mod modular;
pub mod word;

use std::fmt::{Debug, Display, Error, Formatter};
use std::hash::Hash;

use rug::Integer;

use crate::printer::{PrintOptions, PrintState};

/// A ring is a set with two binary operations, addition and multiplication.
/// Examples of rings include the integers, residues modulo `m`, and polynomials.
///
/// Each ring has an element type, that should not be confused with the ring type itself.
/// Elements of a composite ring are interpreted through the ring they belong to, which
/// must be passed to every operation.
pub trait Ring: Clone + PartialEq + Eq + Hash + Debug + Display {
    /// The element of a ring. For example, the elements of the ring of integers [Z](constant@integer::Z), `Z::Element`, are [Integer].
    type Element: Clone + PartialEq + Eq + Hash + Debug;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element);
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element);
    fn neg(&self, a: &Self::Element) -> Self::Element;
    fn zero(&self) -> Self::Element;
    fn one(&self) -> Self::Element;
    /// Return the nth element by computing `n * 1`.
    fn nth(&self, n: i64) -> Self::Element;
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element;
    fn is_zero(a: &Self::Element) -> bool;
    fn is_one(&self, a: &Self::Element) -> bool;
    /// Test if `a` and `b` represent the same ring element. This differs from `==`
    /// for representations that are not unique, such as fractions over polynomials
    /// that only have their content removed.
    fn equal(&self, a: &Self::Element, b: &Self::Element) -> bool {
        a == b
    }
    fn characteristic(&self) -> Integer;

    /// Return the result of dividing `a` by `b`, if possible and if the result is unique.
    /// For example, in [Z](constant@integer::Z), `4/2` is possible but `3/2` is not.
    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element>;

    /// Return the multiplicative inverse of `a`, if it exists.
    fn try_inv(&self, a: &Self::Element) -> Option<Self::Element> {
        self.try_div(&self.one(), a)
    }

    /// Sample a random element, used for randomized testing. Leaf coefficients are taken from `range`.
    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element;

    /// Format a ring element with custom [PrintOptions] and [PrintState].
    /// Returns `true` if the output was wrapped in parentheses.
    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error>;

    /// Create a new printer for the given ring element that
    /// can be used in a [format!] macro.
    fn printer<'a>(&'a self, element: &'a Self::Element) -> RingPrinter<'a, Self> {
        RingPrinter::new(self, element)
    }
}

/// A Euclidean domain is a ring that supports division with remainder, quotients, and gcds.
pub trait EuclideanDomain: Ring {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element);
    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
}

/// A field is a ring that supports division and inversion.
pub trait Field: EuclideanDomain {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn inv(&self, a: &Self::Element) -> Self::Element;
}

/// Rings that can bring an element into a canonical form by multiplying with a unit,
/// for example making an integer positive or a polynomial over a field monic.
pub trait FractionNormalization: Ring {
    /// Get the unit `u` such that `u * a` is the canonical associate of `a`.
    fn get_normalization_factor(&self, a: &Self::Element) -> Self::Element;
}

/// Errors raised by ring operations. Most operations treat these as contract violations
/// and panic with the error as message, while the `try_` variants return them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    Unsupported {
        ring: String,
        operation: &'static str,
    },
    DivisionByZero,
    InexactDivision,
    NotInvertible,
    ElementMismatch {
        expected: &'static str,
    },
}

impl Display for RingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RingError::Unsupported { ring, operation } => {
                write!(f, "Operation {} is not supported over {}", operation, ring)
            }
            RingError::DivisionByZero => write!(f, "Cannot divide by 0"),
            RingError::InexactDivision => write!(f, "Division is not exact"),
            RingError::NotInvertible => write!(f, "Element is not invertible"),
            RingError::ElementMismatch { expected } => {
                write!(f, "Element does not belong to the ring: expected {}", expected)
            }
        }
    }
}

impl std::error::Error for RingError {}

/// Provides an interface for printing elements of a ring with optional customization,
/// suitable as an argument to [format!]. Internally, it will call [Ring::format].
pub struct RingPrinter<'a, R: Ring> {
    pub ring: &'a R,
    pub element: &'a R::Element,
    pub opts: PrintOptions,
    pub state: PrintState,
}

impl<'a, R: Ring> RingPrinter<'a, R> {
    pub fn new(ring: &'a R, element: &'a R::Element) -> RingPrinter<'a, R> {
        RingPrinter {
            ring,
            element,
            opts: PrintOptions::default(),
            state: PrintState::default(),
        }
    }
}

impl<'a, R: Ring> Display for RingPrinter<'a, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let opts = self.opts.update_with_fmt(f);
        let state = self.state.update_with_fmt(f);
        self.ring.format(self.element, &opts, state, f).map(|_| ())
    }
}

/// Format an element to a string.
pub(crate) fn format_string<R: Ring>(
    ring: &R,
    e: &R::Element,
    opts: &PrintOptions,
    state: PrintState,
) -> String {
    let mut s = String::new();
    // writing to a string cannot fail
    let _ = ring.format(e, opts, state, &mut s);
    s
}
