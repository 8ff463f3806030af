use std::fmt::{Display, Error, Formatter};

use rand::Rng;
use rug::{integer::IsPrime, Complete, Integer};

use crate::printer::{PrintOptions, PrintState};

use super::{EuclideanDomain, FractionNormalization, Ring, RingError};

/// The integer ring.
pub const Z: IntegerRing = IntegerRing::new();

/// The ring of arbitrary-precision integers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct IntegerRing;

impl Default for IntegerRing {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegerRing {
    pub const fn new() -> IntegerRing {
        IntegerRing
    }

    /// Divide `a` by `b`, returning an error when the division is not exact.
    pub fn try_divexact(&self, a: &Integer, b: &Integer) -> Result<Integer, RingError> {
        if *b == 0 {
            return Err(RingError::DivisionByZero);
        }

        let (q, r) = <(Integer, Integer)>::from(a.div_rem_ref(b));
        if r == 0 {
            Ok(q)
        } else {
            Err(RingError::InexactDivision)
        }
    }

    pub fn is_probable_prime(&self, a: &Integer) -> bool {
        a.is_probably_prime(30) != IsPrime::No
    }
}

impl Display for IntegerRing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Z")
    }
}

impl Ring for IntegerRing {
    type Element = Integer;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        (a + b).complete()
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        (a - b).complete()
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        (a * b).complete()
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a -= b;
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a *= b;
    }

    #[inline(always)]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        // the incomplete product avoids a temporary allocation
        *a += b * c;
    }

    #[inline(always)]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a -= b * c;
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        (-a).complete()
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        Integer::new()
    }

    #[inline]
    fn one(&self) -> Self::Element {
        Integer::from(1)
    }

    #[inline]
    fn nth(&self, n: i64) -> Self::Element {
        Integer::from(n)
    }

    #[inline]
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        let e = u32::try_from(e).unwrap_or_else(|_| panic!("Exponent {} is too large", e));
        rug::ops::Pow::pow(b, e).complete()
    }

    #[inline]
    fn is_zero(a: &Self::Element) -> bool {
        *a == 0
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        *a == 1
    }

    fn characteristic(&self) -> Integer {
        Integer::new()
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        self.try_divexact(a, b).ok()
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let r = rng.gen_range(range.0..range.1);
        Integer::from(r)
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        _opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        if state.in_exp && element.cmp0() == std::cmp::Ordering::Less {
            write!(f, "({})", element)?;
            Ok(true)
        } else {
            write!(f, "{}", element)?;
            Ok(false)
        }
    }
}

impl EuclideanDomain for IntegerRing {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.quot_rem(a, b).1
    }

    /// Euclidean division with a non-negative remainder.
    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        if *b == 0 {
            panic!("{}", RingError::DivisionByZero);
        }

        <(Integer, Integer)>::from(a.div_rem_euc_ref(b))
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Integer::from(a.gcd_ref(b))
    }
}

impl FractionNormalization for IntegerRing {
    fn get_normalization_factor(&self, a: &Self::Element) -> Self::Element {
        if a.cmp0() == std::cmp::Ordering::Less {
            Integer::from(-1)
        } else {
            Integer::from(1)
        }
    }
}
