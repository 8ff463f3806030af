use std::fmt::{Display, Error, Formatter};

use rand::Rng;
use rug::Integer;

use crate::{
    printer::{PrintOptions, PrintState},
    utils,
};

use super::{EuclideanDomain, FractionNormalization, Ring, RingError};

/// The ring of machine words. Addition, subtraction and multiplication wrap,
/// so that the ring is `Z/2^64Z`. Division with remainder acts on the
/// unsigned representatives.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct WordRing;

impl WordRing {
    pub const fn new() -> WordRing {
        WordRing
    }
}

impl Display for WordRing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Z/2^64Z")
    }
}

impl Ring for WordRing {
    type Element = u64;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.wrapping_add(*b)
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.wrapping_sub(*b)
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.wrapping_mul(*b)
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = a.wrapping_add(*b);
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = a.wrapping_sub(*b);
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = a.wrapping_mul(*b);
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = a.wrapping_add(b.wrapping_mul(*c));
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = a.wrapping_sub(b.wrapping_mul(*c));
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        a.wrapping_neg()
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        0
    }

    #[inline]
    fn one(&self) -> Self::Element {
        1
    }

    #[inline]
    fn nth(&self, n: i64) -> Self::Element {
        n as u64
    }

    fn pow(&self, b: &Self::Element, mut e: u64) -> Self::Element {
        let mut b = *b;
        let mut r = 1u64;
        while e != 0 {
            if e & 1 == 1 {
                r = r.wrapping_mul(b);
            }
            b = b.wrapping_mul(b);
            e >>= 1;
        }
        r
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
        Integer::from(1) << 64u32
    }

    /// Only odd divisors are accepted. An even divisor `b` is a zero divisor, so
    /// `b * q = a` has either no solution or several (`q` and `q + 2^63`).
    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        utils::inv_mod_word(*b).map(|inv| a.wrapping_mul(inv))
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        rng.gen_range(range.0..range.1) as u64
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        _opts: &PrintOptions,
        _state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        write!(f, "{}", element)?;
        Ok(false)
    }
}

impl EuclideanDomain for WordRing {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if *b == 0 {
            panic!("{}", RingError::DivisionByZero);
        }
        a % b
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        if *b == 0 {
            panic!("{}", RingError::DivisionByZero);
        }
        (a / b, a % b)
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        utils::gcd_unsigned(*a, *b)
    }
}

impl FractionNormalization for WordRing {
    fn get_normalization_factor(&self, _a: &Self::Element) -> Self::Element {
        1
    }
}
