use std::{
    fmt::{Display, Error, Formatter},
    sync::Arc,
};

use rand::Rng;
use rug::{ops::RemRounding, Complete, Integer};

use crate::{
    printer::{PrintOptions, PrintState},
    utils,
};

use super::{
    generic::{Domain, Element},
    integer::Z,
    EuclideanDomain, Field, FractionNormalization, Ring, RingError,
};

/// The modulus of a [ModularRing], stored in the representation of the parent ring.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Modulus {
    Word(u64),
    Integer(Integer),
}

/// The quotient ring `R/mR` of the integers or the machine words.
/// Elements reuse the representation of the parent ring and are kept in `[0, m)`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ModularRing {
    parent: Arc<Domain>,
    modulus: Modulus,
    is_prime: bool,
}

impl ModularRing {
    /// Create the ring of residues modulo a machine word `m >= 2`.
    pub fn new_word(m: u64) -> ModularRing {
        if m < 2 {
            panic!("The modulus must be at least 2, got {}", m);
        }

        ModularRing {
            parent: Arc::new(Domain::word()),
            modulus: Modulus::Word(m),
            is_prime: Z.is_probable_prime(&Integer::from(m)),
        }
    }

    /// Create the ring of residues modulo an integer `m >= 2`.
    pub fn new_integer(m: Integer) -> ModularRing {
        if m < 2 {
            panic!("The modulus must be at least 2, got {}", m);
        }

        ModularRing {
            parent: Arc::new(Domain::integer()),
            is_prime: Z.is_probable_prime(&m),
            modulus: Modulus::Integer(m),
        }
    }

    pub fn parent(&self) -> &Domain {
        &self.parent
    }

    pub fn modulus(&self) -> &Modulus {
        &self.modulus
    }

    /// The modulus as an element of the parent ring.
    pub fn modulus_element(&self) -> Element {
        match &self.modulus {
            Modulus::Word(m) => Element::Word(*m),
            Modulus::Integer(m) => Element::Integer(m.clone()),
        }
    }

    pub fn modulus_integer(&self) -> Integer {
        match &self.modulus {
            Modulus::Word(m) => Integer::from(*m),
            Modulus::Integer(m) => m.clone(),
        }
    }

    /// Return the number of bits of the modulus.
    pub fn modulus_bits(&self) -> u32 {
        match &self.modulus {
            Modulus::Word(m) => utils::bits(*m),
            Modulus::Integer(m) => m.significant_bits(),
        }
    }

    /// Returns `true` if the modulus is prime, so that the ring is a field.
    pub fn is_field(&self) -> bool {
        self.is_prime
    }

    /// Reduce an element of the parent ring into `[0, m)`.
    pub fn reduce(&self, a: &Element) -> Element {
        match (&self.modulus, a) {
            (Modulus::Word(m), Element::Word(a)) => Element::Word(a % m),
            (Modulus::Integer(m), Element::Integer(a)) => Element::Integer(Integer::from(a.rem_euc(m))),
            (Modulus::Word(m), Element::Integer(a)) => {
                let r = Integer::from(a.rem_euc(&Integer::from(*m)));
                Element::Word(r.to_u64().unwrap_or(0))
            }
            (Modulus::Integer(m), Element::Word(a)) => {
                Element::Integer(Integer::from(*a).rem_euc(m))
            }
            _ => panic!("{}", RingError::ElementMismatch { expected: "residue" }),
        }
    }

    /// Convert an integer to a residue.
    pub fn to_element(&self, a: &Integer) -> Element {
        match &self.modulus {
            Modulus::Word(m) => {
                let r = Integer::from(a.rem_euc(&Integer::from(*m)));
                Element::Word(r.to_u64().unwrap_or(0))
            }
            Modulus::Integer(m) => Element::Integer(Integer::from(a.rem_euc(m))),
        }
    }

    /// The residue as a non-negative integer.
    pub fn to_integer(&self, a: &Element) -> Integer {
        match a {
            Element::Word(w) => Integer::from(*w),
            Element::Integer(i) => i.clone(),
            _ => panic!("{}", RingError::ElementMismatch { expected: "residue" }),
        }
    }

    /// Compute the inverse of `a`, failing when `a` is not coprime to the modulus.
    pub fn try_inverse(&self, a: &Element) -> Result<Element, RingError> {
        match &self.modulus {
            Modulus::Word(m) => utils::inv_mod(*a.as_word(), *m)
                .map(Element::Word)
                .ok_or(RingError::NotInvertible),
            Modulus::Integer(m) => a
                .as_integer()
                .clone()
                .invert(m)
                .map(Element::Integer)
                .map_err(|_| RingError::NotInvertible),
        }
    }
}

impl Display for ModularRing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.modulus {
            Modulus::Word(m) => write!(f, "Z/{}Z", m),
            Modulus::Integer(m) => write!(f, "Z/{}Z", m),
        }
    }
}

impl Ring for ModularRing {
    type Element = Element;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        match &self.modulus {
            Modulus::Word(m) => Element::Word(utils::add_mod(*a.as_word(), *b.as_word(), *m)),
            Modulus::Integer(m) => {
                let mut r = (a.as_integer() + b.as_integer()).complete();
                if r >= *m {
                    r -= m;
                }
                Element::Integer(r)
            }
        }
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        match &self.modulus {
            Modulus::Word(m) => Element::Word(utils::sub_mod(*a.as_word(), *b.as_word(), *m)),
            Modulus::Integer(m) => {
                let mut r = (a.as_integer() - b.as_integer()).complete();
                if r < 0 {
                    r += m;
                }
                Element::Integer(r)
            }
        }
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        match &self.modulus {
            Modulus::Word(m) => Element::Word(utils::mul_mod(*a.as_word(), *b.as_word(), *m)),
            Modulus::Integer(m) => {
                let r = (a.as_integer() * b.as_integer()).complete();
                Element::Integer(r.rem_euc(m))
            }
        }
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        let p = self.mul(b, c);
        self.add_assign(a, &p);
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        let p = self.mul(b, c);
        self.sub_assign(a, &p);
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        self.sub(&self.zero(), a)
    }

    fn zero(&self) -> Self::Element {
        match &self.modulus {
            Modulus::Word(_) => Element::Word(0),
            Modulus::Integer(_) => Element::Integer(Integer::new()),
        }
    }

    fn one(&self) -> Self::Element {
        match &self.modulus {
            Modulus::Word(_) => Element::Word(1),
            Modulus::Integer(_) => Element::Integer(Integer::from(1)),
        }
    }

    fn nth(&self, n: i64) -> Self::Element {
        self.to_element(&Integer::from(n))
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        match &self.modulus {
            Modulus::Word(m) => Element::Word(utils::pow_mod(*b.as_word(), e, *m)),
            Modulus::Integer(m) => {
                let r = b
                    .as_integer()
                    .clone()
                    .pow_mod(&Integer::from(e), m)
                    .unwrap_or_else(|_| unreachable!("non-negative exponents always have a power"));
                Element::Integer(r)
            }
        }
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        match a {
            Element::Word(w) => *w == 1,
            Element::Integer(i) => *i == 1,
            _ => false,
        }
    }

    fn characteristic(&self) -> Integer {
        self.modulus_integer()
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        if b.is_zero() {
            return None;
        }

        let inv = self.try_inverse(b).ok()?;
        Some(self.mul(a, &inv))
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let r = rng.gen_range(range.0..range.1);
        self.nth(r)
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        _opts: &PrintOptions,
        _state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        match element {
            Element::Word(w) => write!(f, "{}", w)?,
            Element::Integer(i) => write!(f, "{}", i)?,
            _ => panic!("{}", RingError::ElementMismatch { expected: "residue" }),
        }
        Ok(false)
    }
}

impl EuclideanDomain for ModularRing {
    fn rem(&self, _a: &Self::Element, b: &Self::Element) -> Self::Element {
        if b.is_zero() {
            panic!("{}", RingError::DivisionByZero);
        }
        self.zero()
    }

    /// Divide by multiplying with the inverse of `b`, which leaves no remainder.
    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (self.div(a, b), self.zero())
    }

    /// The gcd of the representatives and the modulus, or zero when both are zero.
    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        match &self.modulus {
            Modulus::Word(m) => {
                let g = utils::gcd_unsigned(utils::gcd_unsigned(*a.as_word(), *b.as_word()), *m);
                Element::Word(if g == *m { 0 } else { g })
            }
            Modulus::Integer(m) => {
                let g = Integer::from(a.as_integer().gcd_ref(b.as_integer()));
                let g = g.gcd(m);
                Element::Integer(if g == *m { Integer::new() } else { g })
            }
        }
    }
}

impl Field for ModularRing {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if b.is_zero() {
            panic!("{}", RingError::DivisionByZero);
        }
        let inv = self.inv(b);
        self.mul(a, &inv)
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.div(a, b);
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        if a.is_zero() {
            panic!("{}", RingError::DivisionByZero);
        }
        self.try_inverse(a)
            .unwrap_or_else(|e| panic!("{}: {} in {}", e, self.printer(a), self))
    }
}

impl FractionNormalization for ModularRing {
    fn get_normalization_factor(&self, a: &Self::Element) -> Self::Element {
        if self.is_prime && !a.is_zero() {
            self.inv(a)
        } else {
            self.one()
        }
    }
}

#[cfg(test)]
mod test {
    use rug::Integer;

    use crate::domains::{
        generic::Element, EuclideanDomain, Field, FractionNormalization, Ring, RingError,
    };

    use super::ModularRing;

    #[test]
    fn word_residues() {
        let r = ModularRing::new_word(7);
        assert!(r.is_field());
        assert_eq!(r.add(&Element::Word(5), &Element::Word(4)), Element::Word(2));
        assert_eq!(r.sub(&Element::Word(2), &Element::Word(5)), Element::Word(4));
        assert_eq!(r.nth(-1), Element::Word(6));
        assert_eq!(r.inv(&Element::Word(3)), Element::Word(5));
        assert_eq!(
            r.quot_rem(&Element::Word(1), &Element::Word(3)),
            (Element::Word(5), Element::Word(0))
        );
        assert_eq!(r.get_normalization_factor(&Element::Word(3)), Element::Word(5));
        assert_eq!(r.to_string(), "Z/7Z");
    }

    #[test]
    fn integer_residues() {
        let m = Integer::from(1) << 70u32;
        let r = ModularRing::new_integer(m.clone() + 1u32);
        assert!(!r.is_field());

        let a = r.nth(-1);
        assert_eq!(a, Element::Integer(m.clone()));
        assert_eq!(r.mul(&a, &a), r.one());
        assert_eq!(r.pow(&a, 3), a);
    }

    #[test]
    fn non_invertible() {
        let r = ModularRing::new_word(12);
        assert!(!r.is_field());
        assert_eq!(
            r.try_inverse(&Element::Word(4)),
            Err(RingError::NotInvertible)
        );
        assert_eq!(r.try_div(&Element::Word(8), &Element::Word(4)), None);
        assert_eq!(r.gcd(&Element::Word(8), &Element::Word(6)), Element::Word(2));
        assert_eq!(r.gcd(&Element::Word(0), &Element::Word(0)), Element::Word(0));
    }

    #[test]
    #[should_panic(expected = "not invertible")]
    fn inverse_panics() {
        let r = ModularRing::new_word(12);
        r.inv(&Element::Word(6));
    }
}
