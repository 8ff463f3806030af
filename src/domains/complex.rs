use std::{
    fmt::{Display, Error, Formatter},
    sync::Arc,
};

use rug::{ops::DivRounding, Integer};

use crate::printer::{write_sum, PrintOptions, PrintState};

use super::{
    format_string,
    generic::{Domain, Element},
    EuclideanDomain, Field, FractionNormalization, Ring, RingError,
};

/// The extension `R[i]` with `i^2 = -1`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ComplexRing {
    ring: Arc<Domain>,
}

/// A complex number `re + im * i`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Complex {
    pub re: Element,
    pub im: Element,
}

impl Complex {
    pub fn new(re: Element, im: Element) -> Complex {
        Complex { re, im }
    }
}

impl ComplexRing {
    pub fn new(ring: Arc<Domain>) -> ComplexRing {
        ComplexRing { ring }
    }

    pub fn parent(&self) -> &Domain {
        &self.ring
    }

    /// Returns `true` if the extension is a field, which requires the parent to be a
    /// field in which `-1` is not a square.
    pub fn is_field(&self) -> bool {
        match &*self.ring {
            Domain::Fraction(f) => matches!(f.base(), Domain::Integer(_)),
            Domain::Modular(m) => {
                m.is_field() && m.modulus_integer().mod_u(4) == 3
            }
            _ => false,
        }
    }

    pub fn conjugate(&self, a: &Complex) -> Complex {
        Complex::new(a.re.clone(), self.ring.neg(&a.im))
    }

    /// The norm `re^2 + im^2`.
    pub fn norm(&self, a: &Complex) -> Element {
        let mut n = self.ring.mul(&a.re, &a.re);
        self.ring.add_mul_assign(&mut n, &a.im, &a.im);
        n
    }

    /// Division with rounding to the nearest Gaussian integer.
    fn quot_rem_gaussian(&self, a: &Complex, b: &Complex) -> (Complex, Complex) {
        let n = self.norm(b).into_integer();
        let num = self.mul(a, &self.conjugate(b));

        let round = |x: &Element| -> Element {
            // floor((2x + n) / (2n))
            let t = Integer::from(x.as_integer() * 2) + &n;
            let d = Integer::from(&n * 2);
            Element::Integer(t.div_floor(&d))
        };

        let q = Complex::new(round(&num.re), round(&num.im));
        let r = self.sub(a, &self.mul(&q, b));
        (q, r)
    }
}

impl Display for ComplexRing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[i]", self.ring)
    }
}

impl Ring for ComplexRing {
    type Element = Complex;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Complex::new(self.ring.add(&a.re, &b.re), self.ring.add(&a.im, &b.im))
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Complex::new(self.ring.sub(&a.re, &b.re), self.ring.sub(&a.im, &b.im))
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let r = &self.ring;
        let mut re = r.mul(&a.re, &b.re);
        r.sub_mul_assign(&mut re, &a.im, &b.im);
        let mut im = r.mul(&a.re, &b.im);
        r.add_mul_assign(&mut im, &a.im, &b.re);
        Complex::new(re, im)
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        self.ring.add_assign(&mut a.re, &b.re);
        self.ring.add_assign(&mut a.im, &b.im);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        self.ring.sub_assign(&mut a.re, &b.re);
        self.ring.sub_assign(&mut a.im, &b.im);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        self.add_assign(a, &self.mul(b, c));
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        self.sub_assign(a, &self.mul(b, c));
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        Complex::new(self.ring.neg(&a.re), self.ring.neg(&a.im))
    }

    fn zero(&self) -> Self::Element {
        Complex::new(self.ring.zero(), self.ring.zero())
    }

    fn one(&self) -> Self::Element {
        Complex::new(self.ring.one(), self.ring.zero())
    }

    fn nth(&self, n: i64) -> Self::Element {
        Complex::new(self.ring.nth(n), self.ring.zero())
    }

    fn pow(&self, b: &Self::Element, mut e: u64) -> Self::Element {
        let mut base = b.clone();
        let mut r = self.one();
        while e != 0 {
            if e & 1 == 1 {
                r = self.mul(&r, &base);
            }
            e >>= 1;
            if e != 0 {
                base = self.mul(&base, &base);
            }
        }
        r
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.re.is_zero() && a.im.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        self.ring.is_one(&a.re) && a.im.is_zero()
    }

    fn equal(&self, a: &Self::Element, b: &Self::Element) -> bool {
        self.ring.equal(&a.re, &b.re) && self.ring.equal(&a.im, &b.im)
    }

    fn characteristic(&self) -> Integer {
        self.ring.characteristic()
    }

    /// Divide by multiplying with the conjugate, so that only a division by the norm remains.
    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        if Self::is_zero(b) {
            return None;
        }

        let n = self.norm(b);
        let num = self.mul(a, &self.conjugate(b));
        Some(Complex::new(
            self.ring.try_div(&num.re, &n)?,
            self.ring.try_div(&num.im, &n)?,
        ))
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        Complex::new(self.ring.sample(rng, range), self.ring.sample(rng, range))
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        if element.im.is_zero() {
            return self.ring.format(&element.re, opts, state, f);
        }

        let unit = opts.complex_unit;
        let im = if self.ring.is_one(&element.im) {
            unit.to_string()
        } else if self.ring.is_one(&self.ring.neg(&element.im)) {
            format!("-{}", unit)
        } else {
            format!(
                "{}{}{}",
                format_string(&*self.ring, &element.im, opts, PrintState::new().product()),
                opts.multiplication_operator,
                unit
            )
        };

        if element.re.is_zero() {
            let wrap = state.in_exp;
            write_sum(&[im], wrap, f)?;
            return Ok(wrap);
        }

        let re = format_string(&*self.ring, &element.re, opts, PrintState::new());
        let wrap = state.in_product || state.in_exp;
        write_sum(&[re, im], wrap, f)?;
        Ok(wrap)
    }
}

impl EuclideanDomain for ComplexRing {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.quot_rem(a, b).1
    }

    /// Exact division over a field, and rounded division over the Gaussian integers.
    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        if Self::is_zero(b) {
            panic!("{}", RingError::DivisionByZero);
        }

        if let Domain::Integer(_) = &*self.ring {
            return self.quot_rem_gaussian(a, b);
        }

        match self.try_div(a, b) {
            Some(q) => (q, self.zero()),
            None => panic!(
                "{}",
                RingError::Unsupported {
                    ring: self.to_string(),
                    operation: "quot_rem",
                }
            ),
        }
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if let Domain::Integer(_) = &*self.ring {
            let mut a = a.clone();
            let mut b = b.clone();
            while !Self::is_zero(&b) {
                let r = self.rem(&a, &b);
                a = std::mem::replace(&mut b, r);
            }

            let u = self.get_normalization_factor(&a);
            return self.mul(&a, &u);
        }

        if Self::is_zero(a) && Self::is_zero(b) {
            self.zero()
        } else if self.is_field() {
            self.one()
        } else {
            panic!(
                "{}",
                RingError::Unsupported {
                    ring: self.to_string(),
                    operation: "gcd",
                }
            )
        }
    }
}

impl Field for ComplexRing {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if Self::is_zero(b) {
            panic!("{}", RingError::DivisionByZero);
        }

        self.try_div(a, b)
            .unwrap_or_else(|| panic!("{}", RingError::NotInvertible))
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.div(a, b);
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        self.div(&self.one(), a)
    }
}

impl FractionNormalization for ComplexRing {
    /// Over the Gaussian integers, rotate into the quadrant with `re > 0` and `im >= 0`.
    /// Over a field, divide by the element itself.
    fn get_normalization_factor(&self, a: &Self::Element) -> Self::Element {
        if Self::is_zero(a) {
            return self.one();
        }

        if let Domain::Integer(_) = &*self.ring {
            let re = a.re.as_integer();
            let im = a.im.as_integer();
            let (u_re, u_im) = if *re > 0 && *im >= 0 {
                (1, 0)
            } else if *re <= 0 && *im > 0 {
                (0, -1)
            } else if *re < 0 && *im <= 0 {
                (-1, 0)
            } else {
                (0, 1)
            };
            return Complex::new(self.ring.nth(u_re), self.ring.nth(u_im));
        }

        if self.is_field() {
            self.inv(a)
        } else {
            self.one()
        }
    }
}
