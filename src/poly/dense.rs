use std::{
    fmt::{Display, Error, Formatter},
    hash::{Hash, Hasher},
    sync::Arc,
};

use rand::Rng;
use rug::Integer;
use smartstring::{LazyCompact, SmartString};

use crate::{
    domains::{
        format_string,
        generic::{Domain, Element},
        EuclideanDomain, FractionNormalization, Ring, RingError,
    },
    printer::{write_sum, PrintOptions, PrintState},
};

use super::PolynomialConfig;

/// The ring of univariate polynomials over a coefficient ring.
#[derive(Clone, Debug)]
pub struct PolynomialRing {
    pub ring: Arc<Domain>,
    pub variable: SmartString<LazyCompact>,
    pub config: PolynomialConfig,
}

/// Two polynomial rings are the same if they have the same coefficients and variable.
impl PartialEq for PolynomialRing {
    fn eq(&self, other: &Self) -> bool {
        self.ring == other.ring && self.variable == other.variable
    }
}

impl Eq for PolynomialRing {}

impl Hash for PolynomialRing {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ring.hash(state);
        self.variable.hash(state);
    }
}

/// A dense univariate polynomial, with the coefficients stored in increasing degree.
/// The last coefficient, if present, is never zero.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Polynomial {
    pub coefficients: Vec<Element>,
}

impl Polynomial {
    /// Create a new polynomial, removing trailing zeros.
    pub fn from_coefficients(coefficients: Vec<Element>) -> Polynomial {
        let mut p = Polynomial { coefficients };
        p.truncate();
        p
    }

    #[inline]
    pub fn zero() -> Polynomial {
        Polynomial {
            coefficients: vec![],
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// The number of stored coefficients.
    #[inline]
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// The degree of the polynomial. The zero polynomial has degree 0.
    #[inline]
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// The leading coefficient, or `None` for the zero polynomial.
    #[inline]
    pub fn lcoeff(&self) -> Option<&Element> {
        self.coefficients.last()
    }

    /// Remove trailing zero coefficients.
    pub fn truncate(&mut self) {
        let d = self
            .coefficients
            .iter()
            .rposition(|c| !c.is_zero())
            .map(|i| i + 1)
            .unwrap_or(0);
        self.coefficients.truncate(d);
    }

    /// Keep only the terms of degree smaller than `n`.
    pub fn truncate_degree(&mut self, n: usize) {
        if self.coefficients.len() > n {
            self.coefficients.truncate(n);
            self.truncate();
        }
    }
}

impl PolynomialRing {
    pub fn new(ring: Arc<Domain>, variable: &str) -> PolynomialRing {
        PolynomialRing {
            ring,
            variable: variable.into(),
            config: PolynomialConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PolynomialConfig) -> PolynomialRing {
        self.config = config;
        self
    }

    pub fn coefficient_ring(&self) -> &Domain {
        &self.ring
    }

    pub fn from_coefficients(&self, coefficients: Vec<Element>) -> Polynomial {
        Polynomial::from_coefficients(coefficients)
    }

    /// Create a polynomial from small integer coefficients, given in increasing degree.
    pub fn from_ints(&self, coefficients: &[i64]) -> Polynomial {
        Polynomial::from_coefficients(coefficients.iter().map(|c| self.ring.nth(*c)).collect())
    }

    pub fn constant(&self, c: Element) -> Polynomial {
        Polynomial::from_coefficients(vec![c])
    }

    /// Create `c * x^exp`.
    pub fn monomial(&self, c: Element, exp: usize) -> Polynomial {
        if c.is_zero() {
            return Polynomial::zero();
        }

        let mut coefficients = vec![self.ring.zero(); exp + 1];
        coefficients[exp] = c;
        Polynomial { coefficients }
    }

    /// The polynomial `x`.
    pub fn variable(&self) -> Polynomial {
        self.monomial(self.ring.one(), 1)
    }

    /// The leading coefficient, or zero for the zero polynomial.
    pub fn lcoeff(&self, p: &Polynomial) -> Element {
        p.lcoeff().cloned().unwrap_or_else(|| self.ring.zero())
    }

    pub fn mul_coeff(&self, p: &Polynomial, c: &Element) -> Polynomial {
        if c.is_zero() {
            return Polynomial::zero();
        }

        Polynomial::from_coefficients(
            p.coefficients
                .iter()
                .map(|x| self.ring.mul(x, c))
                .collect(),
        )
    }

    /// Divide every coefficient by `c`, panicking when the division is not exact.
    pub fn divexact_coeff(&self, p: &Polynomial, c: &Element) -> Polynomial {
        if self.ring.is_one(c) {
            return p.clone();
        }

        Polynomial {
            coefficients: p
                .coefficients
                .iter()
                .map(|x| self.ring.divexact(x, c))
                .collect(),
        }
    }

    /// Evaluate the polynomial at `x` using Horner's scheme.
    pub fn evaluate(&self, p: &Polynomial, x: &Element) -> Element {
        let mut r = self.ring.zero();
        for c in p.coefficients.iter().rev() {
            self.ring.mul_assign(&mut r, x);
            self.ring.add_assign(&mut r, c);
        }
        r
    }

    pub fn derivative(&self, p: &Polynomial) -> Polynomial {
        Polynomial::from_coefficients(
            p.coefficients
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| self.ring.mul(c, &self.ring.nth(i as i64)))
                .collect(),
        )
    }

    /// Multiply by the unit that makes the leading coefficient unit normal.
    pub fn normalize(&self, p: &Polynomial) -> Polynomial {
        match p.lcoeff() {
            Some(lc) => {
                let u = self.ring.get_normalization_factor(lc);
                if self.ring.is_one(&u) {
                    p.clone()
                } else {
                    self.mul_coeff(p, &u)
                }
            }
            None => Polynomial::zero(),
        }
    }

    /// The nesting depth of the polynomial ring and the first coefficient ring that is not a polynomial ring.
    pub fn nesting(&self) -> (usize, &Domain) {
        let mut levels = 1;
        let mut ring = &*self.ring;
        while let Domain::Polynomial(r) = ring {
            levels += 1;
            ring = &r.ring;
        }
        (levels, ring)
    }

    fn format_terms<W: std::fmt::Write>(
        &self,
        p: &Polynomial,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        if p.is_zero() {
            f.write_char('0')?;
            return Ok(false);
        }

        if p.len() == 1 {
            return self.ring.format(&p.coefficients[0], opts, state, f);
        }

        let mut terms = vec![];
        for (i, c) in p.coefficients.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }

            if i == 0 {
                terms.push(format_string(&*self.ring, c, opts, PrintState::new()));
                continue;
            }

            let mut t = if self.ring.is_one(c) {
                String::new()
            } else if self.ring.is_one(&self.ring.neg(c)) {
                "-".to_string()
            } else {
                let mut s = format_string(&*self.ring, c, opts, PrintState::new().product());
                s.push(opts.multiplication_operator);
                s
            };

            t.push_str(&self.variable);
            opts.write_exponent(i, &mut t)?;
            terms.push(t);
        }

        let single_atom = terms.len() == 1 && terms[0] == self.variable.as_str();
        let wrap = (state.in_product && terms.len() > 1) || (state.in_exp && !single_atom);
        write_sum(&terms, wrap, f)?;
        Ok(wrap)
    }
}

impl Display for PolynomialRing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.ring, self.variable)
    }
}

impl Ring for PolynomialRing {
    type Element = Polynomial;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let mut r = a.clone();
        self.add_assign(&mut r, b);
        r
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let mut r = a.clone();
        self.sub_assign(&mut r, b);
        r
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let mut r = Polynomial::zero();
        self.mul_into(&mut r, a, b);
        r
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        let common = a.len().min(b.len());
        for (x, y) in a.coefficients.iter_mut().zip(&b.coefficients[..common]) {
            self.ring.add_assign(x, y);
        }
        a.coefficients
            .extend(b.coefficients[common..].iter().cloned());
        a.truncate();
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        let common = a.len().min(b.len());
        for (x, y) in a.coefficients.iter_mut().zip(&b.coefficients[..common]) {
            self.ring.sub_assign(x, y);
        }
        a.coefficients
            .extend(b.coefficients[common..].iter().map(|c| self.ring.neg(c)));
        a.truncate();
    }

    /// The product is computed in fresh storage and swapped in.
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        let mut r = Polynomial::zero();
        self.mul_into(&mut r, a, b);
        std::mem::swap(a, &mut r);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        self.add_assign(a, &self.mul(b, c));
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        self.sub_assign(a, &self.mul(b, c));
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        Polynomial {
            coefficients: a.coefficients.iter().map(|c| self.ring.neg(c)).collect(),
        }
    }

    fn zero(&self) -> Self::Element {
        Polynomial::zero()
    }

    fn one(&self) -> Self::Element {
        self.constant(self.ring.one())
    }

    fn nth(&self, n: i64) -> Self::Element {
        self.constant(self.ring.nth(n))
    }

    /// Compute `b^e` by binary exponentiation. The accumulator and a single
    /// scratch buffer swap roles after every multiplication.
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        if e == 0 {
            return self.one();
        }

        let mut acc = b.clone();
        let mut scratch = Polynomial::zero();
        let top = u64::BITS - 1 - e.leading_zeros();
        for i in (0..top).rev() {
            self.mul_into(&mut scratch, &acc, &acc);
            std::mem::swap(&mut acc, &mut scratch);

            if (e >> i) & 1 == 1 {
                self.mul_into(&mut scratch, &acc, b);
                std::mem::swap(&mut acc, &mut scratch);
            }
        }

        acc
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.len() == 1 && self.ring.is_one(&a.coefficients[0])
    }

    fn equal(&self, a: &Self::Element, b: &Self::Element) -> bool {
        a.len() == b.len()
            && a.coefficients
                .iter()
                .zip(&b.coefficients)
                .all(|(x, y)| self.ring.equal(x, y))
    }

    fn characteristic(&self) -> Integer {
        self.ring.characteristic()
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        self.try_divexact(a, b).ok()
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let len = rng.gen_range(0..=self.config.sample_max_length);
        Polynomial::from_coefficients((0..len).map(|_| self.ring.sample(rng, range)).collect())
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        self.format_terms(element, opts, state, f)
    }
}

impl EuclideanDomain for PolynomialRing {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.quot_rem(a, b).1
    }

    /// Divide `a` by `b`, such that `q * b + r = a`. If the coefficient ring is not a
    /// field, the division stops at the first leading coefficient that `lcoeff(b)`
    /// does not divide, so that `r` may have a degree larger than `b`.
    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        if b.is_zero() {
            panic!("{}", RingError::DivisionByZero);
        }

        if a.len() < b.len() {
            return (Polynomial::zero(), a.clone());
        }

        if a.len() - b.len() + 1 >= self.config.divrem_newton_cutoff {
            if let Some(qr) = self.quot_rem_newton(a, b) {
                return qr;
            }
        }

        self.quot_rem_basecase(a, b)
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.gcd_subresultant(a, b)
    }
}

impl FractionNormalization for PolynomialRing {
    fn get_normalization_factor(&self, a: &Self::Element) -> Self::Element {
        match a.lcoeff() {
            Some(lc) => self.constant(self.ring.get_normalization_factor(lc)),
            None => self.one(),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::domains::{
        generic::{Domain, Element, Z},
        Ring,
    };

    use super::Polynomial;

    #[test]
    fn arithmetic() {
        let zx = Domain::polynomial(Z, "x");
        let r = zx.as_polynomial_ring();

        let a = r.from_ints(&[1, 2, 3]);
        let b = r.from_ints(&[-1, -2, -3, 4]);
        assert_eq!(r.add(&a, &b), r.from_ints(&[0, 0, 0, 4]));
        assert_eq!(r.sub(&a, &a), Polynomial::zero());
        assert_eq!(r.mul(&a, &b), r.from_ints(&[-1, -4, -10, -8, -1, 12]));
        assert_eq!(r.neg(&a), r.from_ints(&[-1, -2, -3]));
        assert_eq!(r.pow(&r.from_ints(&[1, 1]), 5), r.from_ints(&[1, 5, 10, 10, 5, 1]));
        assert_eq!(r.pow(&a, 0), r.one());

        let mut c = a.clone();
        r.mul_assign(&mut c, &a);
        assert_eq!(c, r.mul(&a, &a));
    }

    #[test]
    fn evaluation_and_derivative() {
        let zx = Domain::polynomial(Z, "x");
        let r = zx.as_polynomial_ring();
        let a = r.from_ints(&[1, 2, 3]);
        assert_eq!(r.evaluate(&a, &Z.nth(2)), Z.nth(17));
        assert_eq!(r.derivative(&a), r.from_ints(&[2, 6]));
        assert_eq!(r.derivative(&r.from_ints(&[5])), Polynomial::zero());
    }

    #[test]
    fn printing() {
        let zx = Domain::polynomial(Z, "x");
        let r = zx.as_polynomial_ring();
        let p: Element = r.from_ints(&[-1, 1, 0, -3]).into();
        assert_eq!(zx.printer(&p).to_string(), "-3*x^3+x-1");
        assert_eq!(format!("{:#}", zx.printer(&p)), "-3 x³+x-1");
        assert_eq!(zx.printer(&zx.zero()).to_string(), "0");

        let zxy = Domain::polynomial(zx.clone(), "y");
        let s = zxy.as_polynomial_ring();
        let q: Element = s
            .from_coefficients(vec![zx.one(), r.from_ints(&[1, 1]).into()])
            .into();
        assert_eq!(zxy.printer(&q).to_string(), "(x+1)*y+1");
    }

    #[test]
    fn trailing_zeros_are_removed() {
        let zx = Domain::polynomial(Z, "x");
        let r = zx.as_polynomial_ring();
        let p = r.from_ints(&[1, 0, 0]);
        assert_eq!(p.len(), 1);
        assert_eq!(p.degree(), 0);
        assert!(r.is_one(&p));
    }
}
