use std::{
    fmt::{Display, Error, Formatter},
    sync::Arc,
};

use rug::Integer;
use tracing::trace;

use crate::printer::{PrintOptions, PrintState};

use super::{
    generic::{Domain, Element},
    EuclideanDomain, Field, FractionNormalization, Ring, RingError,
};

/// The field of fractions of a ring. Fractions are kept canonical by removing
/// the content shared by numerator and denominator and normalizing the denominator.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct FractionRing {
    base: Arc<Domain>,
    gcd_reduction: bool,
}

/// A fraction `numerator / denominator`, where both live in the base ring.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Fraction {
    pub numerator: Element,
    pub denominator: Element,
}

impl Fraction {
    pub fn numerator(&self) -> &Element {
        &self.numerator
    }

    pub fn denominator(&self) -> &Element {
        &self.denominator
    }
}

/// Compute the gcd of all scalar leaves of `e`, descending through polynomial
/// coefficients and complex parts. The result lives in [Domain::content_ring].
/// If the leaves are not integers or words, there is nothing to cancel and the content is one.
pub fn content_recursive(ring: &Domain, e: &Element) -> Element {
    let leaf = ring.content_ring();

    if !matches!(leaf, Domain::Integer(_) | Domain::Word(_)) {
        return if e.is_zero() { leaf.zero() } else { leaf.one() };
    }

    let mut g = leaf.zero();
    accumulate_content(ring, leaf, e, &mut g);
    g
}

/// Returns `false` once the running gcd became one.
fn accumulate_content(ring: &Domain, leaf: &Domain, e: &Element, g: &mut Element) -> bool {
    match ring {
        Domain::Polynomial(r) => {
            for c in &e.as_polynomial().coefficients {
                if !accumulate_content(&r.ring, leaf, c, g) {
                    return false;
                }
            }
            true
        }
        Domain::Complex(r) => {
            let c = e.as_complex();
            accumulate_content(r.parent(), leaf, &c.re, g)
                && accumulate_content(r.parent(), leaf, &c.im, g)
        }
        _ => {
            if !e.is_zero() {
                *g = leaf.gcd(g, e);
            }
            !leaf.is_one(g)
        }
    }
}

/// Divide every scalar leaf of `e` by `g` in place. The division must be exact.
fn divide_leaves(ring: &Domain, e: &mut Element, g: &Element) {
    match ring {
        Domain::Polynomial(r) => {
            for c in &mut e.as_polynomial_mut().coefficients {
                divide_leaves(&r.ring, c, g);
            }
        }
        Domain::Complex(r) => {
            let c = e.as_complex_mut();
            divide_leaves(r.parent(), &mut c.re, g);
            divide_leaves(r.parent(), &mut c.im, g);
        }
        _ => {
            if !e.is_zero() {
                *e = ring.divexact(e, g);
            }
        }
    }
}

impl FractionRing {
    pub fn new(base: Arc<Domain>) -> FractionRing {
        FractionRing {
            base,
            gcd_reduction: false,
        }
    }

    /// Also divide numerator and denominator by their gcd, instead of only
    /// by the gcd of their contents. This only changes polynomial fractions.
    pub fn with_gcd_reduction(mut self, gcd_reduction: bool) -> FractionRing {
        self.gcd_reduction = gcd_reduction;
        self
    }

    pub fn base(&self) -> &Domain {
        &self.base
    }

    /// Create a new fraction. If `canonicalise` is `false`, the caller must guarantee
    /// that the fraction is canonical already.
    pub fn to_element(&self, numerator: Element, denominator: Element, canonicalise: bool) -> Fraction {
        let mut f = Fraction {
            numerator,
            denominator,
        };

        if canonicalise {
            self.canonicalise(&mut f);
        } else if f.denominator.is_zero() {
            panic!("{}", RingError::DivisionByZero);
        }

        f
    }

    /// Remove the content shared between numerator and denominator and
    /// make the denominator unit normal.
    pub fn canonicalise(&self, f: &mut Fraction) {
        if f.denominator.is_zero() {
            panic!("{}", RingError::DivisionByZero);
        }

        if f.numerator.is_zero() {
            f.denominator = self.base.one();
            return;
        }

        let leaf = self.base.content_ring();
        let g = leaf.gcd(
            &content_recursive(&self.base, &f.numerator),
            &content_recursive(&self.base, &f.denominator),
        );

        if !leaf.is_one(&g) {
            divide_leaves(&self.base, &mut f.numerator, &g);
            divide_leaves(&self.base, &mut f.denominator, &g);
        }

        if self.gcd_reduction && matches!(*self.base, Domain::Polynomial(_)) {
            let g = self.base.gcd(&f.numerator, &f.denominator);
            if !self.base.is_one(&g) {
                trace!("removing gcd {}", self.base.printer(&g));
                f.numerator = self.base.divexact(&f.numerator, &g);
                f.denominator = self.base.divexact(&f.denominator, &g);
            }
        }

        let u = self.base.get_normalization_factor(&f.denominator);
        if !self.base.is_one(&u) {
            self.base.mul_assign(&mut f.numerator, &u);
            self.base.mul_assign(&mut f.denominator, &u);
        }
    }

    fn reciprocal(&self, a: &Fraction) -> Fraction {
        if a.numerator.is_zero() {
            panic!("{}", RingError::DivisionByZero);
        }

        self.to_element(a.denominator.clone(), a.numerator.clone(), true)
    }
}

impl Display for FractionRing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Frac({})", self.base)
    }
}

impl Ring for FractionRing {
    type Element = Fraction;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if a.numerator.is_zero() {
            return b.clone();
        }
        if b.numerator.is_zero() {
            return a.clone();
        }

        let r = &self.base;
        if a.denominator == b.denominator {
            let num = r.add(&a.numerator, &b.numerator);
            return self.to_element(num, a.denominator.clone(), true);
        }

        let mut num = r.mul(&a.numerator, &b.denominator);
        r.add_mul_assign(&mut num, &b.numerator, &a.denominator);
        let den = r.mul(&a.denominator, &b.denominator);
        self.to_element(num, den, true)
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.add(a, &self.neg(b))
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if a.numerator.is_zero() || b.numerator.is_zero() {
            return self.zero();
        }

        let r = &self.base;
        self.to_element(
            r.mul(&a.numerator, &b.numerator),
            r.mul(&a.denominator, &b.denominator),
            true,
        )
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
        self.add_assign(a, &self.mul(b, c));
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        self.sub_assign(a, &self.mul(b, c));
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        Fraction {
            numerator: self.base.neg(&a.numerator),
            denominator: a.denominator.clone(),
        }
    }

    fn zero(&self) -> Self::Element {
        Fraction {
            numerator: self.base.zero(),
            denominator: self.base.one(),
        }
    }

    fn one(&self) -> Self::Element {
        Fraction {
            numerator: self.base.one(),
            denominator: self.base.one(),
        }
    }

    fn nth(&self, n: i64) -> Self::Element {
        Fraction {
            numerator: self.base.nth(n),
            denominator: self.base.one(),
        }
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        if e == 0 {
            return self.one();
        }

        self.to_element(
            self.base.pow(&b.numerator, e),
            self.base.pow(&b.denominator, e),
            true,
        )
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.numerator.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        self.base.equal(&a.numerator, &a.denominator)
    }

    /// Compare by cross-multiplication, so that the result does not depend on how far the fractions were reduced.
    fn equal(&self, a: &Self::Element, b: &Self::Element) -> bool {
        if a == b {
            return true;
        }

        let r = &self.base;
        r.equal(
            &r.mul(&a.numerator, &b.denominator),
            &r.mul(&b.numerator, &a.denominator),
        )
    }

    fn characteristic(&self) -> Integer {
        self.base.characteristic()
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        if b.numerator.is_zero() {
            return None;
        }

        Some(self.mul(a, &self.reciprocal(b)))
    }

    fn try_inv(&self, a: &Self::Element) -> Option<Self::Element> {
        if a.numerator.is_zero() {
            return None;
        }

        Some(self.reciprocal(a))
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let numerator = self.base.sample(rng, range);

        let mut denominator = self.base.sample(rng, range);
        for _ in 0..16 {
            if !denominator.is_zero() {
                break;
            }
            denominator = self.base.sample(rng, range);
        }

        if denominator.is_zero() {
            denominator = self.base.one();
        }

        self.to_element(numerator, denominator, true)
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        if self.base.is_one(&element.denominator) && !opts.explicit_denominator {
            return self.base.format(&element.numerator, opts, state, f);
        }

        if state.in_exp {
            f.write_char('(')?;
        }

        self.base
            .format(&element.numerator, opts, PrintState::new().product(), f)?;
        f.write_char('/')?;
        self.base
            .format(&element.denominator, opts, PrintState::new().exp(), f)?;

        if state.in_exp {
            f.write_char(')')?;
        }

        Ok(state.in_exp)
    }
}

impl EuclideanDomain for FractionRing {
    fn rem(&self, _a: &Self::Element, b: &Self::Element) -> Self::Element {
        if b.numerator.is_zero() {
            panic!("{}", RingError::DivisionByZero);
        }
        self.zero()
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (self.div(a, b), self.zero())
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if a.numerator.is_zero() && b.numerator.is_zero() {
            self.zero()
        } else {
            self.one()
        }
    }
}

impl Field for FractionRing {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.mul(a, &self.reciprocal(b))
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.div(a, b);
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        self.reciprocal(a)
    }
}

impl FractionNormalization for FractionRing {
    fn get_normalization_factor(&self, a: &Self::Element) -> Self::Element {
        if a.numerator.is_zero() {
            self.one()
        } else {
            self.reciprocal(a)
        }
    }
}

#[cfg(test)]
mod test {
    use rug::Integer;

    use crate::domains::{
        generic::{Domain, Element, Z},
        Field, Ring,
    };

    use super::content_recursive;

    fn int(n: i64) -> Element {
        Element::Integer(Integer::from(n))
    }

    #[test]
    fn integer_fractions() {
        let q = Domain::fraction(Z);
        let r = q.as_fraction_ring();

        let a = r.to_element(int(6), int(-4), true);
        assert_eq!(a.numerator, int(-3));
        assert_eq!(a.denominator, int(2));
        assert_eq!(q.printer(&a.clone().into()).to_string(), "-3/2");

        let b = r.to_element(int(1), int(6), true);
        let s = r.add(&a, &b);
        assert_eq!((s.numerator, s.denominator), (int(-4), int(3)));

        let p = r.mul(&a, &b);
        assert_eq!((p.numerator, p.denominator), (int(-1), int(4)));

        let d = r.div(&a, &b);
        assert_eq!((&d.numerator, &d.denominator), (&int(-9), &int(1)));
        assert_eq!(q.printer(&d.into()).to_string(), "-9");
    }

    #[test]
    fn polynomial_content_removal() {
        let zx = Domain::polynomial(Z, "x");
        let q = Domain::fraction(zx.clone());
        let r = q.as_fraction_ring();
        let p = zx.as_polynomial_ring();

        let num: Element = p.from_ints(&[2, 4]).into();
        let den: Element = p.from_ints(&[-6]).into();
        assert_eq!(content_recursive(&zx, &num), int(2));

        let f = r.to_element(num, den, true);
        assert_eq!(f.numerator, p.from_ints(&[-1, -2]).into());
        assert_eq!(f.denominator, p.from_ints(&[3]).into());
        assert_eq!(q.printer(&f.clone().into()).to_string(), "(-2*x-1)/3");

        // canonical fractions are left untouched
        let mut g = f.clone();
        r.canonicalise(&mut g);
        assert_eq!(f, g);
    }

    #[test]
    fn gcd_reduction() {
        let zx = Domain::polynomial(Z, "x");
        let p = zx.as_polynomial_ring();
        let num: Element = p.from_ints(&[-1, 0, 1]).into();
        let den: Element = p.from_ints(&[-1, 1]).into();

        let content_only = Domain::fraction(zx.clone());
        let a = content_only
            .as_fraction_ring()
            .to_element(num.clone(), den.clone(), true);
        assert_eq!(a.denominator, den);

        let reduced = Domain::fraction_with_gcd_reduction(zx.clone());
        let b = reduced.as_fraction_ring().to_element(num, den, true);
        assert_eq!(b.numerator, p.from_ints(&[1, 1]).into());
        assert!(zx.is_one(&b.denominator));

        assert!(content_only.equal(&a.into(), &b.into()));
    }

    #[test]
    fn field_coefficients() {
        let q = Domain::fraction(Domain::modular_word(7));
        let r = q.as_fraction_ring();
        let a = r.to_element(Element::Word(3), Element::Word(2), true);
        assert_eq!(a.numerator, Element::Word(5));
        assert_eq!(a.denominator, Element::Word(1));
    }

    #[test]
    #[should_panic(expected = "Cannot divide by 0")]
    fn zero_denominator() {
        let q = Domain::fraction(Z);
        q.as_fraction_ring().to_element(int(1), int(0), true);
    }
}
