//! The runtime-composable ring [Domain] and its element type [Element].
//!
//! Every ring kind is a variant of [Domain] that wraps the ring structure of that kind.
//! A generic operation on a [Domain] matches on the variant once and forwards to the ring
//! of that kind, which in turn calls the operations of its parent rings.

use std::{
    fmt::{Display, Error, Formatter},
    sync::Arc,
};

use rug::Integer;

use crate::{
    poly::{
        dense::{Polynomial, PolynomialRing},
        PolynomialConfig,
    },
    printer::{PrintOptions, PrintState},
    tensors::matrix::{Matrix, MatrixRing},
};

use super::{
    complex::{Complex, ComplexRing},
    fraction::{Fraction, FractionRing},
    integer::IntegerRing,
    modular::ModularRing,
    word::WordRing,
    EuclideanDomain, Field, FractionNormalization, Ring, RingError,
};

/// The kind of a ring.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RingKind {
    Integer,
    Word,
    Modular,
    Fraction,
    Polynomial,
    Matrix,
    Complex,
}

impl Display for RingKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RingKind::Integer => "integer",
            RingKind::Word => "word",
            RingKind::Modular => "modular",
            RingKind::Fraction => "fraction",
            RingKind::Polynomial => "polynomial",
            RingKind::Matrix => "matrix",
            RingKind::Complex => "complex",
        })
    }
}

/// A ring that is composed at runtime.
///
/// Composite rings refer to their parents through an [Arc], so that
/// the parent chain is acyclic and always ends at the integers or the machine words.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Domain {
    Integer(IntegerRing),
    Word(WordRing),
    Modular(ModularRing),
    Fraction(FractionRing),
    Polynomial(PolynomialRing),
    Matrix(MatrixRing),
    Complex(ComplexRing),
}

/// An element of a [Domain]. The element does not know its ring.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Element {
    Integer(Integer),
    Word(u64),
    Fraction(Box<Fraction>),
    Polynomial(Polynomial),
    Matrix(Matrix),
    Complex(Box<Complex>),
}

macro_rules! accessors {
    ($name:ident, $name_mut:ident, $into:ident, $variant:ident, $t:ty, $desc:literal) => {
        #[inline]
        pub fn $name(&self) -> &$t {
            match self {
                Element::$variant(x) => x,
                _ => panic!("{}", RingError::ElementMismatch { expected: $desc }),
            }
        }

        #[inline]
        pub fn $name_mut(&mut self) -> &mut $t {
            match self {
                Element::$variant(x) => x,
                _ => panic!("{}", RingError::ElementMismatch { expected: $desc }),
            }
        }

        #[inline]
        pub fn $into(self) -> $t {
            match self {
                Element::$variant(x) => x,
                _ => panic!("{}", RingError::ElementMismatch { expected: $desc }),
            }
        }
    };
}

impl Element {
    accessors!(as_integer, as_integer_mut, into_integer, Integer, Integer, "an integer");
    accessors!(as_word, as_word_mut, into_word, Word, u64, "a word");
    accessors!(
        as_fraction,
        as_fraction_mut,
        into_fraction,
        Fraction,
        Box<Fraction>,
        "a fraction"
    );
    accessors!(
        as_polynomial,
        as_polynomial_mut,
        into_polynomial,
        Polynomial,
        Polynomial,
        "a polynomial"
    );
    accessors!(as_matrix, as_matrix_mut, into_matrix, Matrix, Matrix, "a matrix");
    accessors!(
        as_complex,
        as_complex_mut,
        into_complex,
        Complex,
        Box<Complex>,
        "a complex number"
    );

    /// Check if the element is zero. This does not require the ring, since
    /// residues are always reduced and polynomials never store trailing zeros.
    pub fn is_zero(&self) -> bool {
        match self {
            Element::Integer(i) => *i == 0,
            Element::Word(w) => *w == 0,
            Element::Fraction(f) => f.numerator.is_zero(),
            Element::Polynomial(p) => p.is_zero(),
            Element::Matrix(m) => m.data.iter().all(|e| e.is_zero()),
            Element::Complex(c) => c.re.is_zero() && c.im.is_zero(),
        }
    }
}

impl From<Integer> for Element {
    fn from(value: Integer) -> Self {
        Element::Integer(value)
    }
}

impl From<u64> for Element {
    fn from(value: u64) -> Self {
        Element::Word(value)
    }
}

impl From<Fraction> for Element {
    fn from(value: Fraction) -> Self {
        Element::Fraction(Box::new(value))
    }
}

impl From<Polynomial> for Element {
    fn from(value: Polynomial) -> Self {
        Element::Polynomial(value)
    }
}

impl From<Matrix> for Element {
    fn from(value: Matrix) -> Self {
        Element::Matrix(value)
    }
}

impl From<Complex> for Element {
    fn from(value: Complex) -> Self {
        Element::Complex(Box::new(value))
    }
}

/// A ring whose elements can be stored in an [Element].
pub trait Embed: Ring {
    fn project<'a>(&self, e: &'a Element) -> &'a Self::Element;
    fn project_mut<'a>(&self, e: &'a mut Element) -> &'a mut Self::Element;
    fn embed(&self, e: Self::Element) -> Element;
}

macro_rules! impl_embed {
    ($ring:ty, $as:ident, $as_mut:ident, $wrap:expr) => {
        impl Embed for $ring {
            #[inline(always)]
            fn project<'a>(&self, e: &'a Element) -> &'a Self::Element {
                e.$as()
            }

            #[inline(always)]
            fn project_mut<'a>(&self, e: &'a mut Element) -> &'a mut Self::Element {
                e.$as_mut()
            }

            #[inline(always)]
            fn embed(&self, e: Self::Element) -> Element {
                $wrap(e)
            }
        }
    };
}

impl_embed!(IntegerRing, as_integer, as_integer_mut, Element::Integer);
impl_embed!(WordRing, as_word, as_word_mut, Element::Word);
impl_embed!(PolynomialRing, as_polynomial, as_polynomial_mut, Element::Polynomial);
impl_embed!(MatrixRing, as_matrix, as_matrix_mut, Element::Matrix);
impl_embed!(FractionRing, as_fraction, as_fraction_mut, |f: Fraction| {
    Element::Fraction(Box::new(f))
});
impl_embed!(ComplexRing, as_complex, as_complex_mut, |c: Complex| {
    Element::Complex(Box::new(c))
});

impl Embed for ModularRing {
    #[inline(always)]
    fn project<'a>(&self, e: &'a Element) -> &'a Self::Element {
        e
    }

    #[inline(always)]
    fn project_mut<'a>(&self, e: &'a mut Element) -> &'a mut Self::Element {
        e
    }

    #[inline(always)]
    fn embed(&self, e: Self::Element) -> Element {
        e
    }
}

/// Match on the ring kind once and evaluate `$body` with `$r` bound to the ring of that kind.
macro_rules! dispatch {
    ($self:expr, $r:ident => $body:expr) => {
        match $self {
            Domain::Integer($r) => $body,
            Domain::Word($r) => $body,
            Domain::Modular($r) => $body,
            Domain::Fraction($r) => $body,
            Domain::Polynomial($r) => $body,
            Domain::Matrix($r) => $body,
            Domain::Complex($r) => $body,
        }
    };
}

/// Like [dispatch], but for rings that support division with remainder.
/// Matrix rings only support it through their exact division.
macro_rules! dispatch_euclidean {
    ($self:expr, $r:ident => $body:expr, $matrix:ident => $fallback:expr) => {
        match $self {
            Domain::Integer($r) => $body,
            Domain::Word($r) => $body,
            Domain::Modular($r) => $body,
            Domain::Fraction($r) => $body,
            Domain::Polynomial($r) => $body,
            Domain::Complex($r) => $body,
            Domain::Matrix($matrix) => $fallback,
        }
    };
}

/// The integer ring as a [Domain].
pub const Z: Domain = Domain::Integer(IntegerRing::new());

impl Domain {
    pub const fn integer() -> Domain {
        Domain::Integer(IntegerRing::new())
    }

    pub const fn word() -> Domain {
        Domain::Word(WordRing::new())
    }

    /// Create the ring of residues of `parent` modulo `modulus`,
    /// where the parent is the integer or the word ring.
    pub fn modular(parent: &Domain, modulus: Element) -> Domain {
        match (parent, modulus) {
            (Domain::Word(_), Element::Word(m)) => Domain::modular_word(m),
            (Domain::Integer(_), Element::Integer(m)) => Domain::modular_integer(m),
            (p, m) => panic!(
                "Cannot construct a modular ring over {} with modulus {:?}",
                p, m
            ),
        }
    }

    /// Create `Z/mZ` with the residues stored as machine words.
    pub fn modular_word(m: u64) -> Domain {
        Domain::Modular(ModularRing::new_word(m))
    }

    /// Create `Z/mZ` with the residues stored as arbitrary-precision integers.
    pub fn modular_integer(m: Integer) -> Domain {
        Domain::Modular(ModularRing::new_integer(m))
    }

    /// Create the fractions over `base`, reduced by removing the content.
    pub fn fraction(base: Domain) -> Domain {
        Domain::Fraction(FractionRing::new(Arc::new(base)))
    }

    /// Create the fractions over `base`, reduced by the full gcd of numerator and denominator.
    pub fn fraction_with_gcd_reduction(base: Domain) -> Domain {
        Domain::Fraction(FractionRing::new(Arc::new(base)).with_gcd_reduction(true))
    }

    pub fn polynomial(coefficients: Domain, variable: &str) -> Domain {
        Domain::Polynomial(PolynomialRing::new(Arc::new(coefficients), variable))
    }

    pub fn polynomial_with_config(
        coefficients: Domain,
        variable: &str,
        config: PolynomialConfig,
    ) -> Domain {
        Domain::Polynomial(PolynomialRing::new(Arc::new(coefficients), variable).with_config(config))
    }

    /// Create the ring of `nrows x ncols` matrices. Elements of other shapes can be
    /// used in the operations that support them, such as multiplication.
    pub fn matrix(entries: Domain, nrows: usize, ncols: usize) -> Domain {
        Domain::Matrix(MatrixRing::new(Arc::new(entries), nrows, ncols))
    }

    pub fn complex(parent: Domain) -> Domain {
        Domain::Complex(ComplexRing::new(Arc::new(parent)))
    }

    pub fn kind(&self) -> RingKind {
        match self {
            Domain::Integer(_) => RingKind::Integer,
            Domain::Word(_) => RingKind::Word,
            Domain::Modular(_) => RingKind::Modular,
            Domain::Fraction(_) => RingKind::Fraction,
            Domain::Polynomial(_) => RingKind::Polynomial,
            Domain::Matrix(_) => RingKind::Matrix,
            Domain::Complex(_) => RingKind::Complex,
        }
    }

    /// The number of bytes an element of this ring occupies inline, not counting
    /// separately allocated storage such as polynomial coefficients.
    pub fn element_size(&self) -> usize {
        match self {
            Domain::Integer(_) => std::mem::size_of::<Integer>(),
            Domain::Word(_) => std::mem::size_of::<u64>(),
            Domain::Modular(r) => r.parent().element_size(),
            Domain::Fraction(r) => 2 * r.base().element_size(),
            Domain::Polynomial(_) => std::mem::size_of::<Polynomial>(),
            Domain::Matrix(_) => std::mem::size_of::<Matrix>(),
            Domain::Complex(r) => 2 * r.parent().element_size(),
        }
    }

    /// The parent ring, or `None` for the primitive rings.
    pub fn parent(&self) -> Option<&Domain> {
        match self {
            Domain::Integer(_) | Domain::Word(_) => None,
            Domain::Modular(r) => Some(r.parent()),
            Domain::Fraction(r) => Some(r.base()),
            Domain::Polynomial(r) => Some(&r.ring),
            Domain::Matrix(r) => Some(&r.ring),
            Domain::Complex(r) => Some(r.parent()),
        }
    }

    /// The modulus of a modular ring, as an element of its parent.
    pub fn modulus(&self) -> Option<Element> {
        match self {
            Domain::Modular(r) => Some(r.modulus_element()),
            _ => None,
        }
    }

    /// Returns `true` if every nonzero element is invertible.
    pub fn is_field(&self) -> bool {
        match self {
            Domain::Integer(_) | Domain::Word(_) => false,
            Domain::Modular(r) => r.is_field(),
            Domain::Fraction(_) => true,
            Domain::Polynomial(_) => false,
            Domain::Matrix(_) => false,
            Domain::Complex(r) => r.is_field(),
        }
    }

    /// The ring in which the content of an element is computed: the coefficient ring
    /// reached by descending through polynomials and complex extensions.
    pub fn content_ring(&self) -> &Domain {
        match self {
            Domain::Polynomial(r) => r.ring.content_ring(),
            Domain::Complex(r) => r.parent().content_ring(),
            _ => self,
        }
    }

    pub fn as_modular_ring(&self) -> &ModularRing {
        match self {
            Domain::Modular(r) => r,
            _ => panic!("{} is not a modular ring", self),
        }
    }

    pub fn as_fraction_ring(&self) -> &FractionRing {
        match self {
            Domain::Fraction(r) => r,
            _ => panic!("{} is not a fraction ring", self),
        }
    }

    pub fn as_polynomial_ring(&self) -> &PolynomialRing {
        match self {
            Domain::Polynomial(r) => r,
            _ => panic!("{} is not a polynomial ring", self),
        }
    }

    pub fn as_matrix_ring(&self) -> &MatrixRing {
        match self {
            Domain::Matrix(r) => r,
            _ => panic!("{} is not a matrix ring", self),
        }
    }

    pub fn as_complex_ring(&self) -> &ComplexRing {
        match self {
            Domain::Complex(r) => r,
            _ => panic!("{} is not a complex ring", self),
        }
    }

    /// Divide `a` by `b`, failing when `b` is zero or when the division is not exact.
    pub fn try_divexact(&self, a: &Element, b: &Element) -> Result<Element, RingError> {
        if b.is_zero() {
            return Err(RingError::DivisionByZero);
        }

        self.try_div(a, b).ok_or(RingError::InexactDivision)
    }

    /// Divide `a` by `b`, panicking when the division is not exact.
    pub fn divexact(&self, a: &Element, b: &Element) -> Element {
        self.try_divexact(a, b).unwrap_or_else(|e| {
            panic!(
                "{}: {} / {} in {}",
                e,
                self.printer(a),
                self.printer(b),
                self
            )
        })
    }

    pub(crate) fn unsupported(&self, operation: &'static str) -> ! {
        panic!(
            "{}",
            RingError::Unsupported {
                ring: self.to_string(),
                operation,
            }
        )
    }
}

impl From<IntegerRing> for Domain {
    fn from(r: IntegerRing) -> Self {
        Domain::Integer(r)
    }
}

impl From<WordRing> for Domain {
    fn from(r: WordRing) -> Self {
        Domain::Word(r)
    }
}

impl From<ModularRing> for Domain {
    fn from(r: ModularRing) -> Self {
        Domain::Modular(r)
    }
}

impl From<FractionRing> for Domain {
    fn from(r: FractionRing) -> Self {
        Domain::Fraction(r)
    }
}

impl From<PolynomialRing> for Domain {
    fn from(r: PolynomialRing) -> Self {
        Domain::Polynomial(r)
    }
}

impl From<MatrixRing> for Domain {
    fn from(r: MatrixRing) -> Self {
        Domain::Matrix(r)
    }
}

impl From<ComplexRing> for Domain {
    fn from(r: ComplexRing) -> Self {
        Domain::Complex(r)
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        dispatch!(self, r => Display::fmt(r, f))
    }
}

impl Ring for Domain {
    type Element = Element;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        dispatch!(self, r => r.embed(r.add(r.project(a), r.project(b))))
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        dispatch!(self, r => r.embed(r.sub(r.project(a), r.project(b))))
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        dispatch!(self, r => r.embed(r.mul(r.project(a), r.project(b))))
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        dispatch!(self, r => r.add_assign(r.project_mut(a), r.project(b)))
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        dispatch!(self, r => r.sub_assign(r.project_mut(a), r.project(b)))
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        dispatch!(self, r => r.mul_assign(r.project_mut(a), r.project(b)))
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        dispatch!(self, r => r.add_mul_assign(r.project_mut(a), r.project(b), r.project(c)))
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        dispatch!(self, r => r.sub_mul_assign(r.project_mut(a), r.project(b), r.project(c)))
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        dispatch!(self, r => r.embed(r.neg(r.project(a))))
    }

    fn zero(&self) -> Self::Element {
        dispatch!(self, r => r.embed(r.zero()))
    }

    fn one(&self) -> Self::Element {
        dispatch!(self, r => r.embed(r.one()))
    }

    fn nth(&self, n: i64) -> Self::Element {
        dispatch!(self, r => r.embed(r.nth(n)))
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        dispatch!(self, r => r.embed(r.pow(r.project(b), e)))
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        dispatch!(self, r => r.is_one(r.project(a)))
    }

    fn equal(&self, a: &Self::Element, b: &Self::Element) -> bool {
        dispatch!(self, r => r.equal(r.project(a), r.project(b)))
    }

    fn characteristic(&self) -> Integer {
        dispatch!(self, r => r.characteristic())
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        dispatch!(self, r => r.try_div(r.project(a), r.project(b)).map(|q| r.embed(q)))
    }

    fn try_inv(&self, a: &Self::Element) -> Option<Self::Element> {
        dispatch!(self, r => r.try_inv(r.project(a)).map(|q| r.embed(q)))
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        dispatch!(self, r => r.embed(r.sample(rng, range)))
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        dispatch!(self, r => r.format(r.project(element), opts, state, f))
    }
}

impl EuclideanDomain for Domain {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        dispatch_euclidean!(self,
            r => r.embed(r.rem(r.project(a), r.project(b))),
            m => {
                if m.try_div(m.project(a), m.project(b)).is_none() {
                    self.unsupported("rem");
                }
                self.zero()
            }
        )
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        dispatch_euclidean!(self,
            r => {
                let (q, rem) = r.quot_rem(r.project(a), r.project(b));
                (r.embed(q), r.embed(rem))
            },
            m => match m.try_div(m.project(a), m.project(b)) {
                Some(q) => (m.embed(q), self.zero()),
                None => self.unsupported("quot_rem"),
            }
        )
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        dispatch_euclidean!(self,
            r => r.embed(r.gcd(r.project(a), r.project(b))),
            _m => self.unsupported("gcd")
        )
    }
}

impl Field for Domain {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if b.is_zero() {
            panic!("{}", RingError::DivisionByZero);
        }

        self.try_div(a, b).unwrap_or_else(|| {
            panic!(
                "{}: {} in {}",
                RingError::NotInvertible,
                self.printer(b),
                self
            )
        })
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.div(a, b);
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        if a.is_zero() {
            panic!("{}", RingError::DivisionByZero);
        }

        self.try_inv(a).unwrap_or_else(|| {
            panic!(
                "{}: {} in {}",
                RingError::NotInvertible,
                self.printer(a),
                self
            )
        })
    }
}

impl FractionNormalization for Domain {
    fn get_normalization_factor(&self, a: &Self::Element) -> Self::Element {
        dispatch!(self, r => r.embed(r.get_normalization_factor(r.project(a))))
    }
}
