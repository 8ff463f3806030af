//! Polynomial multiplication kernels.
//!
//! The kernel is selected from the rectangular hull of the operands. The flat and
//! Kronecker kernels only apply to polynomials whose leaves are residues, for which
//! the exact integer result can be reduced once at the end.

use rug::{integer::Order, Integer};
use smallvec::{smallvec, SmallVec};
use tracing::trace;

use crate::{
    domains::{
        generic::{Domain, Element},
        modular::{ModularRing, Modulus},
        Ring,
    },
    utils::{add_mod, bits, mul_mod, two_pow_64_mod},
};

use super::{
    dense::{Polynomial, PolynomialRing},
    MulStrategy,
};

/// The extents of a nested polynomial in each of its variables, outermost first,
/// together with the number of nonzero leaves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hull {
    pub extents: SmallVec<[usize; 4]>,
    pub nonzero: usize,
}

impl Hull {
    /// The number of leaves in the bounding box.
    pub fn volume(&self) -> usize {
        self.extents.iter().fold(1usize, |v, e| v.saturating_mul(*e))
    }

    pub fn max_degree(&self) -> usize {
        self.extents
            .iter()
            .copied()
            .max()
            .unwrap_or(0)
            .saturating_sub(1)
    }

    /// Returns `true` if more than `percent` percent of the bounding box is nonzero.
    pub fn is_denser_than(&self, percent: usize) -> bool {
        self.nonzero.saturating_mul(100) > percent.saturating_mul(self.volume())
    }
}

/// A wide integer in which products of two residues are summed without reduction.
trait Accumulator: Copy + Default {
    fn add_product(&mut self, x: u64, y: u64);
    fn reduce(&self, m: u64) -> u64;
}

impl Accumulator for u64 {
    #[inline(always)]
    fn add_product(&mut self, x: u64, y: u64) {
        *self += x * y;
    }

    #[inline(always)]
    fn reduce(&self, m: u64) -> u64 {
        *self % m
    }
}

impl Accumulator for u128 {
    #[inline(always)]
    fn add_product(&mut self, x: u64, y: u64) {
        *self += x as u128 * y as u128;
    }

    #[inline(always)]
    fn reduce(&self, m: u64) -> u64 {
        (*self % m as u128) as u64
    }
}

/// A three-word accumulator `hi * 2^128 + lo`.
#[derive(Clone, Copy, Default)]
struct Wide {
    lo: u128,
    hi: u64,
}

impl Accumulator for Wide {
    #[inline(always)]
    fn add_product(&mut self, x: u64, y: u64) {
        let (lo, carry) = self.lo.overflowing_add(x as u128 * y as u128);
        self.lo = lo;
        self.hi += carry as u64;
    }

    fn reduce(&self, m: u64) -> u64 {
        let r64 = two_pow_64_mod(m);
        let r128 = mul_mod(r64, r64, m);
        add_mod(
            mul_mod(self.hi % m, r128, m),
            (self.lo % m as u128) as u64,
            m,
        )
    }
}

/// A nonzero leaf of a bivariate polynomial: outer exponent, inner exponent and residue.
type Term = (usize, usize, u64);

fn accumulate_2d<A: Accumulator>(a: &[Term], b: &[Term], inner_len: usize, len: usize, m: u64) -> Vec<u64> {
    let mut buckets = vec![A::default(); len];
    for &(i, k, x) in a {
        for &(j, l, y) in b {
            buckets[(i + j) * inner_len + k + l].add_product(x, y);
        }
    }

    buckets.iter().map(|c| c.reduce(m)).collect()
}

/// Write `value` into `limbs` starting at bit `offset`. The target bits must be zero.
fn write_bits(limbs: &mut [u64], offset: usize, value: &[u64]) {
    for (k, w) in value.iter().enumerate() {
        if *w == 0 {
            continue;
        }

        let pos = offset + 64 * k;
        let (word, shift) = (pos / 64, pos % 64);
        limbs[word] |= w << shift;
        if shift > 0 {
            let carry = w >> (64 - shift);
            if carry != 0 {
                limbs[word + 1] |= carry;
            }
        }
    }
}

/// Read `len` bits of `limbs` starting at bit `offset`.
fn read_bits(limbs: &[u64], offset: usize, len: usize) -> Integer {
    let n = (len + 63) / 64;
    let mut out = vec![0u64; n];
    for (k, o) in out.iter_mut().enumerate() {
        let pos = offset + 64 * k;
        let (word, shift) = (pos / 64, pos % 64);
        let lo = limbs.get(word).copied().unwrap_or(0) >> shift;
        let hi = if shift > 0 {
            limbs.get(word + 1).copied().unwrap_or(0) << (64 - shift)
        } else {
            0
        };
        *o = lo | hi;
    }

    let rest = len % 64;
    if rest != 0 {
        if let Some(last) = out.last_mut() {
            *last &= (1u64 << rest) - 1;
        }
    }

    Integer::from_digits::<u64>(&out, Order::Lsf)
}

impl PolynomialRing {
    /// Compute the rectangular hull of a polynomial over all nested polynomial rings.
    pub fn hull(&self, p: &Polynomial) -> Hull {
        let (levels, _) = self.nesting();
        let mut hull = Hull {
            extents: smallvec![0; levels],
            nonzero: 0,
        };
        accumulate_hull(p, 0, &mut hull);
        hull
    }

    /// Select the multiplication kernel for `a * b`.
    pub fn select_mul_strategy(&self, a: &Polynomial, b: &Polynomial) -> MulStrategy {
        let (levels, leaf) = self.nesting();
        let Domain::Modular(m) = leaf else {
            return MulStrategy::Classical;
        };

        let t = &self.config.mul;
        let (ha, hb) = (self.hull(a), self.hull(b));

        if ha.max_degree().max(hb.max_degree()) >= t.kronecker_min_degree
            && ha.is_denser_than(t.kronecker_density_percent)
            && hb.is_denser_than(t.kronecker_density_percent)
        {
            return MulStrategy::Kronecker;
        }

        if levels == 2
            && matches!(m.modulus(), Modulus::Word(_))
            && ha.max_degree() <= t.flat_2d_max_degree
            && hb.max_degree() <= t.flat_2d_max_degree
        {
            return MulStrategy::Flat2D;
        }

        MulStrategy::Classical
    }

    /// Compute `a * b` into `r`, overwriting its previous contents.
    pub fn mul_into(&self, r: &mut Polynomial, a: &Polynomial, b: &Polynomial) {
        if a.is_zero() || b.is_zero() {
            r.coefficients.clear();
            return;
        }

        let strategy = self.select_mul_strategy(a, b);
        trace!(?strategy, len_a = a.len(), len_b = b.len(), "multiplying");

        let fast = match strategy {
            MulStrategy::Classical => None,
            MulStrategy::Flat2D => self.mul_flat_2d(a, b),
            MulStrategy::Kronecker => self.mul_kronecker(a, b),
        };

        match fast {
            Some(p) => *r = p,
            None => self.mul_classical_into(r, a, b),
        }
    }

    /// Schoolbook multiplication.
    pub fn mul_classical(&self, a: &Polynomial, b: &Polynomial) -> Polynomial {
        let mut r = Polynomial::zero();
        self.mul_classical_into(&mut r, a, b);
        r
    }

    fn mul_classical_into(&self, r: &mut Polynomial, a: &Polynomial, b: &Polynomial) {
        r.coefficients.clear();
        if a.is_zero() || b.is_zero() {
            return;
        }

        r.coefficients
            .resize(a.len() + b.len() - 1, self.ring.zero());
        for (i, x) in a.coefficients.iter().enumerate() {
            if x.is_zero() {
                continue;
            }

            for (j, y) in b.coefficients.iter().enumerate() {
                if !y.is_zero() {
                    self.ring.add_mul_assign(&mut r.coefficients[i + j], x, y);
                }
            }
        }

        r.truncate();
    }

    /// Multiply two bivariate polynomials over a word modulus by accumulating
    /// all products in wide buckets and reducing once.
    ///
    /// Returns `None` if the polynomials are not bivariate over a word modulus.
    pub fn mul_flat_2d(&self, a: &Polynomial, b: &Polynomial) -> Option<Polynomial> {
        let (levels, leaf) = self.nesting();
        let Domain::Modular(ring) = leaf else {
            return None;
        };
        let Modulus::Word(m) = ring.modulus() else {
            return None;
        };
        if levels != 2 {
            return None;
        }

        if a.is_zero() || b.is_zero() {
            return Some(Polynomial::zero());
        }

        let (ha, hb) = (self.hull(a), self.hull(b));
        let outer_len = ha.extents[0] + hb.extents[0] - 1;
        let inner_len = ha.extents[1] + hb.extents[1] - 1;

        let ta = bivariate_terms(a);
        let tb = bivariate_terms(b);
        let bound = bits(ta.len().min(tb.len()) as u64) + 2 * bits(*m);

        let len = outer_len * inner_len;
        let flat = if bound <= 64 {
            accumulate_2d::<u64>(&ta, &tb, inner_len, len, *m)
        } else if bound <= 128 {
            accumulate_2d::<u128>(&ta, &tb, inner_len, len, *m)
        } else {
            accumulate_2d::<Wide>(&ta, &tb, inner_len, len, *m)
        };

        trace!(bound, outer_len, inner_len, "flat accumulation");

        let mut leaves: Vec<Element> = flat.into_iter().map(Element::Word).collect();
        Some(unflatten(&mut leaves, &[outer_len, inner_len], &[inner_len, 1], 0, 0))
    }

    /// Multiply by packing all leaves into a single integer at a fixed bit stride.
    ///
    /// Returns `None` if the leaves are not residues.
    pub fn mul_kronecker(&self, a: &Polynomial, b: &Polynomial) -> Option<Polynomial> {
        let (levels, leaf) = self.nesting();
        let Domain::Modular(ring) = leaf else {
            return None;
        };

        if a.is_zero() || b.is_zero() {
            return Some(Polynomial::zero());
        }

        let (ha, hb) = (self.hull(a), self.hull(b));
        let extents: SmallVec<[usize; 4]> = ha
            .extents
            .iter()
            .zip(&hb.extents)
            .map(|(x, y)| x + y - 1)
            .collect();

        let mut strides: SmallVec<[usize; 4]> = smallvec![1; levels];
        for i in (0..levels - 1).rev() {
            strides[i] = strides[i + 1] * extents[i + 1];
        }
        let len = strides[0] * extents[0];

        let slot = (bits(ha.nonzero.min(hb.nonzero) as u64) + 2 * ring.modulus_bits()) as usize;
        trace!(slot, len, "Kronecker substitution");

        let pa = pack(ring, a, &strides, slot, len);
        let pb = pack(ring, b, &strides, slot, len);
        let product = pa * pb;
        let digits = product.to_digits::<u64>(Order::Lsf);

        let mut leaves: Vec<Element> = (0..len)
            .map(|i| ring.to_element(&read_bits(&digits, i * slot, slot)))
            .collect();
        Some(unflatten(&mut leaves, &extents, &strides, 0, 0))
    }
}

fn accumulate_hull(p: &Polynomial, depth: usize, hull: &mut Hull) {
    hull.extents[depth] = hull.extents[depth].max(p.len());
    if depth + 1 == hull.extents.len() {
        hull.nonzero += p.coefficients.iter().filter(|c| !c.is_zero()).count();
    } else {
        for c in &p.coefficients {
            accumulate_hull(c.as_polynomial(), depth + 1, hull);
        }
    }
}

fn bivariate_terms(p: &Polynomial) -> Vec<Term> {
    let mut terms = vec![];
    for (i, c) in p.coefficients.iter().enumerate() {
        for (k, x) in c.as_polynomial().coefficients.iter().enumerate() {
            let x = *x.as_word();
            if x != 0 {
                terms.push((i, k, x));
            }
        }
    }
    terms
}

/// Collect the nonzero leaves with their linear index.
fn flatten<'a>(p: &'a Polynomial, strides: &[usize], depth: usize, offset: usize, out: &mut Vec<(usize, &'a Element)>) {
    for (i, c) in p.coefficients.iter().enumerate() {
        let index = offset + i * strides[depth];
        if depth + 1 == strides.len() {
            if !c.is_zero() {
                out.push((index, c));
            }
        } else {
            flatten(c.as_polynomial(), strides, depth + 1, index, out);
        }
    }
}

/// Rebuild a nested polynomial from a dense array of leaves.
fn unflatten(
    leaves: &mut [Element],
    extents: &[usize],
    strides: &[usize],
    depth: usize,
    offset: usize,
) -> Polynomial {
    let coefficients = (0..extents[depth])
        .map(|i| {
            let index = offset + i * strides[depth];
            if depth + 1 == extents.len() {
                std::mem::replace(&mut leaves[index], Element::Word(0))
            } else {
                Element::Polynomial(unflatten(leaves, extents, strides, depth + 1, index))
            }
        })
        .collect();

    Polynomial::from_coefficients(coefficients)
}

fn pack(ring: &ModularRing, p: &Polynomial, strides: &[usize], slot: usize, len: usize) -> Integer {
    let mut terms = vec![];
    flatten(p, strides, 0, 0, &mut terms);

    let mut limbs = vec![0u64; (len * slot + 63) / 64 + 1];
    for (index, c) in terms {
        match c {
            Element::Word(w) => write_bits(&mut limbs, index * slot, &[*w]),
            _ => write_bits(
                &mut limbs,
                index * slot,
                &ring.to_integer(c).to_digits::<u64>(Order::Lsf),
            ),
        }
    }

    Integer::from_digits::<u64>(&limbs, Order::Lsf)
}
