use tracing::{debug, trace};

use crate::domains::{EuclideanDomain, Ring, RingError};

use super::dense::{Polynomial, PolynomialRing};

impl PolynomialRing {
    /// Schoolbook long division. Every step divides the leading coefficient of the
    /// running remainder by the leading coefficient of `b`. If that division is not
    /// exact, the division stops and returns the partial quotient and remainder, which
    /// still satisfy `q * b + r = a`.
    pub fn quot_rem_basecase(&self, a: &Polynomial, b: &Polynomial) -> (Polynomial, Polynomial) {
        if b.is_zero() {
            panic!("{}", RingError::DivisionByZero);
        }

        if a.len() < b.len() {
            return (Polynomial::zero(), a.clone());
        }

        let lc = &b.coefficients[b.len() - 1];
        let mut q = vec![self.ring.zero(); a.len() - b.len() + 1];
        let mut r = a.clone();

        while r.len() >= b.len() {
            let shift = r.len() - b.len();
            let Some(c) = self.ring.try_div(&r.coefficients[r.len() - 1], lc) else {
                break;
            };

            for (i, bc) in b.coefficients[..b.len() - 1].iter().enumerate() {
                self.ring.sub_mul_assign(&mut r.coefficients[shift + i], &c, bc);
            }
            r.coefficients.pop();
            r.truncate();

            q[shift] = c;
        }

        (Polynomial::from_coefficients(q), r)
    }

    /// Division through the power series inverse of the reversed divisor.
    ///
    /// Returns `None` if the leading coefficient of `b` is not a unit.
    pub fn quot_rem_newton(&self, a: &Polynomial, b: &Polynomial) -> Option<(Polynomial, Polynomial)> {
        if b.is_zero() {
            panic!("{}", RingError::DivisionByZero);
        }

        if a.len() < b.len() {
            return Some((Polynomial::zero(), a.clone()));
        }

        let k = a.len() - b.len() + 1;
        debug!(len_a = a.len(), len_b = b.len(), "Newton division");

        let rev_b = Polynomial::from_coefficients(b.coefficients.iter().rev().cloned().collect());
        let inv = self.inverse_series(&rev_b, k)?;

        let rev_a = Polynomial::from_coefficients(a.coefficients.iter().rev().take(k).cloned().collect());
        let mut q_rev = self.mul(&rev_a, &inv);
        q_rev.truncate_degree(k);
        q_rev.coefficients.resize(k, self.ring.zero());
        q_rev.coefficients.reverse();

        let q = Polynomial::from_coefficients(q_rev.coefficients);
        let r = self.sub(a, &self.mul(&q, b));
        Some((q, r))
    }

    /// Compute `g` with `f * g = 1 mod x^n` by Newton iteration `g <- g * (2 - f * g)`,
    /// doubling the precision in every step.
    ///
    /// Returns `None` if the constant term of `f` is not a unit.
    pub fn inverse_series(&self, f: &Polynomial, n: usize) -> Option<Polynomial> {
        let f0 = f.coefficients.first()?;
        let mut g = self.constant(self.ring.try_inv(f0)?);

        let two = self.nth(2);
        let mut precision = 1;
        while precision < n {
            precision = (2 * precision).min(n);

            let f_low =
                Polynomial::from_coefficients(f.coefficients.iter().take(precision).cloned().collect());
            let mut e = self.mul(&f_low, &g);
            e.truncate_degree(precision);
            let e = self.sub(&two, &e);

            g = self.mul(&g, &e);
            g.truncate_degree(precision);
            trace!(precision, "Newton step");
        }

        g.truncate_degree(n);
        Some(g)
    }

    /// Pseudo-division of `a` by `b`: returns `(q, r, d)` such that
    /// `lcoeff(b)^d * a = q * b + r` with `deg r < deg b`. `d` is the number of
    /// reduction steps, which is at most `deg a - deg b + 1`.
    pub fn pseudo_quot_rem(&self, a: &Polynomial, b: &Polynomial) -> (Polynomial, Polynomial, u64) {
        if b.is_zero() {
            panic!("{}", RingError::DivisionByZero);
        }

        if a.len() < b.len() {
            return (Polynomial::zero(), a.clone(), 0);
        }

        let lc = self.lcoeff(b);
        let mut q = vec![self.ring.zero(); a.len() - b.len() + 1];
        let mut r = a.clone();
        let mut d = 0;

        while !r.is_zero() && r.len() >= b.len() {
            let shift = r.len() - b.len();
            let Some(c) = r.coefficients.pop() else {
                break;
            };

            for x in &mut r.coefficients {
                self.ring.mul_assign(x, &lc);
            }
            for (i, bc) in b.coefficients[..b.len() - 1].iter().enumerate() {
                self.ring.sub_mul_assign(&mut r.coefficients[shift + i], &c, bc);
            }
            r.truncate();

            for x in &mut q[shift + 1..] {
                self.ring.mul_assign(x, &lc);
            }
            q[shift] = c;
            d += 1;
        }

        (Polynomial::from_coefficients(q), r, d)
    }

    /// The pseudo-remainder `lcoeff(b)^(deg a - deg b + 1) * a mod b`.
    pub fn pseudo_rem(&self, a: &Polynomial, b: &Polynomial) -> Polynomial {
        if a.len() < b.len() {
            return a.clone();
        }

        let (_, r, d) = self.pseudo_quot_rem(a, b);
        let full = (a.len() - b.len() + 1) as u64;
        if d == full || r.is_zero() {
            r
        } else {
            let s = self.ring.pow(&self.lcoeff(b), full - d);
            self.mul_coeff(&r, &s)
        }
    }

    /// Divide `a` by `b`, failing when `b` is zero or does not divide `a`.
    pub fn try_divexact(&self, a: &Polynomial, b: &Polynomial) -> Result<Polynomial, RingError> {
        if b.is_zero() {
            return Err(RingError::DivisionByZero);
        }

        if a.is_zero() {
            return Ok(Polynomial::zero());
        }

        if a.len() < b.len() {
            return Err(RingError::InexactDivision);
        }

        if b.len() == 1 {
            let c = &b.coefficients[0];
            let mut q = Vec::with_capacity(a.len());
            for x in &a.coefficients {
                q.push(self.ring.try_divexact(x, c)?);
            }
            return Ok(Polynomial::from_coefficients(q));
        }

        let (q, r) = self.quot_rem(a, b);
        if r.is_zero() {
            Ok(q)
        } else {
            Err(RingError::InexactDivision)
        }
    }

    /// Divide `a` by `b`, panicking when the division is not exact.
    pub fn divexact(&self, a: &Polynomial, b: &Polynomial) -> Polynomial {
        self.try_divexact(a, b)
            .unwrap_or_else(|e| panic!("{}: polynomial division in {}", e, self))
    }

    /// Returns `true` if `b` divides `a`.
    pub fn divides(&self, a: &Polynomial, b: &Polynomial) -> bool {
        !b.is_zero() && self.try_divexact(a, b).is_ok()
    }
}
