use tracing::{instrument, trace};

use crate::domains::{generic::Element, EuclideanDomain, Ring};

use super::dense::{Polynomial, PolynomialRing};

impl PolynomialRing {
    /// The gcd of all coefficients.
    pub fn content(&self, p: &Polynomial) -> Element {
        let mut c = self.ring.zero();
        for x in &p.coefficients {
            if self.ring.is_one(&c) {
                break;
            }
            c = self.ring.gcd(&c, x);
        }
        c
    }

    /// Divide out the content.
    pub fn primitive_part(&self, p: &Polynomial) -> Polynomial {
        let c = self.content(p);
        if c.is_zero() {
            return p.clone();
        }
        self.divexact_coeff(p, &c)
    }

    /// Compute the gcd of `a` and `b` with the subresultant pseudo-remainder sequence.
    /// Coefficient growth is controlled by dividing every pseudo-remainder by `g * h^delta`,
    /// where `g` is the leading coefficient of the previous divisor and `h` is updated as
    /// `g^delta / h^(delta - 1)`.
    ///
    /// The result is unit normal.
    #[instrument(level = "trace", skip_all)]
    pub fn gcd_subresultant(&self, a: &Polynomial, b: &Polynomial) -> Polynomial {
        if a.is_zero() {
            return self.normalize(b);
        }
        if b.is_zero() {
            return self.normalize(a);
        }

        let (a, b) = if a.len() >= b.len() { (a, b) } else { (b, a) };

        if b.len() == 1 {
            let g = self.ring.gcd(&self.content(a), &b.coefficients[0]);
            return self.normalize(&self.constant(g));
        }

        let ca = self.content(a);
        let cb = self.content(b);
        let d = self.ring.gcd(&ca, &cb);

        let mut a = self.divexact_coeff(a, &ca);
        let mut b = self.divexact_coeff(b, &cb);

        let mut g = self.ring.one();
        let mut h = self.ring.one();
        loop {
            let delta = (a.len() - b.len()) as u64;
            let r = self.pseudo_rem(&a, &b);
            trace!(deg_a = a.degree(), deg_b = b.degree(), deg_r = r.degree(), "subresultant step");

            if r.is_zero() {
                break;
            }

            if r.len() == 1 {
                b = self.one();
                break;
            }

            let s = self.ring.mul(&g, &self.ring.pow(&h, delta));
            a = std::mem::replace(&mut b, self.divexact_coeff(&r, &s));

            g = self.lcoeff(&a);
            h = match delta {
                0 => h,
                1 => g.clone(),
                _ => self
                    .ring
                    .divexact(&self.ring.pow(&g, delta), &self.ring.pow(&h, delta - 1)),
            };
        }

        let b = self.primitive_part(&b);
        self.normalize(&self.mul_coeff(&b, &d))
    }

    /// Compute the gcd together with the cofactors `a / gcd` and `b / gcd`.
    pub fn gcd_with_cofactors(&self, a: &Polynomial, b: &Polynomial) -> (Polynomial, Polynomial, Polynomial) {
        let g = self.gcd(a, b);
        if g.is_zero() {
            return (g, Polynomial::zero(), Polynomial::zero());
        }

        let ca = self.divexact(a, &g);
        let cb = self.divexact(b, &g);
        (g, ca, cb)
    }

    /// Returns `true` if the coefficient ring is a field, so that the gcd is monic.
    pub fn has_field_coefficients(&self) -> bool {
        self.ring.is_field()
    }
}
