use proptest::prelude::*;

use ringtower::{
    domains::{
        generic::{Domain, Element, Z},
        EuclideanDomain, Ring,
    },
    poly::dense::Polynomial,
    tensors::matrix::Matrix,
};

fn arb_int_matrix(n: usize, m: usize) -> impl Strategy<Value = Matrix> {
    prop::collection::vec(-5i64..=5, n * m)
        .prop_map(move |v| Matrix::from_linear(v.into_iter().map(|x| Z.nth(x)).collect(), n, m).unwrap())
}

fn zx() -> Domain {
    Domain::polynomial(Z, "x")
}

fn arb_int_poly(max_len: usize) -> impl Strategy<Value = Polynomial> {
    prop::collection::vec(-20i64..=20, 0..=max_len)
        .prop_map(|v| zx().as_polynomial_ring().from_ints(&v))
}

fn arb_poly_matrix(n: usize) -> impl Strategy<Value = Matrix> {
    prop::collection::vec(arb_int_poly(3), n * n).prop_map(move |v| {
        Matrix::from_linear(v.into_iter().map(Element::from).collect(), n, n).unwrap()
    })
}

fn arb_residue_poly(outer: usize, inner: usize) -> impl Strategy<Value = Polynomial> {
    prop::collection::vec(prop::collection::vec(0i64..1000, 0..=inner), 0..=outer).prop_map(|v| {
        let zp = Domain::modular_word(1009);
        let zpx = Domain::polynomial(zp, "x");
        let x = zpx.as_polynomial_ring();
        Polynomial::from_coefficients(v.iter().map(|c| x.from_ints(c).into()).collect())
    })
}

fn bivariate_ring() -> Domain {
    Domain::polynomial(Domain::polynomial(Domain::modular_word(1009), "x"), "y")
}

// ===== Determinants =====

proptest! {
    #[test]
    fn det_is_multiplicative(a in arb_poly_matrix(3), b in arb_poly_matrix(3)) {
        let m = Domain::matrix(zx(), 3, 3);
        let r = m.as_matrix_ring();
        let ring = r.entry_ring();

        let ab = r.mul(&a, &b);
        let lhs = ring.mul(&r.det(&a).unwrap(), &r.det(&b).unwrap());
        prop_assert_eq!(r.det(&ab).unwrap(), lhs);
    }
}

proptest! {
    #[test]
    fn det_of_transpose(a in arb_int_matrix(4, 4)) {
        let m = Domain::matrix(Z, 4, 4);
        let r = m.as_matrix_ring();
        prop_assert_eq!(r.det(&a).unwrap(), r.det(&a.transpose()).unwrap());
    }
}

// ===== Kernel and rank =====

proptest! {
    #[test]
    fn nullspace_is_annihilated(a in arb_int_matrix(3, 5)) {
        let m = Domain::matrix(Z, 3, 5);
        let r = m.as_matrix_ring();

        let n = r.nullspace(&a);
        let rank = r.rank(&a);
        prop_assert_eq!(n.nrows, 5);
        prop_assert_eq!(rank + n.ncols, 5);
        prop_assert!(r.mul(&a, &n).is_zero());
        prop_assert_eq!(r.rank(&n), n.ncols);
    }
}

proptest! {
    #[test]
    fn rref_preserves_rank(a in arb_int_matrix(4, 3)) {
        let m = Domain::matrix(Z, 4, 3);
        let r = m.as_matrix_ring();

        let rref = r.rref(&a);
        prop_assert_eq!(rref.rank, r.rank(&a));
        for (i, &p) in rref.pivots.iter().enumerate() {
            prop_assert_eq!(&rref.matrix[(i, p)], &rref.den);
        }
    }
}

// ===== Solving =====

proptest! {
    #[test]
    fn solution_satisfies_system(a in arb_int_matrix(3, 3), b in arb_int_matrix(3, 2)) {
        let m = Domain::matrix(Z, 3, 3);
        let r = m.as_matrix_ring();

        let (x, den) = r.solve(&a, &b).unwrap();
        if den.is_zero() {
            prop_assert!(r.det(&a).unwrap().is_zero());
        } else {
            prop_assert_eq!(r.mul(&a, &x), r.mul_scalar(&b, &den));
        }
    }
}

proptest! {
    #[test]
    fn polynomial_inverse(a in arb_poly_matrix(2)) {
        let m = Domain::matrix(zx(), 2, 2);
        let r = m.as_matrix_ring();

        let (inv, den) = r.inverse(&a).unwrap();
        if !den.is_zero() {
            prop_assert_eq!(r.mul(&a, &inv), r.scalar(2, &den));
        }
    }
}

// ===== Polynomial division =====

proptest! {
    #[test]
    fn pseudo_division_identity(a in arb_int_poly(8), b in arb_int_poly(4)) {
        prop_assume!(!b.is_zero());
        let zx = zx();
        let r = zx.as_polynomial_ring();

        let (q, rem, d) = r.pseudo_quot_rem(&a, &b);
        let lhs = r.mul_coeff(&a, &Z.pow(&r.lcoeff(&b), d));
        prop_assert_eq!(lhs, r.add(&r.mul(&q, &b), &rem));
        prop_assert!(rem.is_zero() || rem.len() < b.len());
    }
}

proptest! {
    #[test]
    fn exact_quotient_is_recovered(a in arb_int_poly(6), b in arb_int_poly(5)) {
        prop_assume!(!b.is_zero());
        let zx = zx();
        let r = zx.as_polynomial_ring();

        let ab = r.mul(&a, &b);
        prop_assert_eq!(r.divexact(&ab, &b), a);
    }
}

proptest! {
    #[test]
    fn gcd_divides_both(a in arb_int_poly(5), b in arb_int_poly(5), c in arb_int_poly(3)) {
        prop_assume!(!c.is_zero());
        let zx = zx();
        let r = zx.as_polynomial_ring();

        let (a, b) = (r.mul(&a, &c), r.mul(&b, &c));
        let g = r.gcd(&a, &b);
        if !g.is_zero() {
            prop_assert!(r.divides(&a, &g));
            prop_assert!(r.divides(&b, &g));
            prop_assert!(r.divides(&g, &r.primitive_part(&c)));
        }
    }
}

proptest! {
    #[test]
    fn newton_matches_basecase(a in prop::collection::vec(0i64..101, 40..60), b in prop::collection::vec(0i64..101, 2..6)) {
        let zp = Domain::polynomial(Domain::modular_word(101), "x");
        let r = zp.as_polynomial_ring();

        let mut b = r.from_ints(&b);
        b.coefficients.push(r.coefficient_ring().one());
        let a = r.from_ints(&a);

        let newton = r.quot_rem_newton(&a, &b);
        prop_assert_eq!(newton, Some(r.quot_rem_basecase(&a, &b)));
    }
}

// ===== Multiplication kernels =====

proptest! {
    #[test]
    fn kernels_agree(a in arb_residue_poly(8, 8), b in arb_residue_poly(8, 8)) {
        let ring = bivariate_ring();
        let r = ring.as_polynomial_ring();

        let classical = r.mul_classical(&a, &b);
        prop_assert_eq!(r.mul_flat_2d(&a, &b), Some(classical.clone()));
        prop_assert_eq!(r.mul_kronecker(&a, &b), Some(classical.clone()));
        prop_assert_eq!(r.mul(&a, &b), classical);
    }
}

proptest! {
    #[test]
    fn mul_assign_with_itself(a in arb_residue_poly(6, 6)) {
        let ring = bivariate_ring();
        let r = ring.as_polynomial_ring();

        let mut s = a.clone();
        let t = s.clone();
        r.mul_assign(&mut s, &t);
        prop_assert_eq!(s, r.mul_classical(&a, &a));
    }
}
