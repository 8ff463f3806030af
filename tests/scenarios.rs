use rug::Integer;

use ringtower::{
    domains::{
        fraction::content_recursive,
        generic::{Domain, Element, Z},
        EuclideanDomain, Field, Ring,
    },
    poly::{MulStrategy, PolynomialConfig},
    tensors::matrix::Matrix,
};

// ===== Fractions =====

#[test]
fn difference_of_squares_over_rational_polynomials() {
    let q = Domain::fraction(Z);
    let qx = Domain::polynomial(q.clone(), "x");
    let r = qx.as_polynomial_ring();

    let half = q.div(&q.one(), &q.nth(2));
    let a = r.from_coefficients(vec![half.clone(), q.one()]);
    let b = r.from_coefficients(vec![q.neg(&half), q.one()]);
    let p = r.mul(&a, &b);

    assert_eq!(p.degree(), 2);
    assert!(p.coefficients[1].is_zero());
    let c = p.coefficients[0].as_fraction();
    assert_eq!(c.numerator, Element::Integer(Integer::from(-1)));
    assert_eq!(c.denominator, Element::Integer(Integer::from(4)));

    let p: Element = p.into();
    assert_eq!(qx.printer(&p).to_string(), "x^2-1/4");
}

#[test]
fn difference_of_squares_over_polynomial_fractions() {
    let zx = Domain::polynomial(Z, "x");
    let f = Domain::fraction(zx.clone());
    let x = zx.as_polynomial_ring();
    let fr = f.as_fraction_ring();

    // x + 1/2 = (2x + 1)/2
    let a: Element = fr
        .to_element(x.from_ints(&[1, 2]).into(), x.from_ints(&[2]).into(), true)
        .into();
    let b: Element = fr
        .to_element(x.from_ints(&[-1, 2]).into(), x.from_ints(&[2]).into(), true)
        .into();
    let p = f.mul(&a, &b);

    let p = p.as_fraction();
    assert_eq!(p.numerator, x.from_ints(&[-1, 0, 4]).into());
    assert_eq!(p.denominator, x.from_ints(&[4]).into());
}

#[test]
fn canonical_integer_fractions() {
    let q = Domain::fraction(Z);
    let fr = q.as_fraction_ring();

    let mut f = fr.to_element(Z.nth(6), Z.nth(-4), true);
    assert_eq!(f.numerator, Z.nth(-3));
    assert_eq!(f.denominator, Z.nth(2));

    let before = f.clone();
    fr.canonicalise(&mut f);
    assert_eq!(f, before);

    let zero = fr.to_element(Z.zero(), Z.nth(-7), true);
    assert_eq!(zero.denominator, Z.one());
}

#[test]
fn canonical_polynomial_fractions() {
    let zx = Domain::polynomial(Z, "x");
    let x = zx.as_polynomial_ring();

    // (2x + 2) / (-4x) has content 2 and a negative leading denominator coefficient
    let f = Domain::fraction(zx.clone());
    let c = f.as_fraction_ring().to_element(
        x.from_ints(&[2, 2]).into(),
        x.from_ints(&[0, -4]).into(),
        true,
    );
    assert_eq!(c.numerator, x.from_ints(&[-1, -1]).into());
    assert_eq!(c.denominator, x.from_ints(&[0, 2]).into());

    let g = Z.gcd(
        &content_recursive(&zx, &c.numerator),
        &content_recursive(&zx, &c.denominator),
    );
    assert_eq!(g, Z.one());

    // content removal alone keeps the common factor x + 1
    let num: Element = x.from_ints(&[-1, 0, 1]).into();
    let den: Element = x.from_ints(&[1, 1]).into();
    let c = f.as_fraction_ring().to_element(num.clone(), den.clone(), true);
    assert_eq!(c.denominator, den);

    let f = Domain::fraction_with_gcd_reduction(zx.clone());
    let c = f.as_fraction_ring().to_element(num, den, true);
    assert_eq!(c.numerator, x.from_ints(&[-1, 1]).into());
    assert_eq!(c.denominator, zx.one());
}

// ===== Linear algebra =====

#[test]
fn empty_determinant() {
    for entries in [Z, Domain::polynomial(Z, "x"), Domain::modular_word(7)] {
        let m = Domain::matrix(entries.clone(), 0, 0);
        let r = m.as_matrix_ring();
        let empty = Matrix::from_linear(vec![], 0, 0).unwrap();
        assert_eq!(r.det(&empty), Ok(entries.one()));
    }
}

#[test]
fn empty_system() {
    let m = Domain::matrix(Z, 0, 0);
    let r = m.as_matrix_ring();
    let a = Matrix::from_linear(vec![], 0, 0).unwrap();
    let b = Matrix::from_linear(vec![], 0, 3).unwrap();

    let (x, den) = r.solve(&a, &b).unwrap();
    assert_eq!(den, Z.one());
    assert_eq!(x.shape(), (0, 3));
}

#[test]
fn singular_system() {
    let m = Domain::matrix(Z, 2, 2);
    let r = m.as_matrix_ring();
    let a = Matrix::from_linear([1, 2, 2, 4].iter().map(|x| Z.nth(*x)).collect(), 2, 2).unwrap();
    let b = Matrix::new_vec(vec![Z.one(), Z.one()]);

    let (_, den) = r.solve(&a, &b).unwrap();
    assert!(den.is_zero());

    // singularity does not depend on the right-hand side having columns
    let none = Matrix::from_linear(vec![], 2, 0).unwrap();
    let (x, den) = r.solve(&a, &none).unwrap();
    assert!(den.is_zero());
    assert_eq!(x.shape(), (2, 0));

    let regular = Matrix::from_linear([1, 2, 3, 4].iter().map(|x| Z.nth(*x)).collect(), 2, 2).unwrap();
    let (_, den) = r.solve(&regular, &none).unwrap();
    assert!(!den.is_zero());
}

// ===== Arithmetic =====

#[test]
fn residues_are_reduced() {
    let zp = Domain::modular_word(7);
    assert_eq!(zp.nth(-1), Element::Word(6));
    assert_eq!(zp.inv(&zp.nth(3)), Element::Word(5));
    assert_eq!(zp.characteristic(), 7);

    let big = Domain::modular_integer(Integer::from(1_000_000_007));
    assert_eq!(big.nth(-2), Element::Integer(Integer::from(1_000_000_005)));
    assert_eq!(
        big.mul(&big.inv(&big.nth(2)), &big.nth(2)),
        big.one()
    );
}

#[test]
fn words_wrap() {
    let w = Domain::word();
    assert_eq!(w.add(&Element::Word(u64::MAX), &w.one()), Element::Word(0));
    assert_eq!(w.neg(&w.one()), Element::Word(u64::MAX));
}

#[test]
fn gaussian_integers() {
    let zi = Domain::complex(Z);
    let c = zi.as_complex_ring();

    // (1 + 2i)^2 = -3 + 4i
    let a: Element = ringtower::domains::complex::Complex::new(Z.one(), Z.nth(2)).into();
    let sq = zi.pow(&a, 2);
    assert_eq!(sq.as_complex().re, Z.nth(-3));
    assert_eq!(sq.as_complex().im, Z.nth(4));
    assert_eq!(c.norm(a.as_complex()), Z.nth(5));
}

#[test]
fn dense_bivariate_kernels() {
    let zp = Domain::modular_word(65521);
    let zpx = Domain::polynomial(zp.clone(), "x");
    let zpxy = Domain::polynomial_with_config(zpx.clone(), "y", PolynomialConfig::default());
    assert_eq!(zpxy, Domain::polynomial(zpx.clone(), "y"));
    let x = zpx.as_polynomial_ring();
    let r = zpxy.as_polynomial_ring();

    // dense operands of degree 60 in y select Kronecker substitution
    let a = r.from_coefficients(
        (0..61)
            .map(|i| x.from_ints(&[i + 1, 2 * i - 3, 5]).into())
            .collect(),
    );
    let b = r.from_coefficients(
        (0..61)
            .map(|i| x.from_ints(&[7, -i, 1]).into())
            .collect(),
    );

    assert_eq!(r.select_mul_strategy(&a, &b), MulStrategy::Kronecker);
    assert_eq!(r.mul(&a, &b), r.mul_classical(&a, &b));

    let ab = r.mul(&a, &b);
    assert_eq!(r.divexact(&ab, &a), b);
}
