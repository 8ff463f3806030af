use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use ringtower::domains::{
    fraction::content_recursive,
    generic::{Domain, Element, Z},
    EuclideanDomain, Ring,
};

fn field_polynomial_rings() -> Vec<Domain> {
    vec![
        Domain::polynomial(Domain::fraction(Z), "x"),
        Domain::polynomial(Domain::modular_word(1009), "x"),
    ]
}

fn polynomial_rings() -> Vec<Domain> {
    let mut rings = field_polynomial_rings();
    rings.push(Domain::polynomial(Z, "x"));
    rings.push(Domain::polynomial(Domain::polynomial(Z, "x"), "y"));
    rings
}

fn fraction_rings() -> Vec<Domain> {
    vec![
        Domain::fraction(Domain::polynomial(Z, "x")),
        Domain::fraction(Domain::complex(Z)),
        Domain::fraction(Domain::polynomial(Domain::polynomial(Z, "x"), "y")),
    ]
}

fn arb_polynomial_ring() -> impl Strategy<Value = Domain> {
    (0..polynomial_rings().len()).prop_map(|i| polynomial_rings().swap_remove(i))
}

fn arb_field_polynomial_ring() -> impl Strategy<Value = Domain> {
    (0..field_polynomial_rings().len()).prop_map(|i| field_polynomial_rings().swap_remove(i))
}

fn arb_fraction_ring() -> impl Strategy<Value = Domain> {
    (0..fraction_rings().len()).prop_map(|i| fraction_rings().swap_remove(i))
}

fn is_canonical(ring: &Domain, e: &Element) -> bool {
    let fr = ring.as_fraction_ring();
    let f = e.as_fraction();

    let mut again = (**f).clone();
    fr.canonicalise(&mut again);
    if again != **f {
        return false;
    }

    if f.numerator.is_zero() {
        return fr.base().is_one(&f.denominator);
    }

    let base = fr.base();
    let leaf = base.content_ring();
    let g = leaf.gcd(
        &content_recursive(base, &f.numerator),
        &content_recursive(base, &f.denominator),
    );
    leaf.is_one(&g)
}

// ===== Division with remainder =====

proptest! {
    #[test]
    fn quot_rem_reconstructs_dividend(ring in arb_polynomial_ring(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = ring.mul(&ring.sample(&mut rng, (-20, 20)), &ring.sample(&mut rng, (-20, 20)));
        let b = ring.sample(&mut rng, (-20, 20));
        prop_assume!(!b.is_zero());

        let (q, r) = ring.quot_rem(&a, &b);
        prop_assert!(ring.equal(&ring.add(&ring.mul(&q, &b), &r), &a));
    }
}

proptest! {
    #[test]
    fn remainder_degree_over_fields(ring in arb_field_polynomial_ring(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = ring.mul(&ring.sample(&mut rng, (-20, 20)), &ring.sample(&mut rng, (-20, 20)));
        let b = ring.sample(&mut rng, (-20, 20));
        prop_assume!(!b.is_zero());

        let (q, r) = ring.quot_rem(&a, &b);
        prop_assert!(ring.equal(&ring.add(&ring.mul(&q, &b), &r), &a));
        prop_assert!(r.is_zero() || r.as_polynomial().len() < b.as_polynomial().len());
    }
}

// ===== Canonical fractions =====

proptest! {
    #[test]
    fn sampled_fractions_are_canonical(ring in arb_fraction_ring(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = ring.sample(&mut rng, (-12, 12));
        prop_assert!(is_canonical(&ring, &a));
    }
}

proptest! {
    #[test]
    fn sums_and_products_stay_canonical(ring in arb_fraction_ring(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = ring.sample(&mut rng, (-12, 12));
        let b = ring.sample(&mut rng, (-12, 12));

        prop_assert!(is_canonical(&ring, &ring.add(&a, &b)));
        prop_assert!(is_canonical(&ring, &ring.sub(&a, &b)));
        prop_assert!(is_canonical(&ring, &ring.mul(&a, &b)));
    }
}
