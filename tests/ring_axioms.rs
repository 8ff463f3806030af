use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use rug::Integer;

use ringtower::domains::{
    generic::{Domain, Z},
    Ring,
};

fn rings() -> Vec<Domain> {
    let zx = Domain::polynomial(Z, "x");
    vec![
        Z,
        Domain::word(),
        Domain::modular_word(7),
        Domain::modular_word(18446744073709551557),
        Domain::modular_integer(Integer::from(Integer::u_pow_u(2, 70)) + 1),
        Domain::fraction(Z),
        zx.clone(),
        Domain::fraction(zx.clone()),
        Domain::fraction_with_gcd_reduction(zx.clone()),
        Domain::polynomial(Domain::fraction(Z), "x"),
        Domain::polynomial(Domain::polynomial(Domain::modular_word(5), "x"), "y"),
        Domain::complex(Z),
        Domain::complex(Domain::fraction(Z)),
        Domain::matrix(Z, 2, 2),
        Domain::matrix(zx, 2, 2),
    ]
}

fn arb_ring() -> impl Strategy<Value = Domain> {
    (0..rings().len()).prop_map(|i| rings().swap_remove(i))
}

proptest! {
    #[test]
    fn addition_commutative(ring in arb_ring(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = ring.sample(&mut rng, (-100, 100));
        let b = ring.sample(&mut rng, (-100, 100));
        prop_assert!(ring.equal(&ring.add(&a, &b), &ring.add(&b, &a)));
    }
}

proptest! {
    #[test]
    fn addition_associative(ring in arb_ring(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = ring.sample(&mut rng, (-100, 100));
        let b = ring.sample(&mut rng, (-100, 100));
        let c = ring.sample(&mut rng, (-100, 100));
        prop_assert!(ring.equal(
            &ring.add(&ring.add(&a, &b), &c),
            &ring.add(&a, &ring.add(&b, &c))
        ));
    }
}

proptest! {
    #[test]
    fn distributive(ring in arb_ring(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = ring.sample(&mut rng, (-100, 100));
        let b = ring.sample(&mut rng, (-100, 100));
        let c = ring.sample(&mut rng, (-100, 100));
        prop_assert!(ring.equal(
            &ring.mul(&a, &ring.add(&b, &c)),
            &ring.add(&ring.mul(&a, &b), &ring.mul(&a, &c))
        ));
    }
}

proptest! {
    #[test]
    fn additive_inverse(ring in arb_ring(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = ring.sample(&mut rng, (-100, 100));
        prop_assert!(ring.add(&a, &ring.neg(&a)).is_zero());
        prop_assert!(ring.equal(&ring.sub(&a, &a), &ring.zero()));
    }
}

proptest! {
    #[test]
    fn multiplicative_identity(ring in arb_ring(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = ring.sample(&mut rng, (-100, 100));
        prop_assert!(ring.equal(&ring.mul(&a, &ring.one()), &a));
        prop_assert!(ring.equal(&ring.mul(&ring.one(), &a), &a));
    }
}

proptest! {
    #[test]
    fn power_is_repeated_multiplication(ring in arb_ring(), seed in any::<u64>(), e in 0u64..6) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = ring.sample(&mut rng, (-10, 10));
        let mut r = ring.one();
        for _ in 0..e {
            r = ring.mul(&r, &a);
        }
        prop_assert!(ring.equal(&ring.pow(&a, e), &r));
    }
}

proptest! {
    #[test]
    fn assign_forms_match_fresh_storage(ring in arb_ring(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = ring.sample(&mut rng, (-100, 100));
        let b = ring.sample(&mut rng, (-100, 100));
        let c = ring.sample(&mut rng, (-100, 100));

        let mut r = a.clone();
        ring.add_assign(&mut r, &b);
        prop_assert!(ring.equal(&r, &ring.add(&a, &b)));

        let mut r = a.clone();
        ring.sub_assign(&mut r, &b);
        prop_assert!(ring.equal(&r, &ring.sub(&a, &b)));

        let mut r = a.clone();
        ring.mul_assign(&mut r, &b);
        prop_assert!(ring.equal(&r, &ring.mul(&a, &b)));

        // the output coincides with both inputs
        let mut r = a.clone();
        let s = r.clone();
        ring.mul_assign(&mut r, &s);
        prop_assert!(ring.equal(&r, &ring.mul(&a, &a)));

        let mut r = a.clone();
        ring.add_mul_assign(&mut r, &b, &c);
        prop_assert!(ring.equal(&r, &ring.add(&a, &ring.mul(&b, &c))));

        let mut r = a.clone();
        ring.sub_mul_assign(&mut r, &b, &c);
        prop_assert!(ring.equal(&r, &ring.sub(&a, &ring.mul(&b, &c))));
    }
}
