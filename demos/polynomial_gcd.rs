use ringtower::domains::{
    generic::{Domain, Element},
    EuclideanDomain, Ring,
};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn gcd_integer_poly() {
    let zx = Domain::polynomial(Domain::integer(), "x");
    let r = zx.as_polynomial_ring();

    // (3x^2 + 5x - 2)(x + 4) and (3x^2 + 5x - 2)(2x^2 - 7)
    let common = r.from_ints(&[-2, 5, 3]);
    let a: Element = r.mul(&common, &r.from_ints(&[4, 1])).into();
    let b: Element = r.mul(&common, &r.from_ints(&[-7, 0, 2])).into();

    println!("> Polynomial gcd of {} and {} =", zx.printer(&a), zx.printer(&b));
    println!("\t{}", zx.printer(&zx.gcd(&a, &b)));
}

fn gcd_bivariate_poly() {
    let zx = Domain::polynomial(Domain::integer(), "x");
    let zxy = Domain::polynomial(zx.clone(), "y");
    let x = zx.as_polynomial_ring();
    let r = zxy.as_polynomial_ring();

    // (x*y + 1)^2 (y - x) and (x*y + 1)(y^2 + 2)
    let common = r.from_coefficients(vec![zx.one(), x.variable().into()]);
    let a = r.mul(
        &r.pow(&common, 2),
        &r.from_coefficients(vec![zx.neg(&x.variable().into()), zx.one()]),
    );
    let b = r.mul(
        &common,
        &r.from_coefficients(vec![zx.nth(2), zx.zero(), zx.one()]),
    );

    let (a, b): (Element, Element) = (a.into(), b.into());
    println!("> Polynomial gcd of {} and {} =", zxy.printer(&a), zxy.printer(&b));
    println!("\t{}", zxy.printer(&zxy.gcd(&a, &b)));
}

fn gcd_modular_poly() {
    let zp = Domain::modular_word(65521);
    let px = Domain::polynomial(zp, "x");
    let r = px.as_polynomial_ring();

    let a = r.pow(&r.from_ints(&[3, 1]), 40);
    let b = r.mul(&r.pow(&r.from_ints(&[3, 1]), 7), &r.from_ints(&[1, 0, 0, 1]));

    println!("> gcd over {} has degree {}", px, r.gcd(&a, &b).degree());
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("RINGTOWER_LOG"))
        .init();

    gcd_integer_poly();
    gcd_bivariate_poly();
    gcd_modular_poly();
}
