use ringtower::{
    domains::{
        fraction::Fraction,
        generic::{Domain, Element},
        Field, Ring,
    },
    printer::PrintOptions,
};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("RINGTOWER_LOG"))
        .init();

    // Frac(Z[x])[y]
    let zx = Domain::polynomial(Domain::integer(), "x");
    let fx = Domain::fraction_with_gcd_reduction(zx.clone());
    let ring = Domain::polynomial(fx.clone(), "y");
    let x = zx.as_polynomial_ring();
    let r = ring.as_polynomial_ring();

    let f = fx.as_fraction_ring();
    let c: Fraction = f.to_element(x.from_ints(&[1, 1]).into(), x.from_ints(&[-1, 0, 1]).into(), true);
    let p = r.from_coefficients(vec![c.into(), fx.one()]);
    let q = r.pow(&p, 3);

    println!("> ring = {}", ring);
    let q: Element = q.into();
    println!("> ({})^3 = {}", ring.printer(&p.into()), ring.printer(&q));

    let mut printer = ring.printer(&q);
    printer.opts = PrintOptions::pretty();
    println!("> {}", printer);

    // Gaussian integers and a finite field extension
    let zi = Domain::complex(Domain::integer());
    let a = zi.sample(&mut rand::thread_rng(), (-10, 10));
    println!("> a = {}, a^4 = {}", zi.printer(&a), zi.printer(&zi.pow(&a, 4)));

    let f49 = Domain::complex(Domain::modular_word(7));
    let b = f49.nth(3);
    println!("> 1/3 in {} = {}", f49, f49.printer(&f49.inv(&b)));
}
