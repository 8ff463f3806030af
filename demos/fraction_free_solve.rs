use ringtower::{
    domains::{generic::Domain, Ring},
    tensors::matrix::Matrix,
};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn solve_integer_system() {
    let m = Domain::matrix(Domain::integer(), 3, 3);
    let r = m.as_matrix_ring();
    let z = r.entry_ring();

    let a = Matrix::from_linear(
        [1, 2, 3, 4, 5, 16, 7, 8, 9].iter().map(|x| z.nth(*x)).collect(),
        3,
        3,
    )
    .unwrap();
    let b = Matrix::new_vec(vec![z.nth(1), z.nth(2), z.nth(3)]);

    let (x, den) = r.solve(&a, &b).unwrap();
    println!("> det = {}", z.printer(&r.det(&a).unwrap()));
    println!("> x = {} / {}", m.printer(&x.into()), z.printer(&den));
}

fn solve_polynomial_system() {
    let zx = Domain::polynomial(Domain::integer(), "x");
    let p = zx.as_polynomial_ring();
    let m = Domain::matrix(zx.clone(), 2, 2);
    let r = m.as_matrix_ring();

    let a = Matrix::from_nested(vec![
        vec![p.from_ints(&[1, 1]).into(), p.from_ints(&[0, 2]).into()],
        vec![p.from_ints(&[3]).into(), p.from_ints(&[-1, 0, 1]).into()],
    ])
    .unwrap();

    let (inv, den) = r.inverse(&a).unwrap();
    println!("> A = {}", m.printer(&a.clone().into()));
    println!("> A^-1 = {} / {}", m.printer(&inv.into()), zx.printer(&den));

    let n = r.nullspace(&Matrix::from_nested(vec![vec![
        p.from_ints(&[1, 1]).into(),
        p.from_ints(&[0, 2]).into(),
    ]]).unwrap());
    println!("> kernel of the first row = {}", m.printer(&n.into()));
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("RINGTOWER_LOG"))
        .init();

    solve_integer_system();
    solve_polynomial_system();
}
