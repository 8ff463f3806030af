use tracing::debug;

use crate::domains::{generic::Element, Ring};

use super::matrix::{Matrix, MatrixError, MatrixRing};

/// A fraction-free LU decomposition, computed with Bareiss elimination.
///
/// Row `i` of `lu` with `i < rank` holds the scaled echelon row with its pivot in column
/// `pivots[i]`. The entries below each pivot hold the elimination multipliers.
#[derive(Clone, Debug)]
pub struct Fflu {
    pub lu: Matrix,
    /// Row `i` of `lu` is row `perm[i]` of the input.
    pub perm: Vec<usize>,
    pub pivots: Vec<usize>,
    pub rank: usize,
    /// The last pivot, or one if there is none.
    pub den: Element,
    /// Returns `true` if the permutation is odd.
    pub odd_permutation: bool,
}

/// A reduced row echelon form `matrix / den`, where `matrix` has `den` at every pivot.
#[derive(Clone, Debug)]
pub struct Rref {
    pub matrix: Matrix,
    pub den: Element,
    pub rank: usize,
    pub pivots: Vec<usize>,
}

impl MatrixRing {
    /// Compute the fraction-free LU decomposition of `a`. The pivot is the first
    /// nonzero entry in the current column. After every pivot `p` at `(r, c)`, each
    /// remaining entry is updated as `(M[i][j] * p - M[i][c] * M[r][j]) / prev`, where
    /// `prev` is the previous pivot. The division is exact.
    pub fn fflu(&self, a: &Matrix) -> Fflu {
        let ring = &*self.ring;
        let (m, n) = a.shape();

        let mut lu = a.clone();
        let mut perm: Vec<usize> = (0..m).collect();
        let mut pivots = vec![];
        let mut odd_permutation = false;
        let mut den = ring.one();

        let (mut pr, mut pc) = (0, 0);
        while pr < m && pc < n {
            let Some(r) = (pr..m).find(|&r| !lu[(r, pc)].is_zero()) else {
                pc += 1;
                continue;
            };

            if r != pr {
                lu.swap_rows(r, pr);
                perm.swap(r, pr);
                odd_permutation = !odd_permutation;
            }

            let p = lu[(pr, pc)].clone();
            for j in pr + 1..m {
                for k in pc + 1..n {
                    let mut t = ring.mul(&lu[(j, k)], &p);
                    ring.sub_mul_assign(&mut t, &lu[(j, pc)], &lu[(pr, k)]);
                    if pr > 0 {
                        t = ring.divexact(&t, &den);
                    }
                    lu[(j, k)] = t;
                }
            }

            pivots.push(pc);
            den = p;
            pr += 1;
            pc += 1;
        }

        debug!(rows = m, cols = n, rank = pivots.len(), "fraction-free LU");

        Fflu {
            lu,
            perm,
            rank: pivots.len(),
            pivots,
            den,
            odd_permutation,
        }
    }

    /// Compute the determinant as the last Bareiss pivot. The determinant of
    /// a `0 x 0` matrix is one.
    pub fn det(&self, a: &Matrix) -> Result<Element, MatrixError> {
        if !a.is_square() {
            return Err(MatrixError::NotSquare);
        }

        if a.nrows == 0 {
            return Ok(self.ring.one());
        }

        let f = self.fflu(a);
        if f.rank < a.nrows {
            return Ok(self.ring.zero());
        }

        Ok(if f.odd_permutation {
            self.ring.neg(&f.den)
        } else {
            f.den
        })
    }

    pub fn rank(&self, a: &Matrix) -> usize {
        self.fflu(a).rank
    }

    /// Compute the reduced row echelon form with a single shared denominator, by
    /// fraction-free back substitution on the decomposition of `a`.
    pub fn rref(&self, a: &Matrix) -> Rref {
        let ring = &*self.ring;
        let (m, n) = a.shape();
        let Fflu {
            lu: mut r,
            rank,
            pivots,
            den,
            ..
        } = self.fflu(a);

        for i in rank..m {
            for j in 0..n {
                r[(i, j)] = ring.zero();
            }
        }

        for i in 0..rank {
            for j in 0..pivots[i] {
                r[(i, j)] = ring.zero();
            }
        }

        if rank > 1 {
            let nonpivots: Vec<usize> = (0..n).filter(|j| !pivots.contains(j)).collect();
            for &q in &nonpivots {
                for i in (0..rank).rev() {
                    let mut t = ring.mul(&den, &r[(i, q)]);
                    for j in i + 1..rank {
                        ring.sub_mul_assign(&mut t, &r[(i, pivots[j])], &r[(j, q)]);
                    }
                    r[(i, q)] = ring.divexact(&t, &r[(i, pivots[i])]);
                }
            }

            for i in 0..rank {
                for (j, &p) in pivots.iter().enumerate() {
                    r[(i, p)] = if i == j { den.clone() } else { ring.zero() };
                }
            }
        }

        Rref {
            matrix: r,
            den,
            rank,
            pivots,
        }
    }

    /// Compute a basis of the right kernel of `a`, as the columns of the returned
    /// `ncols x nullity` matrix `N`, such that `a * N = 0`.
    pub fn nullspace(&self, a: &Matrix) -> Matrix {
        let ring = &*self.ring;
        let n = a.ncols;

        let Rref {
            matrix: r,
            den,
            rank,
            pivots,
        } = self.rref(a);

        if rank == 0 {
            return self.identity(n);
        }

        let nonpivots: Vec<usize> = (0..n).filter(|j| !pivots.contains(j)).collect();
        let mut basis = self.zero_matrix(n, n - rank);
        for (k, &q) in nonpivots.iter().enumerate() {
            basis[(q, k)] = den.clone();
            for (i, &p) in pivots.iter().enumerate() {
                basis[(p, k)] = ring.neg(&r[(i, q)]);
            }
        }

        basis
    }

    /// Solve `a * X = den * b` for a square matrix `a`, without fractions.
    /// The returned denominator is zero exactly when `a` is singular, also when `b`
    /// has no columns. A system with no unknowns has denominator one.
    pub fn solve(&self, a: &Matrix, b: &Matrix) -> Result<(Matrix, Element), MatrixError> {
        let ring = &*self.ring;
        if !a.is_square() {
            return Err(MatrixError::NotSquare);
        }
        if a.nrows != b.nrows {
            return Err(MatrixError::ShapeMismatch);
        }

        let n = a.nrows;
        let cols = b.ncols;
        if n == 0 {
            return Ok((self.zero_matrix(n, cols), ring.one()));
        }

        let f = self.fflu(a);
        if f.rank < n {
            debug!(rank = f.rank, "singular system");
            return Ok((self.zero_matrix(n, cols), ring.zero()));
        }

        let lu = &f.lu;
        let mut x = self.zero_matrix(n, cols);
        for (i, &p) in f.perm.iter().enumerate() {
            x.row_mut(i).clone_from_slice(b.row(p));
        }

        for k in 0..cols {
            // replay the elimination on the right-hand side
            for i in 0..n - 1 {
                for j in i + 1..n {
                    let mut t = ring.mul(&x[(j, k)], &lu[(i, i)]);
                    ring.sub_mul_assign(&mut t, &lu[(j, i)], &x[(i, k)]);
                    if i > 0 {
                        t = ring.divexact(&t, &lu[(i - 1, i - 1)]);
                    }
                    x[(j, k)] = t;
                }
            }

            for i in (0..n).rev() {
                let mut t = ring.mul(&x[(i, k)], &f.den);
                for j in i + 1..n {
                    ring.sub_mul_assign(&mut t, &x[(j, k)], &lu[(i, j)]);
                }
                x[(i, k)] = ring.divexact(&t, &lu[(i, i)]);
            }
        }

        Ok((x, f.den))
    }

    /// Compute `(X, den)` with `a * X = den * I`. The denominator is zero when `a`
    /// is singular.
    pub fn inverse(&self, a: &Matrix) -> Result<(Matrix, Element), MatrixError> {
        self.solve(a, &self.identity(a.nrows))
    }
}

#[cfg(test)]
mod test {
    use crate::{
        domains::{
            generic::{Domain, Z},
            Ring,
        },
        tensors::matrix::{Matrix, MatrixError},
    };

    fn ints(data: &[i64], nrows: usize, ncols: usize) -> Matrix {
        Matrix::from_linear(data.iter().map(|x| Z.nth(*x)).collect(), nrows, ncols).unwrap()
    }

    #[test]
    fn determinant() {
        let m = Domain::matrix(Z, 3, 3);
        let r = m.as_matrix_ring();

        assert_eq!(r.det(&ints(&[1, 2, 3, 4, 5, 16, 7, 8, 9], 3, 3)), Ok(Z.nth(60)));
        assert_eq!(r.det(&ints(&[0, 1, 1, 0], 2, 2)), Ok(Z.nth(-1)));
        assert_eq!(r.det(&ints(&[1, 2, 2, 4], 2, 2)), Ok(Z.zero()));
        assert_eq!(r.det(&ints(&[], 0, 0)), Ok(Z.one()));
        assert_eq!(r.det(&ints(&[1, 2], 1, 2)), Err(MatrixError::NotSquare));
    }

    #[test]
    fn row_echelon() {
        let m = Domain::matrix(Z, 3, 3);
        let r = m.as_matrix_ring();
        let a = ints(&[1, 2, 3, 4, 5, 6, 7, 8, 9], 3, 3);

        let rref = r.rref(&a);
        assert_eq!(rref.rank, 2);
        assert_eq!(rref.pivots, vec![0, 1]);
        assert_eq!(rref.den, Z.nth(-3));
        assert_eq!(rref.matrix, ints(&[-3, 0, 3, 0, -3, -6, 0, 0, 0], 3, 3));
        assert_eq!(r.rank(&a), 2);
    }

    #[test]
    fn kernel() {
        let m = Domain::matrix(Z, 3, 4);
        let r = m.as_matrix_ring();
        let a = ints(&[1, 2, 3, 4, 2, 4, 6, 8, 1, 0, 1, 0], 3, 4);

        let n = r.nullspace(&a);
        assert_eq!(n.shape(), (4, 2));
        assert!(r.mul(&a, &n).is_zero());
        assert_eq!(r.rank(&a) + n.ncols, a.ncols);

        let zero = r.zero_matrix(2, 3);
        assert_eq!(r.nullspace(&zero), r.identity(3));
    }

    #[test]
    fn fraction_free_solve() {
        let m = Domain::matrix(Z, 3, 3);
        let r = m.as_matrix_ring();
        let a = ints(&[0, 2, 3, 4, 5, 16, 7, 8, 9], 3, 3);
        let b = ints(&[1, 2, 3, 4, 5, 6], 3, 2);

        let (x, den) = r.solve(&a, &b).unwrap();
        assert!(!den.is_zero());
        assert_eq!(r.mul(&a, &x), r.mul_scalar(&b, &den));

        let (x, den) = r.inverse(&a).unwrap();
        assert_eq!(r.mul(&a, &x), r.scalar(3, &den));

        let singular = ints(&[1, 2, 2, 4], 2, 2);
        let (_, den) = r.solve(&singular, &ints(&[1, 1], 2, 1)).unwrap();
        assert!(den.is_zero());

        let (x, den) = r.solve(&ints(&[], 0, 0), &ints(&[], 0, 1)).unwrap();
        assert_eq!(den, Z.one());
        assert_eq!(x.shape(), (0, 1));
    }

    #[test]
    fn solve_without_right_hand_side() {
        let m = Domain::matrix(Z, 2, 2);
        let r = m.as_matrix_ring();

        let (x, den) = r.solve(&ints(&[1, 2, 2, 4], 2, 2), &ints(&[], 2, 0)).unwrap();
        assert!(den.is_zero());
        assert_eq!(x.shape(), (2, 0));

        let a = ints(&[2, 1, 1, 3], 2, 2);
        let (x, den) = r.solve(&a, &ints(&[], 2, 0)).unwrap();
        assert!(!den.is_zero());
        assert_eq!(x.shape(), (2, 0));
    }
}
