use std::{
    fmt::{Display, Error, Formatter},
    ops::{Index, IndexMut},
    sync::Arc,
};

use rug::Integer;

use crate::{
    domains::{
        generic::{Domain, Element},
        FractionNormalization, Ring,
    },
    printer::{PrintOptions, PrintState},
};

/// A matrix with entries that are elements of a [Domain], stored in row-major order.
/// A vector can be represented as a matrix with one row or one column.
///
/// The matrix does not store its entry ring: operations are performed through a [MatrixRing].
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct Matrix {
    pub nrows: usize,
    pub ncols: usize,
    pub data: Vec<Element>,
}

impl Matrix {
    /// Convert a linear representation of a matrix to a `Matrix`.
    pub fn from_linear(data: Vec<Element>, nrows: usize, ncols: usize) -> Result<Matrix, MatrixError> {
        if data.len() != nrows * ncols {
            return Err(MatrixError::ShapeMismatch);
        }

        Ok(Matrix { nrows, ncols, data })
    }

    /// Create a new matrix from a 2-dimensional vector of entries.
    pub fn from_nested(rows: Vec<Vec<Element>>) -> Result<Matrix, MatrixError> {
        let nrows = rows.len();
        let ncols = rows.first().map(|r| r.len()).unwrap_or(0);

        let mut data = Vec::with_capacity(nrows * ncols);
        for r in rows {
            if r.len() != ncols {
                return Err(MatrixError::ShapeMismatch);
            }
            data.extend(r);
        }

        Ok(Matrix { nrows, ncols, data })
    }

    /// Create a column vector.
    pub fn new_vec(data: Vec<Element>) -> Matrix {
        Matrix {
            nrows: data.len(),
            ncols: 1,
            data,
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[Element] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [Element] {
        &mut self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Element]> {
        (0..self.nrows).map(|i| self.row(i))
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }

        for k in 0..self.ncols {
            self.data.swap(i * self.ncols + k, j * self.ncols + k);
        }
    }

    /// Return the transpose of the matrix.
    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.ncols {
            for i in 0..self.nrows {
                data.push(self[(i, j)].clone());
            }
        }

        Matrix {
            nrows: self.ncols,
            ncols: self.nrows,
            data,
        }
    }

    /// Returns `true` if all entries are zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|e| e.is_zero())
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Element;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &Element {
        &self.data[index.0 * self.ncols + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Element {
        &mut self.data[index.0 * self.ncols + index.1]
    }
}

/// Errors that can occur when performing matrix operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixError {
    NotSquare,
    ShapeMismatch,
}

impl Display for MatrixError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::NotSquare => write!(f, "The matrix is not square"),
            MatrixError::ShapeMismatch => write!(f, "The shape of the matrix is not compatible"),
        }
    }
}

impl std::error::Error for MatrixError {}

/// The ring of matrices over a [Domain]. The shape of the ring is used to create
/// new elements such as [Ring::zero] and [Ring::one]; operations accept matrices
/// of any compatible shape.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct MatrixRing {
    pub ring: Arc<Domain>,
    pub nrows: usize,
    pub ncols: usize,
}

impl MatrixRing {
    pub fn new(ring: Arc<Domain>, nrows: usize, ncols: usize) -> MatrixRing {
        MatrixRing { ring, nrows, ncols }
    }

    pub fn entry_ring(&self) -> &Domain {
        &self.ring
    }

    /// Create a zero matrix with `nrows` rows and `ncols` columns.
    pub fn zero_matrix(&self, nrows: usize, ncols: usize) -> Matrix {
        Matrix {
            nrows,
            ncols,
            data: vec![self.ring.zero(); nrows * ncols],
        }
    }

    /// Create an `n x n` matrix with ones on the main diagonal.
    pub fn identity(&self, n: usize) -> Matrix {
        self.scalar(n, &self.ring.one())
    }

    /// Create an `n x n` matrix with `c` on the main diagonal.
    pub fn scalar(&self, n: usize, c: &Element) -> Matrix {
        let mut m = self.zero_matrix(n, n);
        for i in 0..n {
            m[(i, i)] = c.clone();
        }
        m
    }

    pub fn mul_scalar(&self, a: &Matrix, c: &Element) -> Matrix {
        Matrix {
            nrows: a.nrows,
            ncols: a.ncols,
            data: a.data.iter().map(|e| self.ring.mul(e, c)).collect(),
        }
    }

    pub fn try_add(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
        if a.shape() != b.shape() {
            return Err(MatrixError::ShapeMismatch);
        }

        Ok(Matrix {
            nrows: a.nrows,
            ncols: a.ncols,
            data: a
                .data
                .iter()
                .zip(&b.data)
                .map(|(x, y)| self.ring.add(x, y))
                .collect(),
        })
    }

    pub fn try_sub(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
        if a.shape() != b.shape() {
            return Err(MatrixError::ShapeMismatch);
        }

        Ok(Matrix {
            nrows: a.nrows,
            ncols: a.ncols,
            data: a
                .data
                .iter()
                .zip(&b.data)
                .map(|(x, y)| self.ring.sub(x, y))
                .collect(),
        })
    }

    /// Multiply an `m x k` matrix by a `k x n` matrix.
    pub fn try_mul(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
        if a.ncols != b.nrows {
            return Err(MatrixError::ShapeMismatch);
        }

        let mut m = self.zero_matrix(a.nrows, b.ncols);
        for i in 0..a.nrows {
            for (k, x) in a.row(i).iter().enumerate() {
                if x.is_zero() {
                    continue;
                }

                for j in 0..b.ncols {
                    self.ring.add_mul_assign(&mut m[(i, j)], x, &b[(k, j)]);
                }
            }
        }

        Ok(m)
    }

    fn expect<T>(&self, r: Result<T, MatrixError>) -> T {
        r.unwrap_or_else(|e| panic!("{} in {}", e, self))
    }
}

impl Display for MatrixRing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "M_{}x{}({})", self.nrows, self.ncols, self.ring)
    }
}

impl Ring for MatrixRing {
    type Element = Matrix;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.expect(self.try_add(a, b))
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.expect(self.try_sub(a, b))
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.expect(self.try_mul(a, b))
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        if a.shape() != b.shape() {
            self.expect::<()>(Err(MatrixError::ShapeMismatch));
        }

        for (x, y) in a.data.iter_mut().zip(&b.data) {
            self.ring.add_assign(x, y);
        }
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        if a.shape() != b.shape() {
            self.expect::<()>(Err(MatrixError::ShapeMismatch));
        }

        for (x, y) in a.data.iter_mut().zip(&b.data) {
            self.ring.sub_assign(x, y);
        }
    }

    /// The product is computed in fresh storage and swapped in.
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        let mut r = self.mul(a, b);
        std::mem::swap(a, &mut r);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        self.add_assign(a, &self.mul(b, c));
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        self.sub_assign(a, &self.mul(b, c));
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        Matrix {
            nrows: a.nrows,
            ncols: a.ncols,
            data: a.data.iter().map(|e| self.ring.neg(e)).collect(),
        }
    }

    fn zero(&self) -> Self::Element {
        self.zero_matrix(self.nrows, self.ncols)
    }

    fn one(&self) -> Self::Element {
        if self.nrows != self.ncols {
            self.expect::<()>(Err(MatrixError::NotSquare));
        }
        self.identity(self.nrows)
    }

    fn nth(&self, n: i64) -> Self::Element {
        if self.nrows != self.ncols {
            self.expect::<()>(Err(MatrixError::NotSquare));
        }
        self.scalar(self.nrows, &self.ring.nth(n))
    }

    /// Binary exponentiation where the accumulator and one scratch matrix swap roles.
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        if !b.is_square() {
            self.expect::<()>(Err(MatrixError::NotSquare));
        }

        if e == 0 {
            return self.identity(b.nrows);
        }

        let mut acc = b.clone();
        let top = u64::BITS - 1 - e.leading_zeros();
        for i in (0..top).rev() {
            let mut scratch = self.mul(&acc, &acc);
            std::mem::swap(&mut acc, &mut scratch);

            if (e >> i) & 1 == 1 {
                scratch = self.mul(&acc, b);
                std::mem::swap(&mut acc, &mut scratch);
            }
        }

        acc
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.is_square()
            && (0..a.nrows).all(|i| {
                (0..a.ncols).all(|j| {
                    if i == j {
                        self.ring.is_one(&a[(i, j)])
                    } else {
                        a[(i, j)].is_zero()
                    }
                })
            })
    }

    fn equal(&self, a: &Self::Element, b: &Self::Element) -> bool {
        a.shape() == b.shape()
            && a.data
                .iter()
                .zip(&b.data)
                .all(|(x, y)| self.ring.equal(x, y))
    }

    fn characteristic(&self) -> Integer {
        self.ring.characteristic()
    }

    /// Compute `a * b^-1`, if `b` is invertible.
    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        let inv = self.try_inv(b)?;
        self.try_mul(a, &inv).ok()
    }

    /// Compute the inverse from the fraction-free solution `b * X = den * I`,
    /// which requires `den` to be a unit.
    fn try_inv(&self, a: &Self::Element) -> Option<Self::Element> {
        let (x, den) = self.inverse(a).ok()?;
        if den.is_zero() {
            return None;
        }

        let u = self.ring.try_inv(&den)?;
        Some(self.mul_scalar(&x, &u))
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        Matrix {
            nrows: self.nrows,
            ncols: self.ncols,
            data: (0..self.nrows * self.ncols)
                .map(|_| self.ring.sample(rng, range))
                .collect(),
        }
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        _state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        f.write_char('[')?;
        for (i, row) in element.rows().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }

            f.write_char('[')?;
            for (j, e) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                self.ring.format(e, opts, PrintState::new(), f)?;
            }
            f.write_char(']')?;
        }
        f.write_char(']')?;
        Ok(false)
    }
}

impl FractionNormalization for MatrixRing {
    fn get_normalization_factor(&self, _a: &Self::Element) -> Self::Element {
        self.one()
    }
}

#[cfg(test)]
mod test {
    use crate::domains::{
        generic::{Domain, Element, Z},
        Field, Ring,
    };

    use super::{Matrix, MatrixError};

    fn ints(data: &[i64], nrows: usize, ncols: usize) -> Matrix {
        Matrix::from_linear(data.iter().map(|x| Z.nth(*x)).collect(), nrows, ncols).unwrap()
    }

    #[test]
    fn basics() {
        let m = Domain::matrix(Z, 2, 3);
        let r = m.as_matrix_ring();
        let a = ints(&[1, 2, 3, 4, 5, 6], 2, 3);

        assert_eq!(a.transpose(), ints(&[1, 4, 2, 5, 3, 6], 3, 2));
        assert_eq!(r.neg(&a), ints(&[-1, -2, -3, -4, -5, -6], 2, 3));
        assert!(r.sub(&a, &a).is_zero());

        let b = Matrix::from_nested(vec![
            vec![Z.nth(7), Z.nth(8)],
            vec![Z.nth(9), Z.nth(10)],
            vec![Z.nth(11), Z.nth(12)],
        ])
        .unwrap();

        let c = r.mul(&a, &b);
        assert_eq!(c, ints(&[58, 64, 139, 154], 2, 2));
        assert_eq!(c.row(1), &[Z.nth(139), Z.nth(154)]);
        assert_eq!(c[(0, 1)], Z.nth(64));

        let mut d = a.clone();
        r.add_assign(&mut d, &a);
        assert_eq!(d, ints(&[2, 4, 6, 8, 10, 12], 2, 3));

        assert_eq!(r.try_mul(&a, &a), Err(MatrixError::ShapeMismatch));
        assert_eq!(
            Matrix::from_nested(vec![vec![Z.nth(1)], vec![]]),
            Err(MatrixError::ShapeMismatch)
        );
        assert_eq!(
            m.printer(&Element::Matrix(a)).to_string(),
            "[[1, 2, 3], [4, 5, 6]]"
        );
    }

    #[test]
    fn square_ring() {
        let m = Domain::matrix(Z, 2, 2);
        let r = m.as_matrix_ring();
        let a = ints(&[1, 1, 1, 0], 2, 2);

        // Fibonacci numbers
        assert_eq!(r.pow(&a, 10), ints(&[89, 55, 55, 34], 2, 2));
        assert_eq!(r.pow(&a, 0), r.one());
        assert!(r.is_one(&r.one()));
        assert_eq!(r.nth(3), ints(&[3, 0, 0, 3], 2, 2));

        let mut b = a.clone();
        r.mul_assign(&mut b, &a);
        assert_eq!(b, r.mul(&a, &a));

        // unimodular matrices are invertible over the integers
        let inv = r.try_inv(&a).unwrap();
        assert!(r.is_one(&r.mul(&a, &inv)));
        assert_eq!(r.try_inv(&ints(&[2, 0, 0, 1], 2, 2)), None);
    }

    #[test]
    fn rational_inverse() {
        let q = Domain::fraction(Z);
        let m = Domain::matrix(q.clone(), 3, 3);
        let a: Element = Matrix::from_linear(
            [3, 2, 15, 4, 9, 6, 7, 8, 17].iter().map(|x| q.nth(*x)).collect(),
            3,
            3,
        )
        .unwrap()
        .into();

        let inv = m.inv(&a);
        assert!(m.is_one(&m.mul(&a, &inv)));
        assert!(m.is_one(&m.div(&a, &a)));
    }
}
