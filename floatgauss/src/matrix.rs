pub mod determinant;
pub mod reduce;

use crate::error::{fatal, LinalgError};
use crate::vector::{Scalar, VecSlice, Vector};
use approx::{AbsDiffEq, RelativeEq};
use rand::Rng;
use std::ops::{Add, Div, Index, IndexMut, Mul, Range, Sub};

pub use reduce::RowOps;

/// A dense matrix of [`Scalar`]s
///
/// The matrix is stored in row-major order as a single [`Vector`] of length `rows * cols`. Element
/// `(i, j)` lives at position `i * cols + j`, and each row is handed out as a [`VecSlice`] view
/// into the shared buffer, so row operations reuse the vector arithmetic.
///
/// Indexing with `matrix[(i, j)]` is 0-based. The conversions between matrices and vectors that
/// take a row or column *number* (e.g. [`Matrix::row_vector`], [`Matrix::sub_matrix`]) are
/// 1-based, matching the usual mathematical notation for minors and cofactors.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    /// the number of rows in the matrix
    rows: usize,

    /// the number of columns in the matrix
    cols: usize,

    /// the elements of the matrix, stored in row-major order
    data: Vector,
}

/// Whether a vector becomes a row matrix (1xN) or a column matrix (Nx1)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    RowWise,
    ColumnWise,
}

impl Matrix {
    pub fn build(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Scalar) -> Self {
        let data = (0..rows)
            .flat_map(|i| (0..cols).map(move |j| (i, j)))
            .map(|(i, j)| f(i, j))
            .collect();
        Matrix { rows, cols, data }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: Vector::zeros(rows * cols),
        }
    }

    pub fn filled(rows: usize, cols: usize, value: Scalar) -> Self {
        Matrix {
            rows,
            cols,
            data: Vector::filled(rows * cols, value),
        }
    }

    pub fn identity(size: usize) -> Self {
        Matrix::build(size, size, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// Fills a `rows` x `cols` matrix from `values` in row-major order
    ///
    /// Missing trailing values are filled with 0 and surplus values are ignored.
    pub fn from_row_major(rows: usize, cols: usize, values: &[Scalar]) -> Self {
        let data = (0..rows * cols)
            .map(|k| values.get(k).copied().unwrap_or(0.0))
            .collect();
        Matrix { rows, cols, data }
    }

    /// Creates a matrix from a list of rows
    ///
    /// # Panics
    ///
    /// Panics if the rows do not all have the same length.
    #[track_caller]
    pub fn from_rows(data: &[Vec<Scalar>]) -> Self {
        let cols = data.first().map_or(0, |row| row.len());
        for row in data {
            fatal(LinalgError::check_dims(cols, row.len()));
        }
        Matrix::build(data.len(), cols, |i, j| data[i][j])
    }

    /// Creates a matrix with entries drawn uniformly from `range`
    #[inline]
    pub fn random(rng: &mut impl Rng, rows: usize, cols: usize, range: Range<Scalar>) -> Self {
        Matrix {
            rows,
            cols,
            data: Vector::random(rng, rows * cols, range),
        }
    }

    /// Creates a matrix with integer entries drawn uniformly from `range`, stored as floats
    #[inline]
    pub fn random_int(rng: &mut impl Rng, rows: usize, cols: usize, range: Range<i64>) -> Self {
        Matrix {
            rows,
            cols,
            data: Vector::random_int(rng, rows * cols, range),
        }
    }

    /// Creates a random integer matrix with determinant 1, by mixing the rows of the identity
    pub fn random_invertible(rng: &mut impl Rng, size: usize) -> Self {
        let mut m = Matrix::identity(size);
        if size < 2 {
            return m;
        }

        for _ in 0..2 * size {
            let r1 = rng.random_range(0..size);
            let mut r2 = rng.random_range(0..size - 1);
            if r2 >= r1 {
                r2 += 1;
            }
            let scalar = rng.random_range(-2i64..=2) as Scalar;
            m.add_scaled_row(r1, r2, scalar);
        }

        m
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns true if the matrix has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub(crate) fn check_square(&self) -> Result<(), LinalgError> {
        if self.is_square() {
            Ok(())
        } else {
            Err(LinalgError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// The elements in row-major order
    #[inline]
    pub fn as_slice(&self) -> &VecSlice {
        &self.data
    }

    /// A view of row `row` (0-based)
    #[inline]
    pub fn row(&self, row: usize) -> &VecSlice {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut VecSlice {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Copies row number `row` (1-based) into a vector, or returns `None` if there is no such row
    pub fn row_vector(&self, row: usize) -> Option<Vector> {
        if row == 0 || row > self.rows {
            log::debug!("row {} out of range for {} rows", row, self.rows);
            return None;
        }
        Some(self.row(row - 1).to_vector())
    }

    /// Copies column number `col` (1-based) into a vector, or returns `None` if there is no such column
    pub fn col_vector(&self, col: usize) -> Option<Vector> {
        if col == 0 || col > self.cols {
            log::debug!("column {} out of range for {} columns", col, self.cols);
            return None;
        }
        Some(Vector::build(self.rows, |i| self[(i, col - 1)]))
    }

    /// Turns a vector into a 1xN matrix ([`Direction::RowWise`]) or an Nx1 matrix
    /// ([`Direction::ColumnWise`])
    pub fn from_vector(vector: &VecSlice, dir: Direction) -> Self {
        let (rows, cols) = match dir {
            Direction::RowWise => (1, vector.len()),
            Direction::ColumnWise => (vector.len(), 1),
        };
        Matrix {
            rows,
            cols,
            data: vector.to_vector(),
        }
    }

    /// Flattens the matrix into a vector in row-major order
    #[inline]
    pub fn to_vector(&self) -> Vector {
        self.data.clone()
    }

    /// Applies `f` to every element, returning the results as a new matrix
    pub fn map(&self, f: impl FnMut(Scalar) -> Scalar) -> Self {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.map(f),
        }
    }

    /// Combines two matrices of the same shape elementwise
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if the number of rows or columns differ.
    pub fn try_zip_with(
        &self,
        rhs: &Matrix,
        f: impl FnMut(Scalar, Scalar) -> Scalar,
    ) -> Result<Self, LinalgError> {
        LinalgError::check_dims(self.rows, rhs.rows)?;
        LinalgError::check_dims(self.cols, rhs.cols)?;
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.try_zip_with(&rhs.data, f)?,
        })
    }

    /// Elementwise (Hadamard) product
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    #[track_caller]
    pub fn hadamard(&self, rhs: &Matrix) -> Self {
        fatal(self.try_zip_with(rhs, |a, b| a * b))
    }

    /// Divides every element by `scalar`, or returns `None` if `scalar` is zero
    pub fn checked_div_scalar(&self, scalar: Scalar) -> Option<Self> {
        if scalar == 0.0 {
            log::debug!("matrix division by zero scalar");
            return None;
        }
        Some(self.map(|a| a / scalar))
    }

    /// Returns a transposed copy of the matrix
    #[inline]
    pub fn transposed(&self) -> Self {
        Matrix::build(self.cols, self.rows, |i, j| self[(j, i)])
    }

    /// Matrix product
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::NonConformantProduct`] unless `self.cols() == rhs.rows()`.
    pub fn try_mul(&self, rhs: &Matrix) -> Result<Self, LinalgError> {
        if self.cols != rhs.rows {
            return Err(LinalgError::NonConformantProduct {
                left_cols: self.cols,
                right_rows: rhs.rows,
            });
        }
        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..self.rows {
            let row = res.row_mut(i);
            self.row(i).iter().enumerate().for_each(|(k, &a)| {
                row.add_scaled(rhs.row(k), a);
            });
        }

        Ok(res)
    }

    /// Multiplies the matrix by a column vector
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::NonConformantProduct`] unless `self.cols() == vector.len()`.
    pub fn try_mul_vector(&self, vector: &VecSlice) -> Result<Vector, LinalgError> {
        if self.cols != vector.len() {
            return Err(LinalgError::NonConformantProduct {
                left_cols: self.cols,
                right_rows: vector.len(),
            });
        }
        Ok(Vector::build(self.rows, |i| self.row(i).dot(vector)))
    }

    /// Appends `vector` as a new rightmost column
    ///
    /// # Panics
    ///
    /// Panics if the length of `vector` differs from the number of rows.
    #[track_caller]
    pub fn append_column(&self, vector: &VecSlice) -> Self {
        fatal(LinalgError::check_dims(self.rows, vector.len()));
        Matrix::build(self.rows, self.cols + 1, |i, j| {
            if j < self.cols {
                self[(i, j)]
            } else {
                vector[i]
            }
        })
    }

    /// Places `other` to the right of this matrix
    ///
    /// # Panics
    ///
    /// Panics if the matrices have a different number of rows.
    #[track_caller]
    pub fn append_matrix(&self, other: &Matrix) -> Self {
        fatal(LinalgError::check_dims(self.rows, other.rows));
        Matrix::build(self.rows, self.cols + other.cols, |i, j| {
            if j < self.cols {
                self[(i, j)]
            } else {
                other[(i, j - self.cols)]
            }
        })
    }

    /// Removes row number `row` and column number `col` (both 1-based)
    ///
    /// Returns `None` if either index is out of range.
    pub fn sub_matrix(&self, row: usize, col: usize) -> Option<Self> {
        if row == 0 || row > self.rows || col == 0 || col > self.cols {
            log::debug!(
                "cannot remove row {} and column {} from a {}x{} matrix",
                row,
                col,
                self.rows,
                self.cols
            );
            return None;
        }
        let (rem_row, rem_col) = (row - 1, col - 1);
        Some(Matrix::build(self.rows - 1, self.cols - 1, |i, j| {
            let src_i = if i >= rem_row { i + 1 } else { i };
            let src_j = if j >= rem_col { j + 1 } else { j };
            self[(src_i, src_j)]
        }))
    }
}

impl Vector {
    /// Lays the vector out as a `rows` x `cols` matrix in row-major order, undoing
    /// [`Matrix::to_vector`]
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` differs from the dimension of the vector.
    #[track_caller]
    pub fn reshape(&self, rows: usize, cols: usize) -> Matrix {
        fatal(LinalgError::check_dims(rows * cols, self.dim()));
        Matrix {
            rows,
            cols,
            data: self.clone(),
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Scalar;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        debug_assert!(index.1 < self.cols, "column index out of range");
        &self.data[index.0 * self.cols + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        debug_assert!(index.1 < self.cols, "column index out of range");
        &mut self.data[index.0 * self.cols + index.1]
    }
}

impl<const R: usize, const C: usize> From<[[Scalar; C]; R]> for Matrix {
    fn from(value: [[Scalar; C]; R]) -> Self {
        Matrix::build(R, C, |i, j| value[i][j])
    }
}

impl From<Matrix> for Vector {
    fn from(value: Matrix) -> Self {
        value.data
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    #[track_caller]
    fn add(self, rhs: Self) -> Self::Output {
        fatal(self.try_zip_with(rhs, |a, b| a + b))
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    #[track_caller]
    fn sub(self, rhs: Self) -> Self::Output {
        fatal(self.try_zip_with(rhs, |a, b| a - b))
    }
}

/// Elementwise division, where a zero divisor yields 0 for that element
impl Div for &Matrix {
    type Output = Matrix;

    #[track_caller]
    fn div(self, rhs: Self) -> Self::Output {
        fatal(self.try_zip_with(rhs, |a, b| if b != 0.0 { a / b } else { 0.0 }))
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    #[track_caller]
    fn mul(self, rhs: Self) -> Self::Output {
        fatal(self.try_mul(rhs))
    }
}

impl Mul<&Vector> for &Matrix {
    type Output = Vector;

    #[track_caller]
    fn mul(self, rhs: &Vector) -> Self::Output {
        fatal(self.try_mul_vector(rhs))
    }
}

impl Add<Scalar> for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Scalar) -> Self::Output {
        self.map(|a| a + rhs)
    }
}

impl Sub<Scalar> for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Scalar) -> Self::Output {
        self.map(|a| a - rhs)
    }
}

impl Mul<Scalar> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Scalar) -> Self::Output {
        self.map(|a| a * rhs)
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = Scalar;

    fn default_epsilon() -> Self::Epsilon {
        <Scalar as AbsDiffEq>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.data.abs_diff_eq(&other.data, epsilon)
    }
}

impl RelativeEq for Matrix {
    fn default_max_relative() -> Self::Epsilon {
        <Scalar as RelativeEq>::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.data.relative_eq(&other.data, epsilon, max_relative)
    }
}
