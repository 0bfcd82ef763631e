use super::Matrix;
use crate::error::{fatal, LinalgError};
use crate::vector::Scalar;
use rustc_hash::FxHashSet;

impl Matrix {
    /// Computes the determinant by cofactor expansion along successive rows
    ///
    /// Rather than building a sub-matrix for every minor, the expansion walks down the rows and
    /// keeps a set of the columns already used by the rows above. Entries that are exactly zero
    /// are not expanded. The determinant of the 0x0 matrix is 1.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::NotSquare`] if the matrix is not square.
    pub fn try_determinant(&self) -> Result<Scalar, LinalgError> {
        self.check_square()?;
        if self.rows == 0 {
            return Ok(1.0);
        }
        let mut excluded = FxHashSet::default();
        Ok(self.expand_minor(0, &mut excluded))
    }

    /// Computes the determinant. See [`Matrix::try_determinant`].
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    #[inline]
    #[track_caller]
    pub fn determinant(&self) -> Scalar {
        fatal(self.try_determinant())
    }

    /// Determinant of the minor made of rows `row..` and the columns not in `excluded`
    fn expand_minor(&self, row: usize, excluded: &mut FxHashSet<usize>) -> Scalar {
        if row + 1 == self.rows {
            // exactly one column is left
            return (0..self.cols)
                .find(|col| !excluded.contains(col))
                .map_or(0.0, |col| self[(row, col)]);
        }

        let mut det = 0.0;
        let mut sign = 1.0;
        for col in 0..self.cols {
            if excluded.contains(&col) {
                continue;
            }

            let a = self[(row, col)];
            if a != 0.0 {
                excluded.insert(col);
                det += sign * a * self.expand_minor(row + 1, excluded);
                excluded.remove(&col);
            }
            sign = -sign;
        }

        log::trace!(
            "minor at row {} excluding {} columns = {}",
            row,
            excluded.len(),
            det
        );
        det
    }

    /// Computes the determinant by expanding along the first row, building a sub-matrix for
    /// every cofactor
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    #[track_caller]
    pub fn determinant_by_cofactors(&self) -> Scalar {
        fatal(self.check_square());
        match self.rows {
            0 => 1.0,
            1 => self[(0, 0)],
            _ => (0..self.cols)
                .map(|j| {
                    self[(0, j)] * self.cofactor_with(1, j + 1, Matrix::determinant_by_cofactors)
                })
                .sum(),
        }
    }

    fn cofactor_with(&self, row: usize, col: usize, det: fn(&Matrix) -> Scalar) -> Scalar {
        if !self.is_square() || self.rows == 0 {
            return 0.0;
        }
        let Some(minor) = self.sub_matrix(row, col) else {
            return 0.0;
        };
        let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        sign * det(&minor)
    }

    /// The cofactor of the entry at row number `row` and column number `col` (both 1-based)
    ///
    /// This is the determinant of the sub-matrix without that row and column, negated if
    /// `row + col` is odd. Returns 0 if the matrix is not square, is empty, or the position is out
    /// of range.
    pub fn cofactor(&self, row: usize, col: usize) -> Scalar {
        self.cofactor_with(row, col, Matrix::determinant)
    }

    /// Replaces every entry by its cofactor, or returns `None` if the matrix is not square or is empty
    pub fn cofactor_matrix(&self) -> Option<Matrix> {
        if !self.is_square() || self.rows == 0 {
            log::debug!("no cofactor matrix for a {}x{} matrix", self.rows, self.cols);
            return None;
        }
        Some(Matrix::build(self.rows, self.cols, |i, j| {
            self.cofactor(i + 1, j + 1)
        }))
    }

    /// The transpose of the cofactor matrix, or `None` if the matrix is not square or is empty
    pub fn adjugate(&self) -> Option<Matrix> {
        if !self.is_square() || self.rows == 0 {
            log::debug!("no adjugate for a {}x{} matrix", self.rows, self.cols);
            return None;
        }
        Some(Matrix::build(self.rows, self.cols, |i, j| {
            self.cofactor(j + 1, i + 1)
        }))
    }

    /// Returns true if the matrix is square, non-empty and has a nonzero determinant
    pub fn is_invertible(&self) -> bool {
        self.is_square() && self.rows != 0 && self.determinant() != 0.0
    }

    /// Compute the inverse as the adjugate divided by the determinant
    ///
    /// Returns `None` if the matrix is not square, is empty, or is singular.
    pub fn inverse(&self) -> Option<Matrix> {
        let adj = self.adjugate()?;

        // expand along the first row, using the cofactors stored in the first column of the adjugate
        let det: Scalar = (0..self.cols)
            .filter(|&j| self[(0, j)] != 0.0)
            .map(|j| self[(0, j)] * adj[(j, 0)])
            .sum();

        if det == 0.0 {
            log::debug!("matrix is singular");
            return None;
        }

        Some(&adj * (1.0 / det))
    }

    /// Compute the inverse by row reducing the matrix augmented with the identity
    ///
    /// Returns `None` if the matrix is not invertible (see [`Matrix::is_invertible`]). This avoids
    /// the cost of cofactor expansion, so it is the better choice for larger matrices.
    pub fn inverse_by_rref(&self) -> Option<Matrix> {
        if !self.is_invertible() {
            log::debug!("matrix is not invertible");
            return None;
        }

        let n = self.rows;
        let mut aug = self.append_matrix(&Matrix::identity(n));
        aug.reduced_echelon_form();

        Some(Matrix::build(n, n, |i, j| aug[(i, n + j)]))
    }
}
