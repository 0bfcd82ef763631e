use super::Matrix;
use crate::vector::Scalar;

/// Elementary row operations
///
/// Each operation reports whether it was applied. An operation that would be out of range, or
/// that would not be invertible (scaling by 0, combining a row with itself), leaves the matrix
/// untouched and returns `false`.
pub trait RowOps {
    /// Exchanges rows `r1` and `r2`. Fails if either is out of range or `r1 == r2`.
    fn swap_rows(&mut self, r1: usize, r2: usize) -> bool;

    /// Multiplies row `row` by `scalar`. Fails if `row` is out of range or `scalar` is 0.
    fn scale_row(&mut self, row: usize, scalar: Scalar) -> bool;

    /// Performs `row[target] += row[source] * scalar`. Fails if either row is out of range,
    /// `target == source`, or `scalar` is 0.
    fn add_scaled_row(&mut self, target: usize, source: usize, scalar: Scalar) -> bool;
}

impl RowOps for Matrix {
    #[inline]
    fn swap_rows(&mut self, r1: usize, r2: usize) -> bool {
        if r1 >= self.rows || r2 >= self.rows || r1 == r2 {
            return false;
        }
        self.data
            .swap_range(r1 * self.cols, r2 * self.cols, self.cols);
        true
    }

    #[inline]
    fn scale_row(&mut self, row: usize, scalar: Scalar) -> bool {
        if row >= self.rows || scalar == 0.0 {
            return false;
        }
        self.data.scale_range(row * self.cols, self.cols, scalar);
        true
    }

    #[inline]
    fn add_scaled_row(&mut self, target: usize, source: usize, scalar: Scalar) -> bool {
        if target >= self.rows || source >= self.rows || target == source || scalar == 0.0 {
            return false;
        }
        self.data.add_scaled_range(
            source * self.cols,
            target * self.cols,
            self.cols,
            scalar,
        );
        true
    }
}

impl Matrix {
    /// Perform gaussian elimination in place and return the pivot columns
    ///
    /// Columns are visited left to right. For each one, the first row at or below the current
    /// pivot row with a nonzero entry is swapped up and scaled so the pivot is 1, then the column
    /// is cleared in every row below the pivot, or in every other row if `full` is true. Columns
    /// with no candidate pivot are skipped.
    fn gauss_helper(&mut self, full: bool) -> Vec<usize> {
        let mut row = 0;
        let mut pcols = vec![];

        for pcol in 0..self.cols {
            if row >= self.rows {
                break;
            }

            let Some(row1) = (row..self.rows).find(|&i| self[(i, pcol)] != 0.0) else {
                log::trace!("no pivot in column {} at or below row {}", pcol, row);
                continue;
            };

            self.swap_rows(row, row1);
            self.scale_row(row, 1.0 / self[(row, pcol)]);
            // the reciprocal can be off by an ulp
            self[(row, pcol)] = 1.0;

            let first = if full { 0 } else { row + 1 };
            for i in first..self.rows {
                if i != row {
                    self.add_scaled_row(i, row, -self[(i, pcol)]);
                    self[(i, pcol)] = 0.0;
                }
            }

            log::trace!("pivot at ({}, {}), full = {}", row, pcol, full);
            pcols.push(pcol);
            row += 1;
        }

        pcols
    }

    /// Reduce the matrix to echelon form in place, returning the pivot columns
    #[inline]
    pub fn echelon_form(&mut self) -> Vec<usize> {
        self.gauss_helper(false)
    }

    /// Reduce the matrix to reduced echelon form in place, returning the pivot columns
    #[inline]
    pub fn reduced_echelon_form(&mut self) -> Vec<usize> {
        self.gauss_helper(true)
    }

    /// Compute the rank of the matrix using gaussian elimination
    #[inline]
    pub fn rank(&self) -> usize {
        self.clone().gauss_helper(false).len()
    }
}
