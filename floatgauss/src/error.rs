use thiserror::Error;

/// Shape errors raised by vector and matrix arithmetic.
///
/// These describe programmer errors: the operators and plain methods of [`crate::Vector`] and
/// [`crate::Matrix`] panic with this message when a check fails, while the `try_*` methods return
/// it instead. Numeric degeneracies such as division by zero or singular matrices are *not*
/// errors; those operations return `None`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    #[error("Dimension mismatch: {left} != {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Matrix 1 columns not equal to Matrix 2 rows: {left_cols} != {right_rows}")]
    NonConformantProduct { left_cols: usize, right_rows: usize },

    #[error("Matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
}

impl LinalgError {
    /// Returns `Ok(())` if `left == right`, otherwise a [`LinalgError::DimensionMismatch`]
    #[inline]
    pub fn check_dims(left: usize, right: usize) -> Result<(), LinalgError> {
        if left == right {
            Ok(())
        } else {
            Err(LinalgError::DimensionMismatch { left, right })
        }
    }
}

/// Unwraps the result of a shape check, panicking with the error message on failure
#[inline]
#[track_caller]
pub(crate) fn fatal<T>(result: Result<T, LinalgError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{}", err),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            LinalgError::DimensionMismatch { left: 3, right: 4 }.to_string(),
            "Dimension mismatch: 3 != 4"
        );
        assert_eq!(
            LinalgError::NotSquare { rows: 2, cols: 3 }.to_string(),
            "Matrix is not square: 2x3"
        );
        assert_eq!(LinalgError::check_dims(5, 5), Ok(()));
        assert!(LinalgError::check_dims(5, 6).is_err());
    }

    #[test]
    #[should_panic(expected = "Matrix 1 columns not equal to Matrix 2 rows")]
    fn fatal_panics() {
        fatal::<()>(Err(LinalgError::NonConformantProduct {
            left_cols: 2,
            right_rows: 3,
        }));
    }
}
