//! `floatgauss` is a Rust library for dense linear algebra over `f64`. Some features include:
//! - vector arithmetic, dot and cross products, norms and normalization
//! - elementwise and scalar matrix arithmetic, transpose and matrix multiplication
//! - conversions between matrices and row or column vectors
//! - horizontal concatenation of matrices and removal of a row and column
//! - elementary row operations and Gaussian elimination (echelon form, reduced echelon form, rank)
//! - determinants, cofactors, adjugates and inverses
//!
//! The two main data structures provided by this crate are:
//! - [`Vector`]: an owned vector of scalars, which dereferences to the borrowed [`VecSlice`] so
//!   that matrix rows get the same arithmetic as whole vectors
//! - [`Matrix`]: a two-dimensional matrix stored in row-major order, which implements the
//!   linear algebraic operations
//!
//! Shape mismatches are programmer errors. Operators and plain methods panic with a
//! [`LinalgError`] message, while the `try_*` methods return it. Numeric degeneracies such as a
//! zero divisor or a singular matrix are reported by returning `None`.

#![allow(
    clippy::needless_range_loop,
    clippy::suspicious_arithmetic_impl,
    clippy::uninlined_format_args,
    clippy::float_cmp,
    clippy::cast_precision_loss,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]
pub mod error;
pub mod matrix;
pub mod vector;

pub use error::LinalgError;
pub use matrix::{Direction, Matrix, RowOps};
pub use vector::{Scalar, VecSlice, Vector, NORMALIZED_TOLERANCE};
