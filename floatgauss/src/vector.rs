use crate::error::{fatal, LinalgError};
use approx::{AbsDiffEq, RelativeEq};
use rand::Rng;
use ref_cast::RefCast;
use std::ops::{Add, Deref, DerefMut, Div, Index, IndexMut, Mul, Range, Sub};

/// The element type of vectors and matrices. This is an alias for [`f64`]
pub type Scalar = f64;

/// A vector counts as normalized if its magnitude is within this distance of 1
pub const NORMALIZED_TOLERANCE: Scalar = 1e-4;

/// An owned, fixed-length vector of [`Scalar`]s.
///
/// `Vector` owns its storage and is the type returned by every arithmetic operation. Most methods
/// are implemented on [`VecSlice`], which `Vector` dereferences to, so the same operations are
/// available on borrowed matrix rows.
///
/// # Examples
///
/// ```
/// use floatgauss::Vector;
///
/// let a = Vector::from([1.0, 2.0, 3.0]);
/// let b = Vector::from([4.0, 5.0, 6.0]);
/// assert_eq!(a.dot(&b), 32.0);
/// assert_eq!(a.cross(&b), Some(Vector::from([-3.0, 6.0, -3.0])));
/// ```
///
/// # Panics
///
/// Elementwise operators between vectors panic if the two dimensions differ. Operations that can
/// fail on well-shaped input (e.g. [`VecSlice::checked_div`]) return `None` instead.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Vector(Vec<Scalar>);

/// A borrowed run of [`Scalar`]s, e.g. a row of a [`crate::Matrix`] or the contents of a [`Vector`].
#[derive(RefCast, PartialEq, Debug)]
#[repr(transparent)]
pub struct VecSlice([Scalar]);

impl VecSlice {
    /// Wraps a slice of scalars
    #[inline]
    pub fn new(values: &[Scalar]) -> &VecSlice {
        VecSlice::ref_cast(values)
    }

    /// Wraps a mutable slice of scalars
    #[inline]
    pub fn new_mut(values: &mut [Scalar]) -> &mut VecSlice {
        VecSlice::ref_cast_mut(values)
    }

    /// Returns a copy of the slice as a [`Vector`]
    #[inline]
    pub fn to_vector(&self) -> Vector {
        self.0.to_vec().into()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Scalar] {
        &self.0
    }

    /// The number of components, i.e. the dimension
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Scalar> {
        self.0.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Scalar> {
        self.0.iter_mut()
    }

    /// Returns true if every component is exactly zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&a| a == 0.0)
    }

    /// Applies `f` to every component, returning the results as a new vector
    #[inline]
    pub fn map(&self, f: impl FnMut(Scalar) -> Scalar) -> Vector {
        self.0.iter().copied().map(f).collect()
    }

    /// Combines two slices of equal length componentwise
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if the lengths differ.
    pub fn try_zip_with(
        &self,
        rhs: &VecSlice,
        mut f: impl FnMut(Scalar, Scalar) -> Scalar,
    ) -> Result<Vector, LinalgError> {
        LinalgError::check_dims(self.len(), rhs.len())?;
        Ok(self
            .0
            .iter()
            .zip(rhs.0.iter())
            .map(|(&a, &b)| f(a, b))
            .collect())
    }

    /// Componentwise division.
    ///
    /// Returns `None` if any component of `rhs` is exactly zero.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    #[track_caller]
    pub fn checked_div(&self, rhs: &VecSlice) -> Option<Vector> {
        fatal(LinalgError::check_dims(self.len(), rhs.len()));
        if let Some(i) = rhs.0.iter().position(|&b| b == 0.0) {
            log::debug!("vector division by zero component at index {}", i);
            return None;
        }
        Some(fatal(self.try_zip_with(rhs, |a, b| a / b)))
    }

    /// Raises every component to `exponent` by repeated multiplication.
    ///
    /// An exponent of 0 performs no multiplications and leaves the values unchanged.
    pub fn pow(&self, exponent: u32) -> Vector {
        self.map(|a| {
            let mut x = a;
            for _ in 1..exponent {
                x *= a;
            }
            x
        })
    }

    /// Computes the dot product of two slices
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if the lengths differ.
    #[inline]
    pub fn try_dot(&self, rhs: &VecSlice) -> Result<Scalar, LinalgError> {
        LinalgError::check_dims(self.len(), rhs.len())?;
        Ok(self.0.iter().zip(rhs.0.iter()).map(|(a, b)| a * b).sum())
    }

    /// Computes the dot product of two slices
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    #[inline]
    #[track_caller]
    pub fn dot(&self, rhs: &VecSlice) -> Scalar {
        fatal(self.try_dot(rhs))
    }

    /// Cross product of two 3-dimensional vectors, or `None` if either operand is not 3-dimensional
    pub fn cross(&self, rhs: &VecSlice) -> Option<Vector> {
        if self.len() != 3 || rhs.len() != 3 {
            log::debug!(
                "cross product undefined for dimensions {} and {}",
                self.len(),
                rhs.len()
            );
            return None;
        }
        let (a, b) = (&self.0, &rhs.0);
        Some(Vector::from([
            a[1] * b[2] - a[2] * b[1],
            -(a[0] * b[2] - a[2] * b[0]),
            a[0] * b[1] - a[1] * b[0],
        ]))
    }

    /// The Euclidean length
    #[inline]
    pub fn magnitude(&self) -> Scalar {
        self.0.iter().map(|a| a * a).sum::<Scalar>().sqrt()
    }

    /// Divides every component by the magnitude, in place.
    ///
    /// The result is NaN if the magnitude is zero.
    pub fn normalize(&mut self) {
        let mag = self.magnitude();
        for a in self.0.iter_mut() {
            *a /= mag;
        }
    }

    /// Returns a normalized copy. See [`VecSlice::normalize`].
    pub fn normalized(&self) -> Vector {
        let mag = self.magnitude();
        self.map(|a| a / mag)
    }

    /// Two vectors are orthogonal if their dot product is exactly zero
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    #[inline]
    #[track_caller]
    pub fn is_orthogonal(&self, rhs: &VecSlice) -> bool {
        self.dot(rhs) == 0.0
    }

    /// Returns true if the magnitude is within [`NORMALIZED_TOLERANCE`] of 1
    #[inline]
    pub fn is_normalized(&self) -> bool {
        (self.magnitude() - 1.0).abs() < NORMALIZED_TOLERANCE
    }

    /// Multiplies every component by `scalar`, in place
    #[inline]
    pub fn scale(&mut self, scalar: Scalar) {
        for a in self.0.iter_mut() {
            *a *= scalar;
        }
    }

    /// Adds `rhs * scalar` into this slice, in place
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    #[track_caller]
    pub fn add_scaled(&mut self, rhs: &VecSlice, scalar: Scalar) {
        fatal(LinalgError::check_dims(self.len(), rhs.len()));
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b * scalar;
        }
    }

    /// Adds `len` components starting at `source`, scaled by `scalar`, onto the `len` components
    /// starting at `target`. The two ranges must not overlap.
    #[inline]
    pub fn add_scaled_range(&mut self, source: usize, target: usize, len: usize, scalar: Scalar) {
        for i in 0..len {
            self.0[target + i] += self.0[source + i] * scalar;
        }
    }

    /// Multiplies the `len` components starting at `start` by `scalar`
    #[inline]
    pub fn scale_range(&mut self, start: usize, len: usize, scalar: Scalar) {
        self.0[start..start + len]
            .iter_mut()
            .for_each(|a| *a *= scalar);
    }

    #[inline]
    pub fn swap_range(&mut self, source: usize, target: usize, len: usize) {
        for i in 0..len {
            self.0.swap(source + i, target + i);
        }
    }
}

impl Index<usize> for VecSlice {
    type Output = Scalar;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.0.index(index)
    }
}

impl IndexMut<usize> for VecSlice {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.0.index_mut(index)
    }
}

impl Index<Range<usize>> for VecSlice {
    type Output = VecSlice;

    #[inline]
    fn index(&self, index: Range<usize>) -> &Self::Output {
        VecSlice::ref_cast(&self.0[index])
    }
}

impl IndexMut<Range<usize>> for VecSlice {
    #[inline]
    fn index_mut(&mut self, index: Range<usize>) -> &mut Self::Output {
        VecSlice::ref_cast_mut(self.0.index_mut(index))
    }
}

impl Vector {
    /// Creates a vector of `dim` zeros
    #[inline]
    pub fn zeros(dim: usize) -> Self {
        Vector(vec![0.0; dim])
    }

    /// Creates a vector of `dim` copies of `value`
    #[inline]
    pub fn filled(dim: usize, value: Scalar) -> Self {
        Vector(vec![value; dim])
    }

    /// Builds a vector from a function `f` giving the value of each component
    #[inline]
    pub fn build(dim: usize, f: impl FnMut(usize) -> Scalar) -> Self {
        (0..dim).map(f).collect()
    }

    /// Creates a vector of `dim` floats drawn uniformly from `range`
    #[inline]
    pub fn random(rng: &mut impl Rng, dim: usize, range: Range<Scalar>) -> Self {
        (0..dim).map(|_| rng.random_range(range.clone())).collect()
    }

    /// Creates a vector of `dim` integers drawn uniformly from `range`, stored as floats
    #[inline]
    pub fn random_int(rng: &mut impl Rng, dim: usize, range: Range<i64>) -> Self {
        (0..dim)
            .map(|_| rng.random_range(range.clone()) as Scalar)
            .collect()
    }

    /// The number of components
    #[inline]
    pub fn dim(&self) -> usize {
        self.0.len()
    }
}

impl Deref for Vector {
    type Target = VecSlice;
    fn deref(&self) -> &Self::Target {
        VecSlice::ref_cast(&self.0)
    }
}

impl DerefMut for Vector {
    fn deref_mut(&mut self) -> &mut Self::Target {
        VecSlice::ref_cast_mut(&mut self.0)
    }
}

impl From<Vec<Scalar>> for Vector {
    fn from(value: Vec<Scalar>) -> Self {
        Vector(value)
    }
}

impl<const N: usize> From<[Scalar; N]> for Vector {
    fn from(value: [Scalar; N]) -> Self {
        Vector(value.to_vec())
    }
}

impl From<&VecSlice> for Vector {
    fn from(value: &VecSlice) -> Self {
        value.to_vector()
    }
}

impl From<Vector> for Vec<Scalar> {
    fn from(value: Vector) -> Self {
        value.0
    }
}

impl FromIterator<Scalar> for Vector {
    fn from_iter<T: IntoIterator<Item = Scalar>>(iter: T) -> Self {
        Vector(Vec::from_iter(iter))
    }
}

macro_rules! impl_vector_op {
    ($trait:ident, $method:ident, $op:tt) => {
        /// Componentwise operation, panicking on a dimension mismatch
        impl $trait for &Vector {
            type Output = Vector;

            #[track_caller]
            fn $method(self, rhs: Self) -> Self::Output {
                fatal(self.try_zip_with(rhs, |a, b| a $op b))
            }
        }

        impl $trait for Vector {
            type Output = Vector;

            #[track_caller]
            fn $method(self, rhs: Self) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}

macro_rules! impl_vector_scalar_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<Scalar> for &Vector {
            type Output = Vector;

            #[inline]
            fn $method(self, rhs: Scalar) -> Self::Output {
                self.map(|a| a $op rhs)
            }
        }

        impl $trait<Scalar> for Vector {
            type Output = Vector;

            #[inline]
            fn $method(self, rhs: Scalar) -> Self::Output {
                (&self).$method(rhs)
            }
        }
    };
}

impl_vector_op!(Add, add, +);
impl_vector_op!(Sub, sub, -);
impl_vector_op!(Mul, mul, *);

impl_vector_scalar_op!(Add, add, +);
impl_vector_scalar_op!(Sub, sub, -);
impl_vector_scalar_op!(Mul, mul, *);
impl_vector_scalar_op!(Div, div, /);

impl AbsDiffEq for Vector {
    type Epsilon = Scalar;

    fn default_epsilon() -> Self::Epsilon {
        <Scalar as AbsDiffEq>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.dim() == other.dim()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Vector {
    fn default_max_relative() -> Self::Epsilon {
        <Scalar as RelativeEq>::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.dim() == other.dim()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn add_commutes() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..20 {
            let a = Vector::random(&mut rng, 7, -10.0..10.0);
            let b = Vector::random(&mut rng, 7, -10.0..10.0);
            assert_eq!(&a + &b, &b + &a);
        }
    }

    #[test]
    fn sub_componentwise() {
        let mut rng = SmallRng::seed_from_u64(2);
        let a = Vector::random(&mut rng, 12, -5.0..5.0);
        let b = Vector::random(&mut rng, 12, -5.0..5.0);
        let c = &a - &b;
        for i in 0..a.dim() {
            assert_eq!(c[i], a[i] - b[i]);
        }
    }

    #[test]
    fn scalar_ops() {
        let v = Vector::from([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(&v + 2.0, Vector::from([3.0, 4.0, 5.0, 6.0]));
        assert_eq!(&v - 2.0, Vector::from([-1.0, 0.0, 1.0, 2.0]));
        assert_eq!(&v * 2.0, Vector::from([2.0, 4.0, 6.0, 8.0]));
        assert_eq!(v / 2.0, Vector::from([0.5, 1.0, 1.5, 2.0]));
    }

    #[test]
    fn elementwise_mul() {
        let a = Vector::from([1.0, 2.0, 3.0, 4.0]);
        let b = Vector::filled(4, 2.0);
        assert_eq!(a * b, Vector::from([2.0, 4.0, 6.0, 8.0]));
    }

    #[test]
    #[should_panic(expected = "Dimension mismatch")]
    fn add_dimension_mismatch() {
        let _ = Vector::zeros(3) + Vector::zeros(4);
    }

    #[test]
    #[should_panic(expected = "Dimension mismatch")]
    fn dot_dimension_mismatch() {
        Vector::zeros(2).dot(&Vector::zeros(5));
    }

    #[test]
    fn try_dot_mismatch() {
        assert_eq!(
            Vector::zeros(2).try_dot(&Vector::zeros(5)),
            Err(LinalgError::DimensionMismatch { left: 2, right: 5 })
        );
    }

    #[test]
    fn checked_div() {
        let a = Vector::from([1.0, 2.0, 3.0]);
        assert_eq!(a.checked_div(&Vector::from([1.0, 0.0, 3.0])), None);
        assert_eq!(
            a.checked_div(&Vector::from([2.0, 4.0, 3.0])),
            Some(Vector::from([0.5, 0.5, 1.0]))
        );
    }

    #[test]
    #[should_panic(expected = "Dimension mismatch")]
    fn checked_div_mismatch_is_fatal() {
        Vector::zeros(3).checked_div(&Vector::zeros(2));
    }

    #[test]
    fn pow() {
        let v = Vector::from([1.0, 2.0, -3.0]);
        assert_eq!(v.pow(0), v);
        assert_eq!(v.pow(1), v);
        assert_eq!(v.pow(2), Vector::from([1.0, 4.0, 9.0]));
        assert_eq!(v.pow(3), Vector::from([1.0, 8.0, -27.0]));
    }

    #[test]
    fn dot_and_cross() {
        let a = Vector::from([1.0, 2.0, 3.0]);
        let b = Vector::from([4.0, 5.0, 6.0]);
        assert_eq!(a.dot(&b), 32.0);
        assert_eq!(a.cross(&b), Some(Vector::from([-3.0, 6.0, -3.0])));
    }

    #[test]
    fn cross_orthogonal_to_operands() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..20 {
            let a = Vector::random_int(&mut rng, 3, -20..20);
            let b = Vector::random_int(&mut rng, 3, -20..20);
            let c = a.cross(&b).unwrap();
            assert_eq!(a.dot(&c), 0.0);
            assert_eq!(b.dot(&c), 0.0);
            assert!(a.is_orthogonal(&c));
        }
    }

    #[test]
    fn cross_needs_three_dimensions() {
        assert_eq!(Vector::zeros(4).cross(&Vector::zeros(4)), None);
        assert_eq!(Vector::zeros(3).cross(&Vector::zeros(2)), None);
    }

    #[test]
    fn normalize() {
        let mut rng = SmallRng::seed_from_u64(4);
        for _ in 0..20 {
            let mut v = Vector::random(&mut rng, 5, 0.5..50.0);
            let n = v.normalized();
            assert_relative_eq!(n.magnitude(), 1.0, epsilon = NORMALIZED_TOLERANCE);
            assert!(n.is_normalized());

            v.normalize();
            assert_eq!(v, n);
        }
        assert!(!Vector::from([3.0, 4.0]).is_normalized());
        assert_eq!(Vector::from([3.0, 4.0]).magnitude(), 5.0);
    }

    #[test]
    fn exact_equality() {
        let a = Vector::from([0.1, 0.2]);
        let b = Vector::from([0.1, 0.2 + 1e-12]);
        assert_ne!(a, b);
        assert_relative_eq!(a, b, epsilon = 1e-9);
        assert_ne!(Vector::zeros(2), Vector::zeros(3));
    }

    #[test]
    fn orthogonal() {
        let a = Vector::from([1.0, 2.0, 3.0, 4.0]);
        let b = Vector::from([-2.0, 1.0, -4.0, 3.0]);
        assert!(a.is_orthogonal(&b));
        assert!(!a.is_orthogonal(&a));
    }

    #[test]
    fn slices() {
        let mut v = Vector::from([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(v[1..3].to_vector(), Vector::from([2.0, 3.0]));

        v.swap_range(0, 3, 3);
        assert_eq!(v, Vector::from([4.0, 5.0, 6.0, 1.0, 2.0, 3.0]));

        v.add_scaled_range(3, 0, 3, -4.0);
        assert_eq!(v, Vector::from([0.0, -3.0, -6.0, 1.0, 2.0, 3.0]));

        v[3..6].scale(2.0);
        assert_eq!(v, Vector::from([0.0, -3.0, -6.0, 2.0, 4.0, 6.0]));
    }

    #[test]
    fn random_in_range() {
        let mut rng = SmallRng::seed_from_u64(5);
        let v = Vector::random(&mut rng, 100, -1.0..1.0);
        assert!(v.iter().all(|&a| (-1.0..1.0).contains(&a)));

        let v = Vector::random_int(&mut rng, 100, 0..10);
        assert!(v.iter().all(|&a| a == a.trunc() && (0.0..10.0).contains(&a)));
    }
}
