//! Fixed-dimension vectors.
//!
//! The kernels are written once for a generic spatial dimension `N` and
//! instantiated for 1, 2, and 3 dimensions, so per-sample field and momentum
//! values live on the stack.

use std::ops::{
    Add, AddAssign,
    Sub, SubAssign,
    Mul, MulAssign,
    Div,
    Index, IndexMut,
};
use num_complex::Complex64 as C64;
use num_traits::Zero;

/// A fixed-dimension vector.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vector<const N: usize, T>(pub [T; N]);

impl<const N: usize, T: Zero + Copy> Vector<N, T> {
    /// Create a vector of all zeros.
    pub fn zeros() -> Self { Self([T::zero(); N]) }
}

impl<const N: usize, T: Copy> Vector<N, T> {
    /// Create a vector with every element set to `val`.
    pub fn splat(val: T) -> Self { Self([val; N]) }

    /// Create a vector by calling `f` on each index.
    pub fn from_fn<F>(f: F) -> Self
    where F: FnMut(usize) -> T
    {
        Self(std::array::from_fn(f))
    }

    /// Return an iterator over references to all elements.
    pub fn iter(&self) -> <&[T; N] as IntoIterator>::IntoIter {
        self.0.iter()
    }

    /// Call a function on each element, returning results in a new vector.
    pub fn map<U, F>(&self, mut f: F) -> Vector<N, U>
    where F: FnMut(T) -> U
    {
        Vector(std::array::from_fn(|k| f(self.0[k])))
    }

    /// Combine two vectors element-wise.
    pub fn zip_with<U, V, F>(&self, rhs: &Vector<N, U>, mut f: F) -> Vector<N, V>
    where
        U: Copy,
        F: FnMut(T, U) -> V,
    {
        Vector(std::array::from_fn(|k| f(self.0[k], rhs.0[k])))
    }
}

impl<const N: usize, T> Vector<N, T>
where Self: Dot<Output = T>
{
    /// Return the dot product of two vectors.
    pub fn dot(&self, rhs: &Self) -> T { Dot::dot(self, rhs) }
}

impl<const N: usize> Vector<N, f64> {
    /// Squared Euclidean length.
    pub fn norm_sqr(&self) -> f64 { self.dot(self) }

    /// Euclidean length.
    pub fn norm(&self) -> f64 { self.norm_sqr().sqrt() }

    /// Promote to a complex-valued vector.
    pub fn to_complex(&self) -> Vector<N, C64> { self.map(C64::from) }
}

impl<const N: usize> Vector<N, C64> {
    /// Element-wise complex conjugate.
    pub fn conj(&self) -> Self { self.map(|z| z.conj()) }

    /// Bilinear (non-conjugating) product with a real vector.
    pub fn dot_real(&self, rhs: &Vector<N, f64>) -> C64 {
        self.0.iter().zip(rhs.0.iter())
            .fold(C64::zero(), |acc, (l, r)| acc + *l * *r)
    }
}

impl<const N: usize, T> From<[T; N]> for Vector<N, T> {
    fn from(data: [T; N]) -> Self { Self(data) }
}

impl<const N: usize, T> IntoIterator for Vector<N, T> {
    type Item = T;
    type IntoIter = <[T; N] as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl<const N: usize, T, I> Index<I> for Vector<N, T>
where [T; N]: Index<I>
{
    type Output = <[T; N] as Index<I>>::Output;

    fn index(&self, index: I) -> &Self::Output { &self.0[index] }
}

impl<const N: usize, T, I> IndexMut<I> for Vector<N, T>
where [T; N]: IndexMut<I>
{
    fn index_mut(&mut self, index: I) -> &mut Self::Output { &mut self.0[index] }
}

impl<const N: usize, T> Zero for Vector<N, T>
where T: Zero + PartialEq + Copy
{
    fn zero() -> Self { Self([T::zero(); N]) }

    fn is_zero(&self) -> bool {
        let z = T::zero();
        self.0.iter().all(|x| x == &z)
    }
}

/// Vector dot product.
pub trait Dot {
    type Output;

    fn dot(&self, rhs: &Self) -> Self::Output;
}

impl<const N: usize, T> Dot for Vector<N, T>
where T: Copy + Zero + Mul<T, Output = T>
{
    type Output = T;

    fn dot(&self, rhs: &Self) -> Self::Output {
        self.0.iter().zip(rhs.0.iter())
            .fold(T::zero(), |acc, (l, r)| acc + *l * *r)
    }
}

impl<const N: usize, T> Add for Vector<N, T>
where T: Copy + Add<T, Output = T>
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output { self.zip_with(&rhs, |l, r| l + r) }
}

impl<const N: usize, T> AddAssign for Vector<N, T>
where T: AddAssign<T>
{
    fn add_assign(&mut self, rhs: Self) {
        self.0.iter_mut().zip(rhs.0)
            .for_each(|(l, r)| { *l += r; });
    }
}

impl<const N: usize, T> Sub for Vector<N, T>
where T: Copy + Sub<T, Output = T>
{
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output { self.zip_with(&rhs, |l, r| l - r) }
}

impl<const N: usize, T> SubAssign for Vector<N, T>
where T: SubAssign<T>
{
    fn sub_assign(&mut self, rhs: Self) {
        self.0.iter_mut().zip(rhs.0)
            .for_each(|(l, r)| { *l -= r; });
    }
}

impl<const N: usize, T> Mul<T> for Vector<N, T>
where T: Copy + Mul<T, Output = T>
{
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output { self.map(|l| l * rhs) }
}

impl<const N: usize, T> MulAssign<T> for Vector<N, T>
where T: Copy + MulAssign<T>
{
    fn mul_assign(&mut self, rhs: T) {
        self.0.iter_mut()
            .for_each(|l| { *l *= rhs; });
    }
}

impl<const N: usize, T> Div<T> for Vector<N, T>
where T: Copy + Div<T, Output = T>
{
    type Output = Self;

    fn div(self, rhs: T) -> Self::Output { self.map(|l| l / rhs) }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn arithmetic() {
        let u: Vector<3, f64> = Vector([1.0, 2.0, 2.0]);
        let v: Vector<3, f64> = Vector::splat(1.0);
        assert_eq!(u + v, Vector([2.0, 3.0, 3.0]));
        assert_eq!(u - v, Vector([0.0, 1.0, 1.0]));
        assert_eq!(u * 2.0, Vector([2.0, 4.0, 4.0]));
        assert_eq!(u / 2.0, Vector([0.5, 1.0, 1.0]));
        assert_eq!(u.dot(&v), 5.0);
        assert_eq!(u.norm(), 3.0);
        let mut w = u;
        w -= v;
        w += v;
        w *= 3.0;
        assert_eq!(w, Vector([3.0, 6.0, 6.0]));
    }

    #[test]
    fn complex() {
        let z: Vector<2, C64> = Vector([C64::new(1.0, 1.0), C64::new(0.0, -2.0)]);
        assert_eq!(z.conj(), Vector([C64::new(1.0, -1.0), C64::new(0.0, 2.0)]));
        let r: Vector<2, f64> = Vector([2.0, 1.0]);
        assert_eq!(z.dot_real(&r), C64::new(2.0, 0.0));
        assert!(Vector::<2, C64>::zeros().is_zero());
    }
}
