//! Fixed-size, 32-byte aligned vectors.
//!
//! `StackVector<T, N>` is the buffer type layers pass around between dot
//! products. The alignment matches one AVX2 register so whole-vector loads
//! never split a cache line, although the kernels do not rely on it.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::element::{Dequantized, Element, Quantized};
use crate::error::{Error, Result};
use crate::kernel::DotKernel;

/// A fixed-length, 32-byte aligned vector of `N` elements.
#[derive(Clone, Copy, PartialEq)]
#[repr(C, align(32))]
pub struct StackVector<T, const N: usize> {
    /// The elements.
    pub data: [T; N],
}

struct AssertSingle<const N: usize>;

impl<const N: usize> AssertSingle<N> {
    const OK: () = assert!(N == 1, "item() requires a vector of length 1");
}

impl<T: Element, const N: usize> StackVector<T, N> {
    /// All-zero vector.
    #[must_use]
    pub fn zeros() -> Self {
        Self { data: [T::ZERO; N] }
    }

    /// Wraps an array.
    #[must_use]
    pub const fn from_array(data: [T; N]) -> Self {
        Self { data }
    }

    /// Copies a runtime-sized slice; the length must be exactly `N`.
    pub fn from_slice(values: &[T]) -> Result<Self> {
        let data: [T; N] = values.try_into().map_err(|_| Error::ShapeMismatch {
            what: "stack vector",
            expected: N,
            actual: values.len(),
        })?;
        Ok(Self { data })
    }

    /// Converts every element of `values` into `T`.
    #[must_use]
    pub fn from_converted<U: Copy + Into<T>>(values: &[U; N]) -> Self {
        Self {
            data: std::array::from_fn(|i| values[i].into()),
        }
    }

    /// `scale * self[i]` as floats, for integer vectors holding quantized values.
    #[must_use]
    pub fn dequantize<U: Dequantized>(&self, scale: U) -> StackVector<U, N>
    where
        T: Quantized,
    {
        StackVector {
            data: std::array::from_fn(|i| scale * U::from_quantized(self.data[i])),
        }
    }

    /// Dot product with `other` through the process-wide kernel selection.
    #[inline]
    #[must_use]
    pub fn dot(&self, other: &[T; N]) -> T {
        T::dot(&self.data, other)
    }

    /// Dot product with `other` through a specific kernel.
    #[inline]
    #[must_use]
    pub fn dot_with<K: DotKernel<T>>(&self, kernel: &K, other: &[T; N]) -> T {
        kernel.dot(&self.data, other)
    }

    /// `self[i] += other[i]`.
    pub fn add_(&mut self, other: &[T; N]) -> &mut Self {
        for (x, &y) in self.data.iter_mut().zip(other) {
            *x = *x + y;
        }
        self
    }

    /// `self[i] -= other[i]`.
    pub fn sub_(&mut self, other: &[T; N]) -> &mut Self
    where
        T: std::ops::Sub<Output = T>,
    {
        for (x, &y) in self.data.iter_mut().zip(other) {
            *x = *x - y;
        }
        self
    }

    /// `self[i] += c * other[i]`.
    pub fn fma_(&mut self, c: T, other: &[T; N]) -> &mut Self {
        for (x, &y) in self.data.iter_mut().zip(other) {
            *x = T::mul_acc(*x, c, y);
        }
        self
    }

    /// `self[i] = f(self[i])`.
    pub fn apply_<F: FnMut(T) -> T>(&mut self, mut f: F) -> &mut Self {
        for x in &mut self.data {
            *x = f(*x);
        }
        self
    }

    /// The single element of a length-1 vector.
    #[must_use]
    pub fn item(&self) -> T {
        let () = AssertSingle::<N>::OK;
        self.data[0]
    }
}

impl<T: Element, const N: usize> Default for StackVector<T, N> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T, const N: usize> From<[T; N]> for StackVector<T, N> {
    fn from(data: [T; N]) -> Self {
        Self { data }
    }
}

impl<T, const N: usize> Deref for StackVector<T, N> {
    type Target = [T; N];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T, const N: usize> DerefMut for StackVector<T, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl<T, const N: usize> AsRef<[T; N]> for StackVector<T, N> {
    fn as_ref(&self) -> &[T; N] {
        &self.data
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for StackVector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackVector")
            .field("len", &N)
            .field("data", &self.data.as_slice())
            .finish()
    }
}

impl<T: fmt::Display, const N: usize> fmt::Display for StackVector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StackVector<{N}>([")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{x}")?;
        }
        f.write_str("])")
    }
}
