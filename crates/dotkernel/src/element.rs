//! Numeric element types accepted by the dot kernel.
//!
//! [`Element::dot`] is where a concrete `(T, N)` pair is resolved to a kernel.
//! The default body is the generic kernel; `f32` overrides it and routes
//! lengths that pass the block gate to the cached accelerated kernel.

use std::fmt::Debug;
use std::ops::{Add, Mul};

use crate::kernel::{dispatch, generic, Gate};

/// A numeric type the dot kernel can accumulate.
pub trait Element:
    Copy + PartialEq + Debug + Add<Output = Self> + Mul<Output = Self> + Send + Sync + 'static
{
    /// Additive identity.
    const ZERO: Self;

    /// One accumulation step, `acc + x * y`.
    ///
    /// Integer types wrap modulo 2^bits, so the result never depends on
    /// whether overflow checks are compiled in.
    #[inline]
    #[must_use]
    fn mul_acc(acc: Self, x: Self, y: Self) -> Self {
        acc + x * y
    }

    /// Dot product of two fixed-length buffers.
    #[inline]
    #[must_use]
    fn dot<const N: usize>(a: &[Self; N], b: &[Self; N]) -> Self {
        generic::dot(a, b)
    }
}

impl Element for f32 {
    const ZERO: Self = 0.0;

    #[inline]
    fn dot<const N: usize>(a: &[Self; N], b: &[Self; N]) -> Self {
        // `Gate::<N>::BLOCKED` is a constant: the branch not taken is
        // removed at monomorphization.
        if Gate::<N>::BLOCKED {
            dispatch::selection().dot_blocks(a, b)
        } else {
            generic::dot(a, b)
        }
    }
}

macro_rules! impl_float_element {
    ($($t:ty => $zero:expr),* $(,)?) => {
        $(
            impl Element for $t {
                const ZERO: Self = $zero;
            }
        )*
    };
}

macro_rules! impl_integer_element {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                const ZERO: Self = 0;

                #[inline]
                fn mul_acc(acc: Self, x: Self, y: Self) -> Self {
                    acc.wrapping_add(x.wrapping_mul(y))
                }
            }

            impl Quantized for $t {
                #[inline]
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn to_f32(self) -> f32 {
                    self as f32
                }

                #[inline]
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_float_element! {
    f64 => 0.0,
    half::f16 => half::f16::ZERO,
    half::bf16 => half::bf16::ZERO,
}

impl_integer_element!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// An integer element holding quantized values.
pub trait Quantized: Element {
    /// Nearest `f32`.
    fn to_f32(self) -> f32;
    /// Nearest `f64`.
    fn to_f64(self) -> f64;
}

/// A floating-point element quantized values can be scaled back into.
pub trait Dequantized: Element {
    /// Converts a quantized value, without scaling.
    fn from_quantized<Q: Quantized>(q: Q) -> Self;
}

impl Dequantized for f32 {
    #[inline]
    fn from_quantized<Q: Quantized>(q: Q) -> Self {
        q.to_f32()
    }
}

impl Dequantized for f64 {
    #[inline]
    fn from_quantized<Q: Quantized>(q: Q) -> Self {
        q.to_f64()
    }
}
