//! Generic (portable) dot-product kernel.
//!
//! This is the reference kernel: the accumulator starts at zero and each
//! element contributes exactly one `acc + a[i] * b[i]` step, in index order.
//! For floating-point types that order fixes the rounding of the result.
//! No fused multiply-add is used, even where the hardware has one. Integer
//! types wrap on overflow (see [`Element::mul_acc`]).
//!
//! The loop is written so the compiler *may* vectorize it for types with
//! associative arithmetic (integers); for floats the strict order prevents
//! reassociation and this path should be treated as a correctness baseline.

use crate::element::Element;

/// Dot product of two fixed-length buffers in index order.
///
/// Returns [`Element::ZERO`] for `N == 0` without touching either buffer.
#[inline]
#[must_use]
pub fn dot<T: Element, const N: usize>(a: &[T; N], b: &[T; N]) -> T {
    dot_slice(a, b)
}

/// Slice form of [`dot`]; both slices must have the same length.
#[inline]
#[must_use]
pub fn dot_slice<T: Element>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");
    a.iter()
        .zip(b.iter())
        .fold(T::ZERO, |acc, (&x, &y)| T::mul_acc(acc, x, y))
}
