//! # dotkernel
//!
//! Fixed-length dot products for the hot path of NNUE-style inference.
//!
//! `dot::<T, N>(a, b)` takes two `&[T; N]` buffers, so equal lengths and a
//! single element type are guaranteed by the type system. It resolves to:
//!
//! - **Generic kernel**: sequential multiply-accumulate in index order, any
//!   [`Element`] type, any length.
//! - **Accelerated kernel**: AVX2+FMA, four 8-lane accumulators, deferred
//!   horizontal reduction. Used only for `f32` when `N` is a non-zero
//!   multiple of 32 and the CPU supports AVX2 and FMA.
//!
//! The length/type part of that gate is decided at compile time; the CPU
//! part once per process (see [`kernel::selection`]). The two kernels sum in
//! different orders, so their `f32` results agree only up to rounding.
//!
//! ## Quick Start
//!
//! ```rust
//! use dotkernel::{dot, Affine, StackVector};
//!
//! let a = [1.0_f32, 2.0, 3.0, 4.0];
//! let b = [5.0_f32, 6.0, 7.0, 8.0];
//! assert_eq!(dot(&a, &b), 70.0);
//!
//! // A 32 -> 2 dense layer; every row is one accelerated dot product.
//! let layer = Affine::<f32, 32, 2>::from_rows(vec![[0.5; 32], [-0.25; 32]], [1.0, 0.0])?;
//! let y = layer.forward(&StackVector::from_array([1.0; 32]));
//! assert_eq!(y.data, [17.0, -8.0]);
//! # Ok::<(), dotkernel::Error>(())
//! ```
//!
//! ## Choosing a kernel explicitly
//!
//! ```rust
//! use dotkernel::kernel::{Accelerated, DotKernel, Generic};
//!
//! let a = [0.5_f32; 64];
//! let b = [2.0_f32; 64];
//! assert_eq!(Generic.dot(&a, &b), 64.0);
//! if let Some(fast) = Accelerated::detect() {
//!     assert_eq!(fast.dot(&a, &b), 64.0);
//! }
//! ```

#![warn(missing_docs)]
// Clippy lints configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(
    test,
    allow(
        clippy::doc_markdown,
        clippy::uninlined_format_args,
        clippy::cast_lossless,
        clippy::manual_assert,
        clippy::unwrap_used
    )
)]

pub mod affine;
pub mod config;
pub mod element;
pub mod error;
pub mod kernel;
pub mod vector;
#[cfg(test)]
mod vector_tests;

pub use affine::Affine;
pub use config::{KernelConfig, KernelMode};
pub use element::{Dequantized, Element, Quantized};
pub use error::{Error, Result};
pub use kernel::{DotKernel, KernelKind};
pub use vector::StackVector;

/// Dot product of two fixed-length buffers.
///
/// `f32` buffers whose length is a non-zero multiple of 32 go through the
/// process-wide kernel selection; every other `(T, N)` uses the generic
/// kernel. Returns zero for `N == 0`.
///
/// # Example
///
/// ```
/// let a = [1_i32, 2, 3];
/// let b = [4_i32, 5, 6];
/// assert_eq!(dotkernel::dot(&a, &b), 32);
/// ```
#[inline]
#[must_use]
pub fn dot<T: Element, const N: usize>(a: &[T; N], b: &[T; N]) -> T {
    T::dot(a, b)
}
