//! Dot-product kernels and their selection.
//!
//! # Module Structure
//!
//! - `generic`: Sequential multiply-accumulate, any [`Element`], any length
//! - `x86_avx2`: AVX2+FMA 4-accumulator kernel for `f32` blocks of 32 (x86_64 only)
//! - `dispatch`: Capability detection and the cached process-wide [`Selection`]
//!
//! Both kernels implement [`DotKernel`]. Callers that know their kernel at
//! compile time hold a [`Generic`] or [`Accelerated`] value and get a direct,
//! inlinable call; everyone else goes through [`Selection`], resolved once.
#![allow(clippy::doc_markdown)] // Contains ISA/architecture nomenclature in docs.

use std::fmt;

use crate::element::Element;
use crate::error::{Error, Result};

pub mod generic;

pub(crate) mod dispatch;

// =============================================================================
// Unsafe Invariants Reference
// =============================================================================
// SAFETY: Shared invariants for SIMD unsafe blocks in this module tree.
// - Condition 1: Both operands have the same length, a multiple of BLOCK_SIZE;
//   callers hold `&[f32; N]` pairs and the block gate is checked at compile time.
// - Condition 2: Target-featured functions are called only after runtime feature
//   checks or when the build target statically enables the feature.
// - Condition 3: Loads use `_mm256_loadu_ps`, which permits unaligned access.

#[cfg(target_arch = "x86_64")]
mod x86_avx2;

pub use dispatch::{
    capabilities, install, selection, warmup_kernel_cache, BlockDotFn, Capabilities, Selection,
};

#[cfg(test)]
mod generic_tests;



/// Elements per accelerated iteration: 4 accumulators × 8 lanes.
pub const BLOCK_SIZE: usize = ACCUMULATORS * LANES;

/// Independent vector accumulators in the accelerated kernel.
pub const ACCUMULATORS: usize = 4;

/// `f32` lanes in a 256-bit register.
pub const LANES: usize = 8;

/// Returns `true` when an `f32` buffer of length `n` passes the block gate.
#[must_use]
pub const fn is_blocked_len(n: usize) -> bool {
    n != 0 && n % BLOCK_SIZE == 0
}

/// Compile-time length gate.
pub(crate) struct Gate<const N: usize>;

impl<const N: usize> Gate<N> {
    /// `N` is routed to the accelerated kernel when the hardware allows.
    pub(crate) const BLOCKED: bool = is_blocked_len(N);

    /// Evaluated (and therefore checked) at monomorphization.
    pub(crate) const ASSERT_MULTIPLE_OF_BLOCK: () = assert!(
        N % BLOCK_SIZE == 0,
        "accelerated dot kernel requires a length that is a multiple of 32"
    );
}

/// Which kernel implementation computed (or will compute) a dot product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelKind {
    /// Sequential generic kernel.
    Generic,
    /// AVX2+FMA 4-accumulator kernel.
    Accelerated,
}

impl KernelKind {
    /// Lower-case name, as used in configuration and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Accelerated => "accelerated",
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dot-product implementation for element type `T`.
pub trait DotKernel<T: Element>: Copy + Send + Sync {
    /// Sum of elementwise products of `a` and `b`.
    fn dot<const N: usize>(&self, a: &[T; N], b: &[T; N]) -> T;

    /// Implementation behind this kernel.
    fn kind(&self) -> KernelKind;
}

/// The sequential kernel, valid for every element type and length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generic;

impl<T: Element> DotKernel<T> for Generic {
    #[inline]
    fn dot<const N: usize>(&self, a: &[T; N], b: &[T; N]) -> T {
        generic::dot(a, b)
    }

    fn kind(&self) -> KernelKind {
        KernelKind::Generic
    }
}

/// Proof that the AVX2+FMA kernel may run on this CPU.
///
/// Only obtainable through [`Accelerated::detect`] or [`Accelerated::new`],
/// so holding one means the capability check already happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accelerated {
    #[cfg(target_arch = "x86_64")]
    _detected: (),
    #[cfg(not(target_arch = "x86_64"))]
    never: std::convert::Infallible,
}

impl Accelerated {
    /// Returns the kernel if the CPU supports AVX2 and FMA.
    #[must_use]
    pub fn detect() -> Option<Self> {
        Self::new().ok()
    }

    /// Returns the kernel, or the first missing CPU feature.
    pub fn new() -> Result<Self> {
        let caps = capabilities();
        if !caps.avx2 {
            return Err(Error::UnsupportedCapability("avx2"));
        }
        if !caps.fma {
            return Err(Error::UnsupportedCapability("fma"));
        }
        #[cfg(target_arch = "x86_64")]
        {
            Ok(Self { _detected: () })
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            // `capabilities()` reports neither feature off x86_64.
            Err(Error::UnsupportedCapability("avx2"))
        }
    }

    /// Block kernel over slices.
    ///
    /// Both slices must have the same length, a multiple of [`BLOCK_SIZE`].
    #[inline]
    pub(crate) fn dot_blocks(self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len() % BLOCK_SIZE, 0);
        #[cfg(target_arch = "x86_64")]
        {
            // SAFETY: `self` exists only after AVX2+FMA detection succeeded;
            // equal lengths and block multiple hold per the contract above.
            unsafe { x86_avx2::dot_product_avx2_4acc_blocks(a, b) }
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            let _ = (a, b);
            match self.never {}
        }
    }
}

impl DotKernel<f32> for Accelerated {
    #[inline]
    fn dot<const N: usize>(&self, a: &[f32; N], b: &[f32; N]) -> f32 {
        let () = Gate::<N>::ASSERT_MULTIPLE_OF_BLOCK;
        self.dot_blocks(a, b)
    }

    fn kind(&self) -> KernelKind {
        KernelKind::Accelerated
    }
}
