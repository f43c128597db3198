//! Capability detection and cached kernel selection.
//!
//! This module provides:
//! - `Capabilities` / `capabilities()` for cached CPU feature detection
//! - `Selection`, a `Copy` handle holding the chosen `f32` block kernel as a
//!   plain function pointer
//! - `selection()` / `install()` for the process-wide selection, made once
//! - `warmup_kernel_cache()` for eliminating cold-start latency

use std::sync::OnceLock;

use super::{generic, Accelerated, DotKernel, Gate, KernelKind};
use crate::config::{KernelConfig, KernelMode};
use crate::error::{Error, Result};

// =============================================================================
// Cached capability detection
// =============================================================================

/// CPU features relevant to the accelerated kernel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// 256-bit integer/float vector instructions.
    pub avx2: bool,
    /// Fused multiply-add.
    pub fma: bool,
}

impl Capabilities {
    /// Both features required by the accelerated kernel are present.
    #[must_use]
    pub const fn supports_accelerated(self) -> bool {
        self.avx2 && self.fma
    }
}

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

/// Probes the CPU. Statically enabled target features short-circuit the
/// runtime check inside `is_x86_feature_detected!`.
fn detect_capabilities() -> Capabilities {
    #[cfg(target_arch = "x86_64")]
    {
        Capabilities {
            avx2: is_x86_feature_detected!("avx2"),
            fma: is_x86_feature_detected!("fma"),
        }
    }

    #[cfg(not(target_arch = "x86_64"))]
    {
        Capabilities::default()
    }
}

/// Returns the cached CPU capabilities.
#[inline]
#[must_use]
pub fn capabilities() -> Capabilities {
    *CAPABILITIES.get_or_init(detect_capabilities)
}

// =============================================================================
// Selection
// =============================================================================

/// Block kernel signature: equal-length slices, length a multiple of 32.
pub type BlockDotFn = fn(&[f32], &[f32]) -> f32;

fn block_dot_generic(a: &[f32], b: &[f32]) -> f32 {
    generic::dot_slice(a, b)
}

#[cfg(target_arch = "x86_64")]
fn block_dot_accelerated(a: &[f32], b: &[f32]) -> f32 {
    // Only stored in a `Selection` built from a detected `Accelerated`.
    Accelerated { _detected: () }.dot_blocks(a, b)
}

/// A resolved `f32` kernel choice.
///
/// Cheap to copy; the block kernel is a function pointer chosen when the
/// selection is built, so calls through it never re-check the CPU.
#[derive(Debug, Clone, Copy)]
pub struct Selection {
    kind: KernelKind,
    block_dot: BlockDotFn,
}

impl Selection {
    /// Selection that always uses the generic kernel.
    #[must_use]
    pub const fn generic() -> Self {
        Self {
            kind: KernelKind::Generic,
            block_dot: block_dot_generic,
        }
    }

    /// Selection that uses the accelerated kernel for block-gated lengths.
    #[must_use]
    pub fn accelerated(kernel: Accelerated) -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            let _ = kernel;
            Self {
                kind: KernelKind::Accelerated,
                block_dot: block_dot_accelerated,
            }
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            match kernel.never {}
        }
    }

    /// Best selection for this CPU.
    #[must_use]
    pub fn detect() -> Self {
        Accelerated::detect().map_or_else(Self::generic, Self::accelerated)
    }

    /// Selection requested by `config`.
    ///
    /// Fails with [`Error::UnsupportedCapability`] when the accelerated
    /// kernel is required and the CPU lacks AVX2 or FMA.
    pub fn from_config(config: &KernelConfig) -> Result<Self> {
        match config.mode {
            KernelMode::Auto => Ok(Self::detect()),
            KernelMode::Generic => Ok(Self::generic()),
            KernelMode::Accelerated => Accelerated::new().map(Self::accelerated),
        }
    }

    /// Kernel used for block-gated `f32` lengths.
    #[must_use]
    pub const fn kind(&self) -> KernelKind {
        self.kind
    }

    /// The cached block kernel.
    #[must_use]
    pub const fn block_dot_fn(&self) -> BlockDotFn {
        self.block_dot
    }

    /// Calls the block kernel. `N` must pass the block gate.
    #[inline]
    pub(crate) fn dot_blocks<const N: usize>(&self, a: &[f32; N], b: &[f32; N]) -> f32 {
        (self.block_dot)(a.as_slice(), b.as_slice())
    }
}

impl DotKernel<f32> for Selection {
    #[inline]
    fn dot<const N: usize>(&self, a: &[f32; N], b: &[f32; N]) -> f32 {
        if Gate::<N>::BLOCKED {
            self.dot_blocks(a, b)
        } else {
            generic::dot(a, b)
        }
    }

    fn kind(&self) -> KernelKind {
        self.kind
    }
}

// =============================================================================
// Process-wide selection
// =============================================================================

/// Process-wide selection - made once, at first use or by `install`.
static SELECTION: OnceLock<Selection> = OnceLock::new();

fn select_from_environment() -> Selection {
    let config = KernelConfig::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Failed to load dot kernel configuration, using defaults");
        KernelConfig::default()
    });

    let selection = Selection::from_config(&config).unwrap_or_else(|err| {
        tracing::warn!(
            error = %err,
            mode = ?config.mode,
            "Requested dot kernel unavailable, falling back to detection"
        );
        Selection::detect()
    });

    let caps = capabilities();
    tracing::info!(
        avx2 = caps.avx2,
        fma = caps.fma,
        kernel = %selection.kind(),
        "Dot kernel selected"
    );

    if config.warmup {
        run_warmup(selection);
    }
    selection
}

/// Returns the process-wide selection, making it on first call from the
/// layered [`KernelConfig`].
#[inline]
#[must_use]
pub fn selection() -> Selection {
    *SELECTION.get_or_init(select_from_environment)
}

/// Installs `selection` as the process-wide selection.
///
/// Must run before the first dot product on `f32`; afterwards the selection
/// is fixed and this returns [`Error::AlreadyInstalled`].
pub fn install(selection: Selection) -> Result<()> {
    let mut installed = false;
    let active = *SELECTION.get_or_init(|| {
        installed = true;
        selection
    });

    if installed {
        tracing::debug!(kernel = %active.kind(), "Dot kernel installed");
        Ok(())
    } else {
        Err(Error::AlreadyInstalled {
            active: active.kind(),
        })
    }
}

/// Warms up the kernel selection to eliminate cold-start latency.
///
/// Call this at application startup to ensure the first dot products
/// are as fast as subsequent ones.
///
/// # Example
///
/// ```
/// use dotkernel::kernel::warmup_kernel_cache;
/// warmup_kernel_cache();
/// ```
#[inline]
pub fn warmup_kernel_cache() {
    run_warmup(selection());
}

fn run_warmup(selection: Selection) {
    const WARMUP_LEN: usize = 512;
    let a = [0.01_f32; WARMUP_LEN];
    let b = [0.01_f32; WARMUP_LEN];
    for _ in 0..3 {
        let _ = std::hint::black_box(selection.dot(&a, &b));
    }
    tracing::debug!(kernel = %selection.kind(), "Dot kernel warmed up");
}
