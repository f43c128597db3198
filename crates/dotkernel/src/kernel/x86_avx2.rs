//! AVX2+FMA kernel for x86_64.
//!
//! One kernel shape: four 8-lane accumulators fed 32 elements per iteration,
//! combined pairwise and reduced with a 8→4→2→1 lane tree. The shape is part
//! of the numeric contract (it fixes rounding), not a tuning knob.
//!
//! All functions require AVX2+FMA detection before calling.

use super::BLOCK_SIZE;

/// AVX2 dot product over whole 32-element blocks with 4 accumulators.
///
/// The first block initializes the accumulators with a plain multiply;
/// every further block is folded in with `_mm256_fmadd_ps`.
///
/// # Safety
///
/// Caller must ensure:
/// - CPU supports AVX2+FMA (enforced by `#[target_feature]` and runtime detection)
/// - `a.len() == b.len()`
/// - `a.len() % 32 == 0`
#[target_feature(enable = "avx2", enable = "fma")]
#[inline]
pub(crate) unsafe fn dot_product_avx2_4acc_blocks(a: &[f32], b: &[f32]) -> f32 {
    // SAFETY: This function is only called after feature detection confirms AVX2+FMA.
    // - `_mm256_loadu_ps` handles unaligned loads safely
    // - Every load reads `offset + 8k .. offset + 8k + 8` with `offset + 32 <= len`
    use std::arch::x86_64::*;

    let len = a.len();
    if len == 0 {
        return 0.0;
    }

    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    // First block: nothing to accumulate yet, just multiply.
    let mut dot0 = _mm256_mul_ps(_mm256_loadu_ps(a_ptr), _mm256_loadu_ps(b_ptr));
    let mut dot1 = _mm256_mul_ps(_mm256_loadu_ps(a_ptr.add(8)), _mm256_loadu_ps(b_ptr.add(8)));
    let mut dot2 = _mm256_mul_ps(
        _mm256_loadu_ps(a_ptr.add(16)),
        _mm256_loadu_ps(b_ptr.add(16)),
    );
    let mut dot3 = _mm256_mul_ps(
        _mm256_loadu_ps(a_ptr.add(24)),
        _mm256_loadu_ps(b_ptr.add(24)),
    );

    let mut offset = BLOCK_SIZE;
    while offset < len {
        let va0 = _mm256_loadu_ps(a_ptr.add(offset));
        let vb0 = _mm256_loadu_ps(b_ptr.add(offset));
        dot0 = _mm256_fmadd_ps(va0, vb0, dot0);

        let va1 = _mm256_loadu_ps(a_ptr.add(offset + 8));
        let vb1 = _mm256_loadu_ps(b_ptr.add(offset + 8));
        dot1 = _mm256_fmadd_ps(va1, vb1, dot1);

        let va2 = _mm256_loadu_ps(a_ptr.add(offset + 16));
        let vb2 = _mm256_loadu_ps(b_ptr.add(offset + 16));
        dot2 = _mm256_fmadd_ps(va2, vb2, dot2);

        let va3 = _mm256_loadu_ps(a_ptr.add(offset + 24));
        let vb3 = _mm256_loadu_ps(b_ptr.add(offset + 24));
        dot3 = _mm256_fmadd_ps(va3, vb3, dot3);

        offset += BLOCK_SIZE;
    }

    // 4 accumulators -> 1
    let dot01 = _mm256_add_ps(dot0, dot1);
    let dot23 = _mm256_add_ps(dot2, dot3);
    let dot0123 = _mm256_add_ps(dot01, dot23);

    // 8 lanes -> 4
    let r4 = _mm_add_ps(
        _mm256_castps256_ps128(dot0123),
        _mm256_extractf128_ps(dot0123, 1),
    );
    // 4 -> 2
    let r2 = _mm_add_ps(r4, _mm_movehl_ps(r4, r4));
    // 2 -> 1
    let r1 = _mm_add_ss(r2, _mm_movehdup_ps(r2));

    _mm_cvtss_f32(r1)
}
