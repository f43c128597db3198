//! Fuzz target for the dot-product kernels.
//!
//! Feeds arbitrary `f32` bit patterns (NaN, infinities, subnormals) through
//! every kernel path to find:
//! - Panics on any input
//! - Disagreement between the accelerated and generic kernels on inputs
//!   where both are exact
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run fuzz_dot_kernels
//! ```

#![no_main]

use arbitrary::Arbitrary;
use dotkernel::kernel::{Accelerated, DotKernel, Generic, Selection};
use libfuzzer_sys::fuzz_target;

const LEN: usize = 128;

/// Fuzzing input for one dot product.
#[derive(Arbitrary, Debug)]
struct DotInput {
    /// First operand (truncated/padded to `LEN`)
    vec_a: Vec<f32>,
    /// Second operand (truncated/padded to `LEN`)
    vec_b: Vec<f32>,
    /// Small integers; every kernel must agree exactly on these
    ints: Vec<(i8, i8)>,
}

fn to_array(values: Vec<f32>) -> [f32; LEN] {
    let mut out = [0.0_f32; LEN];
    for (slot, v) in out.iter_mut().zip(values) {
        *slot = v;
    }
    out
}

fuzz_target!(|input: DotInput| {
    let a = to_array(input.vec_a);
    let b = to_array(input.vec_b);

    // Arbitrary floats: no path may panic
    let _ = dotkernel::dot(&a, &b);
    let _ = Generic.dot(&a, &b);
    let _ = Selection::detect().dot(&a, &b);
    if let Some(kernel) = Accelerated::detect() {
        let _ = kernel.dot(&a, &b);
    }

    // Integer-valued floats: partial sums stay exact, so paths agree bit for bit
    let mut x = [0.0_f32; LEN];
    let mut y = [0.0_f32; LEN];
    for ((xi, yi), &(p, q)) in x.iter_mut().zip(y.iter_mut()).zip(&input.ints) {
        *xi = f32::from(p);
        *yi = f32::from(q);
    }
    let expected = Generic.dot(&x, &y);
    assert_eq!(dotkernel::dot(&x, &y), expected);
    if let Some(kernel) = Accelerated::detect() {
        assert_eq!(kernel.dot(&x, &y), expected);
    }
});
