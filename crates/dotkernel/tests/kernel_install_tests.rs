//! Installing the process-wide kernel selection.
//!
//! Installation is one-shot per process, so this file holds a single test
//! and runs as its own test binary.

#![allow(clippy::cast_precision_loss, clippy::float_cmp)]

use dotkernel::kernel::{generic, install, selection, Selection};
use dotkernel::{dot, Error, KernelConfig, KernelKind, KernelMode};

#[test]
fn test_install_generic_then_reject_second_install() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let config = KernelConfig {
        mode: KernelMode::Generic,
        warmup: false,
    };
    let chosen = Selection::from_config(&config).expect("generic is always available");
    install(chosen).expect("nothing selected yet in this process");
    assert_eq!(selection().kind(), KernelKind::Generic);

    let err = install(Selection::detect()).unwrap_err();
    assert!(matches!(
        err,
        Error::AlreadyInstalled {
            active: KernelKind::Generic
        }
    ));
    assert_eq!(selection().kind(), KernelKind::Generic);

    // Gated lengths now go through the generic kernel, bit for bit.
    let a: [f32; 256] = std::array::from_fn(|i| (i as f32 * 0.37).sin());
    let b: [f32; 256] = std::array::from_fn(|i| (i as f32 * 0.11).cos());
    assert_eq!(dot(&a, &b), generic::dot(&a, &b));
}
