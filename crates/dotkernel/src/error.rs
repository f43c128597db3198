//! Error types for dotkernel.
//!
//! The kernels themselves never fail: every error here is raised while a
//! kernel is being *selected* or while runtime-sized data is being shaped
//! into fixed-size buffers.

use thiserror::Error;

use crate::kernel::KernelKind;

/// Errors raised during kernel selection and buffer construction.
#[derive(Error, Debug)]
pub enum Error {
    /// The accelerated kernel was requested on a CPU lacking a required feature.
    #[error("accelerated kernel unavailable: CPU does not support {0}")]
    UnsupportedCapability(&'static str),

    /// The process-wide kernel selection was already made.
    #[error("dot kernel already installed (active: {active})")]
    AlreadyInstalled {
        /// Kernel that is currently active.
        active: KernelKind,
    },

    /// Runtime-sized data does not fit a fixed-size buffer.
    #[error("shape mismatch for {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// What was being shaped (e.g. "weight rows").
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Length actually provided.
        actual: usize,
    },

    /// Configuration could not be extracted.
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Configuration could not be rendered as TOML.
    #[error("configuration serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

/// Result type alias for dotkernel operations.
pub type Result<T> = std::result::Result<T, Error>;
