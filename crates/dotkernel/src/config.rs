//! Kernel selection configuration.
//!
//! Configuration is layered with `figment`, lowest priority first:
//!
//! 1. [`KernelConfig::default`]
//! 2. `dotkernel.toml` in the working directory (parent directories are not
//!    searched)
//! 3. `DOTKERNEL_*` environment variables (`DOTKERNEL_MODE`, `DOTKERNEL_WARMUP`)
//!
//! ```toml
//! # dotkernel.toml
//! mode = "accelerated"
//! warmup = false
//! ```

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which kernel the process-wide selection should use for `f32`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelMode {
    /// Best kernel the CPU supports.
    #[default]
    Auto,
    /// Always the sequential generic kernel.
    Generic,
    /// AVX2+FMA kernel; selection fails if the CPU lacks it.
    Accelerated,
}

/// Dot kernel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Kernel selection policy.
    pub mode: KernelMode,
    /// Run the selected kernel a few times right after selection.
    pub warmup: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            mode: KernelMode::Auto,
            warmup: true,
        }
    }
}

impl KernelConfig {
    /// Configuration file read from the working directory only; parent
    /// directories are not searched.
    pub const FILE_NAME: &'static str = "dotkernel.toml";
    /// Prefix of the environment variables overriding file values.
    pub const ENV_PREFIX: &'static str = "DOTKERNEL_";

    /// Layered provider: defaults, then file, then environment.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file_exact(Self::FILE_NAME))
            .merge(Env::prefixed(Self::ENV_PREFIX))
    }

    /// Loads the layered configuration.
    pub fn load() -> Result<Self> {
        Ok(Self::figment().extract()?)
    }

    /// Parses a TOML document on top of the defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml))
            .extract()?;
        Ok(config)
    }

    /// Renders the configuration as a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
