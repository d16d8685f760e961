//! Configuration of the code generation target.
//!
//! This module defines the settings that select OS-dependent ABI parameters
//! and code generation options. It provides:
//! 1. **Defaults:** Baseline constants used when a field is omitted.
//! 2. **Structures:** `target` and `codegen` sections under a root [`Config`].
//! 3. **Derivations:** The [`TargetAbi`] and register/scale choices that follow
//!    from the settings.
//!
//! Configuration is supplied as JSON via [`Config::from_json`], or use
//! `Config::default()`.

use serde::Deserialize;
use tracing::info;

use crate::abi::target::{TargetAbi, TargetOs};
use crate::common::error::ConfigError;
use crate::isa::condition::ScaleFactor;
use crate::isa::registers::{DISPATCH_TABLE_REG, Register};

/// Default configuration constants.
mod defaults {
    /// Heap pointers are full words unless compression is requested.
    pub const COMPRESSED_POINTERS: bool = false;

    /// Calls through the global dispatch table are enabled.
    pub const USE_DISPATCH_TABLE: bool = true;
}

/// Root configuration.
///
/// Every section and field is optional.
///
/// # Example
///
/// ```
/// use arm64_vm_core::config::Config;
/// use arm64_vm_core::TargetOs;
///
/// let json = r#"{
///     "target": { "os": "macos" },
///     "codegen": { "compressed_pointers": true }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.target.os, TargetOs::MacOs);
/// assert!(config.codegen.compressed_pointers);
/// assert!(config.codegen.use_dispatch_table);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Target operating system.
    #[serde(default)]
    pub target: TargetConfig,
    /// Code generation options.
    #[serde(default)]
    pub codegen: CodegenConfig,
}

impl Config {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is malformed or names an
    /// unknown OS.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        info!(
            os = ?config.target.os,
            compressed_pointers = config.codegen.compressed_pointers,
            use_dispatch_table = config.codegen.use_dispatch_table,
            "loaded configuration"
        );
        Ok(config)
    }

    /// ABI parameters of the configured target.
    pub fn target_abi(&self) -> TargetAbi {
        let mut abi = TargetAbi::for_os(self.target.os);
        if let Some(alignment) = self.codegen.loop_alignment {
            abi.preferred_loop_alignment = alignment;
        }
        abi
    }

    /// Register holding the dispatch table, if calls go through it.
    pub const fn dispatch_table_register(&self) -> Option<Register> {
        if self.codegen.use_dispatch_table {
            Some(DISPATCH_TABLE_REG)
        } else {
            None
        }
    }

    /// Scale of an indexed load of a heap pointer.
    pub const fn word_scale(&self) -> ScaleFactor {
        ScaleFactor::compressed_word_size(self.codegen.compressed_pointers)
    }
}

/// Target selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetConfig {
    /// Operating system; selects the preserved registers, stack argument
    /// packing and sub-word extension rules.
    #[serde(default)]
    pub os: TargetOs,
}

/// Code generation options.
#[derive(Debug, Clone, Deserialize)]
pub struct CodegenConfig {
    /// Store heap pointers as 32-bit offsets.
    #[serde(default = "CodegenConfig::default_compressed_pointers")]
    pub compressed_pointers: bool,

    /// Dispatch instance calls through the global dispatch table.
    #[serde(default = "CodegenConfig::default_use_dispatch_table")]
    pub use_dispatch_table: bool,

    /// Overrides the target's preferred loop header alignment, in bytes.
    #[serde(default)]
    pub loop_alignment: Option<usize>,
}

impl CodegenConfig {
    fn default_compressed_pointers() -> bool {
        defaults::COMPRESSED_POINTERS
    }

    fn default_use_dispatch_table() -> bool {
        defaults::USE_DISPATCH_TABLE
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            compressed_pointers: defaults::COMPRESSED_POINTERS,
            use_dispatch_table: defaults::USE_DISPATCH_TABLE,
            loop_alignment: None,
        }
    }
}
