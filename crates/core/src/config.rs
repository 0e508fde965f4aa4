//! Configuration for the renaming components and their drivers.
//!
//! This module defines the structures used to parameterize a run. It
//! provides:
//! 1. **Defaults:** Baseline sizing constants for the capability class.
//! 2. **Structures:** Hierarchical config for general settings and
//!    register/pool sizing.
//!
//! Configuration is supplied as JSON (the CLI accepts a file path) or via
//! `Config::default()`.

use serde::Deserialize;

/// Default configuration constants.
///
/// These values define the baseline sizing when not explicitly overridden
/// in a configuration file.
mod defaults {
    /// Number of architectural registers in the capability class.
    pub const NUM_ARCH_REGS: usize = 512;

    /// Number of physical register slots backing the class.
    ///
    /// Sized to the architectural count; a real pipeline would add
    /// headroom for in-flight instructions.
    pub const NUM_PHYS_REGS: usize = 512;

    /// Entries seeded with an initial mapping before renaming begins.
    pub const SEEDED_ENTRIES: usize = 128;
}

/// General runtime settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit per-rename trace output.
    #[serde(default)]
    pub trace: bool,
}

/// Register class and physical pool sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct RenameConfig {
    /// Number of architectural registers in the class.
    #[serde(default = "RenameConfig::default_num_arch_regs")]
    pub num_arch_regs: usize,

    /// Number of physical register slots in the file.
    #[serde(default = "RenameConfig::default_num_phys_regs")]
    pub num_phys_regs: usize,

    /// Entries to seed with an initial mapping before renaming.
    #[serde(default = "RenameConfig::default_seeded_entries")]
    pub seeded_entries: usize,
}

impl RenameConfig {
    fn default_num_arch_regs() -> usize {
        defaults::NUM_ARCH_REGS
    }

    fn default_num_phys_regs() -> usize {
        defaults::NUM_PHYS_REGS
    }

    fn default_seeded_entries() -> usize {
        defaults::SEEDED_ENTRIES
    }
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            num_arch_regs: defaults::NUM_ARCH_REGS,
            num_phys_regs: defaults::NUM_PHYS_REGS,
            seeded_entries: defaults::SEEDED_ENTRIES,
        }
    }
}

/// Root configuration type.
///
/// # Examples
///
/// Deserializing from JSON:
///
/// ```
/// use renamesim_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace": true },
///     "rename": {
///         "num_arch_regs": 8,
///         "num_phys_regs": 16,
///         "seeded_entries": 2
///     }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert!(config.general.trace);
/// assert_eq!(config.rename.num_phys_regs, 16);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General runtime settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Register class and pool sizing.
    #[serde(default)]
    pub rename: RenameConfig,
}
