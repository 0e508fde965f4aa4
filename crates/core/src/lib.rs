//! Register renaming library for an out-of-order pipeline simulator.
//!
//! This crate implements the architectural-to-physical renaming mechanism
//! of an out-of-order backend:
//! 1. **Classes & identities:** Register class descriptors, architectural
//!    and physical register identities, index-based handles.
//! 2. **Physical register file:** Raw byte storage plus the identity
//!    vector for one class.
//! 3. **Free list:** FIFO pool of available physical registers.
//! 4. **Rename map:** Per-class binding table with the
//!    rename/lookup/restore protocol.
//! 5. **Scaffolding:** Debug-flag categories, configuration, statistics.
//!
//! Multiple in-flight writers of the same architectural register get
//! distinct physical homes, so false write-after-write dependencies never
//! reach the scheduler. One rename map and one physical register file
//! serve one register class; pipelines with several classes instantiate
//! one of each per class.

/// Common leaf types (fault taxonomy).
pub mod common;
/// Run configuration (defaults, sizing, trace toggles).
pub mod config;
/// Core renaming components (classes, files, free list, rename map).
pub mod core;
/// Debug-flag categories gating diagnostic output.
pub mod debug;
/// Rename statistics collection and reporting.
pub mod stats;

/// Contract-violation fault taxonomy; faults surface as panics.
pub use crate::common::error::RenameFault;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// FIFO pool of free physical registers.
pub use crate::core::free_list::FreeList;
/// Physical register file; owns storage and identities for one class.
pub use crate::core::phys_regfile::PhysRegFile;
/// Register class vocabulary.
pub use crate::core::reg_class::{
    PhysRegId, PhysRegRef, RegClass, RegClassOps, RegClassType, RegId, RegIndex, RegVal,
};
/// Rename map and the result of a rename.
pub use crate::core::rename_map::{RenameInfo, RenameMap};
/// Rename activity counters.
pub use crate::stats::RenameStats;
