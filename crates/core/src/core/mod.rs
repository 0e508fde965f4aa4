//! Core renaming components.
//!
//! This module contains the register identity vocabulary, the physical
//! storage, the free-list allocator, and the rename map that coordinates
//! them.

/// Free list of available physical registers.
pub mod free_list;

/// Physical register file (storage plus identity vector).
pub mod phys_regfile;

/// Register classes, architectural and physical identities, handles.
pub mod reg_class;

/// Raw byte storage for one register class.
pub mod regfile;

/// Architectural-to-physical mapping and the rename protocol.
pub mod rename_map;

pub use self::free_list::FreeList;
pub use self::phys_regfile::PhysRegFile;
pub use self::rename_map::{RenameInfo, RenameMap};
