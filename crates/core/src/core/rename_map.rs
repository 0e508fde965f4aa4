//! Architectural-to-physical register mapping and the rename protocol.
//!
//! The map holds one binding slot per architectural register index and is
//! mutated only through the protocol:
//! 1. **Init:** One-time binding of the map to its class and free list.
//! 2. **Rename:** Resolve a destination to a physical register, drawing
//!    from the free list unless the previous binding is pinned.
//! 3. **Lookup:** Pure read of the current binding.
//! 4. **Set entry:** Force-overwrite for seeding or rollback restore.
//!
//! Releasing a displaced register is never done here: whether any other
//! in-flight consumer still needs the old value is knowledge only the
//! caller has, so returning a register to the free list is the caller's
//! job.

use tracing::trace;

use crate::common::error::RenameFault;
use crate::core::free_list::FreeList;
use crate::core::phys_regfile::PhysRegFile;
use crate::core::reg_class::{PhysRegRef, RegClass, RegId};
use crate::stats::RenameStats;

/// Outcome of one rename: the binding now in force and the one it
/// displaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenameInfo {
    /// Physical register now bound to the architectural destination.
    pub new_reg: PhysRegRef,
    /// Physical register previously bound to it.
    pub prev_reg: PhysRegRef,
}

/// Per-class table from architectural register index to physical binding.
///
/// Slots hold [`PhysRegRef::INVALID`] until seeded or renamed; after that
/// every slot holds exactly one binding at all times.
#[derive(Debug, Default)]
pub struct RenameMap {
    map: Vec<PhysRegRef>,
    /// Free list physical registers are drawn from during rename.
    free_list: Option<FreeList>,
    stats: RenameStats,
}

impl RenameMap {
    /// Creates an unbound map. [`init`](Self::init) must run before any
    /// other operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// One-time binding of the map to `reg_class` and `free_list`.
    ///
    /// Fatal if the map is already bound or already holds entries.
    pub fn init(&mut self, reg_class: &RegClass, free_list: FreeList) {
        if self.free_list.is_some() || !self.map.is_empty() {
            panic!("{}", RenameFault::DoubleInit);
        }
        self.map = vec![PhysRegRef::INVALID; reg_class.num_regs()];
        self.free_list = Some(free_list);
    }

    /// Validates an architectural index against the table size.
    fn slot(&self, arch_reg: RegId<'_>) -> usize {
        let idx = arch_reg.index() as usize;
        if idx >= self.map.len() {
            panic!(
                "{}",
                RenameFault::OutOfRange {
                    what: "rename map",
                    index: idx,
                    size: self.map.len(),
                }
            );
        }
        idx
    }

    fn bound_free_list(&mut self) -> &mut FreeList {
        match self.free_list.as_mut() {
            Some(free_list) => free_list,
            None => panic!("rename map used before init"),
        }
    }

    /// Remaps an architectural destination to a physical register.
    ///
    /// Three regimes, decided by the previous binding and the request:
    /// invalid registers pass through unchanged; a previous binding with
    /// outstanding pinned writes is kept and its counter decremented,
    /// which requires the incoming register to request zero pins; anything
    /// else draws a fresh register from the free list and transfers the
    /// requested pin count onto it.
    ///
    /// The displaced register is returned, never released: the caller
    /// decides when it goes back on the free list.
    pub fn rename(&mut self, arch_reg: RegId<'_>, regs: &mut PhysRegFile<'_>) -> RenameInfo {
        let idx = self.slot(arch_reg);
        let prev_reg = self.map[idx];

        let new_reg = if !arch_reg.is_renameable() {
            // Invalid registers are never remapped.
            assert!(
                !prev_reg.is_valid(),
                "invalid register holds a physical binding"
            );
            self.stats.invalid_passthroughs += 1;
            prev_reg
        } else if prev_reg.is_valid() && regs.id(prev_reg).num_pinned_writes() > 0 {
            // Keep the pinned binding. Pinning the same destination twice
            // in one rename episode is a contract violation.
            if arch_reg.num_pinned_writes() != 0 {
                panic!(
                    "{}",
                    RenameFault::PinViolation {
                        outstanding: regs.id(prev_reg).num_pinned_writes(),
                        requested: arch_reg.num_pinned_writes(),
                    }
                );
            }
            regs.id_mut(prev_reg).decr_num_pinned_writes();
            self.stats.pinned_reuses += 1;
            prev_reg
        } else {
            let fresh = self.bound_free_list().get_reg();
            self.map[idx] = fresh;
            regs.id_mut(fresh)
                .set_num_pinned_writes(arch_reg.num_pinned_writes());
            self.stats.fresh_allocs += 1;
            fresh
        };
        self.stats.renames += 1;

        if arch_reg.reg_class().debug().tracing() {
            trace!(
                target: "rename",
                "renamed {arch_reg} to physical reg {new_reg} (previous {prev_reg})"
            );
        }

        RenameInfo { new_reg, prev_reg }
    }

    /// Looks up the physical register currently bound to `arch_reg`.
    pub fn lookup(&self, arch_reg: RegId<'_>) -> PhysRegRef {
        self.map[self.slot(arch_reg)]
    }

    /// Force-overwrites the binding for `arch_reg` without consulting the
    /// free list.
    ///
    /// Used to seed the initial mapping or to restore a saved one on
    /// rollback. The displaced register is not re-enqueued automatically;
    /// rollback callers reconcile free-list membership themselves.
    pub fn set_entry(&mut self, arch_reg: RegId<'_>, phys_reg: PhysRegRef) {
        let idx = self.slot(arch_reg);
        self.map[idx] = phys_reg;
    }

    /// Returns the number of free entries on the bound free list.
    pub fn num_free_entries(&self) -> usize {
        match self.free_list.as_ref() {
            Some(free_list) => free_list.num_free_regs(),
            None => panic!("rename map used before init"),
        }
    }

    /// Returns the number of architectural registers mapped.
    pub fn num_arch_regs(&self) -> usize {
        self.map.len()
    }

    /// Iterates the current bindings in architectural index order.
    pub fn bindings(&self) -> impl Iterator<Item = PhysRegRef> + '_ {
        self.map.iter().copied()
    }

    /// Returns the bound free list.
    pub fn free_list(&self) -> &FreeList {
        match self.free_list.as_ref() {
            Some(free_list) => free_list,
            None => panic!("rename map used before init"),
        }
    }

    /// Returns the bound free list, mutably. Seeding and rollback use this
    /// to draw or re-enqueue registers directly.
    pub fn free_list_mut(&mut self) -> &mut FreeList {
        self.bound_free_list()
    }

    /// Returns the rename activity counters.
    pub const fn stats(&self) -> &RenameStats {
        &self.stats
    }
}
