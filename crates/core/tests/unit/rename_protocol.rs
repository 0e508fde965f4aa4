//! End-to-end rename protocol tests.
//!
//! These tests assemble the full stack the way a pipeline setup would:
//! build a register class, construct a physical register file, drain its
//! handles into a free list, bind a rename map, then drive the protocol
//! through seeding, renaming, storing values, and rollback.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use renamesim_core::core::free_list::FreeList;
use renamesim_core::core::phys_regfile::PhysRegFile;
use renamesim_core::core::reg_class::{
    CAP_REG_CLASS_NAME, PhysRegRef, RegClass, RegClassType, RegVal,
};
use renamesim_core::core::rename_map::RenameMap;
use renamesim_core::debug;

fn cap_class(count: usize) -> RegClass {
    RegClass::new(
        RegClassType::Capability,
        CAP_REG_CLASS_NAME,
        count,
        &debug::CAP_REGS,
    )
}

fn bound_map<'a>(class: &'a RegClass, file: &PhysRegFile<'a>) -> RenameMap {
    let mut free_list = FreeList::new();
    free_list.add_regs(file.reg_refs());
    let mut map = RenameMap::new();
    map.init(class, free_list);
    map
}

/// Eight 8-byte registers: seed two entries, rename the other six, and
/// check every fresh binding is unique and value storage works through
/// the renamed registers.
#[test]
fn seed_then_rename_full_pool() {
    let class = cap_class(8);
    let mut file = PhysRegFile::for_class(&class);
    let mut map = bound_map(&class, &file);
    assert_eq!(map.num_free_entries(), 8);

    // Seed indices 0 and 1 with the first two free registers.
    for idx in 0..2 {
        let reg = map.free_list_mut().get_reg();
        map.set_entry(class.id(idx), reg);
    }
    assert_eq!(map.num_free_entries(), 6);

    // Rename indices 2..8; each draws one of the remaining six handles.
    let mut taken: HashSet<PhysRegRef> = map
        .bindings()
        .filter(PhysRegRef::is_valid)
        .collect();
    for idx in 2..8 {
        let info = map.rename(class.id(idx), &mut file);
        assert!(info.new_reg.is_valid());
        assert!(
            taken.insert(info.new_reg),
            "rename handed out an already-bound register"
        );
    }
    assert_eq!(map.num_free_entries(), 0);
    assert_eq!(taken.len(), 8);

    // Values written through the renamed registers read back intact.
    for idx in 0..8 {
        let phys = map.lookup(class.id(idx));
        file.set_reg(phys, 0x1000 + RegVal::from(idx));
    }
    for idx in 0..8 {
        let phys = map.lookup(class.id(idx));
        assert_eq!(file.get_reg(phys), 0x1000 + RegVal::from(idx));
    }
}

/// With every fresh register handed out, one more unpinned rename is a
/// budget bug and must be fatal.
#[test]
#[should_panic(expected = "free list exhausted")]
fn rename_past_the_pool_is_fatal() {
    let class = cap_class(8);
    let mut file = PhysRegFile::for_class(&class);
    let mut map = bound_map(&class, &file);

    for idx in 0..2 {
        let reg = map.free_list_mut().get_reg();
        map.set_entry(class.id(idx), reg);
    }
    for idx in 2..8 {
        let _ = map.rename(class.id(idx), &mut file);
    }

    // Index 2 is neither pinned nor backed by a free register any more.
    let _ = map.rename(class.id(2), &mut file);
}

/// A rollback restores the checkpointed binding exactly, independent of
/// free-list state, once the caller re-enqueues the displaced register.
#[test]
fn rollback_round_trip() {
    let class = cap_class(8);
    let mut file = PhysRegFile::for_class(&class);
    let mut map = bound_map(&class, &file);

    let checkpoint = map.rename(class.id(3), &mut file).new_reg;
    file.set_reg(checkpoint, 0xCAFE);

    let wrong_path = map.rename(class.id(3), &mut file);
    assert_eq!(wrong_path.prev_reg, checkpoint);
    file.set_reg(wrong_path.new_reg, 0xBAD);

    map.set_entry(class.id(3), checkpoint);
    map.free_list_mut().add_reg(wrong_path.new_reg);

    assert_eq!(map.lookup(class.id(3)), checkpoint);
    assert_eq!(file.get_reg(map.lookup(class.id(3))), 0xCAFE);
}

/// The rename trace path runs cleanly with a subscriber installed and the
/// class's debug category enabled, and changes no protocol behavior.
#[test]
fn tracing_does_not_disturb_the_protocol() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("rename=trace")
        .with_test_writer()
        .try_init();

    let class = cap_class(4);
    let mut file = PhysRegFile::for_class(&class);
    let mut map = bound_map(&class, &file);

    debug::global_enable();
    debug::CAP_REGS.enable();
    let traced = map.rename(class.id(0), &mut file);
    debug::CAP_REGS.disable();
    debug::global_disable();
    let silent = map.rename(class.id(1), &mut file);

    assert_ne!(traced.new_reg, silent.new_reg);
    assert_eq!(map.num_free_entries(), 2);
}
