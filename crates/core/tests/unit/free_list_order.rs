//! Free-list ordering properties.

use proptest::prelude::*;

use renamesim_core::core::free_list::FreeList;
use renamesim_core::core::phys_regfile::PhysRegFile;
use renamesim_core::core::reg_class::{CAP_REG_CLASS_NAME, PhysRegRef, RegClass, RegClassType};
use renamesim_core::debug;

fn cap_class(count: usize) -> RegClass {
    RegClass::new(
        RegClassType::Capability,
        CAP_REG_CLASS_NAME,
        count,
        &debug::CAP_REGS,
    )
}

/// The documented three-element law: add a, b, c; get a, b, c.
#[test]
fn three_element_fifo_law() {
    let class = cap_class(3);
    let file = PhysRegFile::for_class(&class);
    let refs: Vec<PhysRegRef> = file.reg_refs().collect();

    let mut free_list = FreeList::new();
    free_list.add_regs([refs[0], refs[1], refs[2]]);

    assert_eq!(free_list.get_reg(), refs[0]);
    assert_eq!(free_list.get_reg(), refs[1]);
    assert_eq!(free_list.get_reg(), refs[2]);
    assert!(!free_list.has_free_regs());
}

proptest! {
    /// An arbitrary enqueue order dequeues in exactly that order.
    #[test]
    fn dequeue_matches_enqueue_order(
        order in Just((0..32_usize).collect::<Vec<_>>()).prop_shuffle()
    ) {
        let class = cap_class(32);
        let file = PhysRegFile::for_class(&class);
        let refs: Vec<PhysRegRef> = file.reg_refs().collect();

        let mut free_list = FreeList::new();
        free_list.add_regs(order.iter().map(|&i| refs[i]));
        prop_assert_eq!(free_list.num_free_regs(), 32);

        for &i in &order {
            prop_assert_eq!(free_list.get_reg(), refs[i]);
        }
        prop_assert!(!free_list.has_free_regs());
    }
}
