//! Physical register file for a single register class.
//!
//! A [`PhysRegFile`] pairs the raw storage of a [`RegFile`] with the
//! vector of [`PhysRegId`] values describing every slot, numbered with
//! flat indices `0..size` at construction. It is the sole owner of those
//! identities; the free list and rename map address them through
//! [`PhysRegRef`] handles that this file resolves and validates.
//!
//! One file models exactly one class. Pipelines with several register
//! classes instantiate one file per class, and a handle minted by a file
//! of a different class is rejected as a class mismatch.

use crate::common::error::RenameFault;
use crate::core::reg_class::{PhysRegId, PhysRegRef, RegClass, RegIndex, RegVal};
use crate::core::regfile::RegFile;

/// Storage plus identity vector for one class of physical registers.
#[derive(Debug)]
pub struct PhysRegFile<'a> {
    regs: RegFile<'a>,
    ids: Vec<PhysRegId<'a>>,
    class: &'a RegClass,
}

impl<'a> PhysRegFile<'a> {
    /// Constructs a file with `size` slots of `class`'s width, all zeroed,
    /// with flat indices assigned `0..size`.
    pub fn new(class: &'a RegClass, size: usize) -> Self {
        let mut ids = Vec::with_capacity(size);
        for flat in 0..size {
            let idx = flat as RegIndex;
            ids.push(PhysRegId::new(class, idx, idx));
        }
        Self {
            regs: RegFile::new(class, size),
            ids,
            class,
        }
    }

    /// Constructs a file holding exactly the class's register count.
    pub fn for_class(class: &'a RegClass) -> Self {
        Self::new(class, class.num_regs())
    }

    /// Returns the number of physical register slots.
    pub const fn size(&self) -> usize {
        self.regs.size()
    }

    /// Returns the byte width of each register.
    pub const fn reg_bytes(&self) -> usize {
        self.regs.reg_bytes()
    }

    /// Returns the class this file was built for.
    pub const fn reg_class(&self) -> &'a RegClass {
        self.class
    }

    /// Handles for every slot, in flat-index order.
    ///
    /// Draining this range into a free list is how a file's registers
    /// enter circulation.
    pub fn reg_refs(&self) -> impl Iterator<Item = PhysRegRef> + '_ {
        self.ids.iter().map(PhysRegId::phys_ref)
    }

    /// Resolves a handle to its slot position, validating class and range.
    fn slot(&self, phys_reg: PhysRegRef) -> usize {
        if phys_reg.class_value() != self.class.class_type() {
            panic!(
                "{}",
                RenameFault::ClassMismatch {
                    expected: self.class.name().to_string(),
                    found: phys_reg.class_value().to_string(),
                }
            );
        }
        let idx = phys_reg.flat_index() as usize;
        if idx >= self.ids.len() {
            panic!(
                "{}",
                RenameFault::OutOfRange {
                    what: "physical register file",
                    index: idx,
                    size: self.ids.len(),
                }
            );
        }
        idx
    }

    /// Returns the identity referenced by `phys_reg`.
    pub fn id(&self, phys_reg: PhysRegRef) -> &PhysRegId<'a> {
        let idx = self.slot(phys_reg);
        &self.ids[idx]
    }

    /// Returns the identity referenced by `phys_reg`, mutably.
    pub fn id_mut(&mut self, phys_reg: PhysRegRef) -> &mut PhysRegId<'a> {
        let idx = self.slot(phys_reg);
        &mut self.ids[idx]
    }

    /// Reads the referenced register's value.
    pub fn get_reg(&self, phys_reg: PhysRegRef) -> RegVal {
        let idx = self.id(phys_reg).index() as usize;
        self.regs.val(idx)
    }

    /// Writes the referenced register's value.
    pub fn set_reg(&mut self, phys_reg: PhysRegRef, val: RegVal) {
        let idx = self.id(phys_reg).index() as usize;
        self.regs.set_val(idx, val);
    }

    /// Copies the referenced register into `out`, exactly `reg_bytes` bytes.
    pub fn get_bytes(&self, phys_reg: PhysRegRef, out: &mut [u8]) {
        let idx = self.id(phys_reg).index() as usize;
        self.regs.get(idx, out);
    }

    /// Overwrites the referenced register from `val`, exactly `reg_bytes`
    /// bytes.
    pub fn set_bytes(&mut self, phys_reg: PhysRegRef, val: &[u8]) {
        let idx = self.id(phys_reg).index() as usize;
        self.regs.set(idx, val);
    }

    /// Zeroes all register storage. Identities and flat indices are
    /// untouched.
    pub fn clear(&mut self) {
        self.regs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reg_class::{CAP_REG_CLASS_NAME, RegClassType};
    use crate::debug;

    fn cap_class(count: usize) -> RegClass {
        RegClass::new(
            RegClassType::Capability,
            CAP_REG_CLASS_NAME,
            count,
            &debug::CAP_REGS,
        )
    }

    #[test]
    fn test_flat_indices_number_the_slots() {
        let class = cap_class(8);
        let file = PhysRegFile::for_class(&class);
        for (i, r) in file.reg_refs().enumerate() {
            assert_eq!(r.flat_index() as usize, i);
            assert_eq!(file.id(r).flat_index() as usize, i);
            assert_eq!(file.id(r).index() as usize, i);
        }
    }

    #[test]
    fn test_value_round_trip_through_handles() {
        let class = cap_class(8);
        let mut file = PhysRegFile::for_class(&class);
        let refs: Vec<PhysRegRef> = file.reg_refs().collect();

        file.set_reg(refs[3], 0x0002_1F05);
        assert_eq!(file.get_reg(refs[3]), 0x0002_1F05);
        assert_eq!(file.get_reg(refs[2]), 0);
    }

    #[test]
    fn test_byte_access_through_handles() {
        let class = cap_class(4).with_reg_type::<u32>();
        let mut file = PhysRegFile::for_class(&class);
        let refs: Vec<PhysRegRef> = file.reg_refs().collect();

        file.set_bytes(refs[1], &[1, 2, 3, 4]);
        let mut out = [0u8; 4];
        file.get_bytes(refs[1], &mut out);
        assert_eq!(out, [1, 2, 3, 4]);
    }

    #[test]
    fn test_pin_state_reachable_through_handles() {
        let class = cap_class(4);
        let mut file = PhysRegFile::for_class(&class);
        let refs: Vec<PhysRegRef> = file.reg_refs().collect();

        file.id_mut(refs[0]).set_num_pinned_writes(3);
        assert_eq!(file.id(refs[0]).num_pinned_writes(), 3);
        assert!(file.id(refs[0]).is_pinned());
    }

    #[test]
    fn test_clear_keeps_identities() {
        let class = cap_class(4);
        let mut file = PhysRegFile::for_class(&class);
        let refs: Vec<PhysRegRef> = file.reg_refs().collect();

        file.set_reg(refs[2], 99);
        file.clear();
        assert_eq!(file.get_reg(refs[2]), 0);
        assert_eq!(file.id(refs[2]).flat_index(), 2);
    }

    #[test]
    #[should_panic(expected = "class mismatch")]
    fn test_foreign_class_handle_is_fatal() {
        let class = cap_class(4);
        let file = PhysRegFile::for_class(&class);
        let _ = file.get_reg(PhysRegRef::INVALID);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_stale_handle_is_fatal() {
        let class = cap_class(4);
        let big_class = cap_class(16);
        let big_file = PhysRegFile::for_class(&big_class);
        let Some(high) = big_file.reg_refs().last() else {
            return;
        };

        let small_file = PhysRegFile::for_class(&class);
        let _ = small_file.get_reg(high);
    }
}
