//! Raw byte storage for one register class.
//!
//! A [`RegFile`] owns a contiguous, zero-initialized block of
//! `size × reg_bytes` bytes and addresses registers by shifting the index
//! with the class's addressing shift. Values move in and out either as
//! zero-extended [`RegVal`]s or as raw byte slices of exactly the class
//! width, so callers with type-erased widths stay supported.

use crate::common::error::RenameFault;
use crate::core::reg_class::{RegClass, RegVal};

/// Byte-addressed backing store sized for one register class.
#[derive(Debug)]
pub struct RegFile<'a> {
    data: Vec<u8>,
    size: usize,
    reg_shift: usize,
    reg_bytes: usize,
    class: &'a RegClass,
}

impl<'a> RegFile<'a> {
    /// Allocates zeroed storage for `size` registers of `class`'s width.
    pub fn new(class: &'a RegClass, size: usize) -> Self {
        Self {
            data: vec![0; size << class.reg_shift()],
            size,
            reg_shift: class.reg_shift(),
            reg_bytes: class.reg_bytes(),
            class,
        }
    }

    /// Allocates storage holding exactly the class's register count.
    pub fn for_class(class: &'a RegClass) -> Self {
        Self::new(class, class.num_regs())
    }

    /// Returns the number of registers stored.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the shift converting a register index into a byte offset.
    pub const fn reg_shift(&self) -> usize {
        self.reg_shift
    }

    /// Returns the byte width of each register.
    pub const fn reg_bytes(&self) -> usize {
        self.reg_bytes
    }

    /// Returns the class this file stores registers for.
    pub const fn reg_class(&self) -> &'a RegClass {
        self.class
    }

    fn offset(&self, idx: usize) -> usize {
        if idx >= self.size {
            panic!(
                "{}",
                RenameFault::OutOfRange {
                    what: "register file",
                    index: idx,
                    size: self.size,
                }
            );
        }
        idx << self.reg_shift
    }

    /// Reads the register at `idx`, zero-extended to a [`RegVal`].
    pub fn val(&self, idx: usize) -> RegVal {
        let off = self.offset(idx);
        let mut buf = [0u8; size_of::<RegVal>()];
        buf[..self.reg_bytes].copy_from_slice(&self.data[off..off + self.reg_bytes]);
        RegVal::from_le_bytes(buf)
    }

    /// Writes the low `reg_bytes` bytes of `val` to the register at `idx`.
    pub fn set_val(&mut self, idx: usize, val: RegVal) {
        let off = self.offset(idx);
        self.data[off..off + self.reg_bytes].copy_from_slice(&val.to_le_bytes()[..self.reg_bytes]);
    }

    /// Copies the register at `idx` into `out`, exactly `reg_bytes` bytes.
    pub fn get(&self, idx: usize, out: &mut [u8]) {
        assert_eq!(out.len(), self.reg_bytes);
        let off = self.offset(idx);
        out.copy_from_slice(&self.data[off..off + self.reg_bytes]);
    }

    /// Overwrites the register at `idx` from `val`, exactly `reg_bytes` bytes.
    pub fn set(&mut self, idx: usize, val: &[u8]) {
        assert_eq!(val.len(), self.reg_bytes);
        let off = self.offset(idx);
        self.data[off..off + self.reg_bytes].copy_from_slice(val);
    }

    /// Zeroes all storage.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }
}
