//! Free list of available physical registers for a single class.
//!
//! The list hands out registers in FIFO order: reuse of physical slots is
//! spread evenly over time instead of recycling the same few registers,
//! which keeps accidental write-after-write chains between unrelated
//! in-flight instructions rare. Because the register class is implicit in
//! the rename map the list is bound to, everything here is expressed in
//! handles relative to that class's physical register file.

use std::collections::VecDeque;

use crate::common::error::RenameFault;
use crate::core::reg_class::PhysRegRef;

/// FIFO pool of free physical register handles.
///
/// The list performs no deduplication: a register must be either queued
/// here or bound in a rename map, never both, and keeping it that way is
/// the caller's obligation.
#[derive(Debug, Default)]
pub struct FreeList {
    free_regs: VecDeque<PhysRegRef>,
}

impl FreeList {
    /// Creates an empty free list.
    pub fn new() -> Self {
        Self {
            free_regs: VecDeque::new(),
        }
    }

    /// Appends one register to the tail of the queue.
    pub fn add_reg(&mut self, reg: PhysRegRef) {
        self.free_regs.push_back(reg);
    }

    /// Appends a range of registers to the tail of the queue, in order.
    pub fn add_regs<I>(&mut self, regs: I)
    where
        I: IntoIterator<Item = PhysRegRef>,
    {
        self.free_regs.extend(regs);
    }

    /// Removes and returns the register at the head of the queue.
    ///
    /// An empty list is fatal: the requesting pipeline miscalculated its
    /// checkpoint or physical-register budget, and without a register no
    /// instruction can make progress.
    pub fn get_reg(&mut self) -> PhysRegRef {
        match self.free_regs.pop_front() {
            Some(reg) => reg,
            None => panic!("{}", RenameFault::CapacityExhausted),
        }
    }

    /// Returns the number of registers on the list.
    pub fn num_free_regs(&self) -> usize {
        self.free_regs.len()
    }

    /// True iff there are registers on the list.
    pub fn has_free_regs(&self) -> bool {
        !self.free_regs.is_empty()
    }
}
