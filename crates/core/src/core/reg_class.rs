//! Register classes and identities.
//!
//! This module defines the vocabulary the renaming components speak:
//! 1. **Classes:** [`RegClass`] describes a family of registers (count,
//!    width, naming strategy, debug category).
//! 2. **Architectural identities:** [`RegId`] names one register of a class.
//! 3. **Physical identities:** [`PhysRegId`] adds the flat index and
//!    pinned-write bookkeeping of one storage slot.
//! 4. **Handles:** [`PhysRegRef`] is the index-based reference the free
//!    list and rename map pass around; the owning file resolves it.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::debug::{self, DebugFlag};

/// Enumerates the classes of registers.
///
/// `Invalid` orders before every real class so that sentinel identities
/// sort first in associative containers keyed by identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegClassType {
    /// Sentinel class for unallocated or non-renameable registers.
    Invalid,
    /// Capability registers.
    Capability,
}

impl fmt::Display for RegClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid => write!(f, "invalid"),
            Self::Capability => write!(f, "capability"),
        }
    }
}

/// Standard name for the capability register class. Using it is encouraged
/// but optional.
pub const CAP_REG_CLASS_NAME: &str = "capability";

/// Index of a register within its class.
pub type RegIndex = u16;

/// Raw value held by a register.
pub type RegVal = u64;

/// Opaque ISA context handed to flatten hooks.
///
/// Register-window and alias schemes resolve an architectural view against
/// ISA state; the renaming core never inspects the context itself.
pub trait IsaContext {}

/// Naming and flattening strategy attached to a register class.
///
/// One implementation is selected per class at construction time. The
/// default renders indices in decimal, values in hex, and flattens as the
/// identity function.
pub trait RegClassOps: Send + Sync {
    /// Renders the name of the register identified by `id`.
    fn reg_name(&self, id: RegId<'_>) -> String {
        id.index().to_string()
    }

    /// Renders a raw register value as text.
    ///
    /// Power-of-two widths up to eight bytes are read as little-endian
    /// integers and printed as zero-padded hex; anything else falls back
    /// to a byte dump.
    fn val_string(&self, val: &[u8]) -> String {
        match val.len() {
            1 | 2 | 4 | 8 => {
                let mut buf = [0u8; 8];
                buf[..val.len()].copy_from_slice(val);
                let v = u64::from_le_bytes(buf);
                format!("{:#0width$x}", v, width = 2 * val.len() + 2)
            }
            _ => val
                .iter()
                .rev()
                .map(|b| format!("{b:02x}"))
                .collect::<String>(),
        }
    }

    /// Flattens an aliased register view to its canonical identity.
    fn flatten<'a>(&self, _isa: &dyn IsaContext, id: RegId<'a>) -> RegId<'a> {
        id
    }
}

/// Default strategy: decimal names, hex values, identity flatten.
#[derive(Debug)]
pub struct DefaultRegClassOps;

impl RegClassOps for DefaultRegClassOps {}

const DEFAULT_OPS: &dyn RegClassOps = &DefaultRegClassOps;

/// Immutable descriptor for a family of registers.
///
/// All registers of a class share one byte width; the addressing shift is
/// the log2 of that width, so a register's storage offset is its index
/// shifted left rather than multiplied. Builder methods return modified
/// copies and never mutate the receiver.
#[derive(Clone, Copy)]
pub struct RegClass {
    class_type: RegClassType,
    name: &'static str,
    num_regs: usize,
    reg_bytes: usize,
    reg_shift: usize,
    ops: &'static dyn RegClassOps,
    debug: &'static DebugFlag,
    flat: bool,
}

/// Sentinel class for unallocated or non-renameable registers.
pub static INVALID_REG_CLASS: RegClass = RegClass::new(
    RegClassType::Invalid,
    "invalid",
    0,
    &debug::INVALID_REG,
);

impl RegClass {
    /// Constructs a descriptor for `num_regs` registers of [`RegVal`] width.
    pub const fn new(
        class_type: RegClassType,
        name: &'static str,
        num_regs: usize,
        debug: &'static DebugFlag,
    ) -> Self {
        Self {
            class_type,
            name,
            num_regs,
            reg_bytes: size_of::<RegVal>(),
            reg_shift: size_of::<RegVal>().trailing_zeros() as usize,
            ops: DEFAULT_OPS,
            debug,
            flat: true,
        }
    }

    /// Returns a copy whose identities require flattening before use.
    #[must_use]
    pub const fn needs_flattening(self) -> Self {
        let mut class = self;
        class.flat = false;
        class
    }

    /// Returns a copy using `ops` as its naming/flatten strategy.
    #[must_use]
    pub const fn with_ops(self, ops: &'static dyn RegClassOps) -> Self {
        let mut class = self;
        class.ops = ops;
        class
    }

    /// Returns a copy whose registers are sized and addressed for `T`.
    ///
    /// The width must be a power of two so indices can be converted to
    /// byte offsets by shifting.
    #[must_use]
    pub const fn with_reg_type<T>(self) -> Self {
        assert!(size_of::<T>().is_power_of_two());
        let mut class = self;
        class.reg_bytes = size_of::<T>();
        class.reg_shift = size_of::<T>().trailing_zeros() as usize;
        class
    }

    /// Returns the class type tag.
    pub const fn class_type(&self) -> RegClassType {
        self.class_type
    }

    /// Returns the class display name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the number of registers in the class.
    pub const fn num_regs(&self) -> usize {
        self.num_regs
    }

    /// Returns the byte width shared by every register of the class.
    pub const fn reg_bytes(&self) -> usize {
        self.reg_bytes
    }

    /// Returns the shift converting a register index into a byte offset.
    pub const fn reg_shift(&self) -> usize {
        self.reg_shift
    }

    /// Returns the debug category attached to the class.
    pub const fn debug(&self) -> &'static DebugFlag {
        self.debug
    }

    /// True if identities of this class are already canonical.
    pub const fn is_flat(&self) -> bool {
        self.flat
    }

    /// Renders the name of the register identified by `id`.
    pub fn reg_name(&self, id: RegId<'_>) -> String {
        self.ops.reg_name(id)
    }

    /// Renders a raw value of this class's width as text.
    pub fn val_string(&self, val: &[u8]) -> String {
        debug_assert_eq!(val.len(), self.reg_bytes);
        self.ops.val_string(val)
    }

    /// Resolves `id` to its canonical identity.
    ///
    /// Identity for flat classes; otherwise the strategy's flatten hook.
    pub fn flatten<'a>(&self, isa: &dyn IsaContext, id: RegId<'a>) -> RegId<'a> {
        if self.flat { id } else { self.ops.flatten(isa, id) }
    }

    /// Returns the identity of the register at `idx`.
    pub fn id(&self, idx: RegIndex) -> RegId<'_> {
        debug_assert!((idx as usize) < self.num_regs);
        RegId::new(self, idx)
    }

    /// Iterates the identities of the class, `[0, num_regs)`.
    pub const fn iter(&self) -> RegClassIter<'_> {
        RegClassIter {
            class: self,
            index: 0,
        }
    }
}

impl fmt::Debug for RegClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegClass")
            .field("class_type", &self.class_type)
            .field("name", &self.name)
            .field("num_regs", &self.num_regs)
            .field("reg_bytes", &self.reg_bytes)
            .field("flat", &self.flat)
            .finish_non_exhaustive()
    }
}

impl<'a> IntoIterator for &'a RegClass {
    type Item = RegId<'a>;
    type IntoIter = RegClassIter<'a>;

    fn into_iter(self) -> RegClassIter<'a> {
        self.iter()
    }
}

/// Forward iterator over the identities of a class.
///
/// Restartable: obtain a fresh one from [`RegClass::iter`] at any time.
#[derive(Clone, Debug)]
pub struct RegClassIter<'a> {
    class: &'a RegClass,
    index: RegIndex,
}

impl<'a> Iterator for RegClassIter<'a> {
    type Item = RegId<'a>;

    fn next(&mut self) -> Option<RegId<'a>> {
        if (self.index as usize) < self.class.num_regs() {
            let id = RegId::new(self.class, self.index);
            self.index += 1;
            Some(id)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.class.num_regs() - self.index as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RegClassIter<'_> {}

/// Architectural register identity: a class plus an index within it.
///
/// Identities also carry the number of pinned writes the destination
/// requests; the pin count is bookkeeping, not identity, so equality and
/// ordering consider only (class type, index).
#[derive(Clone, Copy)]
pub struct RegId<'a> {
    class: &'a RegClass,
    index: RegIndex,
    pinned_writes: u32,
}

impl<'a> RegId<'a> {
    /// Creates the identity of register `index` in `class`.
    pub const fn new(class: &'a RegClass, index: RegIndex) -> Self {
        Self {
            class,
            index,
            pinned_writes: 0,
        }
    }

    /// The sentinel identity: register 0 of the invalid class.
    pub fn invalid() -> RegId<'static> {
        RegId::new(&INVALID_REG_CLASS, 0)
    }

    /// Returns the register's index within its class.
    pub const fn index(&self) -> RegIndex {
        self.index
    }

    /// Returns the register's class descriptor.
    pub const fn reg_class(&self) -> &'a RegClass {
        self.class
    }

    /// Returns the class type tag.
    pub const fn class_value(&self) -> RegClassType {
        self.class.class_type()
    }

    /// Returns the class display name.
    pub const fn class_name(&self) -> &'static str {
        self.class.name()
    }

    /// True if the register belongs to the given class.
    pub const fn is(&self, class_type: RegClassType) -> bool {
        self.class_value() as u8 == class_type as u8
    }

    /// True if this register can be renamed.
    pub const fn is_renameable(&self) -> bool {
        !matches!(self.class_value(), RegClassType::Invalid)
    }

    /// True if the identity is already canonical.
    pub const fn is_flat(&self) -> bool {
        self.class.is_flat()
    }

    /// Resolves this identity to its canonical form.
    pub fn flatten(&self, isa: &dyn IsaContext) -> RegId<'a> {
        self.class.flatten(isa, *self)
    }

    /// Returns the number of pinned writes this destination requests.
    pub const fn num_pinned_writes(&self) -> u32 {
        self.pinned_writes
    }

    /// Sets the number of pinned writes this destination requests.
    pub const fn set_num_pinned_writes(&mut self, num_writes: u32) {
        self.pinned_writes = num_writes;
    }
}

impl Default for RegId<'static> {
    fn default() -> Self {
        Self::invalid()
    }
}

impl PartialEq for RegId<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.class_value() == other.class_value() && self.index == other.index
    }
}

impl Eq for RegId<'_> {}

impl PartialOrd for RegId<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RegId<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.class_value()
            .cmp(&other.class_value())
            .then(self.index.cmp(&other.index))
    }
}

impl Hash for RegId<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class_value().hash(state);
        self.index.hash(state);
    }
}

impl fmt::Display for RegId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class.reg_name(*self))
    }
}

impl fmt::Debug for RegId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegId")
            .field("class", &self.class_value())
            .field("index", &self.index)
            .field("pinned_writes", &self.pinned_writes)
            .finish()
    }
}

/// Index-based handle to one physical register identity.
///
/// The identity itself lives in the owning [`PhysRegFile`]'s identity
/// vector; a handle is the class tag plus the flat index of that slot.
/// Handles are what the free list queues and the rename map binds, so the
/// file remains the single owner of the identities.
///
/// [`PhysRegFile`]: crate::core::phys_regfile::PhysRegFile
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct PhysRegRef {
    class_type: RegClassType,
    flat_idx: RegIndex,
}

impl PhysRegRef {
    /// Handle standing in for "no physical register".
    pub const INVALID: Self = Self {
        class_type: RegClassType::Invalid,
        flat_idx: RegIndex::MAX,
    };

    pub(crate) const fn new(class_type: RegClassType, flat_idx: RegIndex) -> Self {
        Self {
            class_type,
            flat_idx,
        }
    }

    /// Returns the class type tag of the referenced register.
    pub const fn class_value(&self) -> RegClassType {
        self.class_type
    }

    /// Returns the flat index of the referenced slot.
    pub const fn flat_index(&self) -> RegIndex {
        self.flat_idx
    }

    /// True unless this is the invalid sentinel.
    pub const fn is_valid(&self) -> bool {
        !matches!(self.class_type, RegClassType::Invalid)
    }
}

impl Default for PhysRegRef {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for PhysRegRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.flat_idx)
        } else {
            write!(f, "invalid")
        }
    }
}

/// Physical register identity: one storage slot of a file.
///
/// A physical register is functionally an architectural identity with slot
/// metadata, but the two kinds must never compare equal to each other, so
/// the architectural identity is embedded and only selected accessors are
/// re-exposed.
#[derive(Debug)]
pub struct PhysRegId<'a> {
    id: RegId<'a>,
    flat_idx: RegIndex,
    pinned_writes_to_complete: u32,
    pinned: bool,
}

impl<'a> PhysRegId<'a> {
    /// Creates the identity of slot `flat_idx` holding register `reg_idx`
    /// of `class`. The flat index never changes afterwards.
    pub const fn new(class: &'a RegClass, reg_idx: RegIndex, flat_idx: RegIndex) -> Self {
        Self {
            id: RegId::new(class, reg_idx),
            flat_idx,
            pinned_writes_to_complete: 0,
            pinned: false,
        }
    }

    /// Returns the register's index within its class.
    pub const fn index(&self) -> RegIndex {
        self.id.index()
    }

    /// Returns the register's class descriptor.
    pub const fn reg_class(&self) -> &'a RegClass {
        self.id.reg_class()
    }

    /// Returns the class type tag.
    pub const fn class_value(&self) -> RegClassType {
        self.id.class_value()
    }

    /// Returns the class display name.
    pub const fn class_name(&self) -> &'static str {
        self.id.class_name()
    }

    /// True if the register belongs to the given class.
    pub const fn is(&self, class_type: RegClassType) -> bool {
        self.id.is(class_type)
    }

    /// True if this slot is always associated to the same architectural
    /// register.
    pub const fn is_fixed_mapping(&self) -> bool {
        !self.id.is_renameable()
    }

    /// Returns the file-unique flat index of this slot.
    pub const fn flat_index(&self) -> RegIndex {
        self.flat_idx
    }

    /// Returns the handle addressing this slot.
    pub const fn phys_ref(&self) -> PhysRegRef {
        PhysRegRef::new(self.class_value(), self.flat_idx)
    }

    /// Returns the number of outstanding pinned writes.
    pub const fn num_pinned_writes(&self) -> u32 {
        self.id.num_pinned_writes()
    }

    /// Sets the outstanding pinned-write counter.
    ///
    /// An instruction with a pinned destination can be squashed while the
    /// counter sits at zero; the flag remembers that the destination was
    /// pinned originally, so a re-rename of the same physical register
    /// after a memory order violation can reset the counters.
    pub const fn set_num_pinned_writes(&mut self, num_writes: u32) {
        self.pinned = num_writes != 0;
        self.id.set_num_pinned_writes(num_writes);
    }

    /// Decrements the outstanding pinned-write counter.
    pub const fn decr_num_pinned_writes(&mut self) {
        debug_assert!(self.id.num_pinned_writes() > 0);
        self.id.pinned_writes -= 1;
    }

    /// Increments the outstanding pinned-write counter.
    pub const fn incr_num_pinned_writes(&mut self) {
        self.id.pinned_writes += 1;
    }

    /// True if this register was pinned when last renamed.
    pub const fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Returns the number of pinned writes remaining until completion.
    pub const fn num_pinned_writes_to_complete(&self) -> u32 {
        self.pinned_writes_to_complete
    }

    /// Sets the writes-to-completion counter.
    pub const fn set_num_pinned_writes_to_complete(&mut self, num_writes: u32) {
        self.pinned_writes_to_complete = num_writes;
    }

    /// Decrements the writes-to-completion counter.
    pub const fn decr_num_pinned_writes_to_complete(&mut self) {
        debug_assert!(self.pinned_writes_to_complete > 0);
        self.pinned_writes_to_complete -= 1;
    }

    /// Increments the writes-to-completion counter.
    pub const fn incr_num_pinned_writes_to_complete(&mut self) {
        self.pinned_writes_to_complete += 1;
    }
}

impl PartialEq for PhysRegId<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PhysRegId<'_> {}

impl PartialOrd for PhysRegId<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PhysRegId<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
