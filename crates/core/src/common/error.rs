//! Contract-violation faults raised by the renaming components.
//!
//! Every variant is a caller-side programming error: a misconfiguration or
//! a resource-sizing bug in the surrounding pipeline, never a transient
//! condition. The components surface them as immediate panics carrying the
//! fault's diagnostic text; there is no retry or degraded mode.

use thiserror::Error;

/// Fault taxonomy for the renaming core.
///
/// A fault identifies which construction or operation contract was violated.
/// The components format a fault into the panic message at the point of
/// violation, so the diagnostic names the broken contract.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenameFault {
    /// A physical register handle from one class reached a file of another.
    #[error("class mismatch: {found} register handle used with the {expected} register file")]
    ClassMismatch {
        /// Name of the class the file was built for.
        expected: String,
        /// Name of the class the offending handle belongs to.
        found: String,
    },

    /// The free list ran dry during allocation. The requesting pipeline
    /// miscalculated its checkpoint or physical-register budget; no
    /// register means no instruction progress.
    #[error("free list exhausted: physical register budget miscalculated")]
    CapacityExhausted,

    /// A register index outside the valid range for the addressed structure.
    #[error("register index {index} out of range for {what} of size {size}")]
    OutOfRange {
        /// Structure that was addressed.
        what: &'static str,
        /// Offending index.
        index: usize,
        /// Number of valid slots.
        size: usize,
    },

    /// `init` called on a rename map that is already bound.
    #[error("rename map already initialized")]
    DoubleInit,

    /// A rename requested pinned writes for a destination whose previous
    /// binding still holds outstanding pinned writes.
    #[error(
        "pin violation: previous binding holds {outstanding} pinned writes \
         while the destination requests {requested}"
    )]
    PinViolation {
        /// Pinned writes still outstanding on the previous binding.
        outstanding: u32,
        /// Pinned writes requested by the incoming destination.
        requested: u32,
    },
}
