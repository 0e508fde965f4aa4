//! Rename statistics collection and reporting.
//!
//! Tracks how the rename protocol resolved each request so resource
//! sizing (physical register pool, checkpoint budget) can be audited
//! after a run.

/// Counters for rename map activity.
///
/// One of the three regime counters is bumped per rename, so
/// `fresh_allocs + pinned_reuses + invalid_passthroughs == renames`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenameStats {
    /// Total rename operations performed.
    pub renames: u64,
    /// Renames that drew a fresh register from the free list.
    pub fresh_allocs: u64,
    /// Renames satisfied by reusing a pinned previous binding.
    pub pinned_reuses: u64,
    /// Invalid-class renames passed through unchanged.
    pub invalid_passthroughs: u64,
}

impl RenameStats {
    /// Creates a zeroed counter block.
    pub const fn new() -> Self {
        Self {
            renames: 0,
            fresh_allocs: 0,
            pinned_reuses: 0,
            invalid_passthroughs: 0,
        }
    }

    /// Prints the counters to stdout.
    pub fn report(&self) {
        println!("RENAME");
        println!("  rename.total           {}", self.renames);
        println!("  rename.fresh           {}", self.fresh_allocs);
        println!("  rename.pin_reuse       {}", self.pinned_reuses);
        println!("  rename.invalid         {}", self.invalid_passthroughs);
        println!("----------------------------------------------------------");
    }
}
