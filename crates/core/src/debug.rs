//! Debug-flag categories for diagnostic tracing.
//!
//! Every register class carries one of these category tags; components
//! consult it before emitting per-operation trace output. A flag is live
//! only while both the flag itself and the global toggle are enabled, so
//! individual categories can be switched without touching the rest.
//!
//! The flags carry no behavior of their own: disabling them changes what
//! is printed, never what the renaming components do.

use std::sync::atomic::{AtomicBool, Ordering};

static GLOBAL_ENABLE: AtomicBool = AtomicBool::new(false);

/// Enables debug tracing globally. Individual flags still gate their own output.
pub fn global_enable() {
    GLOBAL_ENABLE.store(true, Ordering::Relaxed);
}

/// Disables debug tracing globally, silencing every flag at once.
pub fn global_disable() {
    GLOBAL_ENABLE.store(false, Ordering::Relaxed);
}

/// A named category tag gating one stream of diagnostic output.
#[derive(Debug)]
pub struct DebugFlag {
    name: &'static str,
    desc: &'static str,
    enabled: AtomicBool,
}

impl DebugFlag {
    /// Creates a flag, initially disabled.
    pub const fn new(name: &'static str, desc: &'static str) -> Self {
        Self {
            name,
            desc,
            enabled: AtomicBool::new(false),
        }
    }

    /// Returns the flag's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the flag's one-line description.
    pub fn desc(&self) -> &'static str {
        self.desc
    }

    /// Turns this flag on.
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    /// Turns this flag off.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    /// True when both this flag and the global toggle are on.
    pub fn tracing(&self) -> bool {
        GLOBAL_ENABLE.load(Ordering::Relaxed) && self.enabled.load(Ordering::Relaxed)
    }
}

/// Category for the sentinel invalid register class.
pub static INVALID_REG: DebugFlag = DebugFlag::new("InvalidReg", "invalid register class activity");

/// Category for the capability register class.
pub static CAP_REGS: DebugFlag = DebugFlag::new("CapRegs", "capability register class activity");
