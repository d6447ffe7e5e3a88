//! Platform traits: clock, retained memory, wake cause, and the halt
//!
//! These are implemented per board (or by the host emulator). They are the
//! only seams through which the core touches power management hardware.

use crate::power::SleepPlan;
use crate::wake::WakeCause;

/// Monotonic clock and blocking delay source
///
/// `now` counts seconds from an arbitrary epoch that survives deep sleep
/// and resets only on full power loss.
pub trait Clock {
    /// Seconds since the power-on epoch
    fn now(&self) -> u64;

    /// Block the (single) control thread for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

/// The one 8-byte memory slot that survives a halt/resume cycle
///
/// Contents reset to 0 on full power loss. The cooldown gate is the only
/// writer; everything else reads.
pub trait RetainedSlot {
    /// Read the retained value
    fn load(&self) -> u64;

    /// Overwrite the retained value
    fn store(&mut self, value: u64);
}

/// Read-once access to the hardware wake-cause register
pub trait WakeCauseSource {
    /// Report why the device resumed execution
    ///
    /// Call once per boot; the register may not be legible a second time.
    fn wake_cause(&mut self) -> WakeCause;
}

/// Terminal sleep operation
///
/// Arms exactly the wake source named by the plan and halts. The never
/// type makes it impossible for code to follow the halt.
pub trait SleepControl {
    /// Arm the wake source and power down
    fn halt(&mut self, plan: SleepPlan) -> !;
}
