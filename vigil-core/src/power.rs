//! Sleep-plan selection and the terminal halt path
//!
//! Every wake cycle ends here with exactly one wake source armed:
//!
//! | Cycle result                  | Plan                          |
//! |-------------------------------|-------------------------------|
//! | First boot (sensor settled)   | `EdgeTrigger`                 |
//! | Timer expiry (cooldown over)  | `EdgeTrigger`                 |
//! | Trigger suppressed            | `Timer` for the remaining window |
//! | Pipeline aborted              | `EdgeTrigger` (re-arm immediately) |
//! | Completed, no match           | `EdgeTrigger` (re-arm immediately) |
//! | Completed, match notified     | `Timer` for the started cooldown |
//!
//! Each row reduces to one question: is the cooldown window open right
//! now? [`SleepPlan::for_cooldown`] is that reduction.

use crate::cooldown::CooldownGate;
use crate::traits::{Clock, RetainedSlot, SleepControl};

/// The single wake source to arm before halting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepPlan {
    /// Arm the motion sensor edge
    EdgeTrigger,
    /// Arm the wakeup timer; the sensor stays disarmed
    Timer {
        /// Sleep duration in seconds
        seconds: u64,
    },
}

impl SleepPlan {
    /// Derive the plan from the cooldown state at `now`
    ///
    /// Suppression (active window) sleeps on the timer for the remainder;
    /// everything else re-arms the sensor edge.
    pub fn for_cooldown<R: RetainedSlot>(gate: &CooldownGate<R>, now: u64) -> Self {
        if gate.is_active(now) {
            SleepPlan::Timer {
                seconds: gate.remaining(now),
            }
        } else {
            SleepPlan::EdgeTrigger
        }
    }
}

/// Owns the halt: flush delay, wake-source arming, power-down
///
/// Consuming `self` and returning `!` means no path can halt twice and no
/// code can run after the halt.
pub struct PowerController<P: SleepControl> {
    sleep: P,
    flush_delay_ms: u32,
}

impl<P: SleepControl> PowerController<P> {
    /// Wrap the platform sleep control
    pub fn new(sleep: P, flush_delay_ms: u32) -> Self {
        Self {
            sleep,
            flush_delay_ms,
        }
    }

    /// Arm the planned wake source and halt
    ///
    /// The flush delay lets pending diagnostics drain before the
    /// irrecoverable halt instruction.
    pub fn halt<K: Clock>(mut self, plan: SleepPlan, clock: &mut K) -> ! {
        clock.delay_ms(self.flush_delay_ms);
        self.sleep.halt(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MemorySlot(u64);

    impl RetainedSlot for MemorySlot {
        fn load(&self) -> u64 {
            self.0
        }

        fn store(&mut self, value: u64) {
            self.0 = value;
        }
    }

    #[test]
    fn test_inactive_cooldown_arms_sensor() {
        let gate = CooldownGate::new(MemorySlot(0));
        assert_eq!(SleepPlan::for_cooldown(&gate, 100), SleepPlan::EdgeTrigger);
    }

    #[test]
    fn test_active_cooldown_arms_timer_for_remainder() {
        let gate = CooldownGate::new(MemorySlot(500));
        assert_eq!(
            SleepPlan::for_cooldown(&gate, 100),
            SleepPlan::Timer { seconds: 400 }
        );
    }

    #[test]
    fn test_expired_cooldown_arms_sensor() {
        let gate = CooldownGate::new(MemorySlot(500));
        assert_eq!(SleepPlan::for_cooldown(&gate, 500), SleepPlan::EdgeTrigger);
    }
}
