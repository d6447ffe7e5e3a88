//! Cooldown gate over the retained deadline slot
//!
//! Cooldown exists to stop a continuously-triggering motion sensor from
//! producing wake/notify storms. It is independent of notification success:
//! a flaky network must not turn into a tight re-trigger loop.
//!
//! The retained slot holds a single absolute deadline in seconds. 0 means
//! "no cooldown" and is the state after first-ever power-on.

use crate::traits::RetainedSlot;

/// Gate logic over the retained cooldown deadline
///
/// Single writer: [`start`](CooldownGate::start) is the only call site in
/// the process that stores to the slot.
pub struct CooldownGate<R: RetainedSlot> {
    slot: R,
}

impl<R: RetainedSlot> CooldownGate<R> {
    /// Wrap the platform's retained slot
    pub fn new(slot: R) -> Self {
        Self { slot }
    }

    /// True iff the suppression window is still open at `now`
    pub fn is_active(&self, now: u64) -> bool {
        self.slot.load() > now
    }

    /// Seconds of suppression left at `now`, 0 when inactive
    pub fn remaining(&self, now: u64) -> u64 {
        self.slot.load().saturating_sub(now)
    }

    /// Open a suppression window of `duration_seconds` starting at `now`
    ///
    /// Called at most once per pipeline run, only after a positive
    /// detection has been acted on (notification attempted, regardless of
    /// its outcome).
    pub fn start(&mut self, now: u64, duration_seconds: u64) {
        self.slot.store(now.saturating_add(duration_seconds));
    }

    /// Give the slot back (used by binaries that halt through other paths)
    pub fn into_slot(self) -> R {
        self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory slot for host tests
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
    fn test_zero_deadline_is_inactive() {
        let gate = CooldownGate::new(MemorySlot(0));
        assert!(!gate.is_active(0));
        assert!(!gate.is_active(1));
        assert_eq!(gate.remaining(0), 0);
    }

    #[test]
    fn test_active_until_deadline() {
        let gate = CooldownGate::new(MemorySlot(500));
        assert!(gate.is_active(100));
        assert_eq!(gate.remaining(100), 400);
        assert!(!gate.is_active(500));
        assert_eq!(gate.remaining(500), 0);
        assert!(!gate.is_active(501));
    }

    #[test]
    fn test_start_opens_window() {
        let mut gate = CooldownGate::new(MemorySlot(0));
        gate.start(1000, 3600);
        assert!(gate.is_active(1000));
        assert_eq!(gate.remaining(1000), 3600);
        assert_eq!(gate.remaining(4599), 1);
        assert!(!gate.is_active(4600));
    }

    #[test]
    fn test_deadline_saturates_instead_of_wrapping() {
        let mut gate = CooldownGate::new(MemorySlot(0));
        gate.start(u64::MAX - 10, 3600);
        assert!(gate.is_active(u64::MAX - 11));
    }
}
