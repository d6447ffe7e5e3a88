//! Wake-cause classification
//!
//! Maps the raw hardware wake cause to a resume reason at process start.
//! The cause register may not be legible a second time on all platforms,
//! so the caller reads it exactly once and carries the classified value
//! for the rest of the cycle.

/// Raw wake-cause category as reported by the platform
///
/// Produced by [`crate::traits::WakeCauseSource`]; platform code maps its
/// wakeup register bits onto these categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeCause {
    /// No wake source recorded; first power-on or full reset
    ColdBoot,
    /// External edge on the motion sensor line
    ExternalEdge,
    /// Wakeup timer expired
    Timer,
    /// Any cause this firmware does not use (touch, ULP, brownout, ...)
    Other,
}

/// Why this process run started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResumeReason {
    /// Initial power on
    PowerOn,
    /// Motion sensor edge while armed
    SensorTrigger,
    /// Cooldown timer expired
    TimerExpiry,
    /// Unsupported or undefined cause
    Unknown,
}

/// Classify a raw wake cause
///
/// Total function: unsupported causes become [`ResumeReason::Unknown`],
/// never an error. The cycle dispatch decides what to do with `Unknown`.
pub fn classify(cause: WakeCause) -> ResumeReason {
    match cause {
        WakeCause::ColdBoot => ResumeReason::PowerOn,
        WakeCause::ExternalEdge => ResumeReason::SensorTrigger,
        WakeCause::Timer => ResumeReason::TimerExpiry,
        WakeCause::Other => ResumeReason::Unknown,
    }
}
