//! Staged detection pipeline
//!
//! One motion trigger runs the stages strictly in order:
//!
//! ```text
//! MountStorage -> InitSensor -> WarmupSensor -> CaptureFrame
//!              -> RunInference -> [match?] -> SendNotification
//! ```
//!
//! Any stage failure aborts the run; resources acquired by earlier stages
//! are always released in reverse order before the outcome is returned.

mod controller;

pub use controller::PipelineController;

use crate::error::ErrorKind;
use crate::traits::Detection;

/// Ordered pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// Mount the storage holding the detection model
    MountStorage,
    /// Power up and configure the image sensor
    InitSensor,
    /// Discard-read frames until exposure stabilizes
    WarmupSensor,
    /// Capture the frame to analyze
    CaptureFrame,
    /// Run on-device inference (cannot abort the run)
    RunInference,
    /// Best-effort alert delivery (cannot abort the run)
    SendNotification,
}

/// Result of one pipeline invocation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PipelineOutcome {
    /// Cooldown window still open; no stage ran, nothing was acquired
    Suppressed,
    /// All stages ran; the detection decides what the caller logs
    Completed(Detection),
    /// A stage failed; everything acquired before it was released
    AbortedAt {
        /// The stage that failed
        stage: Stage,
        /// Why it failed
        kind: ErrorKind,
    },
}
