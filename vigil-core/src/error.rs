//! Failure taxonomy shared by the pipeline and its collaborators
//!
//! Nothing here is fatal to the process: every kind degrades to an
//! aborted pipeline run that still reaches the halt path, and the motion
//! sensor re-arm is the only retry mechanism.

/// Kinds of failures a wake cycle can encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Mount, sensor, or network I/O failure; retried only via the next wake
    TransientIo,
    /// Sensor warmup did not stabilize (too few valid discard frames)
    QualityFailure,
    /// Invalid configuration; checked once at first boot
    ConfigurationError,
}
