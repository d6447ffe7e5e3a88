//! Application configuration
//!
//! Timing, thresholds, and behavioral settings for the sentinel. Defaults
//! match the reference board bring-up values.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// Sentinel configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SentinelConfig {
    /// Suppression window after a notified detection (seconds)
    pub cooldown_seconds: u64,
    /// Minimum confidence for a detection to count as a match
    pub min_confidence: f32,
    /// Discard captures during sensor warmup
    pub warmup_frames: u32,
    /// Delay between warmup captures (milliseconds)
    pub warmup_frame_delay_ms: u32,
    /// Warmup captures that must be valid for the stage to pass
    pub warmup_min_valid: u32,
    /// Minimum encoded size for a frame to count as valid (bytes)
    pub min_frame_bytes: usize,
    /// Network connect timeout (milliseconds)
    pub network_timeout_ms: u32,
    /// Motion sensor settle time after first power-on (milliseconds)
    pub sensor_warmup_ms: u32,
    /// Diagnostic drain delay before the halt instruction (milliseconds)
    pub flush_delay_ms: u32,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: 3600,
            min_confidence: 0.5,
            warmup_frames: 25,
            warmup_frame_delay_ms: 35,
            warmup_min_valid: 20,
            min_frame_bytes: 1024,
            network_timeout_ms: 20_000,
            sensor_warmup_ms: 3000,
            flush_delay_ms: 100,
        }
    }
}

impl SentinelConfig {
    /// Validate the configuration
    ///
    /// Checked once at first boot; a failure here is the only fatal error
    /// in the core.
    pub fn validate(&self) -> Result<(), ErrorKind> {
        if self.cooldown_seconds == 0 {
            return Err(ErrorKind::ConfigurationError);
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ErrorKind::ConfigurationError);
        }
        if self.warmup_min_valid > self.warmup_frames {
            return Err(ErrorKind::ConfigurationError);
        }
        Ok(())
    }
}
