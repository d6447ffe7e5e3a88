//! Wake-cycle dispatch
//!
//! The per-boot control flow: branch on the resume reason, run the
//! pipeline only for a sensor trigger, and decide the sleep plan for
//! every path. The result is a [`CycleReport`] the binary logs before
//! handing the plan to [`crate::power::PowerController::halt`].
//!
//! Trivial paths never touch the pipeline: a power-on boot settles the
//! motion sensor and arms it; a timer expiry just re-arms the sensor (the
//! cooldown elapsed by definition); an unknown cause falls back to
//! whatever the cooldown state says.

use crate::config::SentinelConfig;
use crate::cooldown::CooldownGate;
use crate::pipeline::{PipelineController, PipelineOutcome};
use crate::power::SleepPlan;
use crate::traits::{
    Clock, ImageSensor, NetworkLink, Notifier, ObjectDetector, RetainedSlot, StorageMedia,
};
use crate::wake::ResumeReason;

/// The external collaborators one cycle may touch
pub struct Collaborators<'a, S, C, D, N, A>
where
    S: StorageMedia,
    C: ImageSensor,
    D: ObjectDetector,
    N: NetworkLink,
    A: Notifier<N::Session>,
{
    pub storage: &'a mut S,
    pub camera: &'a mut C,
    pub detector: &'a mut D,
    pub network: &'a mut N,
    pub notifier: &'a mut A,
}

/// What one wake cycle did and how it will sleep
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Why the device resumed
    pub reason: ResumeReason,
    /// Pipeline outcome; `None` on the trivial paths
    pub outcome: Option<PipelineOutcome>,
    /// The one wake source to arm before halting
    pub plan: SleepPlan,
}

/// Run one wake cycle to a sleep plan
///
/// Exactly one plan comes out of every reachable path; the caller halts
/// with it exactly once.
pub fn run_cycle<K, R, S, C, D, N, A>(
    reason: ResumeReason,
    gate: &mut CooldownGate<R>,
    clock: &mut K,
    collaborators: Collaborators<'_, S, C, D, N, A>,
    config: &SentinelConfig,
) -> CycleReport
where
    K: Clock,
    R: RetainedSlot,
    S: StorageMedia,
    C: ImageSensor,
    D: ObjectDetector,
    N: NetworkLink,
    A: Notifier<N::Session>,
{
    match reason {
        ResumeReason::PowerOn => {
            // Let the motion sensor settle before its first arming
            clock.delay_ms(config.sensor_warmup_ms);
            CycleReport {
                reason,
                outcome: None,
                plan: SleepPlan::EdgeTrigger,
            }
        }
        ResumeReason::TimerExpiry => CycleReport {
            reason,
            outcome: None,
            plan: SleepPlan::EdgeTrigger,
        },
        ResumeReason::Unknown => CycleReport {
            reason,
            outcome: None,
            plan: SleepPlan::for_cooldown(gate, clock.now()),
        },
        ResumeReason::SensorTrigger => {
            let Collaborators {
                storage,
                camera,
                detector,
                network,
                notifier,
            } = collaborators;
            let outcome =
                PipelineController::new(storage, camera, detector, network, notifier, gate, config)
                    .run(clock);
            let plan = SleepPlan::for_cooldown(gate, clock.now());
            CycleReport {
                reason,
                outcome: Some(outcome),
                plan,
            }
        }
    }
}
