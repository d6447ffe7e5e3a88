//! End-to-end wake-cycle scenarios
//!
//! One test per resume-reason row: each cycle must resolve to exactly one
//! sleep plan, and only the sensor-trigger path may touch the pipeline.

mod support;

use support::{quick_config, Event, Harness, Shot};
use vigil_core::error::ErrorKind;
use vigil_core::pipeline::{PipelineOutcome, Stage};
use vigil_core::power::SleepPlan;
use vigil_core::wake::ResumeReason;

#[test]
fn power_on_settles_sensor_and_arms_edge() {
    let mut harness = Harness::new();
    let report = harness.run(ResumeReason::PowerOn, &Default::default());

    assert_eq!(report.outcome, None);
    assert_eq!(report.plan, SleepPlan::EdgeTrigger);
    assert!(harness.events().is_empty());
    // The motion sensor settle delay ran before arming
    assert_eq!(harness.clock.slept_ms, 3000);
}

#[test]
fn timer_expiry_rearms_edge_without_pipeline() {
    let mut harness = Harness::new();
    let report = harness.run(ResumeReason::TimerExpiry, &Default::default());

    assert_eq!(report.outcome, None);
    assert_eq!(report.plan, SleepPlan::EdgeTrigger);
    assert!(harness.events().is_empty());
}

#[test]
fn unknown_reason_with_open_cooldown_sleeps_on_timer() {
    let mut harness = Harness::new().with_deadline(1500);
    let report = harness.run(ResumeReason::Unknown, &Default::default());

    assert_eq!(report.outcome, None);
    assert_eq!(report.plan, SleepPlan::Timer { seconds: 500 });
    assert!(harness.events().is_empty());
}

#[test]
fn unknown_reason_without_cooldown_rearms_edge() {
    let mut harness = Harness::new();
    let report = harness.run(ResumeReason::Unknown, &Default::default());

    assert_eq!(report.plan, SleepPlan::EdgeTrigger);
}

#[test]
fn first_trigger_runs_pipeline() {
    // Deadline 0: the slot has never been written
    let mut harness = Harness::new();
    let report = harness.run(ResumeReason::SensorTrigger, &quick_config());

    assert!(matches!(
        report.outcome,
        Some(PipelineOutcome::Completed(_))
    ));
    assert!(harness.acquisitions() > 0);
}

#[test]
fn suppressed_trigger_sleeps_for_the_remainder() {
    let mut harness = Harness::new().with_deadline(500);
    harness.clock.now = 100;
    let report = harness.run(ResumeReason::SensorTrigger, &quick_config());

    assert_eq!(report.outcome, Some(PipelineOutcome::Suppressed));
    assert_eq!(report.plan, SleepPlan::Timer { seconds: 400 });
    assert_eq!(harness.acquisitions(), 0);
}

#[test]
fn failed_warmup_aborts_and_rearms_edge() {
    let mut harness = Harness::new();
    harness.camera.shots = std::iter::repeat(Shot::Valid)
        .take(15)
        .chain(std::iter::repeat(Shot::Tiny).take(10))
        .collect();
    let report = harness.run(ResumeReason::SensorTrigger, &Default::default());

    assert_eq!(
        report.outcome,
        Some(PipelineOutcome::AbortedAt {
            stage: Stage::WarmupSensor,
            kind: ErrorKind::QualityFailure,
        })
    );
    assert_eq!(report.plan, SleepPlan::EdgeTrigger);
}

#[test]
fn notified_match_sleeps_for_the_cooldown() {
    let mut harness = Harness::new().with_detection(0.8);
    let report = harness.run(ResumeReason::SensorTrigger, &quick_config());

    assert!(matches!(
        report.outcome,
        Some(PipelineOutcome::Completed(d)) if d.matched
    ));
    assert!(harness.events().contains(&Event::AlertSend));
    assert_eq!(report.plan, SleepPlan::Timer { seconds: 3600 });
}

#[test]
fn low_confidence_match_rearms_edge_without_notify() {
    let mut harness = Harness::new().with_detection(0.2);
    let report = harness.run(ResumeReason::SensorTrigger, &quick_config());

    assert!(matches!(
        report.outcome,
        Some(PipelineOutcome::Completed(_))
    ));
    assert!(!harness.events().contains(&Event::Connect));
    assert_eq!(harness.deadline(), 0);
    assert_eq!(report.plan, SleepPlan::EdgeTrigger);
}
