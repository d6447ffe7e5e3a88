//! Vigil - motion-triggered camera sentinel firmware
//!
//! Every wake is a fresh boot out of standby: classify why we woke, run
//! at most one detection cycle, and halt with exactly one wake source
//! armed. The only state carried across halts is the cooldown deadline
//! in the RTC backup registers.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use vigil_core::config::SentinelConfig;
use vigil_core::cooldown::CooldownGate;
use vigil_core::power::PowerController;
use vigil_core::sentinel::{run_cycle, Collaborators};
use vigil_core::traits::WakeCauseSource;
use vigil_core::wake::{classify, ResumeReason};

mod bench;
mod platform;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let _p = embassy_stm32::init(Default::default());

    // Capture the cause before anything else can disturb the flags
    let mut wake = platform::WakeRegisters::read();
    let reason = classify(wake.wake_cause());
    info!("vigil wake: {}", reason);

    let config = SentinelConfig::default();
    if reason == ResumeReason::PowerOn && config.validate().is_err() {
        defmt::panic!("sentinel configuration rejected at first boot");
    }

    let mut clock = platform::RtcClock;
    let mut gate = CooldownGate::new(platform::BackupSlot);

    let mut storage = bench::BenchStorage;
    let mut camera = bench::BenchCamera;
    let mut detector = bench::BenchDetector;
    let mut network = bench::BenchNetwork;
    let mut notifier = bench::BenchNotifier;

    let report = run_cycle(
        reason,
        &mut gate,
        &mut clock,
        Collaborators {
            storage: &mut storage,
            camera: &mut camera,
            detector: &mut detector,
            network: &mut network,
            notifier: &mut notifier,
        },
        &config,
    );

    if let Some(outcome) = report.outcome {
        info!("pipeline outcome: {}", outcome);
    }
    info!("sleep plan: {}", report.plan);

    PowerController::new(platform::Standby, config.flush_delay_ms).halt(report.plan, &mut clock)
}
