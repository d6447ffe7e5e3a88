//! Vigil wake-cycle emulator
//!
//! Runs exactly one wake cycle on the host against scripted collaborators
//! and exits when the core "halts". The retained cooldown deadline lives
//! in a state file, so invoking the emulator repeatedly behaves like a
//! board going through trigger/cooldown/timer cycles:
//!
//! ```text
//! vigil-sim --wake trigger --confidence 0.8   # match, notify, cooldown
//! vigil-sim --wake trigger                    # suppressed, timer armed
//! vigil-sim --wake timer                      # cooldown over, edge armed
//! ```

mod scripted;

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use scripted::{
    ExitHalt, FileSlot, ScriptedCamera, ScriptedDetector, ScriptedNetwork, ScriptedNotifier,
    ScriptedStorage, SystemClock,
};
use vigil_core::config::SentinelConfig;
use vigil_core::cooldown::CooldownGate;
use vigil_core::power::PowerController;
use vigil_core::sentinel::{run_cycle, Collaborators};
use vigil_core::wake::{classify, ResumeReason, WakeCause};

const DEFAULT_STATE_FILE: &str = "vigil-retained.bin";

struct Options {
    wake: WakeCause,
    confidence: f32,
    warmup_valid: Option<u32>,
    fail_mount: bool,
    fail_sensor: bool,
    fail_connect: bool,
    fail_send: bool,
    reset: bool,
    state_path: PathBuf,
}

impl Options {
    fn defaults() -> Self {
        Self {
            wake: WakeCause::ExternalEdge,
            confidence: 0.0,
            warmup_valid: None,
            fail_mount: false,
            fail_sensor: false,
            fail_connect: false,
            fail_send: false,
            reset: false,
            state_path: PathBuf::from(DEFAULT_STATE_FILE),
        }
    }
}

fn main() {
    let options = parse_options().unwrap_or_else(|err| {
        eprintln!("{err}");
        eprintln!(
            "Usage: vigil-sim [--wake cold|trigger|timer|other] [--confidence X] \
             [--warmup-valid N] [--fail-mount] [--fail-sensor] [--fail-connect] \
             [--fail-send] [--reset] [--state PATH]"
        );
        process::exit(2);
    });

    if options.reset {
        // Full power loss: retained memory does not survive
        let _ = fs::remove_file(&options.state_path);
        println!("power loss simulated: retained state cleared");
    }

    let config = SentinelConfig::default();
    let reason = classify(options.wake);
    println!("wake cause {:?} -> resume reason {:?}", options.wake, reason);

    if reason == ResumeReason::PowerOn {
        if let Err(kind) = config.validate() {
            eprintln!("configuration rejected at first boot: {kind:?}");
            process::exit(1);
        }
    }

    let slot = FileSlot::open(options.state_path.clone()).unwrap_or_else(|err| {
        eprintln!("cannot open retained state {}: {err}", options.state_path.display());
        process::exit(1);
    });
    let mut gate = CooldownGate::new(slot);
    let mut clock = SystemClock;

    // Default script: every warmup capture is valid
    let valid_captures = options.warmup_valid.unwrap_or(u32::MAX);
    let mut storage = ScriptedStorage {
        fail: options.fail_mount,
    };
    let mut camera = ScriptedCamera::new(options.fail_sensor, valid_captures);
    let mut detector = ScriptedDetector {
        confidence: options.confidence,
    };
    let mut network = ScriptedNetwork {
        fail: options.fail_connect,
    };
    let mut notifier = ScriptedNotifier {
        fail: options.fail_send,
    };

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
        println!("pipeline outcome: {outcome:?}");
    }
    println!("sleep plan: {:?}", report.plan);

    PowerController::new(ExitHalt, config.flush_delay_ms).halt(report.plan, &mut clock)
}

fn parse_options() -> Result<Options, String> {
    let mut options = Options::defaults();
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--wake" => {
                let value = args.next().ok_or("Expected value after --wake")?;
                options.wake = parse_wake(&value)?;
            }
            "--confidence" => {
                let value = args.next().ok_or("Expected value after --confidence")?;
                options.confidence = value
                    .parse()
                    .map_err(|_| format!("Invalid confidence: {value}"))?;
            }
            "--warmup-valid" => {
                let value = args.next().ok_or("Expected value after --warmup-valid")?;
                options.warmup_valid = Some(
                    value
                        .parse()
                        .map_err(|_| format!("Invalid warmup-valid count: {value}"))?,
                );
            }
            "--fail-mount" => options.fail_mount = true,
            "--fail-sensor" => options.fail_sensor = true,
            "--fail-connect" => options.fail_connect = true,
            "--fail-send" => options.fail_send = true,
            "--reset" => options.reset = true,
            "--state" => {
                let value = args.next().ok_or("Expected value after --state")?;
                options.state_path = PathBuf::from(value);
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
    }

    Ok(options)
}

fn parse_wake(tag: &str) -> Result<WakeCause, String> {
    match tag {
        "cold" => Ok(WakeCause::ColdBoot),
        "trigger" => Ok(WakeCause::ExternalEdge),
        "timer" => Ok(WakeCause::Timer),
        "other" => Ok(WakeCause::Other),
        _ => Err(format!("Unknown wake cause: {tag}")),
    }
}
