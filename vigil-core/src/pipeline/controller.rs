//! Pipeline controller
//!
//! Sequences the stages, converts every collaborator failure into an
//! [`PipelineOutcome::AbortedAt`], and guarantees LIFO teardown of
//! acquired resources on every exit path.
//!
//! Teardown is structural rather than remembered: each resource is
//! acquired and released in the same stack frame, with the rest of the
//! run nested between the two. A failure deep in the nest unwinds
//! through the release calls in reverse acquisition order, so no branch
//! can skip or double a cleanup.

use core::fmt::Write;

use heapless::String;

use crate::config::SentinelConfig;
use crate::cooldown::CooldownGate;
use crate::error::ErrorKind;
use crate::traits::{
    Clock, Detection, FrameData, ImageSensor, NetworkLink, Notifier, ObjectDetector, RetainedSlot,
    StorageMedia,
};

use super::{PipelineOutcome, Stage};

/// Maximum alert caption length
const CAPTION_LEN: usize = 128;

/// Orchestrates one detection run over the collaborator seams
pub struct PipelineController<'a, S, C, D, N, A, R>
where
    S: StorageMedia,
    C: ImageSensor,
    D: ObjectDetector,
    N: NetworkLink,
    A: Notifier<N::Session>,
    R: RetainedSlot,
{
    storage: &'a mut S,
    camera: &'a mut C,
    detector: &'a mut D,
    network: &'a mut N,
    notifier: &'a mut A,
    gate: &'a mut CooldownGate<R>,
    config: &'a SentinelConfig,
}

impl<'a, S, C, D, N, A, R> PipelineController<'a, S, C, D, N, A, R>
where
    S: StorageMedia,
    C: ImageSensor,
    D: ObjectDetector,
    N: NetworkLink,
    A: Notifier<N::Session>,
    R: RetainedSlot,
{
    /// Borrow the collaborators for one run
    pub fn new(
        storage: &'a mut S,
        camera: &'a mut C,
        detector: &'a mut D,
        network: &'a mut N,
        notifier: &'a mut A,
        gate: &'a mut CooldownGate<R>,
        config: &'a SentinelConfig,
    ) -> Self {
        Self {
            storage,
            camera,
            detector,
            network,
            notifier,
            gate,
            config,
        }
    }

    /// Run the pipeline to an outcome
    ///
    /// The cooldown guard comes first: a suppressed run acquires nothing.
    pub fn run<K: Clock>(&mut self, clock: &mut K) -> PipelineOutcome {
        if self.gate.is_active(clock.now()) {
            return PipelineOutcome::Suppressed;
        }

        let handle = match self.storage.mount() {
            Ok(handle) => handle,
            Err(kind) => return Self::abort(Stage::MountStorage, kind),
        };
        let outcome = self.run_mounted(clock);
        self.storage.unmount(handle);
        outcome
    }

    /// Stages after MountStorage; the mount outlives this frame
    fn run_mounted<K: Clock>(&mut self, clock: &mut K) -> PipelineOutcome {
        let mut sensor = match self.camera.init() {
            Ok(handle) => handle,
            Err(kind) => return Self::abort(Stage::InitSensor, kind),
        };
        let outcome = self.run_with_sensor(&mut sensor, clock);
        self.camera.shutdown(sensor);
        outcome
    }

    /// Stages after InitSensor; the sensor handle outlives this frame
    fn run_with_sensor<K: Clock>(
        &mut self,
        sensor: &mut C::Handle,
        clock: &mut K,
    ) -> PipelineOutcome {
        if let Err(kind) = self.warmup(sensor, clock) {
            return Self::abort(Stage::WarmupSensor, kind);
        }

        let frame = match self.camera.capture(sensor) {
            Ok(frame) => frame,
            Err(kind) => return Self::abort(Stage::CaptureFrame, kind),
        };
        let outcome = self.run_with_frame(&frame, clock);
        self.camera.release_frame(frame);
        outcome
    }

    /// Inference and the notify branch; the frame outlives this frame
    fn run_with_frame<K: Clock>(&mut self, frame: &C::Frame, clock: &mut K) -> PipelineOutcome {
        let detection = self.detector.infer(frame.bytes());

        // The match decision belongs to the controller, not the model
        if detection.matched && detection.confidence >= self.config.min_confidence {
            self.notify(frame.bytes(), &detection, clock);
            // Cooldown starts whether or not the alert went out; a flaky
            // network must not cause a tight re-trigger loop
            self.gate.start(clock.now(), self.config.cooldown_seconds);
        }

        PipelineOutcome::Completed(detection)
    }

    /// Warmup with a quality threshold
    ///
    /// Runs a fixed number of discard captures and counts how many meet
    /// the minimum encoded size. Too few valid frames means the sensor
    /// never stabilized, which aborts like any other stage failure.
    fn warmup<K: Clock>(&mut self, sensor: &mut C::Handle, clock: &mut K) -> Result<(), ErrorKind> {
        let mut valid = 0u32;
        for _ in 0..self.config.warmup_frames {
            if let Ok(frame) = self.camera.capture(sensor) {
                if frame.len() >= self.config.min_frame_bytes {
                    valid += 1;
                }
                self.camera.release_frame(frame);
            }
            clock.delay_ms(self.config.warmup_frame_delay_ms);
        }
        if valid >= self.config.warmup_min_valid {
            Ok(())
        } else {
            Err(ErrorKind::QualityFailure)
        }
    }

    /// Best-effort alert delivery
    ///
    /// Connect, send, disconnect. Failures stay inside this function:
    /// they never change the pipeline outcome.
    fn notify<K: Clock>(&mut self, jpeg: &[u8], detection: &Detection, clock: &mut K) {
        let mut session = match self.network.connect(self.config.network_timeout_ms) {
            Ok(session) => session,
            Err(_) => return,
        };
        let caption = alert_caption(detection, clock.now());
        // Delivery failure is diagnostic-only; the re-arm schedule is
        // already decided by the cooldown
        let _ = self.notifier.send_alert(&mut session, jpeg, caption.as_str());
        self.network.disconnect(session);
    }

    fn abort(stage: Stage, kind: ErrorKind) -> PipelineOutcome {
        PipelineOutcome::AbortedAt { stage, kind }
    }
}

/// Format the alert caption for a matched detection
fn alert_caption(detection: &Detection, now: u64) -> String<CAPTION_LEN> {
    let mut caption = String::new();
    let percent = detection.confidence * 100.0;
    // Truncation on overflow is acceptable for a caption
    let _ = write!(caption, "Motion alert\nconfidence {percent:.1}%\nuptime {now}s");
    if let Some(bb) = detection.bounding_box {
        let _ = write!(
            caption,
            "\nregion ({},{}) {}x{}",
            bb.x, bb.y, bb.width, bb.height
        );
    }
    caption
}
