//! Bench collaborators for board bring-up
//!
//! Stand-ins for the camera, storage, inference, and network components
//! so the wake/cooldown state machine can be exercised end to end on the
//! bench. Each one behaves like a healthy peripheral and logs what the
//! real component would do.
//!
//! TODO: replace with the OV2640 capture, SD mount, and uplink components
//! once their board wiring lands.

use defmt::info;

use vigil_core::error::ErrorKind;
use vigil_core::traits::{
    Detection, FrameData, ImageSensor, NetworkLink, Notifier, ObjectDetector, StorageMedia,
};

const FRAME_LEN: usize = 4096;

pub struct BenchStorage;

impl StorageMedia for BenchStorage {
    type Handle = ();

    fn mount(&mut self) -> Result<(), ErrorKind> {
        info!("bench: storage mounted");
        Ok(())
    }

    fn unmount(&mut self, _handle: ()) {
        info!("bench: storage unmounted");
    }
}

pub struct BenchFrame([u8; FRAME_LEN]);

impl FrameData for BenchFrame {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn bytes(&self) -> &[u8] {
        &self.0
    }
}

pub struct BenchCamera;

impl ImageSensor for BenchCamera {
    type Handle = ();
    type Frame = BenchFrame;

    fn init(&mut self) -> Result<(), ErrorKind> {
        info!("bench: camera initialized");
        Ok(())
    }

    fn capture(&mut self, _handle: &mut ()) -> Result<BenchFrame, ErrorKind> {
        let mut frame = [0u8; FRAME_LEN];
        frame[0] = 0xFF;
        frame[1] = 0xD8;
        Ok(BenchFrame(frame))
    }

    fn release_frame(&mut self, _frame: BenchFrame) {}

    fn shutdown(&mut self, _handle: ()) {
        info!("bench: camera shut down");
    }
}

/// Never matches; bench cycles always take the re-arm path
pub struct BenchDetector;

impl ObjectDetector for BenchDetector {
    fn infer(&mut self, jpeg: &[u8]) -> Detection {
        info!("bench: inference over {} bytes", jpeg.len());
        Detection::none()
    }
}

pub struct BenchNetwork;

impl NetworkLink for BenchNetwork {
    type Session = ();

    fn connect(&mut self, timeout_ms: u32) -> Result<(), ErrorKind> {
        info!("bench: connect (timeout {} ms)", timeout_ms);
        Ok(())
    }

    fn disconnect(&mut self, _session: ()) {
        info!("bench: disconnected");
    }
}

pub struct BenchNotifier;

impl Notifier<()> for BenchNotifier {
    fn send_alert(&mut self, _session: &mut (), jpeg: &[u8], caption: &str) -> Result<(), ErrorKind> {
        info!("bench: alert {} bytes, caption: {}", jpeg.len(), caption);
        Ok(())
    }
}
