//! Recording mock collaborators for the pipeline and wake-cycle tests
//!
//! Every mock appends to a shared event log so tests can assert exact
//! acquisition/release ordering across collaborators.

#![allow(dead_code)] // each test crate uses a different subset

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use vigil_core::config::SentinelConfig;
use vigil_core::cooldown::CooldownGate;
use vigil_core::error::ErrorKind;
use vigil_core::sentinel::{run_cycle, Collaborators, CycleReport};
use vigil_core::traits::{
    BoundingBox, Clock, Detection, FrameData, ImageSensor, NetworkLink, Notifier, ObjectDetector,
    RetainedSlot, StorageMedia,
};
use vigil_core::wake::ResumeReason;

/// One observable collaborator action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Mount,
    Unmount,
    SensorInit,
    SensorShutdown,
    Capture,
    FrameRelease,
    Connect,
    AlertSend,
    Disconnect,
}

pub type Log = Rc<RefCell<Vec<Event>>>;

impl Event {
    /// True for events that acquire a stage resource
    pub fn is_acquisition(self) -> bool {
        matches!(self, Event::Mount | Event::SensorInit | Event::Capture)
    }
}

pub struct MemorySlot(pub u64);

impl RetainedSlot for MemorySlot {
    fn load(&self) -> u64 {
        self.0
    }

    fn store(&mut self, value: u64) {
        self.0 = value;
    }
}

pub struct MockClock {
    /// Base time in seconds
    pub now: u64,
    /// Milliseconds spent in delay_ms
    pub slept_ms: u64,
}

impl Clock for MockClock {
    fn now(&self) -> u64 {
        self.now + self.slept_ms / 1000
    }

    fn delay_ms(&mut self, ms: u32) {
        self.slept_ms += u64::from(ms);
    }
}

pub struct MockStorage {
    log: Log,
    pub fail: bool,
}

impl StorageMedia for MockStorage {
    type Handle = ();

    fn mount(&mut self) -> Result<(), ErrorKind> {
        if self.fail {
            return Err(ErrorKind::TransientIo);
        }
        self.log.borrow_mut().push(Event::Mount);
        Ok(())
    }

    fn unmount(&mut self, _handle: ()) {
        self.log.borrow_mut().push(Event::Unmount);
    }
}

/// Scripted behavior for one capture call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shot {
    /// A frame above the validity size threshold
    Valid,
    /// A frame below the validity size threshold
    Tiny,
    /// Capture failure
    Fail,
}

pub struct MockFrame(Vec<u8>);

impl FrameData for MockFrame {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn bytes(&self) -> &[u8] {
        &self.0
    }
}

pub struct MockCamera {
    log: Log,
    pub init_fail: bool,
    /// Per-call capture script; once drained, captures are Valid
    pub shots: VecDeque<Shot>,
}

impl ImageSensor for MockCamera {
    type Handle = ();
    type Frame = MockFrame;

    fn init(&mut self) -> Result<(), ErrorKind> {
        if self.init_fail {
            return Err(ErrorKind::TransientIo);
        }
        self.log.borrow_mut().push(Event::SensorInit);
        Ok(())
    }

    fn capture(&mut self, _handle: &mut ()) -> Result<MockFrame, ErrorKind> {
        match self.shots.pop_front().unwrap_or(Shot::Valid) {
            Shot::Valid => {
                self.log.borrow_mut().push(Event::Capture);
                Ok(MockFrame(vec![0xFF; 4096]))
            }
            Shot::Tiny => {
                self.log.borrow_mut().push(Event::Capture);
                Ok(MockFrame(vec![0xFF; 16]))
            }
            Shot::Fail => Err(ErrorKind::TransientIo),
        }
    }

    fn release_frame(&mut self, _frame: MockFrame) {
        self.log.borrow_mut().push(Event::FrameRelease);
    }

    fn shutdown(&mut self, _handle: ()) {
        self.log.borrow_mut().push(Event::SensorShutdown);
    }
}

pub struct MockDetector {
    pub result: Detection,
    pub calls: u32,
}

impl ObjectDetector for MockDetector {
    fn infer(&mut self, _jpeg: &[u8]) -> Detection {
        self.calls += 1;
        self.result
    }
}

pub struct MockNetwork {
    log: Log,
    pub connect_fail: bool,
}

impl NetworkLink for MockNetwork {
    type Session = ();

    fn connect(&mut self, _timeout_ms: u32) -> Result<(), ErrorKind> {
        if self.connect_fail {
            return Err(ErrorKind::TransientIo);
        }
        self.log.borrow_mut().push(Event::Connect);
        Ok(())
    }

    fn disconnect(&mut self, _session: ()) {
        self.log.borrow_mut().push(Event::Disconnect);
    }
}

pub struct MockNotifier {
    log: Log,
    pub send_fail: bool,
    pub last_caption: Option<String>,
}

impl Notifier<()> for MockNotifier {
    fn send_alert(&mut self, _session: &mut (), _jpeg: &[u8], caption: &str) -> Result<(), ErrorKind> {
        if self.send_fail {
            return Err(ErrorKind::TransientIo);
        }
        self.log.borrow_mut().push(Event::AlertSend);
        self.last_caption = Some(caption.to_owned());
        Ok(())
    }
}

/// One wake cycle's worth of mocks sharing a log
pub struct Harness {
    pub log: Log,
    pub storage: MockStorage,
    pub camera: MockCamera,
    pub detector: MockDetector,
    pub network: MockNetwork,
    pub notifier: MockNotifier,
    pub clock: MockClock,
    pub gate: CooldownGate<MemorySlot>,
}

impl Harness {
    pub fn new() -> Self {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        Self {
            log: log.clone(),
            storage: MockStorage {
                log: log.clone(),
                fail: false,
            },
            camera: MockCamera {
                log: log.clone(),
                init_fail: false,
                shots: VecDeque::new(),
            },
            detector: MockDetector {
                result: Detection::none(),
                calls: 0,
            },
            network: MockNetwork {
                log: log.clone(),
                connect_fail: false,
            },
            notifier: MockNotifier {
                log: log.clone(),
                send_fail: false,
                last_caption: None,
            },
            clock: MockClock {
                now: 1000,
                slept_ms: 0,
            },
            gate: CooldownGate::new(MemorySlot(0)),
        }
    }

    pub fn with_deadline(mut self, deadline: u64) -> Self {
        self.gate = CooldownGate::new(MemorySlot(deadline));
        self
    }

    pub fn with_detection(mut self, confidence: f32) -> Self {
        self.detector.result = Detection {
            matched: true,
            confidence,
            bounding_box: Some(BoundingBox {
                x: 10,
                y: 20,
                width: 64,
                height: 128,
            }),
        };
        self
    }

    pub fn run(&mut self, reason: ResumeReason, config: &SentinelConfig) -> CycleReport {
        run_cycle(
            reason,
            &mut self.gate,
            &mut self.clock,
            Collaborators {
                storage: &mut self.storage,
                camera: &mut self.camera,
                detector: &mut self.detector,
                network: &mut self.network,
                notifier: &mut self.notifier,
            },
            config,
        )
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub fn acquisitions(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|e| e.is_acquisition())
            .count()
    }

    /// Current retained deadline (remaining at t=0 equals the raw value)
    pub fn deadline(&self) -> u64 {
        self.gate.remaining(0)
    }
}

/// Config with a single-frame warmup so event logs stay small
pub fn quick_config() -> SentinelConfig {
    SentinelConfig {
        warmup_frames: 1,
        warmup_min_valid: 1,
        warmup_frame_delay_ms: 0,
        ..Default::default()
    }
}
