//! Scripted collaborators and host platform pieces for the emulator
//!
//! The retained slot is a file, so cooldown state survives "deep sleep"
//! (process exit) exactly the way the RTC backup register does on the
//! board. Delete the file to simulate a full power loss.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use vigil_core::error::ErrorKind;
use vigil_core::power::SleepPlan;
use vigil_core::traits::{
    BoundingBox, Clock, Detection, FrameData, ImageSensor, NetworkLink, Notifier, ObjectDetector,
    RetainedSlot, SleepControl, StorageMedia,
};

/// File-backed retained slot (8 bytes, little endian)
pub struct FileSlot {
    path: PathBuf,
    value: u64,
}

impl FileSlot {
    pub fn open(path: PathBuf) -> io::Result<Self> {
        let value = match fs::read(&path) {
            Ok(bytes) if bytes.len() >= 8 => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&bytes[..8]);
                u64::from_le_bytes(raw)
            }
            Ok(_) => 0,
            Err(err) if err.kind() == io::ErrorKind::NotFound => 0,
            Err(err) => return Err(err),
        };
        Ok(Self { path, value })
    }
}

impl RetainedSlot for FileSlot {
    fn load(&self) -> u64 {
        self.value
    }

    fn store(&mut self, value: u64) {
        self.value = value;
        if let Err(err) = fs::write(&self.path, value.to_le_bytes()) {
            eprintln!("retained slot write failed: {err}");
        }
    }
}

/// Wall-clock seconds; monotonic enough across emulator runs to stand in
/// for an RTC that keeps counting through deep sleep
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

pub struct ScriptedStorage {
    pub fail: bool,
}

impl StorageMedia for ScriptedStorage {
    type Handle = ();

    fn mount(&mut self) -> Result<(), ErrorKind> {
        if self.fail {
            println!("[storage] mount failed (scripted)");
            return Err(ErrorKind::TransientIo);
        }
        println!("[storage] mounted");
        Ok(())
    }

    fn unmount(&mut self, _handle: ()) {
        println!("[storage] unmounted");
    }
}

pub struct ScriptedFrame(Vec<u8>);

impl FrameData for ScriptedFrame {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn bytes(&self) -> &[u8] {
        &self.0
    }
}

pub struct ScriptedCamera {
    pub fail_init: bool,
    /// Captures with index below this yield full-size frames
    pub valid_captures: u32,
    captures: u32,
}

impl ScriptedCamera {
    pub fn new(fail_init: bool, valid_captures: u32) -> Self {
        Self {
            fail_init,
            valid_captures,
            captures: 0,
        }
    }
}

impl ImageSensor for ScriptedCamera {
    type Handle = ();
    type Frame = ScriptedFrame;

    fn init(&mut self) -> Result<(), ErrorKind> {
        if self.fail_init {
            println!("[camera] init failed (scripted)");
            return Err(ErrorKind::TransientIo);
        }
        println!("[camera] initialized");
        Ok(())
    }

    fn capture(&mut self, _handle: &mut ()) -> Result<ScriptedFrame, ErrorKind> {
        let index = self.captures;
        self.captures += 1;
        let size = if index < self.valid_captures { 4096 } else { 16 };
        // JPEG SOI marker so the bytes look like a frame
        let mut data = vec![0u8; size];
        data[0] = 0xFF;
        data[1] = 0xD8;
        Ok(ScriptedFrame(data))
    }

    fn release_frame(&mut self, _frame: ScriptedFrame) {}

    fn shutdown(&mut self, _handle: ()) {
        println!("[camera] shut down");
    }
}

pub struct ScriptedDetector {
    pub confidence: f32,
}

impl ObjectDetector for ScriptedDetector {
    fn infer(&mut self, jpeg: &[u8]) -> Detection {
        println!(
            "[detector] inference over {} bytes, scripted confidence {:.2}",
            jpeg.len(),
            self.confidence
        );
        if self.confidence > 0.0 {
            Detection {
                matched: true,
                confidence: self.confidence,
                bounding_box: Some(BoundingBox {
                    x: 412,
                    y: 288,
                    width: 96,
                    height: 208,
                }),
            }
        } else {
            Detection::none()
        }
    }
}

pub struct ScriptedNetwork {
    pub fail: bool,
}

impl NetworkLink for ScriptedNetwork {
    type Session = ();

    fn connect(&mut self, timeout_ms: u32) -> Result<(), ErrorKind> {
        if self.fail {
            println!("[network] connect failed within {timeout_ms} ms (scripted)");
            return Err(ErrorKind::TransientIo);
        }
        println!("[network] connected");
        Ok(())
    }

    fn disconnect(&mut self, _session: ()) {
        println!("[network] disconnected");
    }
}

pub struct ScriptedNotifier {
    pub fail: bool,
}

impl Notifier<()> for ScriptedNotifier {
    fn send_alert(&mut self, _session: &mut (), jpeg: &[u8], caption: &str) -> Result<(), ErrorKind> {
        if self.fail {
            println!("[notify] send failed (scripted)");
            return Err(ErrorKind::TransientIo);
        }
        println!("[notify] alert sent ({} bytes)", jpeg.len());
        for line in caption.lines() {
            println!("[notify]   {line}");
        }
        Ok(())
    }
}

/// Halt = print the armed wake source and exit the process
pub struct ExitHalt;

impl SleepControl for ExitHalt {
    fn halt(&mut self, plan: SleepPlan) -> ! {
        match plan {
            SleepPlan::EdgeTrigger => {
                println!("[sleep] armed: motion sensor edge");
            }
            SleepPlan::Timer { seconds } => {
                println!("[sleep] armed: wakeup timer, {seconds} s");
            }
        }
        println!("[sleep] entering deep sleep (process exit)");
        process::exit(0);
    }
}
