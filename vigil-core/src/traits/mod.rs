//! Collaborator and platform abstraction traits
//!
//! These traits define the interface between the core state machine and
//! everything it does not own: the storage medium, the image sensor, the
//! inference model, the network link, and the platform's clock, retained
//! memory, and sleep machinery.

pub mod camera;
pub mod detect;
pub mod network;
pub mod platform;
pub mod storage;

pub use camera::{FrameData, ImageSensor};
pub use detect::{BoundingBox, Detection, ObjectDetector};
pub use network::{NetworkLink, Notifier};
pub use platform::{Clock, RetainedSlot, SleepControl, WakeCauseSource};
pub use storage::StorageMedia;
