//! Image sensor traits

use crate::error::ErrorKind;

/// A captured frame buffer
///
/// Frames are owned by the sensor driver's buffer pool; the pipeline only
/// reads the encoded bytes and must hand the buffer back via
/// [`ImageSensor::release_frame`].
pub trait FrameData {
    /// Encoded frame length in bytes
    fn len(&self) -> usize;

    /// True if the frame holds no data
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encoded frame contents (JPEG)
    fn bytes(&self) -> &[u8];
}

/// Trait for the image sensor collaborator
pub trait ImageSensor {
    /// Token for an initialized sensor
    type Handle;
    /// Captured frame buffer type
    type Frame: FrameData;

    /// Power up and configure the sensor
    fn init(&mut self) -> Result<Self::Handle, ErrorKind>;

    /// Capture a single frame
    fn capture(&mut self, handle: &mut Self::Handle) -> Result<Self::Frame, ErrorKind>;

    /// Return a frame buffer to the driver pool
    fn release_frame(&mut self, frame: Self::Frame);

    /// Power the sensor back down
    fn shutdown(&mut self, handle: Self::Handle);
}
