//! Storage medium trait
//!
//! The detection model lives on removable storage, so the pipeline mounts
//! it before touching the sensor and unmounts it on every exit path.

use crate::error::ErrorKind;

/// Trait for the mounted storage collaborator
///
/// The handle moves into [`unmount`](StorageMedia::unmount), so releasing
/// the same mount twice is unrepresentable.
pub trait StorageMedia {
    /// Token for a successful mount
    type Handle;

    /// Mount the filesystem
    fn mount(&mut self) -> Result<Self::Handle, ErrorKind>;

    /// Unmount a previously mounted filesystem
    fn unmount(&mut self, handle: Self::Handle);
}
