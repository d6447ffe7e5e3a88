//! Network and notification collaborator traits
//!
//! The link is only brought up on the notify branch of a completed run and
//! torn down before the frame buffer is released. Connect and send own
//! their own timeouts; the core never blocks unbounded.

use crate::error::ErrorKind;

/// Trait for the network link collaborator
pub trait NetworkLink {
    /// Token for an established connection
    type Session;

    /// Bring the link up, bounded by `timeout_ms`
    fn connect(&mut self, timeout_ms: u32) -> Result<Self::Session, ErrorKind>;

    /// Tear the link down
    fn disconnect(&mut self, session: Self::Session);
}

/// Trait for the notification collaborator
pub trait Notifier<Session> {
    /// Send one alert carrying the captured frame and a caption
    fn send_alert(
        &mut self,
        session: &mut Session,
        jpeg: &[u8],
        caption: &str,
    ) -> Result<(), ErrorKind>;
}
