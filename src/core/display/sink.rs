use crate::error::Result;

use super::frame::Frame;

/// External screen service that renders frames.
///
/// Every call is fire-and-forget with a short timeout. Callers treat errors as a dropped
/// frame, never as a reason to stop.
pub trait DisplaySink: Send + Sync {
    fn register(&self, app_id: &str, display_name: &str) -> Result<()>;

    /// Attach a screen handler with `line_count` text lines to the event
    fn bind(&self, event_id: &str, line_count: usize) -> Result<()>;

    /// `duration_ms` of `None` keeps the frame up until the next one arrives
    fn send_frame(&self, event_id: &str, frame: &Frame, duration_ms: Option<u64>) -> Result<()>;

    /// Detach the handler so the device returns to its default screen
    fn unbind(&self, event_id: &str) -> Result<()>;

    fn unregister(&self, app_id: &str) -> Result<()>;
}
