//! Host window control

use tracing::info;

/// Closes the host window; fire-and-forget
pub trait WindowControl: Send {
    /// Ask the host to close the overlay window
    fn close(&self);
}

/// Window control for headless hosts: records the request in the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingWindow;

impl WindowControl for LoggingWindow {
    fn close(&self) {
        info!("Host window close requested");
    }
}
