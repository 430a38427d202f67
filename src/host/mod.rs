//! Host environment boundary
//!
//! Lifecycle signals delivered by the host, the window close action, and the
//! display affinity read that tags volume queries.

pub mod window;

pub use window::{LoggingWindow, WindowControl};

/// Environment variable carrying the display this overlay is bound to
pub const DISPLAY_AFFINITY_ENV: &str = "DISPLAY_AFFINITY";

/// Lifecycle signals from the host, delivered at most once per occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    /// System locale changed; the hosting context must reload from scratch
    LocaleChanged,
    /// The overlay was launched again while already running
    Relaunch,
}

/// Identifier of the display the session runs on
///
/// Read once; defaults to `"0"` when the host does not provide one.
pub fn display_affinity() -> String {
    std::env::var(DISPLAY_AFFINITY_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "0".to_string())
}
