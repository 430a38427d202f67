//! `volume-overlay` - Session controller for a transient volume panel
//!
//! Drives a per-display volume overlay: shows and hides the panel, auto-hides it
//! after a quiet period, and keeps the master volume in sync with the audio
//! subsystem. Uses an event-driven architecture with `SessionController`
//! coordinating the `OverlayStore`, the `AutoHideTimer` and the
//! `VolumeServiceClient`.

// Module declarations
pub mod config;
pub mod error;
pub mod host;
pub mod session;
pub mod store;
pub mod utils;
pub mod volume;

// Shared test utilities (only compiled during testing)
#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use error::{OverlayError, Result};
