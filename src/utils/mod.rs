//! Utility modules
//!
//! Provides logging initialization with startup log rotation.

pub mod logging;

pub use logging::init_logging;
