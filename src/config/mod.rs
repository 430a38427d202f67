//! Configuration management module
//!
//! This module handles loading and saving the overlay configuration.
//! Configuration is stored in `$XDG_CONFIG_HOME/volume-overlay/config.json`
//! with atomic writes to prevent corruption.

pub mod manager;
pub mod models;

pub use manager::ConfigManager;
pub use models::{DEFAULT_AUTO_HIDE_DELAY_MS, DEFAULT_LOG_HISTORY, OverlayConfig};
