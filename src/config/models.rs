//! Configuration data models
//!
//! This module defines the data structures used for overlay configuration.

use serde::{Deserialize, Serialize};

/// Quiet period before the panel hides itself
pub const DEFAULT_AUTO_HIDE_DELAY_MS: u64 = 5000;

/// Smallest accepted auto-hide delay
pub const MIN_AUTO_HIDE_DELAY_MS: u64 = 500;

/// Largest accepted auto-hide delay
pub const MAX_AUTO_HIDE_DELAY_MS: u64 = 60_000;

/// Previous session logs kept on startup
pub const DEFAULT_LOG_HISTORY: u8 = 9;

/// Top-level overlay configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Volume-type classification, stored verbatim and not interpreted
    pub volume_type: String,
    /// Auto-hide delay in milliseconds (500-60000)
    pub auto_hide_delay_ms: u64,
    /// Base title used when tagging the session with its display
    pub session_title: String,
    /// Master level reported by the built-in fixed volume transport
    pub demo_master_volume: u8,
    /// Number of rotated session logs to keep (0 keeps none)
    pub log_history: u8,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            volume_type: String::new(),
            auto_hide_delay_ms: DEFAULT_AUTO_HIDE_DELAY_MS,
            session_title: "Volume".to_string(),
            demo_master_volume: 30,
            log_history: DEFAULT_LOG_HISTORY,
        }
    }
}

impl OverlayConfig {
    /// Auto-hide delay clamped to the supported range
    pub fn auto_hide_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(
            self.auto_hide_delay_ms
                .clamp(MIN_AUTO_HIDE_DELAY_MS, MAX_AUTO_HIDE_DELAY_MS),
        )
    }
}
