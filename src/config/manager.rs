//! Configuration manager for loading and saving overlay configuration
//!
//! Configuration lives in `$XDG_CONFIG_HOME/volume-overlay/config.json` and is
//! written atomically to prevent corruption.

use crate::config::models::OverlayConfig;
use crate::error::{OverlayError, Result, StringError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable that overrides the configured volume type
pub const VOLUME_TYPE_ENV: &str = "VOLUME_TYPE";

/// Environment variable pointing at the configuration root
pub const CONFIG_HOME_ENV: &str = "XDG_CONFIG_HOME";

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Directory holding the config file and session logs
    ///
    /// Returns: `$XDG_CONFIG_HOME/volume-overlay`, or `./volume-overlay` when unset
    pub fn get_config_dir() -> PathBuf {
        let root = std::env::var(CONFIG_HOME_ENV).unwrap_or_else(|_| ".".to_string());
        PathBuf::from(root).join("volume-overlay")
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.json")
    }

    /// Load configuration from disk
    ///
    /// A missing or corrupt file yields the default configuration. The
    /// `VOLUME_TYPE` environment variable, when set, replaces `volume_type`.
    pub fn load() -> Result<OverlayConfig> {
        let mut config = Self::load_from(&Self::get_config_path())?;

        if let Ok(volume_type) = std::env::var(VOLUME_TYPE_ENV) {
            debug!("Volume type overridden from environment: {}", volume_type);
            config.volume_type = volume_type;
        }

        Ok(config)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<OverlayConfig> {
        if !path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(OverlayConfig::default());
        }

        let json = std::fs::read_to_string(path)?;

        match serde_json::from_str(&json) {
            Ok(config) => {
                info!("Configuration loaded from {}", path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                Ok(OverlayConfig::default())
            }
        }
    }

    /// Save configuration to the default path
    pub fn save(config: &OverlayConfig) -> Result<()> {
        Self::save_to(config, &Self::get_config_path())
    }

    /// Save configuration with an atomic write (temp file in the same dir, then rename)
    pub fn save_to(config: &OverlayConfig, path: &Path) -> Result<()> {
        let config_dir = path.parent().ok_or_else(|| {
            OverlayError::ConfigError(StringError::new("Invalid config path"))
        })?;
        std::fs::create_dir_all(config_dir)?;

        let json = serde_json::to_string_pretty(config)?;
        let mut temp = tempfile::NamedTempFile::new_in(config_dir)?;
        temp.write_all(json.as_bytes())?;
        temp.persist(path).map_err(|e| OverlayError::IoError(e.error))?;

        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}
