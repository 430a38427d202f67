//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to `overlay.log` in the given
//! directory and rotation on every startup, keeping a configurable number of
//! previous session logs.

use crate::error::{OverlayError, Result, StringError};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Log file name inside the log directory
pub const LOG_FILE_NAME: &str = "overlay.log";

/// Initialize the logging system
///
/// Log level defaults to INFO but can be configured via `RUST_LOG` environment variable.
/// `history` previous session logs are kept as `overlay.log.1` (newest) onwards.
pub fn init_logging(log_dir: &Path, history: u8) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    rotate_logs_on_startup(&log_dir.join(LOG_FILE_NAME), history)?;

    // Rotation happens above; the appender only ever writes the fresh file
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("overlay")
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| OverlayError::ConfigError(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| OverlayError::ConfigError(Box::new(e)))?;

    tracing::info!("volume-overlay v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Shift `overlay.log` to `overlay.log.1`, `.1` to `.2` and so on, dropping
/// everything from `.{history}` up
fn rotate_logs_on_startup(log_path: &Path, history: u8) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    if history == 0 {
        std::fs::remove_file(log_path)?;
        return Ok(());
    }

    let log_dir = log_path
        .parent()
        .ok_or_else(|| OverlayError::ConfigError(StringError::new("Invalid log path")))?;

    let log_name = log_path
        .file_name()
        .ok_or_else(|| OverlayError::ConfigError(StringError::new("Invalid log filename")))?
        .to_string_lossy();

    // Also sweeps files left behind by a larger history setting
    let mut stale = history;
    loop {
        let oldest_log = log_dir.join(format!("{log_name}.{stale}"));
        if !oldest_log.exists() {
            break;
        }
        std::fs::remove_file(&oldest_log)?;
        match stale.checked_add(1) {
            Some(next) => stale = next,
            None => break,
        }
    }

    for i in (1..history).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        if current_log.exists() {
            std::fs::rename(&current_log, log_dir.join(format!("{log_name}.{}", i + 1)))?;
        }
    }

    std::fs::rename(log_path, log_dir.join(format!("{log_name}.1")))?;

    tracing::info!("Log rotation completed on startup");

    Ok(())
}
