#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for unit tests.
//!
//! This module provides common test infrastructure used across multiple test modules.
//! It is only compiled during testing (`#[cfg(test)]`).

use crate::error::{OverlayError, Result};
use crate::host::WindowControl;
use crate::volume::{AudioService, VolumeRequest};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Global mutex to serialize tests that modify the config home environment variable.
static CONFIG_HOME_LOCK: Mutex<()> = Mutex::new(());

/// Helper function to create a temporary test directory using tempfile.
/// Returns a `TempDir` that automatically cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// RAII guard that points `XDG_CONFIG_HOME` at a temp directory for a test scope
/// and restores the original value when dropped.
///
/// # Safety Considerations
///
/// `std::env::set_var` and `std::env::remove_var` are unsafe because they race
/// with concurrent readers. The `CONFIG_HOME_LOCK` mutex serializes every test
/// that modifies the variable, and the guard restores it on drop (also on panic).
pub struct ConfigHomeGuard {
    original: Option<String>,
    // Held for the lifetime of the guard
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables under a global lock."
)]
impl ConfigHomeGuard {
    /// Create a new guard that sets `XDG_CONFIG_HOME` to the given temp directory path.
    pub fn new(temp_dir: &TempDir) -> Self {
        let lock = CONFIG_HOME_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let original = std::env::var(crate::config::manager::CONFIG_HOME_ENV).ok();
        // SAFETY: serialized by CONFIG_HOME_LOCK; restored on drop.
        unsafe {
            std::env::set_var(crate::config::manager::CONFIG_HOME_ENV, temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables under a global lock."
)]
impl Drop for ConfigHomeGuard {
    fn drop(&mut self) {
        // SAFETY: the lock is still held; restores the state seen in new().
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var(crate::config::manager::CONFIG_HOME_ENV, original);
            }
        } else {
            unsafe {
                std::env::remove_var(crate::config::manager::CONFIG_HOME_ENV);
            }
        }
    }
}

/// Audio transport that parks every request for the test to answer by hand
#[derive(Clone)]
pub struct RecordingAudioService {
    parked_tx: crossbeam_channel::Sender<VolumeRequest>,
    parked_rx: crossbeam_channel::Receiver<VolumeRequest>,
    issued: Arc<AtomicUsize>,
    fail: bool,
}

impl RecordingAudioService {
    /// Transport that accepts every request
    pub fn new() -> Self {
        let (parked_tx, parked_rx) = crossbeam_channel::unbounded();
        Self {
            parked_tx,
            parked_rx,
            issued: Arc::new(AtomicUsize::new(0)),
            fail: false,
        }
    }

    /// Transport that refuses every request
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Oldest parked request
    pub fn take_request(&self) -> Option<VolumeRequest> {
        self.parked_rx.try_recv().ok()
    }

    /// Number of requests accepted so far
    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

impl AudioService for RecordingAudioService {
    fn get_master_volume(&self, request: VolumeRequest) -> Result<()> {
        if self.fail {
            return Err(OverlayError::ServiceUnavailable(
                "transport offline".to_string(),
            ));
        }
        self.issued.fetch_add(1, Ordering::SeqCst);
        self.parked_tx.send(request).unwrap();
        Ok(())
    }
}

/// Window control that counts close requests
#[derive(Clone, Default)]
pub struct RecordingWindow {
    closes: Arc<AtomicUsize>,
}

impl RecordingWindow {
    /// Number of close requests received
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl WindowControl for RecordingWindow {
    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
