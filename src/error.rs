//! Error types for the volume overlay
//!
//! This module defines the error types used throughout the crate.
//! Nothing here reaches the user: every failure in the overlay core degrades
//! to "no visible change" and is reported through tracing only.
//!
//! Error variants use `#[source]` to preserve error chains for better
//! observability and debugging.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for the volume overlay
#[derive(Debug, Error)]
pub enum OverlayError {
    /// Configuration could not be loaded, saved or applied
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A store mutation failed; nothing was committed
    #[error("State update rejected: {0}")]
    StateRejected(String),

    /// More than one reservation exists for the same operation name
    #[error("Operation {0} has more than one pending request")]
    DuplicatePendingRequest(&'static str),

    /// The audio transport refused or could not deliver a request
    #[error("Audio service unavailable: {0}")]
    ServiceUnavailable(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for overlay operations
pub type Result<T> = std::result::Result<T, OverlayError>;
