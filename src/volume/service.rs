//! Audio service transport boundary
//!
//! The overlay does not care how a query reaches the audio subsystem. A
//! transport receives a [`VolumeRequest`], answers through its reply channel
//! and settles the request when its lifecycle ends. Dropping the request
//! without settling releases the reservation too.

use crate::error::{OverlayError, Result};
use crate::volume::client::{RequestId, Reservation};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Operation name of the master volume query
pub const GET_MASTER_VOLUME: &str = "getMasterVolume";

/// Asynchronous signals from the audio transport
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceReply {
    /// Data for a request
    Response {
        /// Request the payload answers
        id: RequestId,
        /// Operation name
        operation: &'static str,
        /// Raw payload from the audio subsystem
        payload: serde_json::Value,
    },
    /// Request lifecycle ended, independent of success or failure
    Settled {
        /// Request that ended
        id: RequestId,
        /// Operation name
        operation: &'static str,
    },
}

/// One in-flight query handed to a transport
#[derive(Debug)]
pub struct VolumeRequest {
    /// Correlation id
    pub id: RequestId,
    /// Operation name
    pub operation: &'static str,
    /// Display affinity of the requesting session
    pub session_id: String,
    reservation: Reservation,
    replies: mpsc::Sender<ServiceReply>,
}

impl VolumeRequest {
    pub(crate) fn new(
        reservation: Reservation,
        session_id: String,
        replies: mpsc::Sender<ServiceReply>,
    ) -> Self {
        Self {
            id: reservation.id(),
            operation: reservation.operation(),
            session_id,
            reservation,
            replies,
        }
    }

    /// Deliver a payload to the session; returns `false` once the session is gone
    pub fn respond(&self, payload: serde_json::Value) -> bool {
        self.replies
            .send(ServiceReply::Response {
                id: self.id,
                operation: self.operation,
                payload,
            })
            .is_ok()
    }

    /// End the request lifecycle and release its reservation
    pub fn settle(self) {
        let Self {
            id,
            operation,
            reservation,
            replies,
            ..
        } = self;
        drop(reservation);
        if replies.send(ServiceReply::Settled { id, operation }).is_err() {
            debug!("Session gone before {} #{} settled", operation, id);
        }
    }
}

/// Boundary to the audio subsystem
pub trait AudioService: Send {
    /// Start a master volume query; the answer arrives through the request's reply channel
    fn get_master_volume(&self, request: VolumeRequest) -> Result<()>;
}

/// Transport that always reports the same master level from a worker thread
#[derive(Debug, Clone)]
pub struct FixedVolumeService {
    volume: u8,
    latency: Duration,
}

impl FixedVolumeService {
    /// Report `volume` after `latency`
    pub fn new(volume: u8, latency: Duration) -> Self {
        Self { volume, latency }
    }
}

impl AudioService for FixedVolumeService {
    fn get_master_volume(&self, request: VolumeRequest) -> Result<()> {
        let volume = self.volume;
        let latency = self.latency;

        thread::Builder::new()
            .name(format!("audio-{}-{}", request.operation, request.id))
            .spawn(move || {
                thread::sleep(latency);
                let payload = serde_json::json!({
                    "returnValue": true,
                    "volumeStatus": { "volume": volume },
                    "sessionId": request.session_id,
                });
                if !request.respond(payload) {
                    warn!("Session gone before {} #{} answered", request.operation, request.id);
                }
                request.settle();
            })
            .map(|_| ())
            .map_err(|e| OverlayError::ServiceUnavailable(e.to_string()))
    }
}
