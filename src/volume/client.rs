//! Volume service client
//!
//! Issues correlated queries to the audio subsystem, allowing at most one
//! pending request per operation name, and turns replies into outcomes for the
//! session controller.
//!
//! Two records are kept per operation:
//! - the **reservation** (pending guard), shared with the transport and released
//!   when the request settles or its [`Reservation`] is dropped;
//! - the **in-flight id**, owned by the client, which decides whether a data
//!   reply is still wanted. `cancel_all` clears both, so late replies are
//!   swallowed.

use crate::error::{OverlayError, Result};
use crate::volume::response::{ResponseError, parse_master_volume};
use crate::volume::service::{AudioService, GET_MASTER_VOLUME, ServiceReply, VolumeRequest};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, mpsc};
use tracing::{debug, info, warn};

/// Correlation id of a volume query
pub type RequestId = u64;

/// Operation name → id of the request currently holding the reservation
#[derive(Debug, Clone, Default)]
pub struct PendingRegistry {
    inner: Arc<Mutex<HashMap<&'static str, RequestId>>>,
}

impl PendingRegistry {
    fn reserve(&self, operation: &'static str, id: RequestId) -> Result<Reservation> {
        let mut pending = self.inner.lock();
        if let Some(holder) = pending.get(operation) {
            warn!("{} #{} still holds the reservation", operation, holder);
            return Err(OverlayError::DuplicatePendingRequest(operation));
        }
        pending.insert(operation, id);
        drop(pending);

        Ok(Reservation {
            registry: self.clone(),
            operation,
            id,
        })
    }

    /// Release `operation` if `id` still holds it
    fn release(&self, operation: &'static str, id: RequestId) -> bool {
        let mut pending = self.inner.lock();
        if pending.get(operation) == Some(&id) {
            pending.remove(operation);
            true
        } else {
            false
        }
    }

    fn revoke(&self, operation: &'static str) -> Option<RequestId> {
        self.inner.lock().remove(operation)
    }

    fn clear(&self) -> usize {
        let mut pending = self.inner.lock();
        let count = pending.len();
        pending.clear();
        count
    }

    /// Id holding the reservation for `operation`
    pub fn holder(&self, operation: &str) -> Option<RequestId> {
        self.inner.lock().get(operation).copied()
    }

    /// Number of reserved operation names
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether no operation is reserved
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

/// Scoped hold on an operation name; released when dropped
#[derive(Debug)]
pub struct Reservation {
    registry: PendingRegistry,
    operation: &'static str,
    id: RequestId,
}

impl Reservation {
    /// Request holding this reservation
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Reserved operation name
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl Drop for Reservation {
    fn drop(&mut self) {
        if self.registry.release(self.operation, self.id) {
            debug!("Released {} #{}", self.operation, self.id);
        }
    }
}

/// What a reply meant for the session
#[derive(Debug)]
pub enum ReplyOutcome {
    /// Master level reported by the audio subsystem
    Volume(u8),
    /// Reply for a live request that carried no usable level
    Rejected(ResponseError),
    /// A request lifecycle ended; its reservation is free
    Settled,
    /// Data for a cancelled or superseded request
    Stale,
}

/// Client side of the audio subsystem
pub struct VolumeServiceClient {
    service: Box<dyn AudioService>,
    registry: PendingRegistry,
    in_flight: HashMap<&'static str, RequestId>,
    next_id: RequestId,
    replies: mpsc::Sender<ServiceReply>,
}

impl VolumeServiceClient {
    /// Create a client whose transport answers through `replies`
    pub fn new(service: Box<dyn AudioService>, replies: mpsc::Sender<ServiceReply>) -> Self {
        Self {
            service,
            registry: PendingRegistry::default(),
            in_flight: HashMap::new(),
            next_id: 1,
            replies,
        }
    }

    /// Shared view of the reservation table
    pub fn registry(&self) -> &PendingRegistry {
        &self.registry
    }

    /// Whether `operation` has a pending reservation
    pub fn is_pending(&self, operation: &str) -> bool {
        self.registry.holder(operation).is_some()
    }

    /// Query the master level for `session_id`
    ///
    /// A request still pending under the same name is superseded: its
    /// reservation is revoked and its replies are ignored from now on.
    pub fn query_master_volume(&mut self, session_id: &str) -> Result<RequestId> {
        self.issue(GET_MASTER_VOLUME, session_id)
    }

    fn issue(&mut self, operation: &'static str, session_id: &str) -> Result<RequestId> {
        let id = self.next_id;
        self.next_id += 1;

        if let Some(previous) = self.registry.revoke(operation) {
            debug!("{} #{} superseded by #{}", operation, previous, id);
        }
        self.in_flight.remove(operation);

        let reservation = self.registry.reserve(operation, id)?;
        let request = VolumeRequest::new(reservation, session_id.to_string(), self.replies.clone());

        self.in_flight.insert(operation, id);
        if let Err(e) = self.service.get_master_volume(request) {
            warn!("Failed to issue {} #{}: {}", operation, id, e);
            self.in_flight.remove(operation);
            self.registry.release(operation, id);
            return Err(e);
        }

        debug!("Issued {} #{} for session {}", operation, id, session_id);
        Ok(id)
    }

    /// Interpret one transport reply
    pub fn handle_reply(&mut self, reply: ServiceReply) -> ReplyOutcome {
        match reply {
            ServiceReply::Response {
                id,
                operation,
                payload,
            } => {
                if self.in_flight.get(operation) != Some(&id) {
                    debug!("Ignoring reply for stale {} #{}", operation, id);
                    return ReplyOutcome::Stale;
                }
                self.in_flight.remove(operation);

                match parse_master_volume(&payload) {
                    Ok(volume) => ReplyOutcome::Volume(volume),
                    Err(e) => {
                        warn!("Unusable {} #{} response ({}): {}", operation, id, e, payload);
                        ReplyOutcome::Rejected(e)
                    }
                }
            }
            ServiceReply::Settled { id, operation } => {
                if self.registry.release(operation, id) {
                    debug!("{} #{} settled", operation, id);
                }
                if self.in_flight.get(operation) == Some(&id) {
                    self.in_flight.remove(operation);
                }
                ReplyOutcome::Settled
            }
        }
    }

    /// Release every reservation and forget every in-flight request
    pub fn cancel_all(&mut self) {
        let released = self.registry.clear();
        self.in_flight.clear();
        if released > 0 {
            info!("Cancelled {} outstanding volume request(s)", released);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::RecordingAudioService;
    use serde_json::json;

    fn client() -> (
        VolumeServiceClient,
        RecordingAudioService,
        mpsc::Receiver<ServiceReply>,
    ) {
        let service = RecordingAudioService::new();
        let (tx, rx) = mpsc::channel();
        let client = VolumeServiceClient::new(Box::new(service.clone()), tx);
        (client, service, rx)
    }

    #[test]
    fn test_query_reserves_operation_and_tags_session() {
        let (mut client, service, _rx) = client();

        let id = client.query_master_volume("display-1").unwrap();

        assert!(client.is_pending(GET_MASTER_VOLUME));
        assert_eq!(client.registry().holder(GET_MASTER_VOLUME), Some(id));
        let request = service.take_request().unwrap();
        assert_eq!(request.id, id);
        assert_eq!(request.session_id, "display-1");
        assert_eq!(request.operation, GET_MASTER_VOLUME);
    }

    #[test]
    fn test_success_then_settle_releases_reservation() {
        let (mut client, service, rx) = client();
        client.query_master_volume("0").unwrap();
        let request = service.take_request().unwrap();

        request.respond(json!({ "returnValue": true, "volumeStatus": { "volume": 42 } }));
        request.settle();

        assert!(!client.is_pending(GET_MASTER_VOLUME), "settle drops the reservation");

        let outcome = client.handle_reply(rx.recv().unwrap());
        assert!(matches!(outcome, ReplyOutcome::Volume(42)));
        let outcome = client.handle_reply(rx.recv().unwrap());
        assert!(matches!(outcome, ReplyOutcome::Settled));
    }

    #[test]
    fn test_failure_still_releases_reservation() {
        let (mut client, service, rx) = client();
        client.query_master_volume("0").unwrap();
        let request = service.take_request().unwrap();

        request.respond(json!({ "returnValue": false }));
        request.settle();

        let outcome = client.handle_reply(rx.recv().unwrap());
        assert!(matches!(
            outcome,
            ReplyOutcome::Rejected(ResponseError::Unsuccessful(_))
        ));
        client.handle_reply(rx.recv().unwrap());
        assert!(!client.is_pending(GET_MASTER_VOLUME));

        assert!(client.query_master_volume("0").is_ok(), "not blocked");
    }

    #[test]
    fn test_dropped_request_releases_reservation() {
        let (mut client, service, _rx) = client();
        client.query_master_volume("0").unwrap();

        drop(service.take_request());

        assert!(!client.is_pending(GET_MASTER_VOLUME));
    }

    #[test]
    fn test_second_query_supersedes_first() {
        let (mut client, service, rx) = client();
        let first = client.query_master_volume("0").unwrap();
        let second = client.query_master_volume("0").unwrap();
        assert_ne!(first, second);
        assert_eq!(client.registry().len(), 1);
        assert_eq!(client.registry().holder(GET_MASTER_VOLUME), Some(second));

        let old = service.take_request().unwrap();
        let new = service.take_request().unwrap();

        old.respond(json!({ "returnValue": true, "volumeStatus": { "volume": 10 } }));
        old.settle();
        assert!(matches!(client.handle_reply(rx.recv().unwrap()), ReplyOutcome::Stale));
        assert!(matches!(client.handle_reply(rx.recv().unwrap()), ReplyOutcome::Settled));
        assert_eq!(
            client.registry().holder(GET_MASTER_VOLUME),
            Some(second),
            "old settle must not release the new reservation"
        );

        new.respond(json!({ "returnValue": true, "volumeStatus": { "volume": 20 } }));
        assert!(matches!(
            client.handle_reply(rx.recv().unwrap()),
            ReplyOutcome::Volume(20)
        ));
    }

    #[test]
    fn test_cancel_all_swallows_late_replies() {
        let (mut client, service, rx) = client();
        client.query_master_volume("0").unwrap();
        let request = service.take_request().unwrap();

        client.cancel_all();
        assert!(client.registry().is_empty());

        request.respond(json!({ "returnValue": true, "volumeStatus": { "volume": 77 } }));
        request.settle();
        assert!(matches!(client.handle_reply(rx.recv().unwrap()), ReplyOutcome::Stale));
        assert!(matches!(client.handle_reply(rx.recv().unwrap()), ReplyOutcome::Settled));
        assert!(client.registry().is_empty());
    }

    #[test]
    fn test_cancel_all_with_nothing_pending() {
        let (mut client, _service, _rx) = client();
        client.cancel_all();
        client.cancel_all();
        assert!(client.registry().is_empty());
    }

    #[test]
    fn test_transport_failure_releases_reservation() {
        let service = RecordingAudioService::failing();
        let (tx, _rx) = mpsc::channel();
        let mut client = VolumeServiceClient::new(Box::new(service), tx);

        let result = client.query_master_volume("0");

        assert!(matches!(result, Err(OverlayError::ServiceUnavailable(_))));
        assert!(!client.is_pending(GET_MASTER_VOLUME));
    }

    #[test]
    fn test_registry_refuses_duplicate_reservation() {
        let registry = PendingRegistry::default();
        let _held = registry.reserve(GET_MASTER_VOLUME, 1).unwrap();

        let result = registry.reserve(GET_MASTER_VOLUME, 2);

        assert!(matches!(
            result,
            Err(OverlayError::DuplicatePendingRequest(GET_MASTER_VOLUME))
        ));
        assert_eq!(registry.holder(GET_MASTER_VOLUME), Some(1));
    }
}
