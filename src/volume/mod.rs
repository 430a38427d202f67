//! Volume service module
//!
//! Asynchronous boundary to the audio subsystem.
//!
//! # Architecture
//!
//! - `VolumeServiceClient`: issues `getMasterVolume`, keeps one reservation per
//!   operation name and interprets replies
//! - `AudioService`: transport trait; `FixedVolumeService` is the built-in
//!   implementation
//! - `ServiceReply`: data (`Response`) and lifecycle end (`Settled`) arrive as
//!   separate signals on the reply channel
//! - `parse_master_volume`: payload validation, yielding `ResponseError`
//!   diagnostics for anything unusable
//!
//! # Request Lifecycle
//!
//! ```text
//! query_master_volume ─► reserve ─► AudioService ─► Response ─► ReplyOutcome::Volume
//!                                        │
//!                                        └─► Settled / drop ─► reservation released
//! ```

pub mod client;
pub mod response;
pub mod service;

pub use client::{PendingRegistry, ReplyOutcome, RequestId, Reservation, VolumeServiceClient};
pub use response::{ResponseError, parse_master_volume};
pub use service::{AudioService, FixedVolumeService, GET_MASTER_VOLUME, ServiceReply, VolumeRequest};
