//! Session controller module
//!
//! Coordinates the overlay store, the auto-hide timer and the volume client,
//! implementing the overlay state machine.
//!
//! # Overview
//!
//! The session controller is the central coordinator that:
//! - **Receives host signals** (locale change, relaunch) and **user actions**
//! - **Dispatches transitions** into the `OverlayStore`
//! - **Implements debouncing**: every show or volume adjustment rearms the
//!   auto-hide timer, so the panel hides only after a quiet period
//! - **Synchronizes volume** with the audio subsystem on mount and relaunch
//! - **Tears down** timer and requests when the session ends
//!
//! # Event Flow
//!
//! ```text
//! Host / presentation → SessionEvent ─► SessionController ─► Transition ─► OverlayStore
//!                                          │        │
//!                                          │        └─► AutoHideTimer (arm / cancel)
//!                                          └─► VolumeServiceClient ─► ServiceReply
//! ```
//!
//! # States
//!
//! - **Hidden** (`running = false`)
//! - **Showing** (`running = true, visible = true`)
//! - **Dismissing** (`running = true, visible = false`) until the presentation
//!   reports the fade-out finished

pub mod controller;
pub mod events;
pub mod timer;

pub use controller::SessionController;
pub use events::{SessionEvent, SessionExit, UserAction};
pub use timer::AutoHideTimer;
