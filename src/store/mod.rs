//! Overlay state store module
//!
//! Holds the canonical visibility/animation state and the last known volume
//! levels. All writes go through [`OverlayStore::update`], usually via one of
//! the named [`Transition`] commands.
//!
//! # Architecture
//!
//! - `SessionState`: snapshot of overlay visibility, volume levels and the
//!   configured volume type
//! - `Transition`: closed set of commands, each a pure old-state → new-state map
//! - `OverlayStore`: commit-or-reject mutation entrypoint with observer
//!   notification
//!
//! # Event Flow
//!
//! ```text
//! SessionController → Transition → OverlayStore → SessionState → presentation
//! ```

pub mod overlay_store;
pub mod state;
pub mod transition;

pub use overlay_store::{OBSERVER_CAPACITY, OverlayStore};
pub use state::{
    MAX_VOLUME, OverlayPhase, OverlayState, SessionState, TransitionKind, VolumeChannel,
    VolumeState,
};
pub use transition::Transition;
