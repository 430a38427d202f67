//! Named state transitions
//!
//! Every change to [`SessionState`] is one of these commands. `apply` is pure:
//! it maps the old state to a new one, or rejects the command without touching
//! anything.

use crate::error::{OverlayError, Result};
use crate::store::state::{MAX_VOLUME, SessionState, TransitionKind, VolumeChannel};

/// Closed set of state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Session mounted: panel subtree becomes active
    Mounted,
    /// User asked for the panel
    ShowRequested,
    /// Host relaunched the overlay; forced show
    Relaunched,
    /// User dismissed the panel
    HideRequested,
    /// Inactivity timer expired
    AutoHidden,
    /// User ended the session with the hide button
    SessionEnded,
    /// Presentation finished its fade-out
    HideCompleted,
    /// Audio subsystem reported the master level
    MasterVolumeReported(u8),
    /// User moved a channel slider
    VolumeAdjusted {
        /// Channel that moved
        channel: VolumeChannel,
        /// New level
        level: u8,
    },
}

impl Transition {
    /// Compute the state after this transition
    pub fn apply(self, state: &SessionState) -> Result<SessionState> {
        let mut next = state.clone();
        let overlay = &mut next.overlay;

        match self {
            Self::Mounted => overlay.running = true,
            Self::ShowRequested | Self::Relaunched => {
                overlay.running = true;
                overlay.transition = TransitionKind::Slide;
                overlay.visible = true;
            }
            Self::HideRequested | Self::AutoHidden => {
                overlay.transition = TransitionKind::Fade;
                overlay.visible = false;
            }
            Self::SessionEnded => {
                overlay.transition = TransitionKind::Slide;
                overlay.running = false;
                overlay.visible = false;
            }
            Self::HideCompleted => {
                if !overlay.visible {
                    overlay.running = false;
                }
            }
            Self::MasterVolumeReported(level) => {
                next.volume.master = checked_level(level)?;
            }
            Self::VolumeAdjusted { channel, level } => {
                *next.volume.level_mut(channel) = checked_level(level)?;
            }
        }

        if !next.overlay.is_consistent() {
            return Err(OverlayError::StateRejected(format!(
                "{self:?} would leave the panel visible while not running"
            )));
        }

        Ok(next)
    }
}

fn checked_level(level: u8) -> Result<u8> {
    if level > MAX_VOLUME {
        return Err(OverlayError::StateRejected(format!(
            "volume level {level} exceeds {MAX_VOLUME}"
        )));
    }
    Ok(level)
}
