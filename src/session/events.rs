//! Events consumed by the session event loop

use crate::host::HostSignal;
use crate::store::VolumeChannel;

/// Entry points invoked by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// Open the volume panel
    Show,
    /// Dismiss the panel (tap outside)
    Hide,
    /// User is interacting with a slider; keeps the panel alive
    AdjustVolume {
        /// Channel being adjusted
        channel: VolumeChannel,
        /// New level, when the slider reports one
        level: Option<u8>,
    },
    /// Explicit master level from the presentation layer
    SetMasterVolume(u8),
    /// Hide button: end the session and close the window
    EndSession,
}

/// Input of the session event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Host lifecycle signal
    Host(HostSignal),
    /// User interaction
    User(UserAction),
    /// Presentation finished the fade-out animation
    HideCompleted,
}

impl From<HostSignal> for SessionEvent {
    fn from(signal: HostSignal) -> Self {
        Self::Host(signal)
    }
}

impl From<UserAction> for SessionEvent {
    fn from(action: UserAction) -> Self {
        Self::User(action)
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    /// Host asked for a full reload; start a fresh session
    Reload,
    /// User ended the session and the window was closed
    Closed,
    /// Event source went away
    Disconnected,
}
