//! Overlay and volume state records
//!
//! Plain data: every change goes through [`crate::store::Transition`] and the
//! [`crate::store::OverlayStore`] mutation entrypoint.

use serde::{Deserialize, Serialize};

/// Highest level any volume channel can hold
pub const MAX_VOLUME: u8 = 100;

/// Animation used for the next visibility change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    /// Panel slides in or out (user show, relaunch, end of session)
    #[default]
    Slide,
    /// Panel fades out (any hide)
    Fade,
}

/// Externally observable phase of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    /// Panel subtree is not mounted
    Hidden,
    /// Panel is on screen
    Showing,
    /// Panel is mounted but fading out
    Dismissing,
}

/// Visibility and animation state of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverlayState {
    /// Whether the volume panel is on screen
    pub visible: bool,
    /// Animation for the next visibility change
    pub transition: TransitionKind,
    /// Whether the panel subtree is mounted at all
    pub running: bool,
}

impl OverlayState {
    /// Phase derived from `running` and `visible`
    pub fn phase(&self) -> OverlayPhase {
        match (self.running, self.visible) {
            (false, _) => OverlayPhase::Hidden,
            (true, true) => OverlayPhase::Showing,
            (true, false) => OverlayPhase::Dismissing,
        }
    }

    /// `visible` implies `running`
    pub fn is_consistent(&self) -> bool {
        !self.visible || self.running
    }
}

/// Volume channels tracked by the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VolumeChannel {
    /// Main output level
    Master,
    /// Media playback level
    Media,
    /// Bluetooth sink level
    Bluetooth,
    /// UI sound effect level
    SoundEffect,
}

/// Last known level per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeState {
    /// Master level
    pub master: u8,
    /// Media level
    pub media: u8,
    /// Bluetooth level
    pub bluetooth: u8,
    /// Sound effect level
    pub sound_effect: u8,
}

impl VolumeState {
    /// Level for a channel
    pub fn level(&self, channel: VolumeChannel) -> u8 {
        match channel {
            VolumeChannel::Master => self.master,
            VolumeChannel::Media => self.media,
            VolumeChannel::Bluetooth => self.bluetooth,
            VolumeChannel::SoundEffect => self.sound_effect,
        }
    }

    pub(crate) fn level_mut(&mut self, channel: VolumeChannel) -> &mut u8 {
        match channel {
            VolumeChannel::Master => &mut self.master,
            VolumeChannel::Media => &mut self.media,
            VolumeChannel::Bluetooth => &mut self.bluetooth,
            VolumeChannel::SoundEffect => &mut self.sound_effect,
        }
    }
}

/// Full session state, delivered to observers as a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// Panel visibility
    pub overlay: OverlayState,
    /// Channel levels
    pub volume: VolumeState,
    /// Volume-type classification from configuration, verbatim
    pub volume_type: String,
}

impl SessionState {
    /// Hidden, all-zero state carrying the configured volume type
    pub fn new(volume_type: impl Into<String>) -> Self {
        Self {
            volume_type: volume_type.into(),
            ..Self::default()
        }
    }
}
