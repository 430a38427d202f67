//! Session controller implementation
//!
//! Reacts to host signals, user actions and audio replies by dispatching
//! transitions into the store, (re)arming the auto-hide timer and issuing or
//! cancelling volume queries.

use crate::config::OverlayConfig;
use crate::host::{HostSignal, WindowControl};
use crate::session::events::{SessionEvent, SessionExit, UserAction};
use crate::session::timer::AutoHideTimer;
use crate::store::{
    OverlayPhase, OverlayStore, SessionState, Transition, TransitionKind, VolumeChannel,
};
use crate::volume::{AudioService, ReplyOutcome, ServiceReply, VolumeServiceClient};
use std::sync::mpsc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Longest the event loop sleeps without checking the reply channel
const IDLE_TICK: Duration = Duration::from_millis(100);

/// Overlay session: owns the store, the auto-hide timer and the volume client
pub struct SessionController {
    store: OverlayStore,
    timer: AutoHideTimer,
    volume: VolumeServiceClient,
    window: Box<dyn WindowControl>,
    /// Display affinity attached to every volume query
    session_id: String,
    /// Distinguishes sessions across reloads in the logs
    instance: Uuid,
    title: String,
    mounted: bool,
    /// Event receiver (taken when the event loop starts)
    event_receiver: Option<mpsc::Receiver<SessionEvent>>,
    /// Audio reply receiver (taken when the event loop starts)
    reply_receiver: Option<mpsc::Receiver<ServiceReply>>,
}

impl SessionController {
    /// Create an unmounted session with hidden, all-zero state
    pub fn new(
        config: &OverlayConfig,
        session_id: impl Into<String>,
        service: Box<dyn AudioService>,
        window: Box<dyn WindowControl>,
        event_receiver: mpsc::Receiver<SessionEvent>,
    ) -> Self {
        let session_id = session_id.into();
        let (reply_tx, reply_rx) = mpsc::channel();

        Self {
            store: OverlayStore::new(SessionState::new(config.volume_type.clone())),
            timer: AutoHideTimer::new(config.auto_hide_delay()),
            volume: VolumeServiceClient::new(service, reply_tx),
            window,
            title: format!("{} - Display {}", config.session_title, session_id),
            session_id,
            instance: Uuid::new_v4(),
            mounted: false,
            event_receiver: Some(event_receiver),
            reply_receiver: Some(reply_rx),
        }
    }

    /// Latest committed state
    pub fn state(&self) -> &SessionState {
        self.store.state()
    }

    /// Register a presentation observer
    pub fn subscribe(&mut self) -> mpsc::Receiver<SessionState> {
        self.store.subscribe()
    }

    /// Auto-hide timer, for inspection
    pub fn timer(&self) -> &AutoHideTimer {
        &self.timer
    }

    /// Volume client, for inspection
    pub fn volume_client(&self) -> &VolumeServiceClient {
        &self.volume
    }

    /// Window title tagged with the display affinity
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Unique id of this session instance
    pub fn instance_id(&self) -> Uuid {
        self.instance
    }

    /// Whether the session reacts to events
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Query the master volume, start listening for host signals and activate the panel
    pub fn mount(&mut self) {
        if self.mounted {
            warn!("Session {} already mounted; mount() call ignored", self.instance);
            return;
        }

        info!("Mounting session {} ({})", self.instance, self.title);
        self.request_master_volume();
        self.mounted = true;
        self.apply(Transition::Mounted);
    }

    /// Cancel the timer and every outstanding volume request
    ///
    /// After this no event, timer fire or reply changes state.
    pub fn unmount(&mut self) {
        self.timer.cancel();
        self.volume.cancel_all();
        if self.mounted {
            self.mounted = false;
            info!("Session {} unmounted", self.instance);
        }
    }

    /// Handle one host signal, user action or presentation notice
    ///
    /// Returns `Some` when the event ends the session.
    pub fn handle_event(&mut self, event: SessionEvent, now: Instant) -> Option<SessionExit> {
        if !self.mounted {
            debug!("Ignoring {:?}: session not mounted", event);
            return None;
        }

        match event {
            SessionEvent::Host(HostSignal::LocaleChanged) => {
                info!("Locale changed, reloading session");
                return Some(SessionExit::Reload);
            }
            SessionEvent::Host(HostSignal::Relaunch) => {
                info!("Relaunch requested, showing volume panel");
                self.request_master_volume();
                self.apply(Transition::Relaunched);
                self.timer.arm(now);
            }
            SessionEvent::User(action) => return self.handle_user_action(action, now),
            SessionEvent::HideCompleted => {
                let overlay = self.state().overlay;
                if overlay.phase() == OverlayPhase::Dismissing
                    && overlay.transition == TransitionKind::Fade
                {
                    self.apply(Transition::HideCompleted);
                } else {
                    debug!("Hide completed outside a dismissal; ignored");
                }
            }
        }

        None
    }

    fn handle_user_action(&mut self, action: UserAction, now: Instant) -> Option<SessionExit> {
        match action {
            UserAction::Show => {
                self.apply(Transition::ShowRequested);
                self.timer.arm(now);
            }
            UserAction::Hide => self.apply(Transition::HideRequested),
            UserAction::AdjustVolume { channel, level } => {
                if let Some(level) = level {
                    self.apply(Transition::VolumeAdjusted { channel, level });
                }
                self.timer.arm(now);
            }
            UserAction::SetMasterVolume(level) => self.apply(Transition::VolumeAdjusted {
                channel: VolumeChannel::Master,
                level,
            }),
            UserAction::EndSession => {
                info!("Session end requested, closing window");
                self.apply(Transition::SessionEnded);
                self.window.close();
                return Some(SessionExit::Closed);
            }
        }

        None
    }

    /// Handle one reply from the audio transport
    pub fn handle_reply(&mut self, reply: ServiceReply) {
        if !self.mounted {
            debug!("Ignoring audio reply after teardown");
            return;
        }

        match self.volume.handle_reply(reply) {
            ReplyOutcome::Volume(level) => {
                info!("Master volume reported: {}", level);
                self.apply(Transition::MasterVolumeReported(level));
            }
            ReplyOutcome::Rejected(_) | ReplyOutcome::Settled | ReplyOutcome::Stale => {}
        }
    }

    /// Fire the auto-hide timer if its deadline has passed
    pub fn tick(&mut self, now: Instant) {
        if !self.timer.poll(now) {
            return;
        }

        if self.state().overlay.visible {
            debug!("Auto-hide timer expired, hiding volume panel");
            self.apply(Transition::AutoHidden);
        } else {
            debug!("Auto-hide timer expired while hidden; nothing to do");
        }
    }

    /// Mount, process events until the session ends, then unmount
    ///
    /// Wakes for incoming events, the auto-hide deadline, or every 100 ms to
    /// drain audio replies.
    pub fn run(&mut self) -> SessionExit {
        use std::sync::mpsc::{RecvTimeoutError, TryRecvError};

        let (Some(event_receiver), Some(reply_receiver)) =
            (self.event_receiver.take(), self.reply_receiver.take())
        else {
            warn!("Session event loop already running; run() call ignored");
            return SessionExit::Disconnected;
        };

        self.mount();

        info!("Entering session event loop");
        let exit = loop {
            let wait = self
                .timer
                .remaining(Instant::now())
                .map_or(IDLE_TICK, |remaining| remaining.min(IDLE_TICK));

            match event_receiver.recv_timeout(wait) {
                Ok(event) => {
                    if let Some(exit) = self.handle_event(event, Instant::now()) {
                        break exit;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("Session event channel disconnected. Exiting event loop.");
                    break SessionExit::Disconnected;
                }
            }

            // Drain audio replies (non-blocking)
            loop {
                match reply_receiver.try_recv() {
                    Ok(reply) => self.handle_reply(reply),
                    Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
                }
            }

            self.tick(Instant::now());
        };

        self.unmount();
        info!("Session event loop exited: {:?}", exit);
        exit
    }

    fn request_master_volume(&mut self) {
        if let Err(e) = self.volume.query_master_volume(&self.session_id) {
            warn!("Master volume query not issued: {}", e);
        }
    }

    fn apply(&mut self, transition: Transition) {
        if let Err(e) = self.store.dispatch(transition) {
            debug!("{:?} not applied: {}", transition, e);
        }
    }
}
