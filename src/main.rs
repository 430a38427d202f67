//! `volume-overlay` - headless driver for the volume overlay session
//!
//! Reads host signals and user actions from stdin, one command per line:
//! `show`, `hide`, `adjust [level]`, `set <level>`, `relaunch`, `locale`, `end`.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::io::BufRead;
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};
use volume_overlay::{
    config::{ConfigManager, OverlayConfig},
    host::{self, HostSignal, LoggingWindow},
    session::{SessionController, SessionEvent, SessionExit, UserAction},
    store::{OverlayPhase, SessionState, TransitionKind, VolumeChannel},
    utils,
    volume::FixedVolumeService,
};

/// Simulated latency of the audio subsystem
const SERVICE_LATENCY: Duration = Duration::from_millis(50);

/// Simulated duration of the fade-out animation
const FADE_DURATION: Duration = Duration::from_millis(300);

/// Where stdin commands are delivered; swapped for every new session
#[derive(Default)]
struct EventSink {
    sender: Option<mpsc::Sender<SessionEvent>>,
    input_closed: bool,
}

impl EventSink {
    /// Route commands to a new session; refused once stdin has closed
    fn attach(&mut self, sender: mpsc::Sender<SessionEvent>) -> bool {
        if self.input_closed {
            return false;
        }
        self.sender = Some(sender);
        true
    }

    /// Stdin reached EOF: drop the active sender so the session sees a disconnect
    fn close_input(&mut self) {
        self.input_closed = true;
        self.sender = None;
    }

    fn send(&self, event: SessionEvent) {
        match &self.sender {
            Some(sender) => {
                if sender.send(event).is_err() {
                    debug!("Session gone; {:?} dropped", event);
                }
            }
            None => debug!("No active session; {:?} dropped", event),
        }
    }
}

fn main() -> Result<()> {
    let config = ConfigManager::load().context("Failed to load overlay configuration")?;
    utils::init_logging(&ConfigManager::get_config_dir(), config.log_history)
        .context("Failed to initialize logging system")?;

    let display_id = host::display_affinity();
    info!(
        "Configuration loaded: volume type '{}', auto-hide after {:?}, display {}",
        config.volume_type,
        config.auto_hide_delay(),
        display_id
    );

    let sink = Arc::new(Mutex::new(EventSink::default()));
    spawn_input_reader(Arc::clone(&sink)).context("Failed to start stdin reader")?;

    loop {
        let exit = run_session(&config, &display_id, &sink)?;
        match exit {
            SessionExit::Reload if !sink.lock().input_closed => {
                info!("Reloading overlay session");
            }
            SessionExit::Reload => {
                info!("Input closed; not reloading");
                break;
            }
            SessionExit::Closed | SessionExit::Disconnected => break,
        }
    }

    info!("volume-overlay shutting down");
    Ok(())
}

/// Build a fresh session wired to the shared sink and run it to completion
///
/// Returns `Disconnected` without starting a session when stdin already closed.
fn run_session(
    config: &OverlayConfig,
    display_id: &str,
    sink: &Arc<Mutex<EventSink>>,
) -> Result<SessionExit> {
    let (event_tx, event_rx) = mpsc::channel();
    if !sink.lock().attach(event_tx) {
        info!("Input closed before the session started");
        return Ok(SessionExit::Disconnected);
    }

    let mut session = SessionController::new(
        config,
        display_id,
        Box::new(FixedVolumeService::new(
            config.demo_master_volume,
            SERVICE_LATENCY,
        )),
        Box::new(LoggingWindow),
        event_rx,
    );
    info!("Session {} created: {}", session.instance_id(), session.title());

    let snapshots = session.subscribe();
    spawn_presentation(snapshots, Arc::clone(sink)).context("Failed to start presentation")?;

    let exit = session.run();
    sink.lock().sender = None;
    Ok(exit)
}

/// Stand-in for the rendering layer: logs snapshots and reports finished fade-outs
fn spawn_presentation(
    snapshots: mpsc::Receiver<SessionState>,
    sink: Arc<Mutex<EventSink>>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("presentation".to_string())
        .spawn(move || {
            for state in snapshots {
                info!(
                    "Overlay {:?} ({:?}), master volume {}",
                    state.overlay.phase(),
                    state.overlay.transition,
                    state.volume.master
                );
                if state.overlay.phase() == OverlayPhase::Dismissing
                    && state.overlay.transition == TransitionKind::Fade
                {
                    thread::sleep(FADE_DURATION);
                    sink.lock().send(SessionEvent::HideCompleted);
                }
            }
            debug!("Presentation stopped: session store dropped");
        })
}

fn spawn_input_reader(sink: Arc<Mutex<EventSink>>) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        break;
                    }
                };
                match parse_command(&line) {
                    Some(event) => sink.lock().send(event),
                    None if line.trim().is_empty() => {}
                    None => warn!("Unknown command: {}", line.trim()),
                }
            }

            sink.lock().close_input();
            info!("stdin closed");
        })
}

fn parse_command(line: &str) -> Option<SessionEvent> {
    let mut words = line.split_whitespace();
    let event = match words.next()? {
        "show" => UserAction::Show.into(),
        "hide" => UserAction::Hide.into(),
        "adjust" => UserAction::AdjustVolume {
            channel: VolumeChannel::Master,
            level: words.next().and_then(|level| level.parse().ok()),
        }
        .into(),
        "set" => UserAction::SetMasterVolume(words.next()?.parse().ok()?).into(),
        "end" => UserAction::EndSession.into(),
        "relaunch" => HostSignal::Relaunch.into(),
        "locale" => HostSignal::LocaleChanged.into(),
        _ => return None,
    };
    Some(event)
}
