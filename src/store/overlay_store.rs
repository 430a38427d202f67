//! Overlay state store
//!
//! Single source of truth for the session. Mutations are applied to a copy and
//! committed only when they succeed; each committed update notifies observers
//! exactly once.

use crate::error::Result;
use crate::store::state::SessionState;
use crate::store::transition::Transition;
use std::sync::mpsc;
use tracing::{debug, warn};

/// Snapshots buffered per observer before new ones are dropped
pub const OBSERVER_CAPACITY: usize = 32;

/// Canonical session state plus its observers
pub struct OverlayStore {
    state: SessionState,
    observers: Vec<mpsc::SyncSender<SessionState>>,
}

impl OverlayStore {
    /// Create a store holding `initial`
    pub fn new(initial: SessionState) -> Self {
        Self {
            state: initial,
            observers: Vec::new(),
        }
    }

    /// Latest committed state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Register an observer; it receives one snapshot per committed update
    ///
    /// An observer that falls `OBSERVER_CAPACITY` snapshots behind misses the
    /// newer ones until it catches up; `state()` always holds the latest.
    pub fn subscribe(&mut self) -> mpsc::Receiver<SessionState> {
        let (tx, rx) = mpsc::sync_channel(OBSERVER_CAPACITY);
        self.observers.push(tx);
        rx
    }

    /// Apply `mutator` to a copy of the state and commit it if it succeeds
    ///
    /// On error nothing is committed and no observer is notified.
    pub fn update<F>(&mut self, mutator: F) -> Result<()>
    where
        F: FnOnce(&mut SessionState) -> Result<()>,
    {
        let mut draft = self.state.clone();
        if let Err(e) = mutator(&mut draft) {
            warn!("State update rejected: {}", e);
            return Err(e);
        }

        self.state = draft;
        self.notify();
        Ok(())
    }

    /// Apply one named transition
    pub fn dispatch(&mut self, transition: Transition) -> Result<()> {
        debug!("Dispatching {:?}", transition);
        self.update(|state| {
            *state = transition.apply(state)?;
            Ok(())
        })
    }

    fn notify(&mut self) {
        let snapshot = &self.state;
        self.observers
            .retain(|observer| match observer.try_send(snapshot.clone()) {
                Ok(()) => true,
                Err(mpsc::TrySendError::Full(_)) => {
                    warn!("State observer lagging; snapshot dropped");
                    true
                }
                Err(mpsc::TrySendError::Disconnected(_)) => {
                    debug!("Dropping disconnected state observer");
                    false
                }
            });
    }
}
