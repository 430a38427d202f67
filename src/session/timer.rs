//! Auto-hide timer
//!
//! Single-slot resettable deadline. The session event loop polls it with the
//! current time; each arm fires at most once and a rearm fully replaces the
//! previous deadline.

use std::time::{Duration, Instant};
use tracing::trace;

#[derive(Debug, Clone, Copy)]
struct ArmedDeadline {
    generation: u64,
    deadline: Instant,
}

/// Resettable inactivity timer owned by the session controller
#[derive(Debug)]
pub struct AutoHideTimer {
    delay: Duration,
    armed: Option<ArmedDeadline>,
    generation: u64,
}

impl AutoHideTimer {
    /// Create an unarmed timer that fires `delay` after each arm
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            armed: None,
            generation: 0,
        }
    }

    /// Configured quiet period
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule a fire at `now + delay`, superseding any pending arm
    pub fn arm(&mut self, now: Instant) {
        self.generation = self.generation.wrapping_add(1);
        let deadline = now + self.delay;
        if let Some(previous) = self.armed.replace(ArmedDeadline {
            generation: self.generation,
            deadline,
        }) {
            trace!(
                "Auto-hide timer rearmed (generation {} superseded by {})",
                previous.generation, self.generation
            );
        }
    }

    /// Drop any pending arm; safe to call when nothing is armed
    pub fn cancel(&mut self) {
        if self.armed.take().is_some() {
            trace!("Auto-hide timer cancelled");
        }
    }

    /// Whether a fire is pending
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Pending deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.armed.map(|armed| armed.deadline)
    }

    /// Time left until the pending deadline, zero if already due
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Consume the pending arm if its deadline has passed
    ///
    /// Returns `true` at most once per arm.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.armed {
            Some(armed) if now >= armed.deadline => {
                self.armed = None;
                trace!("Auto-hide timer fired (generation {})", armed.generation);
                true
            }
            _ => false,
        }
    }
}
