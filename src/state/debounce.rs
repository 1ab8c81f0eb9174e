//! Cancelable deferred action.
//!
//! Time is passed in by the caller, so the timer is a plain value that the
//! event loop polls with [`Debounce::fire`].

use std::time::{Duration, Instant};

/// Debounce delay used by the admin search box.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Single-slot debounce timer carrying a payload.
///
/// Arming replaces any pending payload, so only the last event inside the
/// window is delivered. A canceled timer never fires.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    deadline: Instant,
    payload: T,
}

impl<T> Debounce<T> {
    /// Create an idle timer with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// (Re)start the timer. Any previously pending payload is discarded.
    pub fn arm(&mut self, payload: T, now: Instant) {
        self.pending = Some(Pending {
            deadline: now + self.delay,
            payload,
        });
    }

    /// Drop the pending payload, if any. Returns whether something was canceled.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Whether a payload is waiting.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending payload becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Time left until the deadline, saturating at zero.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline().map(|d| d.saturating_duration_since(now))
    }

    /// Take the payload if its deadline has passed.
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.pending.take().map(|p| p.payload),
            _ => None,
        }
    }
}

impl<T> Default for Debounce<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
