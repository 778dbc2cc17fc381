//! Trailing-edge throttle for high-frequency input such as scroll events.
//!
//! Time is passed in explicitly so the state machine can be driven from an
//! event loop and from tests alike.

use std::time::{Duration, Instant};

/// Collapses bursts of calls into at most one run per `delay`.
///
/// A call runs immediately when at least `delay` has elapsed since the last
/// run. Otherwise it replaces any pending call and is deferred until the
/// remainder of the window has passed, so the final state of a burst is
/// never dropped.
#[derive(Clone, Debug)]
pub struct TrailingThrottle<T> {
    delay: Duration,
    last_run_at: Option<Instant>,
    pending: Option<T>,
    deadline: Option<Instant>,
}

impl<T> TrailingThrottle<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_run_at: None,
            pending: None,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Submit a call made at `now`.
    ///
    /// # Returns
    /// `Some(args)` when the call should run right away, `None` when it was
    /// deferred (see [`Self::poll`]).
    pub fn submit(&mut self, args: T, now: Instant) -> Option<T> {
        self.pending = None;
        self.deadline = None;
        let elapsed = self
            .last_run_at
            .map(|last| now.saturating_duration_since(last));
        match elapsed {
            Some(elapsed) if elapsed < self.delay => {
                self.pending = Some(args);
                self.deadline = Some(now + (self.delay - elapsed));
                None
            }
            _ => {
                self.last_run_at = Some(now);
                Some(args)
            }
        }
    }

    /// Release the deferred call once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        self.last_run_at = Some(deadline);
        self.pending.take()
    }

    /// Release the deferred call regardless of its deadline.
    pub fn flush(&mut self, now: Instant) -> Option<T> {
        self.deadline = None;
        let pending = self.pending.take();
        if pending.is_some() {
            self.last_run_at = Some(now);
        }
        pending
    }

    /// Deferred call, if any.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// When the deferred call becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
