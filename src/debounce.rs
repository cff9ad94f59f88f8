//! Cancellable one-shot timer for settling search input.
//!
//! Nothing here runs in the background. The owner calls [`Debouncer::poll`]
//! from its loop; a payload is released once the deadline has passed.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Idle time before a search settles.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

/// Search text must be longer than this (in characters) to be logged.
pub const SEARCH_LOG_MIN_CHARS: usize = 2;

/// Returns true if `text` is long enough to be worth logging.
pub fn should_log_search(text: &str) -> bool {
    text.chars().count() > SEARCH_LOG_MIN_CHARS
}

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock advanced by hand. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[derive(Debug)]
struct Pending<T> {
    due: Instant,
    payload: T,
}

/// A single pending action that is replaced on every schedule.
#[derive(Debug)]
pub struct Debouncer<T, C: Clock> {
    clock: C,
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T, C: Clock> Debouncer<T, C> {
    pub fn new(clock: C, delay: Duration) -> Self {
        Self {
            clock,
            delay,
            pending: None,
        }
    }

    /// Schedules `payload`, replacing anything already pending.
    pub fn schedule(&mut self, payload: T) {
        self.pending = Some(Pending {
            due: self.clock.now() + self.delay,
            payload,
        });
    }

    /// Drops the pending payload, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending payload is due.
    pub fn remaining(&self) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(self.clock.now()))
    }

    /// Releases the payload if its deadline has passed.
    pub fn poll(&mut self) -> Option<T> {
        let due = self.pending.as_ref()?.due;
        if self.clock.now() >= due {
            self.cancel()
        } else {
            None
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
