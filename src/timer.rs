//! Single-owner idle timers
//!
//! Nothing here spawns threads or sleeps. Each helper owns one deadline and
//! the caller drives it by passing the current [`Instant`] and polling.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::trace;

/// A cancellable deadline that fires after a fixed idle period
#[derive(Debug, Clone, PartialEq)]
pub struct IdleTimer {
    idle: Duration,
    deadline: Option<Instant>,
}

impl IdleTimer {
    /// Create a disarmed timer
    pub fn new(idle: Duration) -> Self {
        Self {
            idle,
            deadline: None,
        }
    }

    pub fn idle(&self) -> Duration {
        self.idle
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arm the timer if it is not already armed
    ///
    /// Returns true when this call armed it.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_armed() {
            return false;
        }
        self.reset(now);
        true
    }

    /// Re-arm the timer from `now`, dropping any pending deadline
    pub fn reset(&mut self, now: Instant) {
        self.deadline = Some(now + self.idle);
    }

    /// Disarm the timer; returns whether it was armed
    pub fn stop(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Whether the deadline has passed
    pub fn expired(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }
}

/// Collapses bursts of calls into one
///
/// In trailing mode the arguments of the last call are released once no
/// call arrived for the wait period. In leading (`immediate`) mode the first
/// call of a burst is released right away and the rest are dropped.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    timer: IdleTimer,
    immediate: bool,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    /// Create a trailing-edge debouncer
    pub fn new(wait: Duration) -> Self {
        Self {
            timer: IdleTimer::new(wait),
            immediate: false,
            pending: None,
        }
    }

    /// Create a leading-edge debouncer
    pub fn immediate(wait: Duration) -> Self {
        Self {
            immediate: true,
            ..Self::new(wait)
        }
    }

    /// Register a call; returns arguments that should run now
    ///
    /// A burst whose wait already elapsed is closed first, so in trailing
    /// mode this may release the previous burst's arguments.
    pub fn call(&mut self, now: Instant, args: T) -> Option<T> {
        let released = self.poll(now);
        let call_now = self.immediate && !self.timer.is_armed();
        self.timer.reset(now);

        if call_now {
            return Some(args);
        }
        if !self.immediate {
            self.pending = Some(args);
        }
        released
    }

    /// Release the trailing call once the wait has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if !self.timer.expired(now) {
            return None;
        }
        self.timer.stop();
        self.pending.take()
    }

    /// Drop any pending call
    pub fn cancel(&mut self) {
        self.timer.stop();
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }
}

/// Tracks whether the local user is typing
///
/// `on_start` fires when typing begins, `on_stop` when it ends, either
/// explicitly or after the idle time passes without another keystroke.
pub struct TypingIndicator {
    timer: IdleTimer,
    on_start: Box<dyn FnMut()>,
    on_stop: Box<dyn FnMut()>,
}

impl TypingIndicator {
    pub fn new(
        idle: Duration,
        on_start: impl FnMut() + 'static,
        on_stop: impl FnMut() + 'static,
    ) -> Self {
        Self {
            timer: IdleTimer::new(idle),
            on_start: Box::new(on_start),
            on_stop: Box::new(on_stop),
        }
    }

    /// Record a keystroke
    pub fn start(&mut self, now: Instant) {
        // An idle period that ran out unpolled still ends the previous burst.
        self.poll(now);
        if !self.timer.is_armed() {
            trace!("typing started");
            (self.on_start)();
        }
        self.timer.reset(now);
    }

    /// Stop typing now, if typing
    pub fn stop(&mut self) {
        if self.timer.stop() {
            trace!("typing stopped");
            (self.on_stop)();
        }
    }

    /// Stop typing if the idle time has passed; returns whether it stopped
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.timer.expired(now) {
            self.stop();
            return true;
        }
        false
    }

    pub fn is_typing(&self) -> bool {
        self.timer.is_armed()
    }
}

impl fmt::Debug for TypingIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypingIndicator")
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}
