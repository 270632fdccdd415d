//! Polled periodic timer
//!
//! A [`PeriodicTimer`] for super-loop firmware and host builds that have no
//! hardware timer to spare. The caller polls it with the current time and
//! sleeps for the returned duration between polls.

use embassy_time::{Duration, Instant};

use crate::engine::{BreathingEngine, DEFAULT_TICK_INTERVAL};
use crate::shared::SharedBreathing;
use crate::{PeriodicTimer, PwmOutput};

/// Result of a timer poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollResult {
    /// Whether a period elapsed and the tick should run
    pub fired: bool,
    /// How long to wait until the next poll (zero if behind schedule)
    pub sleep_duration: Duration,
}

impl PollResult {
    const fn idle(sleep_duration: Duration) -> Self {
        Self {
            fired: false,
            sleep_duration,
        }
    }
}

/// Software periodic timer with drift correction
///
/// ```ignore
/// let mut engine = BreathingEngine::<_, _, 4>::new(pwm, SoftTimer::new(), config);
/// engine.init();
/// engine.start(0, 6)?;
///
/// loop {
///     let result = engine.poll(Instant::now());
///     sleep_us(result.sleep_duration.as_micros());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SoftTimer {
    interval: Duration,
    next_deadline: Option<Instant>,
    armed: bool,
}

impl Default for SoftTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftTimer {
    pub const fn new() -> Self {
        Self {
            interval: DEFAULT_TICK_INTERVAL,
            next_deadline: None,
            armed: false,
        }
    }

    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Check whether a period elapsed at `now`
    ///
    /// The first poll after arming starts the schedule, so the first period
    /// fires one interval later. Fires at most once per call; if the caller
    /// has fallen more than two intervals behind, the backlog is dropped
    /// instead of replayed.
    pub fn poll(&mut self, now: Instant) -> PollResult {
        if !self.armed {
            return PollResult::idle(self.interval);
        }
        let Some(deadline) = self.next_deadline else {
            self.next_deadline = Some(now + self.interval);
            return PollResult::idle(self.interval);
        };
        if now < deadline {
            return PollResult::idle(deadline.saturating_duration_since(now));
        }

        let max_drift = self.interval * 2;
        let mut next = if now > deadline + max_drift {
            now
        } else {
            deadline
        };
        next += self.interval;
        self.next_deadline = Some(next);

        PollResult {
            fired: true,
            sleep_duration: next.saturating_duration_since(now),
        }
    }
}

impl PeriodicTimer for SoftTimer {
    fn schedule_periodic(&mut self, interval: Duration) {
        self.interval = interval;
        self.next_deadline = None;
        self.armed = true;
    }

    fn cancel_periodic(&mut self) {
        self.next_deadline = None;
        self.armed = false;
    }
}

impl<P: PwmOutput, const C: usize> BreathingEngine<P, SoftTimer, C> {
    /// Poll the software timer and run a tick if it fired
    pub fn poll(&mut self, now: Instant) -> PollResult {
        let result = self.timer_mut().poll(now);
        if result.fired {
            self.tick();
        }
        result
    }
}

impl<P: PwmOutput, const C: usize> SharedBreathing<P, SoftTimer, C> {
    /// Poll the software timer and run a tick if it fired
    ///
    /// Returns `None` before `init`.
    pub fn poll(&self, now: Instant) -> Option<PollResult> {
        self.with(|engine| engine.poll(now))
    }
}
