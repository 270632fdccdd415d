//! Interrupt-safe engine handle
//!
//! Wraps a [`BreathingEngine`] in a `critical-section` mutex so foreground
//! code and the timer interrupt can share it, typically as a `static`.
//! Every operation runs inside one short critical section, so the tick never
//! observes a half-applied `start` or `stop` and PWM register writes from
//! both contexts never interleave.
//!
//! ```ignore
//! static BREATHING: SharedBreathing<Leds, HwTimer, 4> = SharedBreathing::new();
//!
//! #[interrupt]
//! fn TIM2() {
//!     BREATHING.tick();
//! }
//! ```

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Vec;

use crate::curve::BreathingCurve;
use crate::engine::{BreathingConfig, BreathingEngine, BreathingError};
use crate::{PeriodicTimer, PwmOutput};

/// Shared, lazily initialized breathing engine
pub struct SharedBreathing<P: PwmOutput, T: PeriodicTimer, const C: usize> {
    inner: Mutex<RefCell<Option<BreathingEngine<P, T, C>>>>,
}

impl<P: PwmOutput, T: PeriodicTimer, const C: usize> Default for SharedBreathing<P, T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PwmOutput, T: PeriodicTimer, const C: usize> SharedBreathing<P, T, C> {
    /// Create an empty handle
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Build the engine and put every output into its initial off state
    ///
    /// Calling it again replaces the previous engine. Fails with
    /// [`BreathingError::Busy`] when called from inside [`with`](Self::with).
    pub fn init(&self, pwm: P, timer: T, config: BreathingConfig) -> Result<(), BreathingError> {
        critical_section::with(|cs| {
            let mut slot = self
                .inner
                .borrow(cs)
                .try_borrow_mut()
                .map_err(|_| BreathingError::Busy)?;
            if let Some(previous) = slot.as_mut() {
                previous.timer_mut().cancel_periodic();
            }
            let engine = slot.insert(BreathingEngine::new(pwm, timer, config));
            engine.init();
            Ok(())
        })
    }

    /// Run `f` on the engine inside a critical section
    ///
    /// Returns `None` before `init`, and when called re-entrantly from inside
    /// another `f` on the same handle. Keep `f` short, interrupts are masked
    /// while it runs.
    pub fn with<R>(&self, f: impl FnOnce(&mut BreathingEngine<P, T, C>) -> R) -> Option<R> {
        self.access(f).ok()
    }

    fn access<R>(
        &self,
        f: impl FnOnce(&mut BreathingEngine<P, T, C>) -> R,
    ) -> Result<R, BreathingError> {
        critical_section::with(|cs| {
            let mut slot = self
                .inner
                .borrow(cs)
                .try_borrow_mut()
                .map_err(|_| BreathingError::Busy)?;
            slot.as_mut().map(f).ok_or(BreathingError::Uninitialized)
        })
    }

    fn try_with(
        &self,
        f: impl FnOnce(&mut BreathingEngine<P, T, C>) -> Result<(), BreathingError>,
    ) -> Result<(), BreathingError> {
        self.access(f)?
    }

    pub fn start(&self, channel: usize, period: i8) -> Result<(), BreathingError> {
        self.try_with(|engine| engine.start(channel, period))
    }

    pub fn start_with_curve(
        &self,
        channel: usize,
        period: i8,
        curve: &'static BreathingCurve,
    ) -> Result<(), BreathingError> {
        self.try_with(|engine| engine.start_with_curve(channel, period, curve))
    }

    pub fn stop(&self, channel: usize) -> Result<(), BreathingError> {
        self.try_with(|engine| engine.stop(channel))
    }

    pub fn is_running(&self) -> bool {
        self.with(|engine| engine.is_running()).unwrap_or(false)
    }

    /// Timer callback entry point, safe to call from interrupt context
    pub fn tick(&self) {
        self.with(BreathingEngine::tick);
    }

    pub fn set_full(&self, channel: usize) -> Result<(), BreathingError> {
        self.try_with(|engine| engine.set_full(channel))
    }

    pub fn set_percent(&self, channel: usize, percent: u8) -> Result<(), BreathingError> {
        self.try_with(|engine| engine.set_percent(channel, percent))
    }

    pub fn set_off(&self, channel: usize) -> Result<(), BreathingError> {
        self.try_with(|engine| engine.set_off(channel))
    }

    pub fn set_brightness_limit(&self, limit: u8) -> Result<(), BreathingError> {
        self.try_with(|engine| {
            engine.set_brightness_limit(limit);
            Ok(())
        })
    }

    /// Snapshot of the breathing channel indices
    pub fn active_channels(&self) -> Vec<usize, C> {
        self.with(|engine| engine.active_channels())
            .unwrap_or_default()
    }
}
