use embassy_time::Duration;
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::channel::{ChannelState, ChannelStore};
use crate::curve::{BreathingCurve, CurveId};
use crate::gamma::correct;
use crate::math8::{scale8, scale_duty};
use crate::{PeriodicTimer, PwmOutput};

/// Tick interval for a 256 Hz update rate
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_micros(1_000_000 / 256);

/// Default breathing period in seconds
pub const DEFAULT_PERIOD: i8 = 6;

/// Duty written instead of zero while a channel breathes
const MIN_BREATHING_DUTY: u16 = 1;

/// Reasons a breathing operation was ignored
///
/// An error always means nothing was changed and nothing was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathingError {
    /// Channel index is outside of the store
    InvalidChannel,
    /// Period is zero or negative
    InvalidPeriod,
    /// Shared engine was used before `init`
    Uninitialized,
    /// Shared engine was re-entered from inside its own `with` closure
    Busy,
}

/// Configuration for the breathing engine
#[derive(Debug, Clone, Copy)]
pub struct BreathingConfig {
    /// Interval between ticks
    pub tick_interval: Duration,
    /// Period assigned to channels on init, clamped to at least 1
    pub default_period: i8,
    /// Curve used by [`BreathingEngine::start`]
    pub default_curve: CurveId,
    /// Brightness ceiling applied before perceptual correction (255 = none)
    pub brightness_limit: u8,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            default_period: DEFAULT_PERIOD,
            default_curve: CurveId::Sine,
            brightness_limit: u8::MAX,
        }
    }
}

/// Breathing Engine - drives `C` PWM channels along breathing curves
///
/// Foreground code calls [`start`](Self::start) and [`stop`](Self::stop);
/// the platform timer calls [`tick`](Self::tick). The engine itself is not
/// synchronized, share it between contexts through
/// [`SharedBreathing`](crate::SharedBreathing).
pub struct BreathingEngine<P: PwmOutput, T: PeriodicTimer, const C: usize> {
    // External dependencies and configuration
    pwm: P,
    timer: T,
    config: BreathingConfig,

    // Internal state
    channels: ChannelStore<C>,
    running: bool,
}

impl<P: PwmOutput, T: PeriodicTimer, const C: usize> BreathingEngine<P, T, C> {
    /// Create a new engine
    ///
    /// Call [`init`](Self::init) before use to put the outputs into a known state.
    pub fn new(pwm: P, timer: T, mut config: BreathingConfig) -> Self {
        config.default_period = config.default_period.max(1);
        Self {
            pwm,
            timer,
            channels: ChannelStore::new(config.default_period, config.default_curve.curve()),
            config,
            running: false,
        }
    }

    /// Reset every channel, stop the timer and turn all outputs off
    pub fn init(&mut self) {
        self.channels
            .reset(self.config.default_period, self.config.default_curve.curve());
        self.timer.cancel_periodic();
        self.running = false;
        for channel in 0..C {
            self.pwm.set_duty(channel, 0);
        }
        #[cfg(feature = "esp32-log")]
        println!("[BreathingEngine.init] {} channels off", C);
    }

    /// Start breathing on a channel with the default curve
    pub fn start(&mut self, channel: usize, period: i8) -> Result<(), BreathingError> {
        self.start_with_curve(channel, period, self.config.default_curve.curve())
    }

    /// Start breathing on a channel
    ///
    /// Restarts the cycle from phase 0 if the channel is already breathing.
    pub fn start_with_curve(
        &mut self,
        channel: usize,
        period: i8,
        curve: &'static BreathingCurve,
    ) -> Result<(), BreathingError> {
        if period <= 0 {
            return Err(BreathingError::InvalidPeriod);
        }
        let state = self
            .channels
            .get_mut(channel)
            .ok_or(BreathingError::InvalidChannel)?;
        state.restart(period, curve);
        #[cfg(feature = "esp32-log")]
        println!(
            "[BreathingEngine.start] channel {} period {} curve {}",
            channel,
            period,
            curve.id().as_str()
        );

        if !self.running {
            self.timer.schedule_periodic(self.config.tick_interval);
            self.running = true;
        }
        Ok(())
    }

    /// Stop breathing on a channel and turn its output off
    ///
    /// Stops the timer once no channel is breathing.
    pub fn stop(&mut self, channel: usize) -> Result<(), BreathingError> {
        let state = self
            .channels
            .get_mut(channel)
            .ok_or(BreathingError::InvalidChannel)?;
        state.deactivate();
        self.pwm.set_duty(channel, 0);
        #[cfg(feature = "esp32-log")]
        println!("[BreathingEngine.stop] channel {} off", channel);

        if !self.channels.any_active() {
            self.timer.cancel_periodic();
            self.running = false;
        }
        Ok(())
    }

    /// Check if the periodic timer is scheduled
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Advance every breathing channel by one tick and write its duty
    ///
    /// Runs in the timer's interrupt context: it never blocks, allocates
    /// or logs, and its cost is bounded by `C`.
    pub fn tick(&mut self) {
        let limit = self.config.brightness_limit;
        for (channel, state) in self.channels.iter_mut().enumerate() {
            if !state.is_active() {
                continue;
            }
            let raw = state.advance();
            let duty = breathing_duty(raw, limit, self.pwm.max_duty(channel));
            self.pwm.set_duty(channel, duty);
        }
    }

    /// Change the brightness ceiling, effective from the next tick
    pub fn set_brightness_limit(&mut self, limit: u8) {
        self.config.brightness_limit = limit;
    }

    /// Get the state of a channel
    pub fn channel(&self, index: usize) -> Option<&ChannelState> {
        self.channels.get(index)
    }

    /// Get all channel records
    pub const fn channels(&self) -> &ChannelStore<C> {
        &self.channels
    }

    /// Indices of the breathing channels
    pub fn active_channels(&self) -> Vec<usize, C> {
        self.channels.active_indices()
    }

    pub const fn config(&self) -> &BreathingConfig {
        &self.config
    }

    /// Get a reference to the PWM sink
    pub const fn pwm(&self) -> &P {
        &self.pwm
    }

    /// Get a mutable reference to the PWM sink
    pub fn pwm_mut(&mut self) -> &mut P {
        &mut self.pwm
    }

    /// Get a reference to the timer
    pub const fn timer(&self) -> &T {
        &self.timer
    }

    /// Get a mutable reference to the timer
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

/// Map a curve sample to a PWM duty in `1..=max_duty`
fn breathing_duty(raw: u8, limit: u8, max_duty: u16) -> u16 {
    let corrected = correct(scale8(raw, limit));
    let duty = scale_duty(corrected, max_duty);
    // Never blink fully off at the bottom of the curve
    if duty == 0 {
        MIN_BREATHING_DUTY.min(max_duty)
    } else {
        duty
    }
}
