#![no_std]

pub mod channel;
pub mod curve;
pub mod direct;
pub mod engine;
pub mod gamma;
pub mod hal;
pub mod math8;
pub mod shared;
pub mod soft_timer;

pub use channel::{ChannelState, ChannelStore, curve_index};
pub use curve::{BREATHING_STEPS, BreathingCurve, CurveId, TABLE_BASE};
pub use engine::{BreathingConfig, BreathingEngine, BreathingError, DEFAULT_TICK_INTERVAL};
pub use gamma::{CIE_LUT, correct};
pub use hal::PwmChannels;
pub use shared::SharedBreathing;
pub use soft_timer::{PollResult, SoftTimer};

pub use embassy_time::{Duration, Instant};

/// Abstract PWM sink
///
/// Implement this trait to drive the duty cycle of the platform's PWM
/// peripheral. Writes must be safe from the tick (interrupt) context.
pub trait PwmOutput {
    /// Maximum duty value for the channel (fully on)
    fn max_duty(&self, channel: usize) -> u16;

    /// Write a raw duty value to the channel
    fn set_duty(&mut self, channel: usize, duty: u16);
}

/// Periodic callback source
///
/// The platform routes each timer period to [`BreathingEngine::tick`]
/// (usually through [`SharedBreathing::tick`] from the timer interrupt).
pub trait PeriodicTimer {
    /// Arm the timer to fire every `interval`
    fn schedule_periodic(&mut self, interval: Duration);

    /// Disarm the timer. Must be a no-op when it is not armed.
    fn cancel_periodic(&mut self);
}
