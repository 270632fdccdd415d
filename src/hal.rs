//! `embedded-hal` PWM adapter
//!
//! Exposes an array of [`SetDutyCycle`] channels (timer compare outputs,
//! LEDC channels, ...) as a [`PwmOutput`]. Channel `i` of the engine drives
//! `channels[i]`.

use embedded_hal::pwm::SetDutyCycle;

#[cfg(feature = "esp32-log")]
use embedded_hal::pwm::Error as _;
#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::PwmOutput;

/// PWM sink backed by `embedded-hal` duty cycle channels
pub struct PwmChannels<P, const C: usize> {
    channels: [P; C],
}

impl<P: SetDutyCycle, const C: usize> PwmChannels<P, C> {
    pub const fn new(channels: [P; C]) -> Self {
        Self { channels }
    }

    /// Get a reference to the underlying channels
    pub fn channels(&self) -> &[P; C] {
        &self.channels
    }

    /// Give back the underlying channels
    pub fn release(self) -> [P; C] {
        self.channels
    }
}

impl<P: SetDutyCycle, const C: usize> PwmOutput for PwmChannels<P, C> {
    fn max_duty(&self, channel: usize) -> u16 {
        self.channels
            .get(channel)
            .map_or(0, SetDutyCycle::max_duty_cycle)
    }

    fn set_duty(&mut self, channel: usize, duty: u16) {
        let Some(output) = self.channels.get_mut(channel) else {
            return;
        };
        // Hardware faults are the driver's business, the engine has no retry
        if let Err(_err) = output.set_duty_cycle(duty) {
            #[cfg(feature = "esp32-log")]
            println!(
                "[PwmChannels.set_duty] channel {} write failed: {:?}",
                channel,
                _err.kind()
            );
        }
    }
}
