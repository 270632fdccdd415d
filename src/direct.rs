//! Direct duty control
//!
//! Fixed-duty writes that bypass the breathing curve. Only
//! [`set_off`](BreathingEngine::set_off) cancels breathing on the channel;
//! a breathing channel overwrites the other writes on its next tick.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::engine::{BreathingEngine, BreathingError};
use crate::math8::percent_to_duty;
use crate::{PeriodicTimer, PwmOutput};

impl<P: PwmOutput, T: PeriodicTimer, const C: usize> BreathingEngine<P, T, C> {
    /// Drive a channel fully on
    pub fn set_full(&mut self, channel: usize) -> Result<(), BreathingError> {
        self.write_direct(channel, |max| max)
    }

    /// Drive a channel at a fixed percentage (0-100) of its maximum duty
    pub fn set_percent(&mut self, channel: usize, percent: u8) -> Result<(), BreathingError> {
        self.write_direct(channel, |max| percent_to_duty(percent, max))
    }

    /// Turn a channel off and cancel any breathing on it
    pub fn set_off(&mut self, channel: usize) -> Result<(), BreathingError> {
        self.stop(channel)
    }

    fn write_direct(
        &mut self,
        channel: usize,
        duty: impl FnOnce(u16) -> u16,
    ) -> Result<(), BreathingError> {
        if channel >= C {
            return Err(BreathingError::InvalidChannel);
        }
        let duty = duty(self.pwm().max_duty(channel));
        #[cfg(feature = "esp32-log")]
        println!("[BreathingEngine.write_direct] channel {} duty {}", channel, duty);
        self.pwm_mut().set_duty(channel, duty);
        Ok(())
    }
}
