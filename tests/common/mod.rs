#![allow(dead_code)]

use myrtio_breathing::{Duration, PeriodicTimer, PwmOutput};

/// PWM sink that records every write
#[derive(Debug, Default)]
pub struct RecordingPwm {
    pub max: u16,
    pub writes: Vec<(usize, u16)>,
}

impl RecordingPwm {
    pub fn new(max: u16) -> Self {
        Self {
            max,
            writes: Vec::new(),
        }
    }

    /// Drain the recorded writes
    pub fn take(&mut self) -> Vec<(usize, u16)> {
        core::mem::take(&mut self.writes)
    }

    /// Last duty written to `channel`
    pub fn last(&self, channel: usize) -> Option<u16> {
        self.writes
            .iter()
            .rev()
            .find(|(ch, _)| *ch == channel)
            .map(|(_, duty)| *duty)
    }
}

impl PwmOutput for RecordingPwm {
    fn max_duty(&self, _channel: usize) -> u16 {
        self.max
    }

    fn set_duty(&mut self, channel: usize, duty: u16) {
        self.writes.push((channel, duty));
    }
}

/// Timer that counts schedule and cancel calls
#[derive(Debug, Default)]
pub struct CountingTimer {
    pub armed: bool,
    pub interval: Option<Duration>,
    pub schedules: usize,
    pub cancels: usize,
}

impl PeriodicTimer for CountingTimer {
    fn schedule_periodic(&mut self, interval: Duration) {
        self.armed = true;
        self.interval = Some(interval);
        self.schedules += 1;
    }

    fn cancel_periodic(&mut self) {
        self.armed = false;
        self.cancels += 1;
    }
}
