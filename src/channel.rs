//! Per-channel breathing state
//!
//! A fixed-capacity store of channel records addressed by index. Lookups
//! return `None` for out-of-range indices instead of panicking, so callers
//! can forward untrusted channel numbers.

use heapless::Vec;

use crate::curve::{BREATHING_STEPS, BreathingCurve, TABLE_BASE};

/// Length of one breathing cycle in ticks, `None` for a non-positive period
#[inline]
#[allow(clippy::cast_sign_loss)]
const fn cycle_ticks(period: i8) -> Option<u32> {
    if period <= 0 {
        return None;
    }
    Some(period as u32 * TABLE_BASE)
}

/// Curve index for a phase within a cycle of `period` units
///
/// Returns `None` if `period` is zero or negative.
#[inline]
pub const fn curve_index(phase: u16, period: i8) -> Option<usize> {
    let Some(cycle) = cycle_ticks(period) else {
        return None;
    };
    let interval = cycle / BREATHING_STEPS as u32;
    Some((phase as u32 / interval) as usize % BREATHING_STEPS)
}

/// State of a single breathing channel
#[derive(Debug, Clone, Copy)]
pub struct ChannelState {
    active: bool,
    period: i8,
    phase: u16,
    curve: &'static BreathingCurve,
}

impl ChannelState {
    /// Create an inactive channel
    pub const fn new(period: i8, curve: &'static BreathingCurve) -> Self {
        Self {
            active: false,
            period,
            phase: 0,
            curve,
        }
    }

    /// Check if the channel is breathing
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Breathing period in seconds
    pub const fn period(&self) -> i8 {
        self.period
    }

    /// Position within the current cycle in ticks
    pub const fn phase(&self) -> u16 {
        self.phase
    }

    /// Curve driving this channel
    pub const fn curve(&self) -> &'static BreathingCurve {
        self.curve
    }

    /// Activate with new parameters and rewind to the start of the cycle
    ///
    /// `period` must be positive.
    pub(crate) fn restart(&mut self, period: i8, curve: &'static BreathingCurve) {
        self.active = true;
        self.period = period;
        self.phase = 0;
        self.curve = curve;
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }

    /// Step one tick forward and return the curve sample for the new phase
    ///
    /// A channel with a non-positive period stays at phase 0.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn advance(&mut self) -> u8 {
        let Some(cycle) = cycle_ticks(self.period) else {
            self.phase = 0;
            return self.curve.sample(0);
        };
        // 127 * 256 fits in u16, so the phase never truncates
        self.phase = ((u32::from(self.phase) + 1) % cycle) as u16;
        self.curve.sample(curve_index(self.phase, self.period).unwrap_or(0))
    }
}

/// Fixed-size array of channel records
#[derive(Debug, Clone)]
pub struct ChannelStore<const C: usize> {
    channels: [ChannelState; C],
}

impl<const C: usize> ChannelStore<C> {
    /// Create a store with every channel inactive
    pub const fn new(period: i8, curve: &'static BreathingCurve) -> Self {
        Self {
            channels: [ChannelState::new(period, curve); C],
        }
    }

    /// Reset every channel to an inactive default record
    pub fn reset(&mut self, period: i8, curve: &'static BreathingCurve) {
        self.channels = [ChannelState::new(period, curve); C];
    }

    pub const fn capacity(&self) -> usize {
        C
    }

    pub fn get(&self, index: usize) -> Option<&ChannelState> {
        self.channels.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut ChannelState> {
        self.channels.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelState> {
        self.channels.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ChannelState> {
        self.channels.iter_mut()
    }

    /// Check if at least one channel is breathing
    pub fn any_active(&self) -> bool {
        self.channels.iter().any(ChannelState::is_active)
    }

    /// Indices of the breathing channels
    pub fn active_indices(&self) -> Vec<usize, C> {
        let mut active = Vec::new();
        for (index, _) in self.channels.iter().enumerate().filter(|(_, ch)| ch.active) {
            // Capacity equals the channel count
            let _ = active.push(index);
        }
        active
    }
}
