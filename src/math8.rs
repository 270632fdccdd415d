/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Rescale a full-range 16-bit value into `0..=max`
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn scale_duty(value: u16, max: u16) -> u16 {
    ((value as u32 * max as u32) / u16::MAX as u32) as u16
}

/// Convert a percentage into a duty value in `0..=max`
///
/// Percentages above 100 are treated as 100.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn percent_to_duty(percent: u8, max: u16) -> u16 {
    let percent = if percent > 100 { 100 } else { percent };
    ((max as u32 * percent as u32) / 100) as u16
}
