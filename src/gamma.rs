//! Perceptual brightness correction
//!
//! Maps a linear 8-bit intensity to a 16-bit duty fraction following the
//! CIE 1931 lightness curve. The table is built at compile time so the
//! tick handler only pays for one lookup per channel.
//!
//! See <http://jared.geek.nz/2013/feb/linear-led-pwm>.

/// 8% of the 16-bit range, where the curve switches from linear to cubic
const KNEE: u32 = 5243;
/// 16% of the 16-bit range
const OFFSET: u128 = 10486;
/// 116% of the 16-bit range
const DIVISOR: u128 = 76_021;

/// Number of entries in [`CIE_LUT`]
pub const CIE_LUT_SIZE: usize = 256;

/// CIE lightness of a 16-bit linear value, as a 16-bit duty fraction
///
/// Non-decreasing over the whole input range, `0 -> 0` and
/// `0xFFFF -> 0xFFFF`.
#[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
pub const fn cie_lightness(v: u16) -> u16 {
    let v = v as u32;
    if v <= KNEE {
        // L / 903.3
        return (v * 1000 / 9033) as u16;
    }
    let n = v as u128 + OFFSET;
    let y = n * n * n * u16::MAX as u128 / (DIVISOR * DIVISOR * DIVISOR);
    if y > u16::MAX as u128 {
        u16::MAX
    } else {
        y as u16
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn build_cie_lut() -> [u16; CIE_LUT_SIZE] {
    let mut lut = [0; CIE_LUT_SIZE];
    let mut i = 0;
    while i < CIE_LUT_SIZE {
        // i * 257 spreads 0..=255 over 0..=0xFFFF
        lut[i] = cie_lightness((i * 257) as u16);
        i += 1;
    }
    lut
}

/// Precomputed perceptual correction table
pub static CIE_LUT: [u16; CIE_LUT_SIZE] = build_cie_lut();

/// Perceptually correct a linear 8-bit intensity
#[inline]
pub fn correct(value: u8) -> u16 {
    CIE_LUT[value as usize]
}
