//! Breathing curve tables
//!
//! Every curve is one full fade-in/fade-out cycle sampled at
//! [`BREATHING_STEPS`] points. Tables are static and shared by reference,
//! channels only ever read them.

/// Samples per breathing cycle
pub const BREATHING_STEPS: usize = 256;

/// Ticks per period unit (one second at the default 256 Hz tick rate)
pub const TABLE_BASE: u32 = 256;

// `interval = period * TABLE_BASE / BREATHING_STEPS` must stay >= 1 for period 1
const _: () = assert!(BREATHING_STEPS as u32 <= TABLE_BASE);

const CURVE_NAME_SINE: &str = "sine";
const CURVE_NAME_SINE_REST: &str = "sine_rest";
const CURVE_NAME_TRIANGLE: &str = "triangle";

const CURVE_ID_SINE: u8 = 0;
const CURVE_ID_SINE_REST: u8 = 1;
const CURVE_ID_TRIANGLE: u8 = 2;

/// Known curve ids that can be requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum CurveId {
    #[default]
    Sine = CURVE_ID_SINE,
    SineRest = CURVE_ID_SINE_REST,
    Triangle = CURVE_ID_TRIANGLE,
}

impl CurveId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            CURVE_ID_SINE => Self::Sine,
            CURVE_ID_SINE_REST => Self::SineRest,
            CURVE_ID_TRIANGLE => Self::Triangle,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sine => CURVE_NAME_SINE,
            Self::SineRest => CURVE_NAME_SINE_REST,
            Self::Triangle => CURVE_NAME_TRIANGLE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            CURVE_NAME_SINE => Some(Self::Sine),
            CURVE_NAME_SINE_REST => Some(Self::SineRest),
            CURVE_NAME_TRIANGLE => Some(Self::Triangle),
            _ => None,
        }
    }

    /// Static table for this id
    pub const fn curve(self) -> &'static BreathingCurve {
        match self {
            Self::Sine => &SINE,
            Self::SineRest => &SINE_REST,
            Self::Triangle => &TRIANGLE,
        }
    }
}

/// One breathing cycle sampled at [`BREATHING_STEPS`] points
#[derive(Debug, PartialEq, Eq)]
pub struct BreathingCurve {
    id: CurveId,
    samples: [u8; BREATHING_STEPS],
}

impl BreathingCurve {
    pub const fn id(&self) -> CurveId {
        self.id
    }

    pub const fn samples(&self) -> &[u8; BREATHING_STEPS] {
        &self.samples
    }

    /// Sample at `index`, wrapping at the end of the cycle
    #[inline]
    pub const fn sample(&self, index: usize) -> u8 {
        self.samples[index % BREATHING_STEPS]
    }

    /// Lowest sample of the cycle
    pub const fn min(&self) -> u8 {
        let mut min = u8::MAX;
        let mut i = 0;
        while i < BREATHING_STEPS {
            if self.samples[i] < min {
                min = self.samples[i];
            }
            i += 1;
        }
        min
    }
}

/// `sin(x / 256 * pi)^4 * 255`
pub static SINE: BreathingCurve = BreathingCurve {
    id: CurveId::Sine,
    samples: [
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
        0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 3, 3, 4, 4, //
        5, 6, 6, 7, 8, 9, 10, 11, 12, 13, 15, 16, 17, 19, 20, 22, //
        24, 26, 28, 30, 32, 34, 36, 38, 41, 43, 46, 49, 51, 54, 57, 60, //
        63, 66, 70, 73, 76, 80, 83, 87, 91, 94, 98, 102, 106, 110, 113, 117, //
        121, 125, 129, 133, 138, 142, 146, 150, 154, 158, 162, 166, 170, 174, 178, 181, //
        185, 189, 193, 196, 200, 203, 207, 210, 213, 216, 220, 222, 225, 228, 231, 233, //
        235, 238, 240, 242, 244, 245, 247, 248, 250, 251, 252, 253, 253, 254, 254, 254, //
        255, 254, 254, 254, 253, 253, 252, 251, 250, 248, 247, 245, 244, 242, 240, 238, //
        235, 233, 231, 228, 225, 222, 220, 216, 213, 210, 207, 203, 200, 196, 193, 189, //
        185, 181, 178, 174, 170, 166, 162, 158, 154, 150, 146, 142, 138, 133, 129, 125, //
        121, 117, 113, 110, 106, 102, 98, 94, 91, 87, 83, 80, 76, 73, 70, 66, //
        63, 60, 57, 54, 51, 49, 46, 43, 41, 38, 36, 34, 32, 30, 28, 26, //
        24, 22, 20, 19, 17, 16, 15, 13, 12, 11, 10, 9, 8, 7, 6, 6, //
        5, 4, 4, 3, 3, 2, 2, 2, 1, 1, 1, 1, 0, 0, 0, 0, //
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    ],
};

/// Sine-power pulse with a short rest at the bottom, in half resolution
const SINE_REST_HALF: [u8; BREATHING_STEPS / 2] = [
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 3, 4, //
    5, 6, 8, 10, 12, 15, 17, 20, 24, 28, 32, 36, 41, 46, 51, 57, //
    63, 70, 76, 83, 91, 98, 106, 113, 121, 129, 138, 146, 154, 162, 170, 178, //
    185, 193, 200, 207, 213, 220, 225, 231, 235, 240, 244, 247, 250, 252, 253, 254, //
    255, 254, 253, 252, 250, 247, 244, 240, 235, 231, 225, 220, 213, 207, 200, 193, //
    185, 178, 170, 162, 154, 146, 138, 129, 121, 113, 106, 98, 91, 83, 76, 70, //
    63, 57, 51, 46, 41, 36, 32, 28, 24, 20, 17, 15, 12, 10, 8, 6, //
    5, 4, 3, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
];

const fn upsample(half: &[u8; BREATHING_STEPS / 2]) -> [u8; BREATHING_STEPS] {
    let mut samples = [0; BREATHING_STEPS];
    let mut i = 0;
    while i < BREATHING_STEPS {
        samples[i] = half[i / 2];
        i += 1;
    }
    samples
}

#[allow(clippy::cast_possible_truncation)]
const fn triangle() -> [u8; BREATHING_STEPS] {
    let half = BREATHING_STEPS / 2;
    let mut samples = [0; BREATHING_STEPS];
    let mut i = 0;
    while i < BREATHING_STEPS {
        let pos = if i < half { i } else { BREATHING_STEPS - 1 - i };
        samples[i] = (pos * 2) as u8;
        i += 1;
    }
    samples
}

/// Sine-power pulse resting at the bottom between breaths
pub static SINE_REST: BreathingCurve = BreathingCurve {
    id: CurveId::SineRest,
    samples: upsample(&SINE_REST_HALF),
};

/// Linear ramp up and down
pub static TRIANGLE: BreathingCurve = BreathingCurve {
    id: CurveId::Triangle,
    samples: triangle(),
};
