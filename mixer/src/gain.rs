//! Source gain in Q1.10 fixed point.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MixError, Result};

/// Number of fractional bits in a [`Gain`].
pub const GAIN_FRAC_BITS: u32 = 10;

/// Per-source gain, an unsigned Q1.10 multiplier.
///
/// [`Gain::UNITY`] means "no attenuation". It cannot be represented in the
/// signed Q1.15 / Q1.23 domains the gain path works in, so unity must be
/// routed to the plain mix functions; the gain functions only accept values
/// strictly below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gain(u16);

impl Gain {
    /// No attenuation: 1.0 in Q1.10.
    pub const UNITY: Gain = Gain(1 << GAIN_FRAC_BITS);

    /// Silence.
    pub const MUTE: Gain = Gain(0);

    /// The largest gain accepted by the gain path.
    pub const MAX_ATTENUATING: Gain = Gain((1 << GAIN_FRAC_BITS) - 1);

    /// Creates a gain from its raw Q1.10 value.
    pub const fn new(raw: u16) -> Self {
        Gain(raw)
    }

    /// Returns the raw Q1.10 value.
    pub const fn raw(&self) -> u16 {
        self.0
    }

    /// Returns true if this gain must take the no-gain path.
    pub const fn is_unity(&self) -> bool {
        self.0 >= Self::UNITY.0
    }

    /// Converts a linear ratio to the nearest Q1.10 gain.
    ///
    /// Ratios at or above 1.0 are clamped to [`Gain::UNITY`].
    pub fn from_ratio(ratio: f32) -> Result<Self> {
        if !ratio.is_finite() || ratio < 0.0 {
            return Err(MixError::InvalidGain(ratio));
        }
        if ratio >= 1.0 {
            return Ok(Self::UNITY);
        }
        let raw = (ratio * f32::from(Self::UNITY.0)).round() as u16;
        Ok(Gain(raw.min(Self::UNITY.0)))
    }

    /// Returns the gain as a linear ratio.
    pub fn ratio(&self) -> f32 {
        f32::from(self.0) / f32::from(Self::UNITY.0)
    }

    /// Converts to Q1.15 for the 16-bit path.
    pub const fn to_q15(&self) -> i16 {
        debug_assert!(self.0 < Self::UNITY.0);
        (self.0 << (15 - GAIN_FRAC_BITS)) as i16
    }

    /// Converts to Q1.23 for the 24-bit and 32-bit paths.
    pub const fn to_q23(&self) -> i32 {
        debug_assert!(self.0 < Self::UNITY.0);
        (self.0 as i32) << (23 - GAIN_FRAC_BITS)
    }
}

impl Default for Gain {
    fn default() -> Self {
        Self::UNITY
    }
}

impl From<u16> for Gain {
    fn from(raw: u16) -> Self {
        Gain(raw)
    }
}

impl fmt::Display for Gain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.ratio())
    }
}
