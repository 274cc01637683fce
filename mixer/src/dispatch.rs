//! Frame format to mix function lookup.

use tracing::warn;

use crate::error::{MixError, Result};
use crate::format::FrameFormat;
use crate::gain::Gain;
use crate::mix;
use crate::ring::{RingSink, RingSource};

/// Signature shared by every registered mix function:
/// `(sink, start_sample, mixed_samples, source, sample_count, gain)`.
pub type MixFn = fn(&mut RingSink<'_>, usize, usize, &RingSource<'_>, usize, Gain);

/// Mix functions for one frame format.
#[derive(Debug, Clone, Copy)]
pub struct MixFunc {
    pub format: FrameFormat,
    /// Mixes without gain; the gain argument is ignored.
    pub mix: MixFn,
    /// Mixes with a gain strictly below unity.
    pub mix_gain: MixFn,
}

impl MixFunc {
    /// Returns the function to use for `gain`: unity takes the plain path.
    pub fn select(&self, gain: Gain) -> MixFn {
        if gain.is_unity() { self.mix } else { self.mix_gain }
    }
}

/// Every frame format this build can mix.
pub static MIX_FUNC_MAP: &[MixFunc] = &[
    #[cfg(feature = "s16le")]
    MixFunc {
        format: FrameFormat::S16Le,
        mix: mix::mix_s16,
        mix_gain: mix::mix_s16_gain,
    },
    #[cfg(feature = "s24le")]
    MixFunc {
        format: FrameFormat::S24Le,
        mix: mix::mix_s24,
        mix_gain: mix::mix_s24_gain,
    },
    #[cfg(feature = "s32le")]
    MixFunc {
        format: FrameFormat::S32Le,
        mix: mix::mix_s32,
        mix_gain: mix::mix_s32_gain,
    },
];

/// Finds the mix functions for `format`.
///
/// Stream setup is expected to call this once and keep the entry; a
/// missing format is a configuration error.
pub fn lookup(format: FrameFormat) -> Result<&'static MixFunc> {
    match MIX_FUNC_MAP.iter().find(|f| f.format == format) {
        Some(func) => Ok(func),
        None => {
            warn!(%format, "no mix functions registered");
            Err(MixError::Unsupported(format))
        }
    }
}

/// Returns the formats registered in [`MIX_FUNC_MAP`].
pub fn formats() -> impl Iterator<Item = FrameFormat> {
    MIX_FUNC_MAP.iter().map(|f| f.format)
}
