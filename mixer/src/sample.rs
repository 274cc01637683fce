//! Fixed-point sample arithmetic.
//!
//! Each supported width gets a small newtype implementing [`Sample`]. The
//! mixing engine is written once against this trait; the types only carry
//! what actually differs between widths: byte layout, sign extension,
//! saturation range and the fixed-point position of the gain.

use std::fmt;

use crate::format::FrameFormat;
use crate::gain::Gain;

/// Arithmetic and memory layout of one sample format.
pub trait Sample: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// The frame format this type implements.
    const FORMAT: FrameFormat;

    /// Bytes occupied by one sample in a ring buffer.
    const STRIDE: usize;

    /// Gain converted to this format's fixed-point domain.
    type Gain: Copy;

    /// Reads a sample from the first `STRIDE` bytes, little-endian.
    fn load(bytes: &[u8]) -> Self;

    /// Writes the sample into the first `STRIDE` bytes, little-endian.
    fn store(self, bytes: &mut [u8]);

    /// Adds two samples, clamping to the representable range.
    fn saturating_add(self, other: Self) -> Self;

    /// Converts a Q1.10 gain once per call. The gain must be below unity.
    fn gain(gain: Gain) -> Self::Gain;

    /// Multiplies by a converted gain, rounding to nearest and saturating.
    fn scale(self, gain: Self::Gain) -> Self;

    /// Creates a sample from an integer, saturating to the format's range.
    fn from_i32(v: i32) -> Self;

    /// Returns the sample value as an integer.
    fn to_i32(self) -> i32;
}

/// Rounds `v / 2^shift` to nearest, ties toward positive infinity.
#[inline]
fn round_shift(v: i64, shift: u32) -> i64 {
    (v + (1 << (shift - 1))) >> shift
}

/// 16-bit signed sample; gain is applied in Q1.15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct S16(pub i16);

impl Sample for S16 {
    const FORMAT: FrameFormat = FrameFormat::S16Le;
    const STRIDE: usize = 2;
    type Gain = i16;

    #[inline]
    fn load(bytes: &[u8]) -> Self {
        S16(i16::from_le_bytes([bytes[0], bytes[1]]))
    }

    #[inline]
    fn store(self, bytes: &mut [u8]) {
        bytes[..2].copy_from_slice(&self.0.to_le_bytes());
    }

    #[inline]
    fn saturating_add(self, other: Self) -> Self {
        S16(self.0.saturating_add(other.0))
    }

    #[inline]
    fn gain(gain: Gain) -> i16 {
        gain.to_q15()
    }

    #[inline]
    fn scale(self, gain: i16) -> Self {
        let v = round_shift(i64::from(self.0) * i64::from(gain), 15);
        S16(v.clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16)
    }

    #[inline]
    fn from_i32(v: i32) -> Self {
        S16(v.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16)
    }

    #[inline]
    fn to_i32(self) -> i32 {
        i32::from(self.0)
    }
}

/// 24-bit signed sample in a 32-bit container; gain is applied in Q1.23.
///
/// Values are kept sign-extended from bit 23 so that both mixing phases
/// leave the container in the same canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct S24(i32);

impl S24 {
    /// Largest representable 24-bit value.
    pub const MAX: i32 = (1 << 23) - 1;
    /// Smallest representable 24-bit value.
    pub const MIN: i32 = -(1 << 23);

    /// Creates a sample from the low 24 bits of `raw`, sign-extending bit 23.
    #[inline]
    pub const fn from_container(raw: i32) -> Self {
        S24((raw << 8) >> 8)
    }

    /// Returns the sign-extended value.
    #[inline]
    pub const fn get(&self) -> i32 {
        self.0
    }
}

impl Sample for S24 {
    const FORMAT: FrameFormat = FrameFormat::S24Le;
    const STRIDE: usize = 4;
    type Gain = i32;

    #[inline]
    fn load(bytes: &[u8]) -> Self {
        S24::from_container(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    #[inline]
    fn store(self, bytes: &mut [u8]) {
        bytes[..4].copy_from_slice(&self.0.to_le_bytes());
    }

    #[inline]
    fn saturating_add(self, other: Self) -> Self {
        // Two 24-bit values cannot overflow i32.
        Self::from_i32(self.0 + other.0)
    }

    #[inline]
    fn gain(gain: Gain) -> i32 {
        gain.to_q23()
    }

    #[inline]
    fn scale(self, gain: i32) -> Self {
        let v = round_shift(i64::from(self.0) * i64::from(gain), 23);
        S24(v.clamp(i64::from(S24::MIN), i64::from(S24::MAX)) as i32)
    }

    #[inline]
    fn from_i32(v: i32) -> Self {
        S24(v.clamp(S24::MIN, S24::MAX))
    }

    #[inline]
    fn to_i32(self) -> i32 {
        self.0
    }
}

/// 32-bit signed sample; gain is applied in Q1.23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct S32(pub i32);

impl Sample for S32 {
    const FORMAT: FrameFormat = FrameFormat::S32Le;
    const STRIDE: usize = 4;
    type Gain = i32;

    #[inline]
    fn load(bytes: &[u8]) -> Self {
        S32(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    #[inline]
    fn store(self, bytes: &mut [u8]) {
        bytes[..4].copy_from_slice(&self.0.to_le_bytes());
    }

    #[inline]
    fn saturating_add(self, other: Self) -> Self {
        S32(self.0.saturating_add(other.0))
    }

    #[inline]
    fn gain(gain: Gain) -> i32 {
        gain.to_q23()
    }

    #[inline]
    fn scale(self, gain: i32) -> Self {
        let v = round_shift(i64::from(self.0) * i64::from(gain), 23);
        S32(v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }

    #[inline]
    fn from_i32(v: i32) -> Self {
        S32(v)
    }

    #[inline]
    fn to_i32(self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s16_saturating_add() {
        assert_eq!(S16(100).saturating_add(S16(-30)), S16(70));
        assert_eq!(S16(i16::MAX).saturating_add(S16(i16::MAX)), S16(i16::MAX));
        assert_eq!(S16(i16::MIN).saturating_add(S16(i16::MIN)), S16(i16::MIN));
    }

    #[test]
    fn test_s16_scale() {
        let half = S16::gain(Gain::new(512));
        assert_eq!(S16(10000).scale(half), S16(5000));
        assert_eq!(S16(-10000).scale(half), S16(-5000));
        // 3 * 0.5 = 1.5 rounds up, -3 * 0.5 = -1.5 rounds toward +inf.
        assert_eq!(S16(3).scale(half), S16(2));
        assert_eq!(S16(-3).scale(half), S16(-1));

        let max = S16::gain(Gain::MAX_ATTENUATING);
        // 32767 * 1023/1024
        assert_eq!(S16(i16::MAX).scale(max), S16(32735));
        assert_eq!(S16(i16::MIN).scale(max), S16(-32736));
        assert_eq!(S16(1234).scale(S16::gain(Gain::MUTE)), S16(0));
    }

    #[test]
    fn test_s16_load_store() {
        let mut bytes = [0u8; 2];
        S16(-2).store(&mut bytes);
        assert_eq!(bytes, [0xfe, 0xff]);
        assert_eq!(S16::load(&bytes), S16(-2));
    }

    #[test]
    fn test_s24_sign_extension() {
        // Garbage in the top byte is discarded, bit 23 is the sign.
        let bytes = 0x12ff_ffffu32.to_le_bytes();
        assert_eq!(S24::load(&bytes).get(), -1);

        let bytes = 0xab7f_ffffu32.to_le_bytes();
        assert_eq!(S24::load(&bytes).get(), S24::MAX);

        let mut out = [0u8; 4];
        S24::load(&0x0080_0000u32.to_le_bytes()).store(&mut out);
        assert_eq!(i32::from_le_bytes(out), S24::MIN);
    }

    #[test]
    fn test_s24_saturating_add() {
        let max = S24::from_i32(S24::MAX);
        let min = S24::from_i32(S24::MIN);
        assert_eq!(max.saturating_add(max).get(), S24::MAX);
        assert_eq!(min.saturating_add(min).get(), S24::MIN);
        assert_eq!(max.saturating_add(min).get(), -1);
    }

    #[test]
    fn test_s24_scale() {
        let half = S24::gain(Gain::new(512));
        assert_eq!(S24::from_i32(1_000_000).scale(half).get(), 500_000);
        assert_eq!(S24::from_i32(-7).scale(half).get(), -3);

        let max = S24::gain(Gain::MAX_ATTENUATING);
        assert_eq!(S24::from_i32(S24::MAX).scale(max).get(), 8380415);
    }

    #[test]
    fn test_s32_saturating_add() {
        assert_eq!(S32(i32::MAX).saturating_add(S32(1)), S32(i32::MAX));
        assert_eq!(S32(i32::MIN).saturating_add(S32(-1)), S32(i32::MIN));
    }

    #[test]
    fn test_s32_scale() {
        let quarter = S32::gain(Gain::new(256));
        assert_eq!(S32(1 << 30).scale(quarter), S32(1 << 28));

        let max = S32::gain(Gain::MAX_ATTENUATING);
        // 2147483647 * 1023/1024 = 2145386495.0009...
        assert_eq!(S32(i32::MAX).scale(max), S32(2145386495));
        assert_eq!(S32(i32::MIN).scale(max), S32(-2145386496));
    }

    #[test]
    fn test_from_i32_saturates() {
        assert_eq!(S16::from_i32(70000), S16(i16::MAX));
        assert_eq!(S16::from_i32(-70000), S16(i16::MIN));
        assert_eq!(S24::from_i32(1 << 24).get(), S24::MAX);
        assert_eq!(S32::from_i32(-5).to_i32(), -5);
    }
}
