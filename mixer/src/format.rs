//! PCM frame format definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MixError, Result};
use crate::sample::{S16, S24, S32, Sample};

/// Sample format of a ring buffer.
///
/// The discriminants are the IPC frame format ids used by stream
/// configuration messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameFormat {
    /// 16-bit signed little-endian.
    #[serde(rename = "s16le")]
    S16Le = 0,
    /// 24-bit signed little-endian in a 32-bit container.
    #[serde(rename = "s24_4le")]
    S24Le = 1,
    /// 32-bit signed little-endian.
    #[serde(rename = "s32le")]
    S32Le = 2,
}

impl FrameFormat {
    /// All formats the mixer understands, in IPC id order.
    pub const ALL: [FrameFormat; 3] = [FrameFormat::S16Le, FrameFormat::S24Le, FrameFormat::S32Le];

    /// Returns the IPC frame format id.
    pub fn id(&self) -> u32 {
        *self as u32
    }

    /// Returns the short name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            FrameFormat::S16Le => "s16le",
            FrameFormat::S24Le => "s24_4le",
            FrameFormat::S32Le => "s32le",
        }
    }

    /// Returns the number of bytes one sample occupies in a ring buffer.
    pub fn stride(&self) -> usize {
        match self {
            FrameFormat::S16Le => S16::STRIDE,
            FrameFormat::S24Le => S24::STRIDE,
            FrameFormat::S32Le => S32::STRIDE,
        }
    }

    /// Returns the number of significant bits per sample.
    pub fn depth(&self) -> u32 {
        match self {
            FrameFormat::S16Le => 16,
            FrameFormat::S24Le => 24,
            FrameFormat::S32Le => 32,
        }
    }

    /// Returns the number of whole samples in `bytes` bytes.
    pub fn samples(&self, bytes: usize) -> usize {
        bytes / self.stride()
    }

    /// Returns the number of bytes needed for `samples` samples.
    pub fn bytes(&self, samples: usize) -> usize {
        samples * self.stride()
    }

    /// Encodes integer samples into little-endian ring buffer bytes.
    ///
    /// Values outside the format's range are saturated.
    pub fn encode(&self, samples: &[i32]) -> Vec<u8> {
        match self {
            FrameFormat::S16Le => encode_as::<S16>(samples),
            FrameFormat::S24Le => encode_as::<S24>(samples),
            FrameFormat::S32Le => encode_as::<S32>(samples),
        }
    }

    /// Decodes little-endian ring buffer bytes into integer samples.
    ///
    /// Trailing bytes that do not form a whole sample are ignored.
    pub fn decode(&self, bytes: &[u8]) -> Vec<i32> {
        match self {
            FrameFormat::S16Le => decode_as::<S16>(bytes),
            FrameFormat::S24Le => decode_as::<S24>(bytes),
            FrameFormat::S32Le => decode_as::<S32>(bytes),
        }
    }
}

fn encode_as<S: Sample>(samples: &[i32]) -> Vec<u8> {
    let mut data = vec![0u8; samples.len() * S::STRIDE];
    for (bytes, &v) in data.chunks_exact_mut(S::STRIDE).zip(samples) {
        S::from_i32(v).store(bytes);
    }
    data
}

fn decode_as<S: Sample>(bytes: &[u8]) -> Vec<i32> {
    bytes
        .chunks_exact(S::STRIDE)
        .map(|b| S::load(b).to_i32())
        .collect()
}

impl fmt::Display for FrameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for FrameFormat {
    type Error = MixError;

    fn try_from(id: u32) -> Result<Self> {
        FrameFormat::ALL
            .into_iter()
            .find(|f| f.id() == id)
            .ok_or(MixError::UnknownFormatId(id))
    }
}

impl FromStr for FrameFormat {
    type Err = MixError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "s16le" | "s16_le" => Ok(FrameFormat::S16Le),
            "s24_4le" | "s24le" | "s24_le" => Ok(FrameFormat::S24Le),
            "s32le" | "s32_le" => Ok(FrameFormat::S32Le),
            _ => Err(MixError::UnknownFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_properties() {
        assert_eq!(FrameFormat::S16Le.stride(), 2);
        assert_eq!(FrameFormat::S24Le.stride(), 4);
        assert_eq!(FrameFormat::S32Le.stride(), 4);

        assert_eq!(FrameFormat::S16Le.depth(), 16);
        assert_eq!(FrameFormat::S24Le.depth(), 24);

        assert_eq!(FrameFormat::S16Le.samples(32), 16);
        assert_eq!(FrameFormat::S32Le.bytes(8), 32);
    }

    #[test]
    fn test_format_ids() {
        for format in FrameFormat::ALL {
            assert_eq!(FrameFormat::try_from(format.id()).unwrap(), format);
        }
        assert_eq!(
            FrameFormat::try_from(3).unwrap_err(),
            MixError::UnknownFormatId(3)
        );
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("s16le".parse::<FrameFormat>().unwrap(), FrameFormat::S16Le);
        assert_eq!("S24_4LE".parse::<FrameFormat>().unwrap(), FrameFormat::S24Le);
        assert_eq!("s32_le".parse::<FrameFormat>().unwrap(), FrameFormat::S32Le);
        assert!("float".parse::<FrameFormat>().is_err());

        for format in FrameFormat::ALL {
            assert_eq!(format.to_string().parse::<FrameFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&FrameFormat::S24Le).unwrap();
        assert_eq!(json, "\"s24_4le\"");
        let format: FrameFormat = serde_json::from_str("\"s32le\"").unwrap();
        assert_eq!(format, FrameFormat::S32Le);
    }

    #[test]
    fn test_encode_decode() {
        let data = FrameFormat::S16Le.encode(&[1, -1, 40000]);
        assert_eq!(data, vec![0x01, 0x00, 0xff, 0xff, 0xff, 0x7f]);
        assert_eq!(FrameFormat::S16Le.decode(&data), vec![1, -1, 32767]);

        // 24-bit values are saturated and stored sign-extended.
        let data = FrameFormat::S24Le.encode(&[-1, 1 << 23]);
        assert_eq!(data, vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f, 0x00]);
        assert_eq!(FrameFormat::S24Le.decode(&data), vec![-1, (1 << 23) - 1]);

        // Trailing partial sample is dropped.
        assert_eq!(FrameFormat::S32Le.decode(&[0, 0, 0, 0, 9]), vec![0]);
    }
}
