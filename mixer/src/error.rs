//! Error types for mixer setup.
//!
//! The mixing functions themselves never fail: contract violations are
//! debug assertions and numeric overflow saturates. Everything here is
//! reported while a stream is being configured.

use thiserror::Error;

use crate::format::FrameFormat;

/// Errors returned while configuring formats, gains, buffers and sinks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MixError {
    #[error("mixer: unknown frame format id {0}")]
    UnknownFormatId(u32),

    #[error("mixer: unknown frame format {0:?}")]
    UnknownFormat(String),

    #[error("mixer: no mix functions registered for {0}")]
    Unsupported(FrameFormat),

    #[error("mixer: invalid gain ratio {0}")]
    InvalidGain(f32),

    #[error("mixer: ring buffer is empty")]
    EmptyRing,

    #[error("mixer: buffer of {len} bytes is not a whole number of {stride}-byte samples")]
    Misaligned { len: usize, stride: usize },

    #[error("mixer: base sample {base} outside ring of {len} samples")]
    BaseOutOfRange { base: usize, len: usize },

    #[error("mixer: start sample {start} is past the {mixed} samples already mixed")]
    Gap { start: usize, mixed: usize },

    #[error("mixer: {count} samples from {start} overrun a ring of {capacity}")]
    Overrun {
        start: usize,
        count: usize,
        capacity: usize,
    },

    #[error("mixer: {got} source cannot be mixed into a {expected} sink")]
    FormatMismatch {
        expected: FrameFormat,
        got: FrameFormat,
    },
}

/// Result type for mixer setup operations.
pub type Result<T> = std::result::Result<T, MixError>;
