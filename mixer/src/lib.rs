//! Fixed-point PCM mixing into shared circular buffers.
//!
//! This crate combines source streams into one destination ring buffer,
//! optionally attenuating each source by a Q1.10 gain. It handles rings
//! that wrap past their physical end and sources that reach overlapping
//! parts of the destination at different times.
//!
//! - [`ring`]: wrap-around addressing and borrowed ring views
//! - [`sample`]: saturating 16-, 24-in-32- and 32-bit arithmetic
//! - [`mix`]: the accumulate / initialize mixing algorithm
//! - [`dispatch`]: the frame format to mix function table
//! - [`MixoutSink`]: an owned destination ring with high-water bookkeeping
//!
//! # Example
//!
//! ```rust
//! use giztoy_mixer::{FrameFormat, Gain, RingSink, RingSource, dispatch};
//!
//! let format = FrameFormat::S16Le;
//! let func = dispatch::lookup(format).unwrap();
//!
//! let mut out = format.encode(&[0; 8]);
//! let input = format.encode(&[100; 8]);
//!
//! // Samples 0..4 already hold data from an earlier source.
//! let mixed_samples = 4;
//! {
//!     let mut sink = RingSink::new(format, &mut out, 0);
//!     let source = RingSource::new(format, &input, 0);
//!     (func.mix)(&mut sink, 2, mixed_samples, &source, 4, Gain::UNITY);
//! }
//! assert_eq!(format.decode(&out), vec![0, 0, 100, 100, 100, 100, 0, 0]);
//! ```
//!
//! All mixing runs synchronously with no allocation, locking or I/O. Only
//! one call may touch a given destination at a time.

pub mod dispatch;
mod error;
mod format;
mod gain;
pub mod mix;
mod mixout;
pub mod ring;
pub mod sample;

pub use dispatch::{MIX_FUNC_MAP, MixFn, MixFunc};
pub use error::{MixError, Result};
pub use format::FrameFormat;
pub use gain::{GAIN_FRAC_BITS, Gain};
pub use mixout::MixoutSink;
pub use ring::{RingSink, RingSource};
pub use sample::{S16, S24, S32, Sample};
