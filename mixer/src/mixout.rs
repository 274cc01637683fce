//! Sink-side bookkeeping for a shared mix ring.
//!
//! [`MixoutSink`] owns a destination ring and its high-water mark. Each
//! source calls [`MixoutSink::mix_source`] with its run for the period;
//! the consumer drains mixed samples through [`std::io::Read`].

use std::io::{self, Read};

use tracing::{debug, trace, warn};

use crate::dispatch::{self, MixFunc};
use crate::error::{MixError, Result};
use crate::format::FrameFormat;
use crate::gain::Gain;
use crate::ring::{RingSink, RingSource, wrap};

/// A destination ring shared by several sources.
///
/// Start offsets passed to [`MixoutSink::mix_source`] are relative to the
/// oldest undrained sample. Draining `n` samples moves that origin forward
/// by `n`, so sources must lower their next start offset accordingly.
pub struct MixoutSink {
    format: FrameFormat,
    func: &'static MixFunc,
    buf: Vec<u8>,
    base: usize,
    mixed_samples: usize,
}

impl MixoutSink {
    /// Creates a sink holding `capacity` samples of `format`, all zero.
    pub fn new(format: FrameFormat, capacity: usize) -> Result<Self> {
        Self::with_base(format, capacity, 0)
    }

    /// Creates a sink whose first sample lands at ring position `base`.
    pub fn with_base(format: FrameFormat, capacity: usize, base: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(MixError::EmptyRing);
        }
        if base >= capacity {
            return Err(MixError::BaseOutOfRange { base, len: capacity });
        }
        let func = dispatch::lookup(format)?;
        debug!(%format, capacity, base, "mixout sink created");
        Ok(Self {
            format,
            func,
            buf: vec![0; format.bytes(capacity)],
            base,
            mixed_samples: 0,
        })
    }

    /// Returns the sample format of the ring.
    pub fn format(&self) -> FrameFormat {
        self.format
    }

    /// Returns the ring size in samples.
    pub fn capacity(&self) -> usize {
        self.format.samples(self.buf.len())
    }

    /// Returns the high-water mark: samples written by some source and not
    /// yet drained.
    pub fn mixed_samples(&self) -> usize {
        self.mixed_samples
    }

    /// Returns the ring position of the oldest undrained sample.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Returns the raw ring contents in physical order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the pending mixed samples in playback order.
    pub fn samples(&self) -> Vec<i32> {
        let capacity = self.capacity();
        let mut out = Vec::with_capacity(self.mixed_samples);
        let mut pos = self.base;
        let mut left = self.mixed_samples;
        while left > 0 {
            let n = left.min(capacity - pos);
            let stride = self.format.stride();
            out.extend(self.format.decode(&self.buf[pos * stride..(pos + n) * stride]));
            pos = wrap(pos + n, 0, capacity);
            left -= n;
        }
        out
    }

    /// Mixes `sample_count` samples from `source` starting `start_sample`
    /// samples past the oldest undrained sample.
    ///
    /// Unity gain takes the plain mix path. On success the high-water mark
    /// becomes `max(mixed_samples, start_sample + sample_count)`.
    pub fn mix_source(
        &mut self,
        start_sample: usize,
        source: &RingSource<'_>,
        sample_count: usize,
        gain: Gain,
    ) -> Result<()> {
        if source.format() != self.format {
            warn!(expected = %self.format, got = %source.format(), "source format rejected");
            return Err(MixError::FormatMismatch {
                expected: self.format,
                got: source.format(),
            });
        }
        if start_sample > self.mixed_samples {
            warn!(start_sample, mixed = self.mixed_samples, "source run leaves a gap");
            return Err(MixError::Gap {
                start: start_sample,
                mixed: self.mixed_samples,
            });
        }
        let capacity = self.capacity();
        let end = start_sample + sample_count;
        if end > capacity {
            warn!(start_sample, sample_count, capacity, "source run overruns ring");
            return Err(MixError::Overrun {
                start: start_sample,
                count: sample_count,
                capacity,
            });
        }

        trace!(
            start_sample,
            sample_count,
            mixed = self.mixed_samples,
            %gain,
            "mixing source"
        );

        let mix = self.func.select(gain);
        let mut sink = RingSink::new(self.format, &mut self.buf, self.base);
        mix(&mut sink, start_sample, self.mixed_samples, source, sample_count, gain);

        self.mixed_samples = self.mixed_samples.max(end);
        Ok(())
    }

    /// Drops all pending samples without reading them.
    pub fn reset(&mut self) {
        self.base = 0;
        self.mixed_samples = 0;
    }
}

impl Read for MixoutSink {
    /// Drains whole mixed samples as little-endian bytes.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let stride = self.format.stride();
        let capacity = self.capacity();
        let count = (buf.len() / stride).min(self.mixed_samples);

        let mut written = 0;
        let mut left = count;
        while left > 0 {
            let n = left.min(capacity - self.base);
            let bytes = n * stride;
            let from = self.base * stride;
            buf[written..written + bytes].copy_from_slice(&self.buf[from..from + bytes]);
            self.base = wrap(self.base + n, 0, capacity);
            written += bytes;
            left -= n;
        }

        self.mixed_samples -= count;
        if count > 0 {
            debug!(count, pending = self.mixed_samples, "mixout drained");
        }
        Ok(written)
    }
}

impl std::fmt::Debug for MixoutSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MixoutSink")
            .field("format", &self.format)
            .field("capacity", &self.capacity())
            .field("base", &self.base)
            .field("mixed_samples", &self.mixed_samples)
            .finish()
    }
}
