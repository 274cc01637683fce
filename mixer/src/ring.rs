//! Circular buffer addressing.
//!
//! Positions are sample indices into a ring of `len` samples, so the
//! physical bounds of every ring are `[0, len)`. The views borrow memory
//! owned by the caller and never allocate.

use crate::error::{MixError, Result};
use crate::format::FrameFormat;

/// Wraps `pos` back into `[start, end)`.
///
/// Callers keep `pos` within a few ring lengths of `end`; in the mixing
/// loops it is never more than one chunk past it.
#[inline]
pub fn wrap(mut pos: usize, start: usize, end: usize) -> usize {
    debug_assert!(start < end, "empty ring [{start}, {end})");
    debug_assert!(pos >= start);
    let len = end - start;
    while pos >= end {
        pos -= len;
    }
    pos
}

/// Returns how many samples can be accessed from `pos` before the ring wraps.
#[inline]
pub fn contiguous_remaining(pos: usize, end: usize) -> usize {
    debug_assert!(pos < end);
    end - pos
}

fn check_ring(format: FrameFormat, len: usize, base: usize) -> Result<()> {
    let stride = format.stride();
    if len == 0 {
        return Err(MixError::EmptyRing);
    }
    if len % stride != 0 {
        return Err(MixError::Misaligned { len, stride });
    }
    let samples = len / stride;
    if base >= samples {
        return Err(MixError::BaseOutOfRange { base, len: samples });
    }
    Ok(())
}

/// Read-only window into a source ring buffer.
#[derive(Debug, Clone, Copy)]
pub struct RingSource<'a> {
    buf: &'a [u8],
    format: FrameFormat,
    base: usize,
}

impl<'a> RingSource<'a> {
    /// Creates a view starting at sample `base` of `buf`.
    ///
    /// `buf` must be non-empty, hold whole samples of `format`, and `base`
    /// must lie inside it. This is only checked in debug builds; use
    /// [`RingSource::try_new`] for untrusted input.
    pub fn new(format: FrameFormat, buf: &'a [u8], base: usize) -> Self {
        debug_assert!(check_ring(format, buf.len(), base).is_ok());
        Self { buf, format, base }
    }

    /// Creates a view, validating the buffer layout.
    pub fn try_new(format: FrameFormat, buf: &'a [u8], base: usize) -> Result<Self> {
        check_ring(format, buf.len(), base)?;
        Ok(Self { buf, format, base })
    }

    /// Returns the sample format of the ring.
    pub fn format(&self) -> FrameFormat {
        self.format
    }

    /// Returns the sample index the window starts at.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Returns the ring length in samples.
    pub fn len(&self) -> usize {
        self.buf.len() / self.format.stride()
    }

    /// Returns true if the ring holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the ring position `offset` samples past the base.
    pub fn position(&self, offset: usize) -> usize {
        wrap(self.base + offset, 0, self.len())
    }

    /// Returns `n` samples starting at ring position `pos` as bytes.
    /// The range must not cross the end of the ring.
    pub(crate) fn chunk(&self, pos: usize, n: usize) -> &[u8] {
        let stride = self.format.stride();
        &self.buf[pos * stride..(pos + n) * stride]
    }
}

/// Writable window into a destination ring buffer.
#[derive(Debug)]
pub struct RingSink<'a> {
    buf: &'a mut [u8],
    format: FrameFormat,
    base: usize,
}

impl<'a> RingSink<'a> {
    /// Creates a view starting at sample `base` of `buf`.
    ///
    /// Same layout requirements as [`RingSource::new`].
    pub fn new(format: FrameFormat, buf: &'a mut [u8], base: usize) -> Self {
        debug_assert!(check_ring(format, buf.len(), base).is_ok());
        Self { buf, format, base }
    }

    /// Creates a view, validating the buffer layout.
    pub fn try_new(format: FrameFormat, buf: &'a mut [u8], base: usize) -> Result<Self> {
        check_ring(format, buf.len(), base)?;
        Ok(Self { buf, format, base })
    }

    /// Returns the sample format of the ring.
    pub fn format(&self) -> FrameFormat {
        self.format
    }

    /// Returns the sample index the window starts at.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Returns the ring length in samples.
    pub fn len(&self) -> usize {
        self.buf.len() / self.format.stride()
    }

    /// Returns true if the ring holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the ring position `offset` samples past the base.
    pub fn position(&self, offset: usize) -> usize {
        wrap(self.base + offset, 0, self.len())
    }

    /// Returns the whole backing buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &*self.buf
    }

    pub(crate) fn chunk_mut(&mut self, pos: usize, n: usize) -> &mut [u8] {
        let stride = self.format.stride();
        &mut self.buf[pos * stride..(pos + n) * stride]
    }
}
