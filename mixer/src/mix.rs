//! Mixing a source ring into a shared sink ring.
//!
//! Several sources write into the same sink during one period, each at
//! its own time. The sink's high-water mark (`mixed_samples`) records how
//! many leading samples of the period some source has already written:
//!
//! ```text
//!            start_sample      mixed_samples
//!                 |                  |
//! sink:  .........[==== accumulate ==][---- initialize ----]
//!                 |<-------------- sample_count ---------->|
//! ```
//!
//! Below the mark the source is added onto what is already there, above
//! it the source is copied in directly. No clearing pass and no per-sample
//! bookkeeping is needed, and the result does not depend on the order the
//! sources are mixed in.

use crate::gain::Gain;
use crate::ring::{RingSink, RingSource, contiguous_remaining, wrap};
use crate::sample::{S16, S24, S32, Sample};

/// Mixes `sample_count` samples from `source` into `sink` without gain.
///
/// The run starts `start_sample` samples past the sink base and reads the
/// source from its base. `mixed_samples` is the sink's high-water mark and
/// must not be below `start_sample`. The caller advances its own mark
/// afterwards.
pub fn mix<S: Sample>(
    sink: &mut RingSink<'_>,
    start_sample: usize,
    mixed_samples: usize,
    source: &RingSource<'_>,
    sample_count: usize,
) {
    mix_with::<S, _>(sink, start_sample, mixed_samples, source, sample_count, |s| s);
}

/// Mixes `sample_count` samples from `source` into `sink`, attenuated by
/// `gain`.
///
/// `gain` must be below [`Gain::UNITY`]; unity gain belongs on [`mix`].
pub fn mix_gain<S: Sample>(
    sink: &mut RingSink<'_>,
    start_sample: usize,
    mixed_samples: usize,
    source: &RingSource<'_>,
    sample_count: usize,
    gain: Gain,
) {
    debug_assert!(
        gain < Gain::UNITY,
        "unity gain cannot be represented in the gain path"
    );
    let gain = S::gain(gain);
    mix_with::<S, _>(sink, start_sample, mixed_samples, source, sample_count, |s| {
        s.scale(gain)
    });
}

fn mix_with<S, F>(
    sink: &mut RingSink<'_>,
    start_sample: usize,
    mixed_samples: usize,
    source: &RingSource<'_>,
    sample_count: usize,
    contribution: F,
) where
    S: Sample,
    F: Fn(S) -> S,
{
    debug_assert_eq!(sink.format(), S::FORMAT);
    debug_assert_eq!(source.format(), S::FORMAT);
    debug_assert!(
        mixed_samples >= start_sample,
        "start sample {start_sample} past high-water mark {mixed_samples}"
    );

    let samples_to_mix = (mixed_samples - start_sample).min(sample_count);
    let samples_to_copy = sample_count - samples_to_mix;

    let mut src = source.position(0);
    let mut dst = sink.position(start_sample);

    for_each_chunk(sink, &mut dst, source, &mut src, samples_to_mix, |input, output| {
        for (i, o) in input
            .chunks_exact(S::STRIDE)
            .zip(output.chunks_exact_mut(S::STRIDE))
        {
            S::load(o).saturating_add(contribution(S::load(i))).store(o);
        }
    });

    for_each_chunk(sink, &mut dst, source, &mut src, samples_to_copy, |input, output| {
        for (i, o) in input
            .chunks_exact(S::STRIDE)
            .zip(output.chunks_exact_mut(S::STRIDE))
        {
            contribution(S::load(i)).store(o);
        }
    });
}

/// Walks `count` samples from both cursors in pieces that never cross
/// either ring's end, advancing and re-wrapping the cursors after each.
fn for_each_chunk<F>(
    sink: &mut RingSink<'_>,
    dst: &mut usize,
    source: &RingSource<'_>,
    src: &mut usize,
    count: usize,
    mut op: F,
) where
    F: FnMut(&[u8], &mut [u8]),
{
    let src_len = source.len();
    let dst_len = sink.len();

    let mut left = count;
    while left > 0 {
        let n = left
            .min(contiguous_remaining(*src, src_len))
            .min(contiguous_remaining(*dst, dst_len));

        op(source.chunk(*src, n), sink.chunk_mut(*dst, n));

        *src = wrap(*src + n, 0, src_len);
        *dst = wrap(*dst + n, 0, dst_len);
        left -= n;
    }
}

// Monomorphic entry points registered in the dispatch table. The plain
// variants take a gain only to share the table's function signature.

pub fn mix_s16(
    sink: &mut RingSink<'_>,
    start_sample: usize,
    mixed_samples: usize,
    source: &RingSource<'_>,
    sample_count: usize,
    _gain: Gain,
) {
    mix::<S16>(sink, start_sample, mixed_samples, source, sample_count);
}

pub fn mix_s16_gain(
    sink: &mut RingSink<'_>,
    start_sample: usize,
    mixed_samples: usize,
    source: &RingSource<'_>,
    sample_count: usize,
    gain: Gain,
) {
    mix_gain::<S16>(sink, start_sample, mixed_samples, source, sample_count, gain);
}

pub fn mix_s24(
    sink: &mut RingSink<'_>,
    start_sample: usize,
    mixed_samples: usize,
    source: &RingSource<'_>,
    sample_count: usize,
    _gain: Gain,
) {
    mix::<S24>(sink, start_sample, mixed_samples, source, sample_count);
}

pub fn mix_s24_gain(
    sink: &mut RingSink<'_>,
    start_sample: usize,
    mixed_samples: usize,
    source: &RingSource<'_>,
    sample_count: usize,
    gain: Gain,
) {
    mix_gain::<S24>(sink, start_sample, mixed_samples, source, sample_count, gain);
}

pub fn mix_s32(
    sink: &mut RingSink<'_>,
    start_sample: usize,
    mixed_samples: usize,
    source: &RingSource<'_>,
    sample_count: usize,
    _gain: Gain,
) {
    mix::<S32>(sink, start_sample, mixed_samples, source, sample_count);
}

pub fn mix_s32_gain(
    sink: &mut RingSink<'_>,
    start_sample: usize,
    mixed_samples: usize,
    source: &RingSource<'_>,
    sample_count: usize,
    gain: Gain,
) {
    mix_gain::<S32>(sink, start_sample, mixed_samples, source, sample_count, gain);
}
