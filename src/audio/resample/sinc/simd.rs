//! SSE convolution kernel: the scalar kernel four taps at a time.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::common::StereoFrame;

use super::convolve::SincHistory;
use super::phase::PhaseAccumulator;
use super::tables::SincTables;
use crate::audio::constants::SIDELOBES;

const _: () = assert!(SIDELOBES == 8, "SSE kernel is unrolled for 8 sidelobes");

/// # Safety
///
/// The running CPU must support SSE.
#[inline(never)]
#[target_feature(enable = "sse")]
pub unsafe fn convolve_sse(
    tables: &SincTables,
    history: &SincHistory,
    time: PhaseAccumulator,
) -> StereoFrame {
    unsafe {
        let (older_lo, older_hi) = interpolate(tables, time);
        let (newer_lo, newer_hi) = interpolate(tables, time.mirrored());

        // Older taps run backwards from the centre: reverse the coefficient lanes.
        let older_lo = _mm_shuffle_ps::<0x1B>(older_lo, older_lo);
        let older_hi = _mm_shuffle_ps::<0x1B>(older_hi, older_hi);

        let left = history.left.as_ptr();
        let right = history.right.as_ptr();

        let mut sum_l = _mm_mul_ps(_mm_loadu_ps(left), older_hi);
        sum_l = _mm_add_ps(sum_l, _mm_mul_ps(_mm_loadu_ps(left.add(4)), older_lo));
        sum_l = _mm_add_ps(sum_l, _mm_mul_ps(_mm_loadu_ps(left.add(8)), newer_lo));
        sum_l = _mm_add_ps(sum_l, _mm_mul_ps(_mm_loadu_ps(left.add(12)), newer_hi));

        let mut sum_r = _mm_mul_ps(_mm_loadu_ps(right), older_hi);
        sum_r = _mm_add_ps(sum_r, _mm_mul_ps(_mm_loadu_ps(right.add(4)), older_lo));
        sum_r = _mm_add_ps(sum_r, _mm_mul_ps(_mm_loadu_ps(right.add(8)), newer_lo));
        sum_r = _mm_add_ps(sum_r, _mm_mul_ps(_mm_loadu_ps(right.add(12)), newer_hi));

        [horizontal_sum(sum_l), horizontal_sum(sum_r)]
    }
}

/// Coefficients for taps 0..4 and 4..8 at `time`.
#[inline]
#[target_feature(enable = "sse")]
unsafe fn interpolate(tables: &SincTables, time: PhaseAccumulator) -> (__m128, __m128) {
    unsafe {
        let row = time.phase();
        let fraction = _mm_set1_ps(time.fraction());
        let phase = tables.phase[row].as_ptr();
        let delta = tables.delta[row].as_ptr();

        let lo = _mm_add_ps(
            _mm_loadu_ps(phase),
            _mm_mul_ps(fraction, _mm_loadu_ps(delta)),
        );
        let hi = _mm_add_ps(
            _mm_loadu_ps(phase.add(4)),
            _mm_mul_ps(fraction, _mm_loadu_ps(delta.add(4))),
        );
        (lo, hi)
    }
}

#[inline]
#[target_feature(enable = "sse")]
fn horizontal_sum(v: __m128) -> f32 {
    let high = _mm_movehl_ps(v, v);
    let pairs = _mm_add_ps(v, high);
    let second = _mm_shuffle_ps::<0x55>(pairs, pairs);
    _mm_cvtss_f32(_mm_add_ss(pairs, second))
}
