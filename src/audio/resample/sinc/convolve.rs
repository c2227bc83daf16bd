//! Scalar convolution of the history window with the interpolated kernel.

use crate::audio::constants::{SIDELOBES, TAPS};
use crate::common::StereoFrame;

use super::phase::PhaseAccumulator;
use super::tables::SincTables;

/// Most recent `TAPS` frames per channel, newest last.
#[derive(Debug, Clone, PartialEq)]
pub struct SincHistory {
    pub left: [f32; TAPS],
    pub right: [f32; TAPS],
}

impl Default for SincHistory {
    fn default() -> Self {
        Self {
            left: [0.0; TAPS],
            right: [0.0; TAPS],
        }
    }
}

impl SincHistory {
    /// Drops the oldest frame and appends `frame`.
    #[inline]
    pub fn push(&mut self, frame: StereoFrame) {
        self.left.copy_within(1.., 0);
        self.right.copy_within(1.., 0);
        self.left[TAPS - 1] = frame[0];
        self.right[TAPS - 1] = frame[1];
    }
}

/// Output frame at `time` past `history[SIDELOBES - 1]`.
pub fn convolve_scalar(
    tables: &SincTables,
    history: &SincHistory,
    time: PhaseAccumulator,
) -> StereoFrame {
    let older = tables.interpolate(time.phase(), time.fraction());
    let reverse = time.mirrored();
    let newer = tables.interpolate(reverse.phase(), reverse.fraction());

    let mut sum_l = 0.0f32;
    let mut sum_r = 0.0f32;

    for j in 0..SIDELOBES {
        sum_l += history.left[SIDELOBES - 1 - j] * older[j];
        sum_r += history.right[SIDELOBES - 1 - j] * older[j];
    }

    for j in 0..SIDELOBES {
        sum_l += history.left[SIDELOBES + j] * newer[j];
        sum_r += history.right[SIDELOBES + j] * newer[j];
    }

    [sum_l, sum_r]
}
