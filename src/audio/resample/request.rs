//! `resample/request.rs` — one block of work handed to a backend.

use crate::audio::constants::{MAX_RATIO, MIN_RATIO};
use crate::common::{CHANNELS, ResamplerError, ResamplerResult, StereoFrame};

/// Interleaved stereo input, a caller-owned output slice and the ratio to
/// convert at. Valid for a single `process` call.
#[derive(Debug)]
pub struct ResampleRequest<'a> {
    pub input: &'a [f32],
    pub output: &'a mut [f32],
    /// `output_rate / input_rate`.
    pub ratio: f64,
    /// Frames written to `output` by the last `process` call.
    pub output_frames: usize,
}

impl<'a> ResampleRequest<'a> {
    pub fn new(input: &'a [f32], output: &'a mut [f32], ratio: f64) -> Self {
        Self {
            input,
            output,
            ratio,
            output_frames: 0,
        }
    }

    pub fn input_frames(&self) -> usize {
        self.input.len() / CHANNELS
    }

    /// Frames the output slice can hold.
    pub fn output_capacity(&self) -> usize {
        self.output.len() / CHANNELS
    }

    /// The interleaved samples produced by the last `process` call.
    pub fn produced(&self) -> &[f32] {
        &self.output[..self.output_frames * CHANNELS]
    }

    /// Checks ratio and frame alignment; returns the input frame count.
    pub(crate) fn validate(&self) -> ResamplerResult<usize> {
        validate_ratio(self.ratio)?;
        if self.input.len() % CHANNELS != 0 {
            return Err(ResamplerError::MisalignedInput(self.input.len()));
        }
        Ok(self.input_frames())
    }

    pub(crate) fn ensure_capacity(&self, required: usize) -> ResamplerResult<()> {
        let capacity = self.output_capacity();
        if capacity < required {
            return Err(ResamplerError::OutputTooSmall { required, capacity });
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn write_frame(&mut self, index: usize, frame: StereoFrame) {
        let offset = index * CHANNELS;
        self.output[offset..offset + CHANNELS].copy_from_slice(&frame);
    }
}

/// Splits interleaved samples into stereo frames.
pub(crate) fn stereo_frames(input: &[f32]) -> impl Iterator<Item = StereoFrame> + '_ {
    input
        .chunks_exact(CHANNELS)
        .map(|frame| [frame[0], frame[1]])
}

/// Accepts finite ratios within `[MIN_RATIO, MAX_RATIO]`.
pub fn validate_ratio(ratio: f64) -> ResamplerResult<f64> {
    if ratio.is_finite() && (MIN_RATIO..=MAX_RATIO).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(ResamplerError::InvalidRatio(ratio))
    }
}
