//! `resample/hermite.rs` — cubic Hermite (Catmull-Rom) resampler.
//!
//! Uses four-point cubic interpolation over the last four input frames.
//! Cheap and table-free; kept as a reference point for the sinc backend.

use super::Resample;
use super::request::{ResampleRequest, stereo_frames, validate_ratio};
use crate::audio::constants::SHORT_HISTORY;
use crate::common::{CHANNELS, ResamplerResult, StereoFrame};

pub const IDENT: &str = "hermite";

pub struct HermiteResampler {
    /// Last four frames per channel, newest at `[3]`.
    history: [[f32; SHORT_HISTORY]; CHANNELS],
    /// Position past `history[1]`, in input frames.
    r_frac: f64,
}

impl HermiteResampler {
    pub fn new(bandwidth_ratio: f64) -> ResamplerResult<Self> {
        validate_ratio(bandwidth_ratio)?;
        Ok(Self {
            history: [[0.0; SHORT_HISTORY]; CHANNELS],
            r_frac: 0.0,
        })
    }

    /// Seeds every channel with `cos((i - 2) * omega)` so a test tone of
    /// angular frequency `omega` starts without a transient.
    pub fn preinit(&mut self, omega: f64) {
        for channel in &mut self.history {
            for (i, tap) in channel.iter_mut().enumerate() {
                *tap = ((i as f64 - 2.0) * omega).cos() as f32;
            }
        }
        self.r_frac = 0.0;
    }

    /// Cubic Hermite interpolation between `b` and `c` at `mu`.
    #[inline]
    pub fn kernel(mu: f32, a: f32, b: f32, c: f32, d: f32) -> f32 {
        let m0 = (c - a) * 0.5;
        let m1 = (d - b) * 0.5;

        let mu2 = mu * mu;
        let mu3 = mu2 * mu;

        let a0 = 2.0 * mu3 - 3.0 * mu2 + 1.0;
        let a1 = mu3 - 2.0 * mu2 + mu;
        let a2 = mu3 - mu2;
        let a3 = -2.0 * mu3 + 3.0 * mu2;

        a0 * b + a1 * m0 + a2 * m1 + a3 * c
    }

    fn interpolate(&self, mu: f32) -> StereoFrame {
        let [l, r] = &self.history;
        [
            Self::kernel(mu, l[0], l[1], l[2], l[3]),
            Self::kernel(mu, r[0], r[1], r[2], r[3]),
        ]
    }

    fn push(&mut self, frame: StereoFrame) {
        for (channel, sample) in self.history.iter_mut().zip(frame) {
            channel.copy_within(1.., 0);
            channel[SHORT_HISTORY - 1] = sample;
        }
    }
}

impl Resample for HermiteResampler {
    fn ident(&self) -> &'static str {
        IDENT
    }

    fn output_frames_for(&self, input_frames: usize, ratio: f64) -> ResamplerResult<usize> {
        let step = 1.0 / validate_ratio(ratio)?;
        let mut r_frac = self.r_frac;
        let mut produced = 0;

        for _ in 0..input_frames {
            while r_frac <= 1.0 {
                r_frac += step;
                produced += 1;
            }
            r_frac -= 1.0;
        }

        Ok(produced)
    }

    fn process(&mut self, request: &mut ResampleRequest<'_>) -> ResamplerResult<()> {
        let input_frames = request.validate()?;
        let required = self.output_frames_for(input_frames, request.ratio)?;
        request.ensure_capacity(required)?;

        let step = 1.0 / request.ratio;
        let mut produced = 0;

        for frame in stereo_frames(request.input) {
            while self.r_frac <= 1.0 {
                self.r_frac += step;
                let out = self.interpolate(self.r_frac as f32);
                request.write_frame(produced, out);
                produced += 1;
            }
            self.r_frac -= 1.0;
            self.push(frame);
        }

        request.output_frames = produced;
        Ok(())
    }

    fn reset(&mut self) {
        self.history = [[0.0; SHORT_HISTORY]; CHANNELS];
        self.r_frac = 0.0;
    }
}
