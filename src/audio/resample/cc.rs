//! `resample/cc.rs` — convolved-cosine resampler.
//!
//! The kernel is a raised-cosine pulse convolved with a box of one input
//! period. Its antiderivative has a closed form, so each weight is the
//! difference of two `sin` evaluations and no table is kept. Up- and
//! downsampling use different accumulation schemes. The scheme is picked at
//! construction from the bandwidth ratio and re-picked whenever a request's
//! ratio falls on the other side of `CC_DOWNSAMPLE_BELOW`.

use std::f32::consts::PI;

use tracing::debug;

use super::Resample;
use super::request::{ResampleRequest, stereo_frames, validate_ratio};
use crate::audio::constants::{
    CC_DOWNSAMPLE_BELOW, CC_DOWNSAMPLE_SLOTS, CC_UPSAMPLE_START_DISTANCE, SHORT_HISTORY,
};
use crate::common::{ResamplerResult, StereoFrame};

pub const IDENT: &str = "cc";

/// Antiderivative of the raised-cosine pulse, saturating outside its support.
#[inline]
pub fn cc_int(x: f32, b: f32) -> f32 {
    let angle = x * b * PI;
    (angle + angle.sin()).clamp(-PI, PI)
}

/// Weight of an input frame at distance `x` for cutoff `b`.
#[inline]
pub fn cc_kernel(x: f32, b: f32) -> f32 {
    (cc_int(x + 0.5, b) - cc_int(x - 0.5, b)) / (2.0 * PI)
}

#[inline]
fn add_scaled(target: &mut StereoFrame, source: StereoFrame, weight: f32) {
    target[0] += source[0] * weight;
    target[1] += source[1] * weight;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CcMode {
    Downsample,
    Upsample,
}

impl CcMode {
    pub fn for_bandwidth(bandwidth_ratio: f64) -> Self {
        if bandwidth_ratio < CC_DOWNSAMPLE_BELOW {
            Self::Downsample
        } else {
            Self::Upsample
        }
    }

    fn start_distance(self) -> f32 {
        match self {
            Self::Downsample => 0.0,
            Self::Upsample => CC_UPSAMPLE_START_DISTANCE,
        }
    }
}

pub struct ConvolvedCosineResampler {
    mode: CcMode,
    /// Downsample: partially accumulated output frames, oldest first.
    slots: [StereoFrame; CC_DOWNSAMPLE_SLOTS],
    /// Upsample: last four input frames, newest last.
    window: [StereoFrame; SHORT_HISTORY],
    distance: f32,
}

impl ConvolvedCosineResampler {
    pub fn new(bandwidth_ratio: f64) -> ResamplerResult<Self> {
        validate_ratio(bandwidth_ratio)?;
        let mode = CcMode::for_bandwidth(bandwidth_ratio);
        Ok(Self {
            mode,
            slots: [[0.0; 2]; CC_DOWNSAMPLE_SLOTS],
            window: [[0.0; 2]; SHORT_HISTORY],
            distance: mode.start_distance(),
        })
    }

    pub fn mode(&self) -> CcMode {
        self.mode
    }

    fn downsample(&mut self, request: &mut ResampleRequest<'_>) -> usize {
        let ratio = (1.0 / request.ratio) as f32;
        let b = request.ratio as f32;
        let mut produced = 0;

        for frame in stereo_frames(request.input) {
            for (k, slot) in self.slots.iter_mut().enumerate() {
                add_scaled(slot, frame, cc_kernel(self.distance - k as f32 * ratio, b));
            }
            self.distance += 1.0;

            if self.distance > ratio + 0.5 {
                request.write_frame(produced, self.slots[0]);
                produced += 1;

                self.slots.copy_within(1.., 0);
                self.slots[CC_DOWNSAMPLE_SLOTS - 1] = [0.0; 2];
                self.distance -= ratio;
            }
        }

        produced
    }

    fn upsample(&mut self, request: &mut ResampleRequest<'_>) -> usize {
        let ratio = (1.0 / request.ratio) as f32;
        let b = request.ratio.min(1.0) as f32;
        let mut produced = 0;

        for frame in stereo_frames(request.input) {
            self.window.copy_within(1.., 0);
            self.window[SHORT_HISTORY - 1] = frame;

            while self.distance < 1.0 {
                let mut out = [0.0f32; 2];
                for (i, tap) in self.window.iter().enumerate() {
                    add_scaled(&mut out, *tap, cc_kernel(self.distance + 1.0 - i as f32, b));
                }
                request.write_frame(produced, out);
                produced += 1;
                self.distance += ratio;
            }
            self.distance -= 1.0;
        }

        produced
    }
}

impl Resample for ConvolvedCosineResampler {
    fn ident(&self) -> &'static str {
        IDENT
    }

    fn output_frames_for(&self, input_frames: usize, ratio: f64) -> ResamplerResult<usize> {
        let ratio = validate_ratio(ratio)?;
        let mode = CcMode::for_bandwidth(ratio);
        let mut distance = if mode == self.mode {
            self.distance
        } else {
            mode.start_distance()
        };
        let ratio = (1.0 / ratio) as f32;
        let mut produced = 0;

        match mode {
            CcMode::Downsample => {
                for _ in 0..input_frames {
                    distance += 1.0;
                    if distance > ratio + 0.5 {
                        produced += 1;
                        distance -= ratio;
                    }
                }
            }
            CcMode::Upsample => {
                for _ in 0..input_frames {
                    while distance < 1.0 {
                        produced += 1;
                        distance += ratio;
                    }
                    distance -= 1.0;
                }
            }
        }

        Ok(produced)
    }

    fn process(&mut self, request: &mut ResampleRequest<'_>) -> ResamplerResult<()> {
        let input_frames = request.validate()?;
        let required = self.output_frames_for(input_frames, request.ratio)?;
        request.ensure_capacity(required)?;

        let mode = CcMode::for_bandwidth(request.ratio);
        if mode != self.mode {
            debug!(
                "Switching cc resampler from {:?} to {:?} at ratio {:.5}",
                self.mode, mode, request.ratio
            );
            self.mode = mode;
            self.reset();
        }

        request.output_frames = match self.mode {
            CcMode::Downsample => self.downsample(request),
            CcMode::Upsample => self.upsample(request),
        };
        Ok(())
    }

    fn reset(&mut self) {
        self.slots = [[0.0; 2]; CC_DOWNSAMPLE_SLOTS];
        self.window = [[0.0; 2]; SHORT_HISTORY];
        self.distance = self.mode.start_distance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::resample::analysis::{cosine_at, cosine_tone, measure, run_blocks};

    #[test]
    fn mode_follows_bandwidth() {
        assert_eq!(CcMode::for_bandwidth(0.5), CcMode::Downsample);
        assert_eq!(CcMode::for_bandwidth(0.749), CcMode::Downsample);
        assert_eq!(CcMode::for_bandwidth(0.75), CcMode::Upsample);
        assert_eq!(CcMode::for_bandwidth(2.0), CcMode::Upsample);
        assert_eq!(
            ConvolvedCosineResampler::new(0.6).unwrap().mode(),
            CcMode::Downsample
        );
    }

    #[test]
    fn kernel_weights_sum_to_one() {
        for b in [1.0f32, 0.8, 0.5] {
            for offset in [0.0f32, 0.3, 0.77] {
                let sum: f32 = (-8..=8).map(|n| cc_kernel(n as f32 + offset, b)).sum();
                assert!((sum - 1.0).abs() < 1e-5, "b {b} offset {offset}: {sum}");
            }
        }
    }

    #[test]
    fn integral_saturates() {
        assert_eq!(cc_int(5.0, 1.0), PI);
        assert_eq!(cc_int(-5.0, 1.0), -PI);
        assert_eq!(cc_int(0.0, 1.0), 0.0);
    }

    #[test]
    fn preserves_dc_in_both_modes() {
        for ratio in [48_000.0f64 / 44_100.0, 44_100.0 / 48_000.0, 2.0, 0.5, 0.7] {
            let mut re = ConvolvedCosineResampler::new(ratio).unwrap();
            let output = run_blocks(&mut re, &vec![0.5f32; 600 * 2], 150, ratio).unwrap();
            let settled = 16 * 2;
            for &s in &output[settled..] {
                assert!((s - 0.5).abs() < 0.005, "ratio {ratio}: {s}");
            }
        }
    }

    #[test]
    fn frame_count_tracks_ratio_after_warmup() {
        for ratio in [48_000.0f64 / 44_100.0, 44_100.0 / 48_000.0, 2.0, 0.5, 0.6] {
            let mut re = ConvolvedCosineResampler::new(ratio).unwrap();
            run_blocks(&mut re, &vec![0.0f32; 64 * 2], 64, ratio).unwrap();

            let mut total = 0usize;
            for call in 1..=6 {
                let out = run_blocks(&mut re, &vec![0.0f32; 400 * 2], 400, ratio).unwrap();
                total += out.len() / 2;
                let expected = (call * 400) as f64 * ratio;
                assert!(
                    (total as f64 - expected).abs() <= 1.0 + 1e-5 * expected,
                    "ratio {ratio}: {total} vs {expected}"
                );
            }
        }
    }

    #[test]
    fn low_tone_quality() {
        for ratio in [48_000.0f64 / 44_100.0, 44_100.0 / 48_000.0, 0.5, 0.6] {
            let omega = 2.0 * std::f64::consts::PI * 0.01 * ratio.min(1.0);
            let input = cosine_tone(omega, 3000);
            let mut re = ConvolvedCosineResampler::new(ratio).unwrap();
            let output = run_blocks(&mut re, &input, 200, ratio).unwrap();

            // Output frame `k` sits at input position `k / ratio` in both modes.
            let expected = cosine_at(omega, (0..output.len() / 2).map(|k| k as f64 / ratio));
            let skip = 16 * 2;
            let report = measure(&expected[skip..], &output[skip..]);
            assert!(report.snr_db > 55.0, "ratio {ratio}: {:.1} dB", report.snr_db);
        }
    }

    #[test]
    fn ratio_crossing_the_threshold_switches_mode() {
        let mut re = ConvolvedCosineResampler::new(2.0 / 3.0).unwrap();
        assert_eq!(re.mode(), CcMode::Downsample);
        run_blocks(&mut re, &vec![0.5f32; 300 * 2], 100, 2.0 / 3.0).unwrap();

        assert_eq!(re.output_frames_for(400, 2.0).unwrap(), 796);
        let output = run_blocks(&mut re, &vec![0.5f32; 2000 * 2], 400, 2.0).unwrap();
        assert_eq!(re.mode(), CcMode::Upsample);

        let frames = output.len() / 2;
        assert!((frames as i64 - 4000).abs() <= 6, "{frames} frames");
        for &s in &output[16 * 2..] {
            assert!((s - 0.5).abs() < 0.005, "{s}");
        }

        run_blocks(&mut re, &vec![0.5f32; 400 * 2], 400, 0.5).unwrap();
        assert_eq!(re.mode(), CcMode::Downsample);
    }
}
