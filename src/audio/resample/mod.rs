//! Stereo sample-rate conversion with three backends behind one contract:
//!
//! | Type | Identifier | Quality | CPU Cost |
//! |---|---|---|---|
//! | [`SincResampler`] | `sinc` | High (windowed sinc, 16 taps) | Medium |
//! | [`ConvolvedCosineResampler`] | `cc` | Good (integrated raised cosine) | Low-medium |
//! | [`HermiteResampler`] | `hermite` | Okay (Catmull-Rom) | Low |

pub mod analysis;
pub mod cc;
pub mod hermite;
pub mod registry;
pub mod request;
pub mod sinc;

pub use cc::ConvolvedCosineResampler;
pub use hermite::HermiteResampler;
pub use registry::{BACKENDS, BackendCursor, cycle, find, find_kind, reinitialize};
pub use request::{ResampleRequest, validate_ratio};
pub use sinc::SincResampler;

use crate::common::ResamplerResult;
use crate::configs::SimdStrategy;

/// Contract every backend implements.
pub trait Resample: Send {
    /// Registry identifier of the backend.
    fn ident(&self) -> &'static str;

    /// Resample `request.input` into `request.output` and set
    /// `request.output_frames`. Rejected requests leave the instance untouched.
    fn process(&mut self, request: &mut ResampleRequest<'_>) -> ResamplerResult<()>;

    /// Exact number of frames the next `process` call emits for
    /// `input_frames` frames at `ratio`.
    fn output_frames_for(&self, input_frames: usize, ratio: f64) -> ResamplerResult<usize>;

    /// Back to the freshly constructed state.
    fn reset(&mut self);
}

/// Immutable backend descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResamplerKind {
    Sinc,
    ConvolvedCosine,
    Hermite,
}

impl ResamplerKind {
    pub fn ident(self) -> &'static str {
        match self {
            Self::Sinc => sinc::IDENT,
            Self::ConvolvedCosine => cc::IDENT,
            Self::Hermite => hermite::IDENT,
        }
    }

    /// Creates an instance tuned for `bandwidth_ratio` (`output / input` rate).
    pub fn init(self, bandwidth_ratio: f64, simd: SimdStrategy) -> ResamplerResult<Resampler> {
        Ok(match self {
            Self::Sinc => Resampler::Sinc(SincResampler::new(bandwidth_ratio, simd)?),
            Self::ConvolvedCosine => {
                Resampler::ConvolvedCosine(ConvolvedCosineResampler::new(bandwidth_ratio)?)
            }
            Self::Hermite => Resampler::Hermite(HermiteResampler::new(bandwidth_ratio)?),
        })
    }
}

/// Per-stream resampler instance.
pub enum Resampler {
    Sinc(SincResampler),
    ConvolvedCosine(ConvolvedCosineResampler),
    Hermite(HermiteResampler),
}

impl Resampler {
    pub fn kind(&self) -> ResamplerKind {
        match self {
            Self::Sinc(_) => ResamplerKind::Sinc,
            Self::ConvolvedCosine(_) => ResamplerKind::ConvolvedCosine,
            Self::Hermite(_) => ResamplerKind::Hermite,
        }
    }
}

impl Resample for Resampler {
    fn ident(&self) -> &'static str {
        self.kind().ident()
    }

    fn process(&mut self, request: &mut ResampleRequest<'_>) -> ResamplerResult<()> {
        match self {
            Self::Sinc(r) => r.process(request),
            Self::ConvolvedCosine(r) => r.process(request),
            Self::Hermite(r) => r.process(request),
        }
    }

    fn output_frames_for(&self, input_frames: usize, ratio: f64) -> ResamplerResult<usize> {
        match self {
            Self::Sinc(r) => r.output_frames_for(input_frames, ratio),
            Self::ConvolvedCosine(r) => r.output_frames_for(input_frames, ratio),
            Self::Hermite(r) => r.output_frames_for(input_frames, ratio),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Sinc(r) => r.reset(),
            Self::ConvolvedCosine(r) => r.reset(),
            Self::Hermite(r) => r.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::analysis::{cosine_tone, run_blocks};
    use super::*;
    use crate::common::ResamplerError;

    #[test]
    fn every_backend_holds_dc_through_the_enum() {
        for kind in BACKENDS {
            let mut re = kind.init(1.25, SimdStrategy::Auto).unwrap();
            assert_eq!(re.kind(), kind);
            assert_eq!(re.ident(), kind.ident());

            let output = run_blocks(&mut re, &vec![-0.25f32; 512 * 2], 128, 1.25).unwrap();
            let mean: f32 = output[64..].iter().sum::<f32>() / (output.len() - 64) as f32;
            assert!((mean + 0.25).abs() < 0.0025, "{}: {mean}", kind.ident());
        }
    }

    #[test]
    fn init_rejects_invalid_bandwidth() {
        for kind in BACKENDS {
            assert!(matches!(
                kind.init(-1.0, SimdStrategy::Auto),
                Err(ResamplerError::InvalidRatio(_))
            ));
        }
    }

    #[test]
    fn every_backend_rejects_misaligned_input() {
        for kind in BACKENDS {
            let mut re = kind.init(1.0, SimdStrategy::Scalar).unwrap();
            let input = [0.0f32; 3];
            let mut output = [0.0f32; 64];
            let mut request = ResampleRequest::new(&input, &mut output, 1.0);
            assert_eq!(
                re.process(&mut request),
                Err(ResamplerError::MisalignedInput(3))
            );
        }
    }

    #[test]
    fn invalid_process_ratio_leaves_every_backend_untouched() {
        let warmup = cosine_tone(0.2, 150);
        let next = cosine_tone(0.35, 200);

        for kind in BACKENDS {
            let mut rejected = kind.init(0.8, SimdStrategy::Scalar).unwrap();
            let mut reference = kind.init(0.8, SimdStrategy::Scalar).unwrap();
            run_blocks(&mut rejected, &warmup, 50, 0.8).unwrap();
            run_blocks(&mut reference, &warmup, 50, 0.8).unwrap();

            for ratio in [0.0, -2.0, f64::NAN, 64.0] {
                let mut output = vec![0.0f32; 4096];
                let mut request = ResampleRequest::new(&next, &mut output, ratio);
                assert!(
                    matches!(
                        rejected.process(&mut request),
                        Err(ResamplerError::InvalidRatio(_))
                    ),
                    "{} accepted ratio {ratio}",
                    kind.ident()
                );
                assert_eq!(request.output_frames, 0);
            }

            let a = run_blocks(&mut rejected, &next, 64, 0.8).unwrap();
            let b = run_blocks(&mut reference, &next, 64, 0.8).unwrap();
            assert_eq!(a, b, "{}", kind.ident());
        }
    }

    #[test]
    fn every_backend_fills_an_exactly_sized_buffer() {
        for kind in BACKENDS {
            for ratio in [0.5, 48_000.0 / 44_100.0, 3.0] {
                let mut re = kind.init(ratio, SimdStrategy::Auto).unwrap();
                let input = vec![0.1f32; 97 * 2];
                let frames = re.output_frames_for(97, ratio).unwrap();
                let mut output = vec![0.0f32; frames * 2];
                let mut request = ResampleRequest::new(&input, &mut output, ratio);
                re.process(&mut request).unwrap();
                assert_eq!(request.output_frames, frames, "{}", kind.ident());

                let next = re.output_frames_for(97, ratio).unwrap();
                let mut short = vec![0.0f32; next.saturating_sub(1) * 2];
                let mut request = ResampleRequest::new(&input, &mut short, ratio);
                if next > 0 {
                    assert!(matches!(
                        re.process(&mut request),
                        Err(ResamplerError::OutputTooSmall { .. })
                    ));
                }
            }
        }
    }
}
