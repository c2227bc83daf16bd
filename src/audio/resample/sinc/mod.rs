//! `resample/sinc/` — polyphase Blackman-windowed sinc resampler.
//!
//! The kernel is tabulated at `PHASES` positions per input period and
//! linearly interpolated between rows, so each output frame costs two
//! coefficient interpolations and a `TAPS`-wide dot product per channel.
//! Position within the input stream is tracked by a fixed-point
//! [`PhaseAccumulator`], making output bit-exact across platforms for the
//! scalar kernel.

pub mod convolve;
pub mod phase;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod simd;
pub mod tables;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use std::sync::OnceLock;

use tracing::debug;

pub use convolve::SincHistory;
pub use phase::PhaseAccumulator;
pub use tables::SincTables;

use super::Resample;
use super::request::{ResampleRequest, stereo_frames, validate_ratio};
use crate::common::{ResamplerResult, StereoFrame};
use crate::configs::SimdStrategy;

pub const IDENT: &str = "sinc";

/// Which dot-product implementation an instance runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvolutionKernel {
    Scalar,
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    Sse,
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
static X86_HAS_SSE: OnceLock<bool> = OnceLock::new();

impl ConvolutionKernel {
    pub fn select(strategy: SimdStrategy) -> Self {
        match strategy {
            SimdStrategy::Scalar => Self::Scalar,
            SimdStrategy::Auto => Self::detect(),
        }
    }

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    fn detect() -> Self {
        let has_sse = *X86_HAS_SSE.get_or_init(|| {
            let detected = std::arch::is_x86_feature_detected!("sse");
            debug!("Detecting x86 features: SSE: {}", detected);
            detected
        });
        if has_sse { Self::Sse } else { Self::Scalar }
    }

    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    fn detect() -> Self {
        Self::Scalar
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Self::Sse => "sse",
        }
    }

    #[inline]
    fn convolve(
        self,
        tables: &SincTables,
        history: &SincHistory,
        time: PhaseAccumulator,
    ) -> StereoFrame {
        match self {
            Self::Scalar => convolve::convolve_scalar(tables, history, time),
            // SAFETY: `Sse` is only selected after runtime detection confirmed SSE.
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Self::Sse => unsafe { simd::convolve_sse(tables, history, time) },
        }
    }
}

pub struct SincResampler {
    tables: &'static SincTables,
    kernel: ConvolutionKernel,
    history: SincHistory,
    time: PhaseAccumulator,
}

impl SincResampler {
    /// The sinc kernel does not depend on the bandwidth ratio; it is only validated.
    pub fn new(bandwidth_ratio: f64, simd: SimdStrategy) -> ResamplerResult<Self> {
        validate_ratio(bandwidth_ratio)?;
        let tables = SincTables::shared()?;
        let kernel = ConvolutionKernel::select(simd);
        debug!("Sinc resampler using {} convolution kernel", kernel.name());
        Ok(Self {
            tables,
            kernel,
            history: SincHistory::default(),
            time: PhaseAccumulator::at_wrap(),
        })
    }

    pub fn kernel(&self) -> ConvolutionKernel {
        self.kernel
    }

    pub fn time(&self) -> PhaseAccumulator {
        self.time
    }
}

impl Resample for SincResampler {
    fn ident(&self) -> &'static str {
        IDENT
    }

    fn output_frames_for(&self, input_frames: usize, ratio: f64) -> ResamplerResult<usize> {
        let step = PhaseAccumulator::step_for(validate_ratio(ratio)?);
        let mut time = self.time;
        let mut remaining = input_frames;
        let mut produced = 0;

        loop {
            while time.has_wrapped() {
                if remaining == 0 {
                    return Ok(produced);
                }
                remaining -= 1;
                time.unwrap_period();
            }
            while !time.has_wrapped() {
                produced += 1;
                time.advance(step);
            }
        }
    }

    fn process(&mut self, request: &mut ResampleRequest<'_>) -> ResamplerResult<()> {
        let input_frames = request.validate()?;
        let required = self.output_frames_for(input_frames, request.ratio)?;
        request.ensure_capacity(required)?;

        let step = PhaseAccumulator::step_for(request.ratio);
        let mut frames = stereo_frames(request.input);
        let mut produced = 0;

        'stream: loop {
            while self.time.has_wrapped() {
                let Some(frame) = frames.next() else {
                    break 'stream;
                };
                self.history.push(frame);
                self.time.unwrap_period();
            }
            while !self.time.has_wrapped() {
                let out = self.kernel.convolve(self.tables, &self.history, self.time);
                request.write_frame(produced, out);
                produced += 1;
                self.time.advance(step);
            }
        }

        request.output_frames = produced;
        Ok(())
    }

    fn reset(&mut self) {
        self.history = SincHistory::default();
        self.time = PhaseAccumulator::at_wrap();
    }
}
