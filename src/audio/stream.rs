//! Per-stream driver: owns the selected backend, the rate controller and
//! the output scratch buffer, and feeds one block of core audio at a time.

use tracing::{debug, warn};

use crate::audio::rate_control::RateControl;
use crate::audio::resample::{BackendCursor, Resample, ResampleRequest, Resampler, reinitialize};
use crate::common::{CHANNELS, Direction, ResamplerError, ResamplerResult};
use crate::configs::{Config, SimdStrategy};

pub struct ResampleStream {
    cursor: BackendCursor,
    resampler: Option<Resampler>,
    rate: RateControl,
    simd: SimdStrategy,
    output: Vec<f32>,
}

impl ResampleStream {
    pub fn from_config(config: &Config) -> ResamplerResult<Self> {
        let cursor = BackendCursor::new(&config.resampler.driver)?;
        let rate = RateControl::new(&config.rate_control)?;

        let mut stream = Self {
            cursor,
            resampler: None,
            rate,
            simd: config.resampler.simd,
            output: Vec::new(),
        };
        stream.reinit()?;
        Ok(stream)
    }

    /// Identifier of the selected backend.
    pub fn backend(&self) -> &'static str {
        self.cursor.name()
    }

    /// Whether a backend instance is currently live.
    pub fn is_ready(&self) -> bool {
        self.resampler.is_some()
    }

    pub fn rate_control(&self) -> &RateControl {
        &self.rate
    }

    /// Selects the neighbouring backend and rebuilds the instance.
    /// Returns `Ok(false)` when already at the end of the list.
    pub fn switch_backend(&mut self, direction: Direction) -> ResamplerResult<bool> {
        if !self.cursor.step(direction) {
            return Ok(false);
        }
        self.reinit()?;
        Ok(true)
    }

    fn reinit(&mut self) -> ResamplerResult<()> {
        reinitialize(
            &mut self.resampler,
            self.cursor.name(),
            self.rate.base_ratio(),
            self.simd,
        )
    }

    /// Resamples one block of interleaved stereo input.
    ///
    /// `buffer_free` / `buffer_size` describe the audio device buffer and
    /// drive rate control.
    pub fn process(
        &mut self,
        input: &[f32],
        buffer_free: usize,
        buffer_size: usize,
        slowmotion: bool,
    ) -> ResamplerResult<&[f32]> {
        let Some(resampler) = self.resampler.as_mut() else {
            warn!("No {} resampler instance; dropping audio block", self.cursor.name());
            return Err(ResamplerError::UnknownBackend(self.cursor.name().to_string()));
        };

        let ratio = self.rate.ratio(buffer_free, buffer_size, slowmotion);
        let frames = resampler.output_frames_for(input.len() / CHANNELS, ratio)?;
        if self.output.len() < frames * CHANNELS {
            debug!("Growing resampler output buffer to {} frames", frames);
            self.output.resize(frames * CHANNELS, 0.0);
        }

        let mut request = ResampleRequest::new(input, &mut self.output, ratio);
        resampler.process(&mut request)?;
        let produced = request.output_frames * CHANNELS;

        Ok(&self.output[..produced])
    }
}
