//! Dynamic rate control: nudges the resampling ratio so the audio device
//! buffer hovers around half full, absorbing drift between the emulated
//! core's clock and the device clock.

use crate::audio::resample::validate_ratio;
use crate::common::{ResamplerError, ResamplerResult};
use crate::configs::RateControlConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct RateControl {
    base_ratio: f64,
    enabled: bool,
    delta: f64,
    slowmotion_ratio: f64,
}

impl RateControl {
    pub fn new(config: &RateControlConfig) -> ResamplerResult<Self> {
        for rate in [config.input_rate, config.output_rate] {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(ResamplerError::InvalidRatio(rate));
            }
        }
        let base_ratio = validate_ratio(config.output_rate / config.input_rate)?;

        Ok(Self {
            base_ratio,
            enabled: config.enabled,
            delta: config.delta,
            slowmotion_ratio: config.slowmotion_ratio.max(1.0),
        })
    }

    /// `output_rate / input_rate` without any correction.
    pub fn base_ratio(&self) -> f64 {
        self.base_ratio
    }

    /// Ratio for the next block given the device buffer's free space.
    ///
    /// A half-full buffer keeps the base ratio; an empty buffer (all free)
    /// raises it by `delta`, a full one lowers it by `delta`.
    pub fn ratio(&self, buffer_free: usize, buffer_size: usize, slowmotion: bool) -> f64 {
        let mut ratio = self.base_ratio;

        if self.enabled && buffer_size > 0 {
            let half_size = buffer_size as f64 / 2.0;
            let direction = (buffer_free as f64 - half_size) / half_size;
            ratio *= 1.0 + self.delta * direction;
        }

        if slowmotion {
            ratio *= self.slowmotion_ratio;
        }

        ratio
    }
}
