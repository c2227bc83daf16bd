use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ResamplerConfig {
    /// Backend identifier, matched case-insensitively.
    #[serde(default = "default_driver")]
    pub driver: String,
    #[serde(default)]
    pub simd: SimdStrategy,
}

/// Which convolution kernel the sinc backend may use.
#[derive(Debug, Deserialize, Serialize, Clone, Default, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SimdStrategy {
    /// Vector kernel when the running CPU supports it, scalar otherwise.
    #[default]
    Auto,
    /// Always the portable scalar kernel.
    Scalar,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RateControlConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum relative ratio correction applied when the device buffer is
    /// completely full or empty.
    #[serde(default = "default_rate_control_delta")]
    pub delta: f64,
    #[serde(default = "default_slowmotion_ratio")]
    pub slowmotion_ratio: f64,
    /// Rate the emulated core produces audio at (Hz).
    #[serde(default = "default_input_rate")]
    pub input_rate: f64,
    /// Native rate of the audio device (Hz).
    #[serde(default = "default_output_rate")]
    pub output_rate: f64,
}

impl Default for ResamplerConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            simd: SimdStrategy::default(),
        }
    }
}

impl Default for RateControlConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delta: default_rate_control_delta(),
            slowmotion_ratio: default_slowmotion_ratio(),
            input_rate: default_input_rate(),
            output_rate: default_output_rate(),
        }
    }
}

impl RateControlConfig {
    /// Slow motion never speeds audio up.
    pub fn normalize(&mut self) {
        if self.slowmotion_ratio.is_nan() || self.slowmotion_ratio < 1.0 {
            self.slowmotion_ratio = 1.0;
        }
    }
}

fn default_driver() -> String {
    "sinc".to_string()
}

fn default_true() -> bool {
    true
}

fn default_rate_control_delta() -> f64 {
    0.005
}

fn default_slowmotion_ratio() -> f64 {
    3.0
}

fn default_input_rate() -> f64 {
    44_100.0
}

fn default_output_rate() -> f64 {
    48_000.0
}
