pub mod constants;
pub mod rate_control;
pub mod resample;
pub mod stream;

pub use rate_control::RateControl;
pub use resample::{
    ConvolvedCosineResampler, HermiteResampler, Resample, ResampleRequest, Resampler,
    ResamplerKind, SincResampler,
};
pub use stream::ResampleStream;
