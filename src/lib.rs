//! Real-time sample-rate conversion for interleaved stereo `f32` audio.
//!
//! Three backends share one contract ([`audio::resample::Resample`]):
//!
//! | Identifier | Backend | Notes |
//! |---|---|---|
//! | `sinc` | [`audio::resample::SincResampler`] | Polyphase Blackman-windowed sinc, optional SSE kernel |
//! | `cc` | [`audio::resample::ConvolvedCosineResampler`] | Integrated raised-cosine pulse, table-free |
//! | `hermite` | [`audio::resample::HermiteResampler`] | 4-tap cubic spline |
//!
//! Backends are looked up by name through [`audio::resample::registry`];
//! [`audio::stream::ResampleStream`] ties a backend, dynamic rate control and
//! configuration together for a single audio stream.

pub mod audio;
pub mod common;
pub mod configs;

pub use audio::resample::{ResampleRequest, Resampler, ResamplerKind};
pub use common::ResamplerError;
pub use configs::Config;
