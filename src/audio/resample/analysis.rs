//! Verification helpers shared by the backend tests: test tones, block-wise
//! driving of a backend, and the gain-corrected SNR measurement.

use super::{Resample, ResampleRequest};
use crate::common::{CHANNELS, ResamplerResult};

/// Quality of a resampled tone against its analytic counterpart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneReport {
    pub snr_db: f64,
    pub gain_db: f64,
}

/// Interleaved stereo `cos(omega * n)` for `n in 0..frames`, same on both channels.
pub fn cosine_tone(omega: f64, frames: usize) -> Vec<f32> {
    cosine_at(omega, (0..frames).map(|n| n as f64))
}

/// Interleaved stereo `cos(omega * p)` at arbitrary input positions `p`.
pub fn cosine_at(omega: f64, positions: impl Iterator<Item = f64>) -> Vec<f32> {
    positions
        .flat_map(|p| {
            let s = (omega * p).cos() as f32;
            [s, s]
        })
        .collect()
}

/// Feeds `input` through `resampler` in blocks of `block_frames`, sizing each
/// output buffer exactly, and returns everything produced.
pub fn run_blocks<R: Resample + ?Sized>(
    resampler: &mut R,
    input: &[f32],
    block_frames: usize,
    ratio: f64,
) -> ResamplerResult<Vec<f32>> {
    let mut produced = Vec::new();
    let mut scratch = Vec::new();

    for block in input.chunks(block_frames.max(1) * CHANNELS) {
        let frames = resampler.output_frames_for(block.len() / CHANNELS, ratio)?;
        scratch.clear();
        scratch.resize(frames * CHANNELS, 0.0);

        let mut request = ResampleRequest::new(block, &mut scratch, ratio);
        resampler.process(&mut request)?;
        produced.extend_from_slice(request.produced());
    }

    Ok(produced)
}

/// `gain = sqrt(Σr² / Σo²)`, `SNR = 10·log10(Σo² / Σ(r/gain − o)²)`.
///
/// Compares the overlapping prefix of both signals.
pub fn measure(original: &[f32], resampled: &[f32]) -> ToneReport {
    let len = original.len().min(resampled.len());
    let original = &original[..len];
    let resampled = &resampled[..len];

    let power_original: f64 = original.iter().map(|&s| (s as f64).powi(2)).sum();
    let power_resampled: f64 = resampled.iter().map(|&s| (s as f64).powi(2)).sum();
    let gain = (power_resampled / power_original).sqrt();

    let noise: f64 = original
        .iter()
        .zip(resampled)
        .map(|(&o, &r)| (r as f64 / gain - o as f64).powi(2))
        .sum();

    let snr_db = if noise > 0.0 {
        10.0 * (power_original / noise).log10()
    } else {
        f64::INFINITY
    };

    ToneReport {
        snr_db,
        gain_db: 20.0 * gain.log10(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_signals_are_noise_free() {
        let tone = cosine_tone(0.1, 256);
        let report = measure(&tone, &tone);
        assert!(report.snr_db.is_infinite());
        assert!(report.gain_db.abs() < 1e-9);
    }

    #[test]
    fn gain_is_compensated() {
        let tone = cosine_tone(0.1, 256);
        let quiet: Vec<f32> = tone.iter().map(|s| s * 0.5).collect();
        let report = measure(&tone, &quiet);
        assert!(report.snr_db > 100.0);
        assert!((report.gain_db + 6.0206).abs() < 1e-3);
    }

    #[test]
    fn tone_is_interleaved_stereo() {
        let tone = cosine_tone(std::f64::consts::PI, 3);
        assert_eq!(tone, vec![1.0, 1.0, -1.0, -1.0, 1.0, 1.0]);
    }
}
