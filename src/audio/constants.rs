//! Central constants for the resampling engine.
//!
//! All magic numbers in `src/audio/**` live here so they can be tuned in one
//! place and remain consistent across modules.

// ── Ratio bounds ─────────────────────────────────────────────────────────────

/// Smallest accepted `output_rate / input_rate`.
pub const MIN_RATIO: f64 = 1.0 / 32.0;

/// Largest accepted `output_rate / input_rate`.
pub const MAX_RATIO: f64 = 32.0;

// ── Windowed sinc ────────────────────────────────────────────────────────────

/// Bits of the fixed-point time counter used for the phase-table row.
pub const PHASE_BITS: u32 = 8;

/// Bits of the fixed-point time counter used for interpolating between rows.
pub const SUBPHASE_BITS: u32 = 16;

/// Number of phase-table rows, excluding the closing row.
pub const PHASES: usize = 1 << PHASE_BITS;

/// Sub-phase steps between two adjacent rows.
pub const SUBPHASES: u32 = 1 << SUBPHASE_BITS;

pub const SUBPHASE_MASK: u32 = SUBPHASES - 1;

/// One input-sample period in fixed-point ticks (2^24).
pub const PHASES_WRAP: u32 = 1 << (PHASE_BITS + SUBPHASE_BITS);

/// Filter taps on each side of the kernel centre.
pub const SIDELOBES: usize = 8;

/// Total taps per channel held in the sinc history window.
pub const TAPS: usize = SIDELOBES * 2;

/// Three-term Blackman window coefficients.
pub const BLACKMAN_A0: f64 = 0.42;
pub const BLACKMAN_A1: f64 = 0.5;
pub const BLACKMAN_A2: f64 = 0.08;

/// `|x|` below which `sin(x) / x` is treated as exactly 1.
pub const SINC_EPSILON: f64 = 1e-5;

// ── Hermite / convolved cosine ───────────────────────────────────────────────

/// Frames per channel kept by the 4-tap backends.
pub const SHORT_HISTORY: usize = 4;

/// Bandwidth ratios below this select the convolved-cosine downsampler.
/// Ratios drifting around 0.75 are safer for either mode than around 1.0.
pub const CC_DOWNSAMPLE_BELOW: f64 = 0.75;

/// Initial distance of the convolved-cosine upsampler (two frames of latency).
pub const CC_UPSAMPLE_START_DISTANCE: f32 = 2.0;

/// Accumulator slots of the convolved-cosine downsampler.
pub const CC_DOWNSAMPLE_SLOTS: usize = 3;
