//! Polyphase coefficient tables for the windowed-sinc kernel.
//!
//! Row `i`, column `j` holds the kernel value at distance `i / PHASES + j`
//! input frames from the output position. Only one half of the symmetric
//! kernel is stored; the other half is read through the mirrored phase.

use std::f64::consts::PI;
use std::sync::OnceLock;

use tracing::debug;

use crate::audio::constants::{
    BLACKMAN_A0, BLACKMAN_A1, BLACKMAN_A2, PHASES, SIDELOBES, SINC_EPSILON,
};
use crate::common::{ResamplerError, ResamplerResult};

pub type TableRow = [f32; SIDELOBES];

static SHARED: OnceLock<SincTables> = OnceLock::new();

pub struct SincTables {
    /// `PHASES + 1` rows.
    pub phase: Vec<TableRow>,
    /// `delta[i] = phase[i + 1] - phase[i]`; the closing row is zero.
    pub delta: Vec<TableRow>,
}

impl SincTables {
    /// The process-wide tables, built on first use.
    pub fn shared() -> ResamplerResult<&'static SincTables> {
        if let Some(tables) = SHARED.get() {
            return Ok(tables);
        }
        let built = Self::build()?;
        debug!(
            "Built sinc tables: {} phases x {} sidelobes",
            PHASES, SIDELOBES
        );
        Ok(SHARED.get_or_init(|| built))
    }

    pub fn build() -> ResamplerResult<Self> {
        let rows = PHASES + 1;
        let mut phase: Vec<TableRow> = Vec::new();
        let mut delta: Vec<TableRow> = Vec::new();
        phase
            .try_reserve_exact(rows)
            .map_err(|_| ResamplerError::AllocationFailure("sinc"))?;
        delta
            .try_reserve_exact(rows)
            .map_err(|_| ResamplerError::AllocationFailure("sinc"))?;

        for i in 0..rows {
            let mut row = [0.0f32; SIDELOBES];
            for (j, value) in row.iter_mut().enumerate() {
                let position = i as f64 / PHASES as f64 + j as f64;
                let angle = PI * position;
                *value = (sinc(angle) * blackman(position / SIDELOBES as f64)) as f32;
            }
            phase.push(row);
        }

        for i in 0..rows {
            let mut row = [0.0f32; SIDELOBES];
            if i < PHASES {
                for (j, value) in row.iter_mut().enumerate() {
                    *value = phase[i + 1][j] - phase[i][j];
                }
            }
            delta.push(row);
        }

        Ok(Self { phase, delta })
    }

    /// Linearly interpolated coefficients between `row` and `row + 1`.
    #[inline]
    pub fn interpolate(&self, row: usize, fraction: f32) -> TableRow {
        let phase = &self.phase[row];
        let delta = &self.delta[row];
        let mut coeffs = [0.0f32; SIDELOBES];
        for j in 0..SIDELOBES {
            coeffs[j] = phase[j] + fraction * delta[j];
        }
        coeffs
    }
}

/// `sin(x) / x`, exactly 1 near zero.
pub fn sinc(x: f64) -> f64 {
    if x.abs() < SINC_EPSILON {
        1.0
    } else {
        x.sin() / x
    }
}

/// Three-term Blackman window over `t ∈ [-1, 1]`; 1 at the centre, 0 at both edges.
pub fn blackman(t: f64) -> f64 {
    let x = 0.5 * t + 0.5;
    BLACKMAN_A0 - BLACKMAN_A1 * (2.0 * PI * x).cos() + BLACKMAN_A2 * (4.0 * PI * x).cos()
}
