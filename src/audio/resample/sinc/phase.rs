//! Fixed-point position within one input-sample period.
//!
//! Layout of the counter (wraps at 2^24):
//!
//! ```text
//!  31        24 23      16 15               0
//! | overflow   |  phase   |    sub-phase     |
//! ```

use crate::audio::constants::{PHASES_WRAP, SUBPHASE_BITS, SUBPHASE_MASK, SUBPHASES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseAccumulator(u32);

impl PhaseAccumulator {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Positioned on the period boundary, so the next step consumes a frame.
    pub const fn at_wrap() -> Self {
        Self(PHASES_WRAP)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Ticks advanced per output frame; `ratio` must already be validated.
    pub fn step_for(ratio: f64) -> u32 {
        (PHASES_WRAP as f64 / ratio) as u32
    }

    /// Phase-table row, `0..=PHASES`.
    #[inline]
    pub fn phase(self) -> usize {
        (self.0 >> SUBPHASE_BITS) as usize
    }

    /// Position between `phase()` and the next row, in `[0, 1)`.
    #[inline]
    pub fn fraction(self) -> f32 {
        (self.0 & SUBPHASE_MASK) as f32 / SUBPHASES as f32
    }

    /// Distance to the next input frame, used for the newer half of the window.
    #[inline]
    pub fn mirrored(self) -> Self {
        Self(PHASES_WRAP - self.0)
    }

    #[inline]
    pub fn has_wrapped(self) -> bool {
        self.0 >= PHASES_WRAP
    }

    #[inline]
    pub fn advance(&mut self, step: u32) {
        self.0 += step;
    }

    /// Moves back by one full period after a frame has been consumed.
    #[inline]
    pub fn unwrap_period(&mut self) {
        self.0 -= PHASES_WRAP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::constants::PHASES;

    #[test]
    fn splits_fields() {
        let time = PhaseAccumulator::new((3 << 16) | 0x8000);
        assert_eq!(time.phase(), 3);
        assert_eq!(time.fraction(), 0.5);
    }

    #[test]
    fn mirror_of_zero_is_closing_row() {
        let mirrored = PhaseAccumulator::new(0).mirrored();
        assert_eq!(mirrored.phase(), PHASES);
        assert_eq!(mirrored.fraction(), 0.0);
    }

    #[test]
    fn step_matches_ratio() {
        assert_eq!(PhaseAccumulator::step_for(1.0), PHASES_WRAP);
        assert_eq!(PhaseAccumulator::step_for(2.0), PHASES_WRAP / 2);
        assert_eq!(PhaseAccumulator::step_for(0.5), PHASES_WRAP * 2);
    }

    #[test]
    fn wraps_and_unwraps() {
        let mut time = PhaseAccumulator::new(0);
        time.advance(PHASES_WRAP / 2);
        assert!(!time.has_wrapped());
        time.advance(PHASES_WRAP / 2);
        assert!(time.has_wrapped());
        time.unwrap_period();
        assert_eq!(time.raw(), 0);
        assert_eq!(PhaseAccumulator::at_wrap().raw(), PHASES_WRAP);
    }
}
