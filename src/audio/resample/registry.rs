//! Named lookup over the fixed, ordered list of backends.

use tracing::{debug, warn};

use super::{Resample, Resampler, ResamplerKind};
use crate::common::{Direction, ResamplerError, ResamplerResult};
use crate::configs::SimdStrategy;

/// Registered backends, in menu order.
pub const BACKENDS: [ResamplerKind; 3] = [
    ResamplerKind::Sinc,
    ResamplerKind::ConvolvedCosine,
    ResamplerKind::Hermite,
];

/// Case-insensitive index of `name` in [`BACKENDS`].
pub fn find(name: &str) -> Option<usize> {
    BACKENDS
        .iter()
        .position(|kind| kind.ident().eq_ignore_ascii_case(name))
}

pub fn find_kind(name: &str) -> Option<ResamplerKind> {
    find(name).map(|index| BACKENDS[index])
}

/// Currently selected backend, owned by whoever drives the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendCursor {
    index: usize,
}

impl BackendCursor {
    pub fn new(name: &str) -> ResamplerResult<Self> {
        find(name)
            .map(|index| Self { index })
            .ok_or_else(|| ResamplerError::UnknownBackend(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        self.kind().ident()
    }

    pub fn kind(&self) -> ResamplerKind {
        BACKENDS[self.index]
    }

    /// Moves to the neighbouring backend. Returns `false` and stays put at
    /// either end of the list.
    pub fn step(&mut self, direction: Direction) -> bool {
        let target = match direction {
            Direction::Previous => self.index.checked_sub(1),
            Direction::Next => Some(self.index + 1).filter(|&i| i < BACKENDS.len()),
        };

        match target {
            Some(index) => {
                self.index = index;
                true
            }
            None => {
                warn!(
                    "Couldn't find any {} resampler backend after `{}`",
                    match direction {
                        Direction::Previous => "previous",
                        Direction::Next => "next",
                    },
                    self.name()
                );
                false
            }
        }
    }
}

/// Identifier of the backend before/after `current`; `current` itself at the ends.
pub fn cycle(current: &str, direction: Direction) -> ResamplerResult<&'static str> {
    let mut cursor = BackendCursor::new(current)?;
    cursor.step(direction);
    Ok(cursor.name())
}

/// Replaces the instance in `slot` with a fresh `name` backend.
///
/// The previous instance is always released first; on failure `slot` is
/// left empty.
pub fn reinitialize(
    slot: &mut Option<Resampler>,
    name: &str,
    bandwidth_ratio: f64,
    simd: SimdStrategy,
) -> ResamplerResult<()> {
    if let Some(previous) = slot.take() {
        debug!("Releasing {} resampler", previous.ident());
    }

    let Some(kind) = find_kind(name) else {
        warn!("Unknown resampler backend `{}`", name);
        return Err(ResamplerError::UnknownBackend(name.to_string()));
    };

    match kind.init(bandwidth_ratio, simd) {
        Ok(resampler) => {
            debug!(
                "Initialized {} resampler (bandwidth ratio {:.5})",
                kind.ident(),
                bandwidth_ratio
            );
            *slot = Some(resampler);
            Ok(())
        }
        Err(e) => {
            warn!("Failed to initialize {} resampler: {}", kind.ident(), e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find("SINC"), find("sinc"));
        assert_eq!(find("sinc"), Some(0));
        assert_eq!(find("Cc"), Some(1));
        assert_eq!(find_kind("HERMITE"), Some(ResamplerKind::Hermite));
        assert_eq!(find("lanczos"), None);
        assert_eq!(find(""), None);
    }

    #[test]
    fn cycle_walks_the_list_and_stops_at_the_ends() {
        assert_eq!(cycle("sinc", Direction::Next), Ok("cc"));
        assert_eq!(cycle("cc", Direction::Next), Ok("hermite"));
        assert_eq!(cycle("hermite", Direction::Next), Ok("hermite"));
        assert_eq!(cycle("hermite", Direction::Previous), Ok("cc"));
        assert_eq!(cycle("SINC", Direction::Previous), Ok("sinc"));
    }

    #[test]
    fn cycle_from_unknown_is_an_error() {
        assert_eq!(
            cycle("nearest", Direction::Next),
            Err(ResamplerError::UnknownBackend("nearest".into()))
        );
    }

    #[test]
    fn cursor_reports_moves() {
        let mut cursor = BackendCursor::new("cc").unwrap();
        assert!(cursor.step(Direction::Previous));
        assert_eq!(cursor.kind(), ResamplerKind::Sinc);
        assert!(!cursor.step(Direction::Previous));
        assert_eq!(cursor.name(), "sinc");
    }

    #[test]
    fn reinitialize_replaces_the_instance() {
        let mut slot = None;
        reinitialize(&mut slot, "sinc", 1.0, SimdStrategy::Auto).unwrap();
        assert_eq!(slot.as_ref().map(Resampler::kind), Some(ResamplerKind::Sinc));

        reinitialize(&mut slot, "Hermite", 1.0, SimdStrategy::Auto).unwrap();
        assert_eq!(
            slot.as_ref().map(Resampler::kind),
            Some(ResamplerKind::Hermite)
        );
    }

    #[test]
    fn failed_reinitialize_leaves_the_slot_empty() {
        let mut slot = None;
        reinitialize(&mut slot, "cc", 1.0, SimdStrategy::Auto).unwrap();

        let err = reinitialize(&mut slot, "nearest", 1.0, SimdStrategy::Auto);
        assert_eq!(err, Err(ResamplerError::UnknownBackend("nearest".into())));
        assert!(slot.is_none());

        reinitialize(&mut slot, "cc", 1.0, SimdStrategy::Auto).unwrap();
        let err = reinitialize(&mut slot, "sinc", f64::NAN, SimdStrategy::Auto);
        assert!(matches!(err, Err(ResamplerError::InvalidRatio(_))));
        assert!(slot.is_none());
    }
}
