use thiserror::Error;

/// Failures reported by the resampler registry and backends.
///
/// Every variant is returned before the affected instance is mutated, so a
/// rejected `process` call leaves the stream exactly where it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResamplerError {
    /// No backend with this identifier is registered.
    #[error("unknown resampler backend `{0}`")]
    UnknownBackend(String),

    /// The backend could not acquire the state it needs.
    #[error("failed to allocate state for resampler backend `{0}`")]
    AllocationFailure(&'static str),

    /// Ratio is not finite or falls outside the supported range.
    #[error("invalid resampling ratio {0}")]
    InvalidRatio(f64),

    /// Input slice does not hold a whole number of stereo frames.
    #[error("input holds {0} samples, which is not a whole number of stereo frames")]
    MisalignedInput(usize),

    /// Caller-supplied output slice cannot hold the frames this call produces.
    #[error("output buffer holds {capacity} frames but {required} are needed")]
    OutputTooSmall { required: usize, capacity: usize },
}

/// Result alias used throughout the resampling engine.
pub type ResamplerResult<T> = std::result::Result<T, ResamplerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = ResamplerError::UnknownBackend("lanczos".into());
        assert_eq!(err.to_string(), "unknown resampler backend `lanczos`");

        let err = ResamplerError::OutputTooSmall {
            required: 12,
            capacity: 8,
        };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("8"));
    }
}
