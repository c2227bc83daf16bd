/// A generic boxed error type.
pub type AnyError = Box<dyn std::error::Error + Send + Sync>;

/// A convenient Result alias returning `AnyError`.
pub type AnyResult<T> = std::result::Result<T, AnyError>;

/// Interleaved channel count every backend operates on.
pub const CHANNELS: usize = 2;

/// One interleaved stereo frame: `[left, right]`.
pub type StereoFrame = [f32; CHANNELS];

/// Direction used when stepping through an ordered list of backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}
