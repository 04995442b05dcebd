use crate::engine::SpinState;

/// Reasons a `WheelConfig` is refused.
///
/// These are development-time contract violations: an engine is never built
/// from a config that fails validation, so a spin cannot start on one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("wheel has no segments")]
    NoSegments,
    #[error("spin duration must be a positive, representable number of seconds, got {0}")]
    NonPositiveDuration(f64),
    #[error("spin range is inverted: min_rotations {min} > max_rotations {max}")]
    InvalidSpinRange { min: u32, max: u32 },
    #[error("segment id {0:?} appears more than once")]
    DuplicateSegmentId(String),
    #[error("segment {id:?} has a non-finite weight")]
    InvalidWeight { id: String },
    #[error("jitter factor must be finite and non-negative, got {0}")]
    InvalidJitterFactor(f64),
    #[error("peg epsilon must be finite and non-negative, got {0}")]
    InvalidPegEpsilon(f64),
    #[error("invalid drag tuning: {0}")]
    InvalidDragTuning(&'static str),
    #[error("invalid reset policy: {0}")]
    InvalidResetPolicy(&'static str),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WheelError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("wheel is busy ({0:?})")]
    Busy(SpinState),
}
