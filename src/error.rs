use thiserror::Error;

/// Errors raised while turning an instant into a sensor value.
///
/// These are never swallowed by a sensor: a value that cannot be computed is
/// surfaced to the caller instead of being replaced by a default.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("Invalid time kind: {0}")]
    InvalidTimeKind(String),

    #[error("Unknown calendar month {0}: wind speed table has no entry")]
    UnknownCalendarMonth(u32),

    #[error("Invalid sensor parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid noise standard deviation: {0}")]
    InvalidNoiseStdDev(f64),

    #[error("Invalid step: {0}")]
    InvalidStep(String),

    #[error("Timestamp out of range for nanosecond precision: {0}")]
    TimestampOutOfRange(String),
}

pub type SimResult<T> = std::result::Result<T, SimulationError>;
