//! Configuration errors reported before a generation pass starts.

use thiserror::Error;

/// A configuration bundle that cannot drive a generation pass.
///
/// Conditions that merely degrade the output (a pool that is too small,
/// an exhausted retry budget) are not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Slot duration was zero or negative.
    #[error("slot duration must be positive, got {0} minutes")]
    NonPositiveDuration(i64),

    /// A time of day at or beyond 24:00.
    #[error("time of day out of range: {0} minutes past midnight")]
    TimeOutOfRange(u32),

    /// Time text that is not a 24-hour `HH:MM` clock value.
    #[error("invalid time of day {0:?}, expected HH:MM")]
    InvalidTime(String),

    /// Mix fraction outside [0, 1] or not a finite number.
    #[error("mix fraction must lie in [0, 1], got {0}")]
    MixOutOfRange(f64),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
