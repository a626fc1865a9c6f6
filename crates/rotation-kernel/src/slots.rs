//! Slot schedule: fixed-width positions between a start and an end time.

use serde::Serialize;

use crate::config::{TimeOfDay, MINUTES_PER_DAY};
use crate::error::{ConfigError, ConfigResult};

/// One scheduled position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    /// Offset from the start day's midnight; may exceed 1440 past midnight.
    pub minute: u32,
    /// `HH:MM` on a 24-hour clock.
    pub label: String,
}

impl Slot {
    pub fn at(minute: u32) -> Self {
        Self {
            minute,
            label: clock_label(minute),
        }
    }
}

/// Format a minute offset as `HH:MM`, wrapping hours past midnight.
pub fn clock_label(minute: u32) -> String {
    format!("{:02}:{:02}", (minute / 60) % 24, minute % 60)
}

/// Build the ordered slots from `start` up to (not including) `end`.
///
/// An `end` at or before `start` is read as the following day.
pub fn build_slots(
    start: TimeOfDay,
    end: TimeOfDay,
    duration_minutes: i64,
) -> ConfigResult<Vec<Slot>> {
    if duration_minutes <= 0 {
        return Err(ConfigError::NonPositiveDuration(duration_minutes));
    }
    let step = u32::try_from(duration_minutes).unwrap_or(u32::MAX);

    let start = start.minutes();
    let mut end = end.minutes();
    if end <= start {
        end += MINUTES_PER_DAY;
    }

    let slots = (start..end)
        .step_by(step as usize)
        .map(Slot::at)
        .collect();
    Ok(slots)
}
