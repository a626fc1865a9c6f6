//! The configuration bundle consumed by a generation pass.

use std::collections::HashSet;
use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time of day with minute resolution.
///
/// Serialized as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    minutes: u32,
}

impl TimeOfDay {
    /// Build from minutes since midnight; must be below 1440.
    pub fn from_minutes(minutes: u32) -> ConfigResult<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(ConfigError::TimeOutOfRange(minutes));
        }
        Ok(Self { minutes })
    }

    /// Parse `HH:MM` text.
    pub fn parse(text: &str) -> ConfigResult<Self> {
        let time = NaiveTime::parse_from_str(text.trim(), "%H:%M")
            .map_err(|_| ConfigError::InvalidTime(text.to_string()))?;
        Self::from_minutes(time.hour() * 60 + time.minute())
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Everything a generation pass depends on.
///
/// Equal bundles always produce equal tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// First slot starts here.
    pub start: TimeOfDay,
    /// Slots stop before this time; at or before `start` means the next day.
    pub end: TimeOfDay,
    /// Width of one slot in minutes.
    pub duration_minutes: i64,
    pub seed: u32,
    /// Candidate labels, de-duplicated before use.
    pub candidates: Vec<String>,
    /// Probability of attempting a mixed pair for a slot (0.0 to 1.0).
    ///
    /// Also the index fairness fraction applied to pair members.
    pub mix_fraction: f64,
    /// Replace the last slot with the terminal marker.
    pub end_with_all: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            start: TimeOfDay { minutes: 21 * 60 },
            end: TimeOfDay { minutes: 3 * 60 },
            duration_minutes: 30,
            seed: 0,
            candidates: Vec::new(),
            mix_fraction: 0.25,
            end_with_all: true,
        }
    }
}

impl GenerationConfig {
    /// Check the bundle can drive a pass.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.duration_minutes <= 0 {
            return Err(ConfigError::NonPositiveDuration(self.duration_minutes));
        }
        if !self.mix_fraction.is_finite() || !(0.0..=1.0).contains(&self.mix_fraction) {
            return Err(ConfigError::MixOutOfRange(self.mix_fraction));
        }
        Ok(())
    }
}

/// Trim, drop blanks and de-duplicate, keeping first occurrences in order.
pub fn normalize_candidates<I, S>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let trimmed = candidate.as_ref().trim();
            if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(TimeOfDay::parse("21:00").unwrap().minutes(), 1260);
        assert_eq!(TimeOfDay::parse("03:30").unwrap().minutes(), 210);
        assert_eq!(TimeOfDay::parse(" 00:00 ").unwrap().minutes(), 0);
        assert_eq!(TimeOfDay::parse("23:59").unwrap().to_string(), "23:59");
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert!(matches!(
            TimeOfDay::parse("24:00"),
            Err(ConfigError::InvalidTime(_))
        ));
        assert!(matches!(
            TimeOfDay::parse("noon"),
            Err(ConfigError::InvalidTime(_))
        ));
        assert!(matches!(
            TimeOfDay::parse(""),
            Err(ConfigError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_from_minutes_range() {
        assert!(TimeOfDay::from_minutes(1439).is_ok());
        assert_eq!(
            TimeOfDay::from_minutes(1440),
            Err(ConfigError::TimeOutOfRange(1440))
        );
    }

    #[test]
    fn test_time_serializes_as_clock_text() {
        let time = TimeOfDay::from_minutes(9 * 60 + 5).unwrap();
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"09:05\"");
        let back: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, time);
        assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = GenerationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.start.to_string(), "21:00");
        assert_eq!(config.end.to_string(), "03:00");
    }

    #[test]
    fn test_validate_duration_and_mix() {
        let config = GenerationConfig {
            duration_minutes: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveDuration(0)));

        let config = GenerationConfig {
            duration_minutes: -15,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveDuration(-15))
        );

        for mix in [-0.1, 1.5, f64::NAN] {
            let config = GenerationConfig {
                mix_fraction: mix,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::MixOutOfRange(_))
            ));
        }

        for mix in [0.0, 1.0] {
            let config = GenerationConfig {
                mix_fraction: mix,
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_normalize_candidates() {
        let normalized = normalize_candidates([" Ann", "Bob", "", "Ann", "  ", "Cid ", "Bob"]);
        assert_eq!(normalized, vec!["Ann", "Bob", "Cid"]);
    }
}
