//! Stored settings and their conversion into a kernel configuration.
//!
//! Settings are kept in the loose, user-facing shape (clock text, percent mix,
//! newline-separated candidates). Stored data is merged field by field, so a
//! damaged or outdated record never prevents the program from starting.

use rotation_kernel::{normalize_candidates, ConfigResult, GenerationConfig, TimeOfDay};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::vocabulary::{default_candidates, DEFAULT_CANDIDATE_COUNT};

const MAX_MIX_PERCENT: u32 = 100;

/// User settings in their persisted form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`; at or before the start means the next day.
    pub end_time: String,
    /// Slot width in minutes.
    pub duration: i64,
    pub seed: u32,
    /// One candidate per line.
    pub candidates: String,
    pub end_with_all: bool,
    /// Pair probability in percent.
    pub mix: u32,
}

impl Default for Settings {
    /// Fresh settings with a random seed.
    fn default() -> Self {
        Self::with_seed(random_seed())
    }
}

impl Settings {
    /// Default settings whose candidates are drawn from `seed`.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            start_time: "21:00".to_string(),
            end_time: "03:00".to_string(),
            duration: 30,
            seed,
            candidates: default_candidates(seed, DEFAULT_CANDIDATE_COUNT).join("\n"),
            end_with_all: true,
            mix: 25,
        }
    }

    /// Replace the candidates with a fresh vocabulary draw for the current seed.
    pub fn reroll_candidates(&mut self) {
        self.candidates = default_candidates(self.seed, DEFAULT_CANDIDATE_COUNT).join("\n");
    }

    /// Merge a stored JSON record into these settings.
    ///
    /// Only known fields are taken; a field with an unusable value (wrong
    /// type, unparsable clock time, non-positive duration, mix above 100) is
    /// skipped and the current value kept. Text that is not a JSON object changes
    /// nothing. Returns how many fields were merged.
    pub fn merge_json(&mut self, raw: &str) -> usize {
        let parsed: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable stored settings");
                return 0;
            }
        };
        let Value::Object(fields) = parsed else {
            warn!("Ignoring stored settings that are not an object");
            return 0;
        };

        let mut merged = 0;
        for (key, value) in fields {
            let applied = match key.as_str() {
                "startTime" => apply(&mut self.start_time, clock_text(&value)),
                "endTime" => apply(&mut self.end_time, clock_text(&value)),
                "duration" => apply(
                    &mut self.duration,
                    lenient_int(&value).filter(|minutes| *minutes > 0),
                ),
                "seed" => apply(
                    &mut self.seed,
                    value.as_u64().and_then(|v| u32::try_from(v).ok()),
                ),
                "candidates" => apply(&mut self.candidates, text(&value)),
                "endWithAll" => apply(&mut self.end_with_all, value.as_bool()),
                "mix" => apply(
                    &mut self.mix,
                    lenient_int(&value)
                        .and_then(|v| u32::try_from(v).ok())
                        .filter(|percent| *percent <= MAX_MIX_PERCENT),
                ),
                _ => {
                    debug!(key = %key, "Ignoring unknown settings field");
                    continue;
                }
            };
            if applied {
                merged += 1;
            } else {
                warn!(key = %key, value = %value, "Skipping malformed settings field");
            }
        }
        merged
    }

    /// Build the kernel configuration these settings describe.
    pub fn to_generation_config(&self) -> ConfigResult<GenerationConfig> {
        Ok(GenerationConfig {
            start: TimeOfDay::parse(&self.start_time)?,
            end: TimeOfDay::parse(&self.end_time)?,
            duration_minutes: self.duration,
            seed: self.seed,
            candidates: normalize_candidates(self.candidates.lines()),
            mix_fraction: f64::from(self.mix) / 100.0,
            end_with_all: self.end_with_all,
        })
    }
}

/// A seed from the thread-local generator.
pub fn random_seed() -> u32 {
    rand::random()
}

fn apply<T>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Text that parses as an `HH:MM` time of day.
fn clock_text(value: &Value) -> Option<String> {
    text(value).filter(|s| TimeOfDay::parse(s).is_ok())
}

/// Integers as numbers or numeric text; fractional parts are dropped.
fn lenient_int(value: &Value) -> Option<i64> {
    let float = match value {
        Value::Number(n) => return n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(int) = s.parse::<i64>() {
                return Some(int);
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    truncate(float)
}

fn truncate(value: f64) -> Option<i64> {
    (value.is_finite() && value.abs() < i64::MAX as f64).then(|| value.trunc() as i64)
}
