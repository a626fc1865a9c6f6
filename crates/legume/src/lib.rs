//! Légume: a reproducible rotation table for an evening of time slots.
//!
//! This crate owns everything around the rotation kernel that a user touches:
//!
//! - [`settings`]: the stored settings shape and its fail-open merge
//! - [`store`]: a small file-backed key-value store for those settings
//! - [`vocabulary`]: the built-in vegetable pool used for default candidates

pub mod settings;
pub mod store;
pub mod vocabulary;

pub use settings::Settings;
pub use store::{load_settings, save_settings, SettingsStore, SETTINGS_KEY};
pub use vocabulary::{default_candidates, emblem, heading, VEGETABLES};
