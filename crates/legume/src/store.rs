//! File-backed key-value store for persisted settings.
//!
//! The file is a JSON object mapping keys to string values. Reads never fail:
//! a missing, unreadable or corrupt file reads as an empty store.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::settings::Settings;

/// Key under which the settings record is stored.
pub const SETTINGS_KEY: &str = "legume-config";

type StoreMap = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.load_map().remove(key)
    }

    /// Store `value` under `key`, keeping every other entry.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load_map();
        map.insert(key.to_string(), value.to_string());
        self.save_map(&map)
    }

    fn load_map(&self) -> StoreMap {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No settings store to read");
                return StoreMap::new();
            }
        };
        match serde_json::from_str::<StoreMap>(&raw) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring corrupt settings store");
                StoreMap::new()
            }
        }
    }

    /// Write to a sibling temp file, then rename over the store.
    fn save_map(&self, map: &StoreMap) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let mut file =
            File::create(&tmp).with_context(|| format!("Failed to create {}", tmp.display()))?;
        file.write_all(serde_json::to_string_pretty(map)?.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

/// Default settings overlaid with whatever the store holds.
pub fn load_settings(store: &SettingsStore) -> Settings {
    let mut settings = Settings::default();
    if let Some(raw) = store.get(SETTINGS_KEY) {
        let merged = settings.merge_json(&raw);
        debug!(merged, "Loaded stored settings");
    }
    settings
}

pub fn save_settings(store: &SettingsStore, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string(settings)?;
    store.set(SETTINGS_KEY, &json)
}
