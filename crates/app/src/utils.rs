//! Utility functions for the Plott app
//!
//! Config/data locations, settings loading and small text helpers.

use shared::settings::ClientSettings;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com.local", "Plott", "Plott")
}

pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|proj| proj.config_dir().join("settings.json"))
}

/// Where the preference store keeps its snapshot.
pub fn preferences_path() -> PathBuf {
    project_dirs()
        .map(|proj| proj.data_dir().join("preferences.json"))
        .unwrap_or_else(|| PathBuf::from("preferences.json"))
}

/// Read settings from `path`; missing or unreadable files give defaults.
pub fn load_settings_from(path: &Path) -> ClientSettings {
    if path.exists() {
        match fs::read(path)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| Ok(serde_json::from_slice::<ClientSettings>(&bytes)?))
        {
            Ok(settings) => return settings,
            Err(e) => warn!(path = %path.display(), "ignoring settings file: {}", e),
        }
    }
    ClientSettings::default()
}

pub fn load_settings_or_default() -> ClientSettings {
    let settings = match config_path() {
        Some(path) => load_settings_from(&path),
        None => ClientSettings::default(),
    };
    settings.with_env_overrides()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
