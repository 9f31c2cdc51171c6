//! Persistent preference store
//!
//! A small string-keyed store where every value is a JSON document. The whole
//! map is written back to disk on each change and read in full at startup.
//! Unreadable data never fails the app: a corrupt file starts empty and a
//! corrupt value reads as absent.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::error::ClientError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

pub const KEY_THEME: &str = "theme";
pub const KEY_HIGH_CONTRAST: &str = "highContrast";
pub const KEY_HISTORY: &str = "promptHistory";

/// Handle passed to every component that persists state. The mutex
/// serializes read-modify-write cycles between them.
pub type StoreHandle = Arc<Mutex<PreferenceStore>>;

#[derive(Debug, Default)]
pub struct PreferenceStore {
    /// `None` keeps everything in memory
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl PreferenceStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store at `path`; a missing or corrupt file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %path.display(), "preferences reset: {}", e);
                BTreeMap::new()
            }
        };
        Self {
            path: Some(path),
            entries,
        }
    }

    pub fn shared(self) -> StoreHandle {
        Arc::new(Mutex::new(self))
    }

    /// Raw JSON text stored under `key`
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ClientError> {
        let Some(raw) = self.entries.get(key) else {
            return Ok(None);
        };
        serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| ClientError::Persistence {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    /// Read a value, treating corrupt data as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.try_get(key).unwrap_or_else(|e| {
            warn!("{}", e);
            None
        })
    }

    pub fn try_set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), ClientError> {
        let raw = serde_json::to_string(value).map_err(|e| ClientError::Persistence {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.entries.insert(key.to_string(), raw);
        self.flush().map_err(|e| ClientError::Persistence {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Store a value and write the snapshot. Failures are logged only.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) {
        if let Err(e) = self.try_set(key, value) {
            warn!("{}", e);
        }
    }

    fn flush(&self) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_json::to_vec_pretty(&self.entries)?)?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs").join("preferences.json");

        let mut store = PreferenceStore::open(&path);
        store.set(KEY_THEME, &"dark");
        store.set(KEY_HIGH_CONTRAST, &true);

        let reopened = PreferenceStore::open(&path);
        assert_eq!(reopened.get::<String>(KEY_THEME).as_deref(), Some("dark"));
        assert_eq!(reopened.get::<bool>(KEY_HIGH_CONTRAST), Some(true));
        assert_eq!(reopened.raw(KEY_HIGH_CONTRAST), Some("true"));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{not json").unwrap();

        let store = PreferenceStore::open(&path);
        assert!(store.get::<bool>(KEY_HIGH_CONTRAST).is_none());
    }

    #[test]
    fn test_corrupt_value_reads_as_absent() {
        let mut store = PreferenceStore::in_memory();
        store.entries.insert(KEY_HISTORY.into(), "[{broken".into());

        assert!(matches!(
            store.try_get::<Vec<String>>(KEY_HISTORY),
            Err(ClientError::Persistence { .. })
        ));
        assert!(store.get::<Vec<String>>(KEY_HISTORY).is_none());
    }
}
