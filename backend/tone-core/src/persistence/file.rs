use super::PreferenceStore;
use crate::error::StoreError;

use common::ErrorLocation;

use std::collections::BTreeMap;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use log::{debug, info};

const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Preferences persisted as a flat JSON object in `{dir}/preferences.json`.
///
/// The whole map is cached in memory and rewritten on every mutation with
/// temp file + rename, so a crash never leaves a half-written file.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store in `dir`, reading any existing preferences file.
    ///
    /// A missing file is an empty store. The directory is created lazily on
    /// first write.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        let path = dir.join(PREFERENCES_FILE_NAME);

        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|e| StoreError::Read {
                location: ErrorLocation::from(Location::caller()),
                path: path.clone(),
                source: e,
            })?;

            let entries: BTreeMap<String, String> =
                serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
                    location: ErrorLocation::from(Location::caller()),
                    path: path.clone(),
                    reason: e.to_string(),
                })?;

            info!(
                "Preferences loaded from {} ({} entries)",
                path.display(),
                entries.len()
            );
            entries
        } else {
            debug!("No preferences file at {}, starting empty", path.display());
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[track_caller]
    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>, StoreError> {
        self.entries.lock().map_err(|e| StoreError::Poisoned {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| StoreError::Write {
                location: ErrorLocation::from(Location::caller()),
                path: dir.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(entries).map_err(|e| StoreError::Serialize {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        let temp_path = self.path.with_extension("json.tmp");

        std::fs::write(&temp_path, json).map_err(|e| StoreError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| StoreError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.lock()?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)?;
        debug!("Preference '{}' saved", key);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.lock()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.flush(&entries)?;
        debug!("Preference '{}' deleted", key);
        Ok(())
    }
}
