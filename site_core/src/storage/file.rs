use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::KeyValueStorage;
use crate::error::{AppError, Result};

/// Storage persisted as one JSON object on disk. Every write rewrites the file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the file exists but is not a JSON object of strings.
    fn read_entries(&self) -> Result<Option<BTreeMap<String, String>>> {
        if !self.path.exists() {
            return Ok(Some(BTreeMap::new()));
        }

        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Some(BTreeMap::new()));
        }

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(Some(entries)),
            Err(e) => {
                warn!("Storage file {} is not a JSON object: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    pub fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    /// Moves an unreadable file aside so the next write does not destroy it.
    fn quarantine(&self) -> Result<()> {
        let target = self.corrupt_path();
        std::fs::rename(&self.path, &target).map_err(|e| {
            AppError::Storage(format!("Failed to move {} aside: {}", self.path.display(), e))
        })?;
        warn!(
            "Moved unreadable storage file {} to {}, starting empty",
            self.path.display(),
            target.display()
        );
        Ok(())
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let serialized = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, serialized)
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", self.path.display(), e)))?;
        debug!("Wrote {} storage entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_entries()?.and_then(|mut entries| entries.remove(key)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut entries = match self.read_entries()? {
            Some(entries) => entries,
            None => {
                self.quarantine()?;
                BTreeMap::new()
            }
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}
