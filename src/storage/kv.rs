use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::warn;

/// Storage file name in the storage directory
const STORAGE_FILE: &str = "session.json";

/// String key-value persistence boundary.
///
/// Reads and writes are infallible at this interface: a backend that cannot
/// persist logs the problem and carries on with its in-memory view, so a
/// flaky disk degrades durability rather than breaking the session layer.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    /// Write several keys under a single lock acquisition, so concurrent
    /// readers never observe a torn subset.
    fn set_many(&self, entries: &[(&str, &str)]);

    /// Remove several keys under a single lock acquisition.
    fn remove_many(&self, keys: &[&str]);
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }

    fn set_many(&self, pairs: &[(&str, &str)]) {
        if let Ok(mut entries) = self.entries.lock() {
            for (key, value) in pairs {
                entries.insert((*key).to_string(), (*value).to_string());
            }
        }
    }

    fn remove_many(&self, keys: &[&str]) {
        if let Ok(mut entries) = self.entries.lock() {
            for key in keys {
                entries.remove(*key);
            }
        }
    }
}

/// File-backed storage: a single JSON document in the storage directory,
/// rewritten on every mutation.
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open storage under the given directory, creating it if needed.
    /// A missing or corrupt storage file starts empty instead of failing.
    pub fn open(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory: {}", dir.display()))?;
        let path = dir.join(STORAGE_FILE);

        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Corrupt storage file, starting empty");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) {
        let contents = match serde_json::to_string_pretty(entries) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(error = %e, "Failed to serialize storage");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, contents) {
            warn!(path = %self.path.display(), error = %e, "Failed to persist storage");
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
            self.persist(&entries);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            if entries.remove(key).is_some() {
                self.persist(&entries);
            }
        }
    }

    fn set_many(&self, pairs: &[(&str, &str)]) {
        if let Ok(mut entries) = self.entries.lock() {
            for (key, value) in pairs {
                entries.insert((*key).to_string(), (*value).to_string());
            }
            // One rewrite for the whole batch: a crash mid-update cannot
            // leave a partially written pair on disk.
            self.persist(&entries);
        }
    }

    fn remove_many(&self, keys: &[&str]) {
        if let Ok(mut entries) = self.entries.lock() {
            let mut removed = false;
            for key in keys {
                removed |= entries.remove(*key).is_some();
            }
            if removed {
                self.persist(&entries);
            }
        }
    }
}
