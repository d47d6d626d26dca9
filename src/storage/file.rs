use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::{ClientError, ClientResult};
use crate::storage::Storage;

const STORE_FILE: &str = "local_store.json";

/// File-backed key-value storage.
///
/// Mirrors browser local storage: one JSON object of string keys and values,
/// read once at open and rewritten in full on every set. Values are small
/// (a session token and a 50-entry id list), so whole-file rewrites are fine.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Opens (or creates) the store at the default platform data location
    pub fn open_default() -> ClientResult<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| ClientError::Storage("No platform data directory".to_string()))?
            .join("cinematiq");
        Self::open_in(&dir)
    }

    /// Opens (or creates) the store inside `dir`
    pub fn open_in(dir: &Path) -> ClientResult<Self> {
        fs::create_dir_all(dir)
            .map_err(|e| ClientError::Storage(format!("Failed to create {}: {}", dir.display(), e)))?;

        let path = dir.join(STORE_FILE);
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Corrupt store file, starting empty");
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(ClientError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &HashMap<String, String>) -> ClientResult<()> {
        let json = serde_json::to_string(entries)?;
        fs::write(&self.path, json).map_err(|e| {
            ClientError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

impl Storage for FileStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }
}
