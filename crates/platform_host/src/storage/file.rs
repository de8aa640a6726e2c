//! Durable key/value store backed by a single JSON map file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::kv::KeyValueStore;

/// File name used for the persisted key map inside the store root.
pub const STORE_FILE_NAME: &str = "store.json";

type StoreMap = BTreeMap<String, String>;

fn load_store_map(path: &Path) -> Result<StoreMap, String> {
    if !path.exists() {
        return Ok(StoreMap::new());
    }
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(StoreMap::new());
    }
    serde_json::from_str(&raw)
        .map_err(|err| format!("failed to parse store map {}: {err}", path.display()))
}

// A corrupt map file must not block every later write, so writers start over from empty.
fn load_store_map_for_write(path: &Path) -> Result<StoreMap, String> {
    match load_store_map(path) {
        Ok(map) => Ok(map),
        Err(err) if err.starts_with("failed to parse store map") => Ok(StoreMap::new()),
        Err(err) => Err(err),
    }
}

fn save_store_map(path: &Path, map: &StoreMap) -> Result<(), String> {
    let serialized = serde_json::to_string(map)
        .map_err(|err| format!("failed to serialize store map: {err}"))?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, serialized)
        .map_err(|err| format!("failed to write {}: {err}", staging.display()))?;
    fs::rename(&staging, path)
        .map_err(|err| format!("failed to replace {}: {err}", path.display()))
}

fn validate_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        Err("Storage key must not be empty".to_string())
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Native durable store that keeps every key in one JSON object file under a root directory.
pub struct FileKeyValueStore {
    file: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `root`, creating the directory when missing.
    ///
    /// # Errors
    ///
    /// Returns an error when the root directory cannot be created.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self, String> {
        let root = root.as_ref();
        fs::create_dir_all(root)
            .map_err(|err| format!("failed to create store dir {}: {err}", root.display()))?;
        Ok(Self {
            file: root.join(STORE_FILE_NAME),
        })
    }

    /// Returns the backing map file path.
    pub fn path(&self) -> &Path {
        &self.file
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, String> {
        validate_key(key)?;
        let map = load_store_map(&self.file)?;
        Ok(map.get(key).cloned())
    }

    fn save_raw(&self, key: &str, raw_json: &str) -> Result<(), String> {
        validate_key(key)?;
        let mut map = load_store_map_for_write(&self.file)?;
        map.insert(key.to_string(), raw_json.to_string());
        save_store_map(&self.file, &map)
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        validate_key(key)?;
        let mut map = load_store_map_for_write(&self.file)?;
        if map.remove(key).is_none() && self.file.exists() {
            return Ok(());
        }
        save_store_map(&self.file, &map)
    }
}
