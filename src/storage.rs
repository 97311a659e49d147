use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dlog;
use crate::error::Result;
use crate::ports::KeyValueStore;

/// Key-value store backed by a single JSON object file.
///
/// A missing file is an empty store; every `set` rewrites the whole file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl JsonFileStore {
    pub fn open(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let raw = fs::read_to_string(path)?;
            if raw.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            HashMap::new()
        };
        dlog!("opened store file={} keys={}", path.display(), entries.len());

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
