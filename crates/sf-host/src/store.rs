//! JSON-file-backed key-value store.
//!
//! The demo's stand-in for the browser's local storage: one JSON object
//! per state file, written through on every set. I/O problems are
//! logged and swallowed; engagement state is never worth interrupting
//! the session for.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use sf_social::KvStore;

pub struct JsonFileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading whatever was saved there before.
    /// A missing or malformed file starts empty.
    pub fn open(path: PathBuf) -> Self {
        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                log::warn!("could not create state dir {}: {err}", parent.display());
            }
        }

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(err) => {
                    log::warn!("ignoring malformed state file {}: {err}", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self { path, entries }
    }

    fn persist(&self) {
        let raw = match serde_json::to_string_pretty(&self.entries) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("could not encode state: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, raw) {
            log::warn!("could not save state to {}: {err}", self.path.display());
        }
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
        self.persist();
    }
}
