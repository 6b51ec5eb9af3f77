//! Persistent key-value storage for the session token

use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use crate::error::Error;

/// String key-value storage surviving between portal sessions
pub trait TokenStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), Error>;
}

/// In-process store, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let entries = self
            .entries
            .read()
            .map_err(|_| Error::store("memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::store("memory store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::store("memory store lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object file, created on first write
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    /// Use the file at `path`; it does not need to exist yet
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, Error> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::store(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    /// The map to update before a write; an unreadable file starts over empty.
    ///
    /// The flag is set when the file was unreadable and must be rewritten.
    fn map_for_update(&self) -> (Map<String, Value>, bool) {
        match self.read_map() {
            Ok(map) => (map, false),
            Err(e) => {
                warn!(
                    "Discarding unreadable storage file {}: {}",
                    self.path.display(),
                    e
                );
                (Map::new(), true)
            }
        }
    }

    /// Replace the file contents through a temp file in the same directory
    fn write_map(&self, map: &Map<String, Value>) -> Result<(), Error> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let text = serde_json::to_string_pretty(map)?;
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(text.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        debug!("Wrote {} key(s) to {}", map.len(), self.path.display());
        Ok(())
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>, Error> {
        self.lock
            .lock()
            .map_err(|_| Error::store("file store lock poisoned"))
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let _guard = self.guard()?;
        let map = self.read_map()?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let _guard = self.guard()?;
        let (mut map, _) = self.map_for_update();
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let _guard = self.guard()?;
        let (mut map, unreadable) = self.map_for_update();
        if map.remove(key).is_some() || unreadable {
            self.write_map(&map)?;
        }
        Ok(())
    }
}
