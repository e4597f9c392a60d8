//! File-based Key-Value Store Adapter
//!
//! Persists all keys as a single JSON object on disk, so values survive
//! restarts the way browser local storage survives reloads. Every write
//! replaces the whole file through a temporary file and rename.
//!
//! Entries written by other tools may hold any JSON value. They are kept
//! as-is and only a non-string value under the requested key is an error.
//! A file that does not parse at all is moved aside to `*.corrupt` on the
//! next write, so clearing a key always succeeds.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};

use crate::ports::{KeyValueStore, StorageError};

type Entries = Map<String, Value>;

/// Durable key-value storage in one JSON file
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Create a store backed by `path`
    ///
    /// The file and its parent directory are created on first write.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileKeyValueStore::new("./data/local_storage.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Entries, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    /// Moves an unparseable file out of the way, keeping it for inspection.
    fn set_aside(&self, reason: &str) -> Result<(), StorageError> {
        let aside = self.path.with_extension("corrupt");
        tracing::warn!(
            path = %self.path.display(),
            aside = %aside.display(),
            "Local storage file is corrupt ({}), starting a new one",
            reason
        );
        fs::rename(&self.path, &aside).map_err(|e| StorageError::Io(e.to_string()))
    }

    fn write_all(&self, values: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::Io(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(values)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| StorageError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(())
    }

    fn update<F>(&self, change: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Entries),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Io("storage lock poisoned".to_string()))?;
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(StorageError::Corrupt(reason)) => {
                self.set_aside(&reason)?;
                Entries::new()
            }
            Err(e) => return Err(e),
        };
        change(&mut values);
        self.write_all(&values)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.read_all()?.remove(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(other) => Err(StorageError::Corrupt(format!(
                "value for '{}' is not a string: {}",
                key, other
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|values| {
            values.insert(key.to_string(), Value::String(value.to_string()));
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|values| {
            values.remove(key);
        })
    }
}
