//! Durable client-side session storage

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use common::error::{HeError, HeResult};
use serde_json::{Map, Value};

/// Durable key/value storage holding the serialized session between process runs. There is
/// exactly one logical writer (the current process) so implementations only need coarse
/// interior mutability and no cross-process coordination.
pub trait SessionStore: Send + Sync {
    /// Fetch the value stored under `key`, if any
    /// # Errors
    /// This function will return an error if the backing storage cannot be read
    fn get(&self, key: &str) -> HeResult<Option<String>>;
    /// Store `value` under `key`, overwriting any previous value
    /// # Errors
    /// This function will return an error if the backing storage cannot be written
    fn set(&self, key: &str, value: &str) -> HeResult<()>;
    /// Remove every stored entry
    /// # Errors
    /// This function will return an error if the backing storage cannot be cleared
    fn clear(&self) -> HeResult<()>;
}

impl<S> SessionStore for Arc<S>
where
    S: SessionStore + ?Sized,
{
    fn get(&self, key: &str) -> HeResult<Option<String>> {
        self.as_ref().get(key)
    }

    fn set(&self, key: &str, value: &str) -> HeResult<()> {
        self.as_ref().set(key, value)
    }

    fn clear(&self) -> HeResult<()> {
        self.as_ref().clear()
    }
}

/// In-memory [SessionStore] for tests and processes that do not outlive their session
#[derive(Default)]
pub struct MemorySessionStore {
    /// Backing map for the stored entries
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the backing map, mapping a poisoned mutex into a storage error
    fn lock(&self) -> HeResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| HeError::Storage("session store mutex poisoned".to_owned()))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> HeResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> HeResult<()> {
        self.lock()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn clear(&self) -> HeResult<()> {
        self.lock()?.clear();
        Ok(())
    }
}

/// [SessionStore] persisting entries as a single JSON object file, standing in for the browser
/// local storage of the original client
pub struct FileSessionStore {
    /// Location of the JSON object file
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store backed by the file at `path`. The file is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the stored entries, treating a missing file as an empty record
    fn read_entries(&self) -> HeResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&contents)? {
            Value::Object(entries) => Ok(entries),
            _ => Err(HeError::Storage(format!(
                "session file {} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    /// Overwrite the session file with the provided entries
    fn write_entries(&self, entries: Map<String, Value>) -> HeResult<()> {
        std::fs::write(&self.path, serde_json::to_vec(&Value::Object(entries))?)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> HeResult<Option<String>> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(key)
            .and_then(Value::as_str)
            .map(ToOwned::to_owned))
    }

    fn set(&self, key: &str, value: &str) -> HeResult<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_owned(), Value::String(value.to_owned()));
        self.write_entries(entries)
    }

    fn clear(&self) -> HeResult<()> {
        if let Err(error) = std::fs::remove_file(&self.path) {
            if error.kind() != std::io::ErrorKind::NotFound {
                return Err(error.into());
            }
        }
        Ok(())
    }
}
