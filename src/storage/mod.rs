//! Local key-value storage
//!
//! Every persisted entity lives in one synchronous, string-valued store
//! with no expiry, mirroring the browser's `localStorage`. Values are
//! JSON-encoded text.

mod file;
#[cfg(feature = "web")]
mod web;

pub use file::FileStore;
#[cfg(feature = "web")]
pub use web::LocalStorage;

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors surfaced by storage backends
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// The backend cannot be reached (no window, quota, private mode)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a valid key-value document
    #[error("corrupt store: {0}")]
    Corrupt(String),
}

/// A synchronous string key-value store
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON value, falling back to `T::default()` when the key is absent
pub fn read_json<T, S>(store: &S, key: &str) -> crate::Result<T>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match store.get_item(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(T::default()),
    }
}

/// Encode a value as JSON and store it
pub fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> crate::Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set_item(key, &raw)?;
    Ok(())
}

/// In-memory store, used in tests and as a scratch backend
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
