//! Storage ports standing in for browser session storage and cookies.
//!
//! Engine components only talk to [`KeyValueStore`] and [`CookieStore`];
//! [`MemoryStore`] is the in-memory double, [`FileStore`] persists to disk
//! and [`KvCookieJar`] layers cookie semantics over any key-value store.

pub mod cookie_jar;
pub mod file_store;
pub mod memory_store;

pub use cookie_jar::{cookie_value, Cookie, KvCookieJar, SameSite};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::StorageError;
use std::sync::Arc;

/// Session-storage style string map
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Cookie access by name
pub trait CookieStore {
    /// Raw (still percent-encoded) value of an unexpired cookie
    fn get(&self, name: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, cookie: &Cookie) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: CookieStore + ?Sized> CookieStore for &T {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        (**self).get(name)
    }

    fn set(&self, cookie: &Cookie) -> Result<(), StorageError> {
        (**self).set(cookie)
    }
}

impl<T: CookieStore + ?Sized> CookieStore for Arc<T> {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        (**self).get(name)
    }

    fn set(&self, cookie: &Cookie) -> Result<(), StorageError> {
        (**self).set(cookie)
    }
}

/// Read and deserialize a JSON entry. A missing key is `Ok(None)`.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize a value and store it under `key`
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
