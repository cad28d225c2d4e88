//! String-keyed blob storage.
//!
//! The storefront keeps all of its state in a local key-value store, the
//! same shape as browser local storage: every key holds one string, and the
//! stores above this layer put a JSON document in each.
//!
//! ## Keys
//!
//! - `users` - list of registered users
//! - `user` - the active session user, absent when logged out
//! - `carts` - list of per-user cart records
//! - `username` - last-known display name (raw string, not JSON)
//! - `products` - the product catalog
//!
//! ## Backends
//!
//! - [`MemoryStorage`] - in-process map, used by tests
//! - [`FileStorage`] - one JSON object on disk, rewritten on every write
//!
//! Writes always replace the whole value of a key. There is no cross-process
//! locking: two writers on the same file race and the last write wins.

mod file;
mod list;
mod memory;

pub use file::FileStorage;
pub use list::JsonList;
pub use memory::MemoryStorage;

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys used by the stores.
pub mod keys {
    /// Registered users.
    pub const USERS: &str = "users";

    /// Active session user.
    pub const SESSION_USER: &str = "user";

    /// Per-user cart records.
    pub const CARTS: &str = "carts";

    /// Last-known display name.
    pub const USERNAME: &str = "username";

    /// Product catalog.
    pub const PRODUCTS: &str = "products";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        /// Path of the backing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("storage file {path} is corrupt: {source}")]
    Corrupt {
        /// Path of the backing file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded for storage.
    #[error("failed to encode value for key {key}: {source}")]
    Encode {
        /// Key being written.
        key: String,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// A string-keyed blob store.
///
/// Methods take `&self` so several stores can share one backend; backends use
/// interior mutability.
pub trait Storage {
    /// Get the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode the JSON document stored under `key`.
///
/// Any failure (backend error, invalid JSON, unexpected shape) is logged and
/// treated as "no data present".
pub fn read_json<S, T>(storage: &S, key: &str) -> Option<T>
where
    S: Storage + ?Sized,
    T: DeserializeOwned,
{
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read storage key");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring unreadable value in storage");
            None
        }
    }
}

/// Read the JSON array stored under `key`, decoding each element on its own.
///
/// Elements that fail to decode are logged and kept in the returned list so
/// that writing it back preserves them. A value that is not an array at all
/// reads as an empty list, like [`read_json`].
pub fn read_json_list<S, T>(storage: &S, key: &str) -> JsonList<T>
where
    S: Storage + ?Sized,
    T: DeserializeOwned,
{
    let list: JsonList<T> = read_json(storage, key).unwrap_or_default();
    let unreadable = list.unreadable();
    if unreadable > 0 {
        tracing::warn!(key, unreadable, "Keeping unreadable records in storage");
    }
    list
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError::Encode` if the value cannot be serialized, or the
/// backend's error if the write fails.
pub fn write_json<S, T>(storage: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: Storage + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_owned(),
        source,
    })?;
    storage.set_item(key, &raw)
}
