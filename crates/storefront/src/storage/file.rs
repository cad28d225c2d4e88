//! File-backed storage backend.
//!
//! The whole store is one JSON object mapping keys to string values:
//!
//! ```json
//! {
//!   "user": "{\"name\":\"shopper\",...}",
//!   "username": "shopper"
//! }
//! ```
//!
//! The file is loaded once on open and rewritten in full (via a temporary
//! file and rename) after every `set_item`/`remove_item`. A write that fails
//! to reach disk is rolled back in memory as well.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{Storage, StorageError};

/// Storage persisted to a JSON file on disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the store at `path`. A missing file is an empty store; the file
    /// is created on the first write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read, or
    /// `StorageError::Corrupt` if it is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let items = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|source| StorageError::Corrupt {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), keys = items.len(), "Opened storage file");

        Ok(Self {
            path,
            items: RefCell::new(items),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current contents to disk.
    fn persist(&self) -> Result<(), StorageError> {
        let io_error = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        let contents =
            serde_json::to_string_pretty(&*self.items.borrow()).map_err(|source| {
                StorageError::Encode {
                    key: self.path.display().to_string(),
                    source,
                }
            })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, contents).map_err(io_error)?;
        fs::rename(&tmp, &self.path).map_err(io_error)
    }

    /// Put `key` back to `previous` after a failed write.
    fn restore(&self, key: &str, previous: Option<String>) {
        let mut items = self.items.borrow_mut();
        match previous {
            Some(value) => items.insert(key.to_owned(), value),
            None => items.remove(key),
        };
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let previous = self
            .items
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        self.persist().inspect_err(|_| self.restore(key, previous))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let removed = self.items.borrow_mut().remove(key);
        if removed.is_some() {
            self.persist().inspect_err(|_| self.restore(key, removed))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("store.json")).unwrap();
        assert_eq!(storage.get_item("users").unwrap(), None);
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set_item("username", "shopper").unwrap();
        storage.set_item("user", "{\"name\":\"shopper\"}").unwrap();
        drop(storage);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(
            reopened.get_item("username").unwrap().as_deref(),
            Some("shopper")
        );
        assert_eq!(
            reopened.get_item("user").unwrap().as_deref(),
            Some("{\"name\":\"shopper\"}")
        );
    }

    #[test]
    fn test_remove_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set_item("user", "{}").unwrap();
        storage.remove_item("user").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("user").unwrap(), None);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("store.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set_item("k", "v").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = FileStorage::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn test_failed_set_leaves_value_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("sub");
        let storage = FileStorage::open(parent.join("store.json")).unwrap();
        storage.set_item("username", "first").unwrap();

        // A regular file where the directory should be makes every write fail.
        fs::remove_dir_all(&parent).unwrap();
        fs::write(&parent, "").unwrap();

        let err = storage.set_item("username", "second").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert_eq!(storage.get_item("username").unwrap().as_deref(), Some("first"));

        assert!(storage.set_item("user", "{}").is_err());
        assert_eq!(storage.get_item("user").unwrap(), None);
    }

    #[test]
    fn test_failed_remove_keeps_value() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("sub");
        let storage = FileStorage::open(parent.join("store.json")).unwrap();
        storage.set_item("user", "{}").unwrap();

        fs::remove_dir_all(&parent).unwrap();
        fs::write(&parent, "").unwrap();

        assert!(storage.remove_item("user").is_err());
        assert_eq!(storage.get_item("user").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_empty_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "  \n").unwrap();

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("carts").unwrap(), None);
    }
}
