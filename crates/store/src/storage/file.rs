//! # Filesystem-backed storage
//!
//! [`FileStorage`] persists every key as a JSON file inside one data
//! directory so that the stores survive process restarts.
//!
//! ## Layout
//!
//! ```text
//! <data_dir>/
//! ├── clients.json
//! ├── products.json
//! ├── sells.json
//! └── users.json
//! ```
//!
//! Writes go to `<key>.json.tmp` first and are renamed over the target, so a
//! reader never observes a half-written file. Two processes writing the same
//! key still race: the last rename wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{Storage, StorageError};

/// Directory-backed storage.
#[derive(Clone, Debug)]
pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    /// Use `base` as the data directory. The directory is created on first
    /// write.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// The data directory.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.base.join(format!("{key}.json")))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_owned(),
        source,
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.base).map_err(|e| io_error(key, e))?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|e| io_error(key, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| io_error(key, e))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("data"));

        assert!(storage.read("products").unwrap().is_none());

        storage.write("products", "[1,2,3]").unwrap();

        // Re-open from same directory
        let reopened = FileStorage::new(dir.path().join("data"));
        assert_eq!(
            reopened.read("products").unwrap().as_deref(),
            Some("[1,2,3]")
        );
        assert!(dir.path().join("data/products.json").exists());
        assert!(!dir.path().join("data/products.json.tmp").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(matches!(
            storage.write("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            storage.read(""),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
