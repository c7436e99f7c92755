//! Durable key-value storage backends.
//!
//! A [`Storage`] maps a string key to a string value, the way a browser's
//! local storage does. Every entity kind lives under one fixed key
//! (`clients`, `products`, `sells`, `users`) as a JSON array.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - process-local map, used by tests
//! - [`FileStorage`] - one `<key>.json` file per key inside a data directory
//!
//! Backends are cheap `Clone` handles: all clones of a [`MemoryStorage`] share
//! one map, and all clones of a [`FileStorage`] point at the same directory.

mod cell;
mod file;
mod memory;

use std::sync::Arc;

use thiserror::Error;

pub use cell::PersistentCell;
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the underlying medium failed.
    #[error("I/O error on key `{key}`: {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
}

/// A durable string-to-string map.
pub trait Storage {
    /// Read the value stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key` in full.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}
