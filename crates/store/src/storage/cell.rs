//! Typed read-modify-write access to one storage key.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::Storage;
use crate::error::StoreError;

/// One named slot of durable storage holding a JSON-encoded `T`.
///
/// The stored value is read once when the cell is opened. If it is missing,
/// unreadable or not valid JSON for `T`, the cell starts from the default
/// without writing it back; the default only reaches storage with the first
/// write. Every write replaces the stored value in full, and the in-memory
/// value only changes once the backend accepted the write.
#[derive(Debug)]
pub struct PersistentCell<T, S> {
    storage: S,
    key: String,
    default: T,
    value: T,
}

impl<T, S> PersistentCell<T, S>
where
    T: Clone + Serialize + DeserializeOwned,
    S: Storage,
{
    /// Open the cell stored under `key`.
    pub fn open(storage: S, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = load(&storage, &key).unwrap_or_else(|| default.clone());
        Self {
            storage,
            key,
            default,
            value,
        }
    }

    /// Current value.
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Persist `value` and make it the current value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded or the backend rejects
    /// the write; the current value is left untouched in that case.
    pub fn set(&mut self, value: T) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&value)?;
        self.storage.write(&self.key, &encoded)?;
        debug!(key = %self.key, bytes = encoded.len(), "persisted value");
        self.value = value;
        Ok(())
    }

    /// Apply `f` to a copy of the current value and persist the result.
    ///
    /// # Errors
    ///
    /// Same as [`PersistentCell::set`].
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Result<R, StoreError> {
        let mut next = self.value.clone();
        let output = f(&mut next);
        self.set(next)?;
        Ok(output)
    }

    /// Re-read the stored value, picking up writes made through other handles.
    pub fn reload(&mut self) {
        self.value = load(&self.storage, &self.key).unwrap_or_else(|| self.default.clone());
    }
}

fn load<T: DeserializeOwned, S: Storage>(storage: &S, key: &str) -> Option<T> {
    match storage.read(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "stored value is corrupt, using default");
                None
            }
        },
        Ok(None) => {
            debug!(key, "nothing stored, using default");
            None
        }
        Err(e) => {
            warn!(key, error = %e, "failed to read stored value, using default");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_default_is_not_persisted_until_first_write() {
        let storage = MemoryStorage::new();
        let cell = PersistentCell::open(storage.clone(), "numbers", vec![1, 2]);

        assert_eq!(cell.get(), &vec![1, 2]);
        assert!(storage.read("numbers").unwrap().is_none());
    }

    #[test]
    fn test_set_replaces_stored_value() {
        let storage = MemoryStorage::new();
        let mut cell = PersistentCell::open(storage.clone(), "numbers", Vec::<i32>::new());

        cell.set(vec![3]).unwrap();
        cell.set(vec![4, 5]).unwrap();

        assert_eq!(storage.read("numbers").unwrap().as_deref(), Some("[4,5]"));

        let reopened = PersistentCell::open(storage, "numbers", Vec::<i32>::new());
        assert_eq!(reopened.get(), &vec![4, 5]);
    }

    #[test]
    fn test_corrupt_value_falls_back_to_default() {
        let storage = MemoryStorage::new();
        storage.write("numbers", "{not json").unwrap();

        let mut cell = PersistentCell::open(storage.clone(), "numbers", vec![7]);
        assert_eq!(cell.get(), &vec![7]);

        cell.update(|v| v.push(8)).unwrap();
        assert_eq!(storage.read("numbers").unwrap().as_deref(), Some("[7,8]"));
    }

    #[test]
    fn test_wrong_shape_falls_back_to_default() {
        let storage = MemoryStorage::new();
        storage.write("numbers", r#"{"a":1}"#).unwrap();

        let cell = PersistentCell::open(storage, "numbers", Vec::<i32>::new());
        assert!(cell.get().is_empty());
    }

    #[test]
    fn test_update_returns_closure_output() {
        let mut cell = PersistentCell::open(MemoryStorage::new(), "numbers", vec![1, 2, 3]);
        let len = cell.update(|v| {
            v.retain(|n| *n != 2);
            v.len()
        });
        assert_eq!(len.unwrap(), 2);
        assert_eq!(cell.get(), &vec![1, 3]);
    }

    #[test]
    fn test_reload_sees_other_writers() {
        let storage = MemoryStorage::new();
        let mut first = PersistentCell::open(storage.clone(), "numbers", Vec::<i32>::new());
        let mut second = PersistentCell::open(storage, "numbers", Vec::<i32>::new());

        second.set(vec![42]).unwrap();
        assert!(first.get().is_empty());

        first.reload();
        assert_eq!(first.get(), &vec![42]);
    }
}
