//! Entity repositories over persistent cells.
//!
//! # Keys
//!
//! - `clients` - [`ClientRepository`]
//! - `products` - [`ProductRepository`]
//! - `sells` - [`SellRepository`] (mutated only through the sales service)
//! - `users` - [`UserRepository`]
//!
//! Each repository owns exactly one [`PersistentCell`] holding the full list
//! of its records in insertion order. Every mutation rewrites the whole list.
//! Updates and deletes of unknown IDs are not errors: they return `Ok(None)`
//! after persisting the unchanged list.

pub mod clients;
pub mod products;
pub mod sells;
pub mod users;

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tiny_erp_core::{ClientId, ProductId, SellId, UserId};

use crate::error::StoreError;
use crate::models::{Client, Product, Sell, User};
use crate::storage::{PersistentCell, Storage};

pub use clients::ClientRepository;
pub use products::ProductRepository;
pub use sells::SellRepository;
pub use users::UserRepository;

/// A record kind stored as one JSON array under a fixed key.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Identifier type.
    type Id: Copy + Eq + Display;

    /// Storage key of the list.
    const KEY: &'static str;

    /// Identifier of this record.
    fn id(&self) -> Self::Id;

    /// Creation timestamp, used by date-range reports.
    fn created_at(&self) -> DateTime<Utc>;
}

impl Entity for Client {
    type Id = ClientId;
    const KEY: &'static str = "clients";

    fn id(&self) -> ClientId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Product {
    type Id = ProductId;
    const KEY: &'static str = "products";

    fn id(&self) -> ProductId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Sell {
    type Id = SellId;
    const KEY: &'static str = "sells";

    fn id(&self) -> SellId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for User {
    type Id = UserId;
    const KEY: &'static str = "users";

    fn id(&self) -> UserId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Ordered list of records of one kind, backed by a persistent cell.
#[derive(Debug)]
pub struct EntityStore<E, S> {
    cell: PersistentCell<Vec<E>, S>,
}

impl<E: Entity, S: Storage> EntityStore<E, S> {
    /// Open the list stored under `E::KEY`, starting empty if nothing is stored.
    pub fn open(storage: S) -> Self {
        Self {
            cell: PersistentCell::open(storage, E::KEY, Vec::new()),
        }
    }

    /// All records in insertion order.
    #[must_use]
    pub fn list(&self) -> &[E] {
        self.cell.get()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cell.get().len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cell.get().is_empty()
    }

    /// Find a record by ID.
    #[must_use]
    pub fn get(&self, id: E::Id) -> Option<&E> {
        self.cell.get().iter().find(|record| record.id() == id)
    }

    /// Append `record` and persist the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be persisted.
    pub fn insert(&mut self, record: E) -> Result<E, StoreError> {
        let created = record.clone();
        self.cell.update(|records| records.push(record))?;
        Ok(created)
    }

    /// Apply `f` to the record with `id` and persist the list.
    ///
    /// Returns the modified record, or `None` if no record has that ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be persisted.
    pub fn modify(&mut self, id: E::Id, f: impl FnOnce(&mut E)) -> Result<Option<E>, StoreError> {
        self.cell.update(|records| {
            records.iter_mut().find(|record| record.id() == id).map(|record| {
                f(record);
                record.clone()
            })
        })
    }

    /// Remove the first record with `id` and persist the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be persisted.
    pub fn remove(&mut self, id: E::Id) -> Result<Option<E>, StoreError> {
        self.cell.update(|records| {
            records
                .iter()
                .position(|record| record.id() == id)
                .map(|index| records.remove(index))
        })
    }

    /// Re-read the list from storage.
    pub fn reload(&mut self) {
        self.cell.reload();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    fn rejected(key: &str) -> StorageError {
        StorageError::Io {
            key: key.to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        }
    }

    /// Backend whose writes always fail.
    pub(crate) struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn write(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(rejected(key))
        }
    }

    /// Memory backend whose writes to selected keys can be made to fail.
    #[derive(Clone, Default)]
    pub(crate) struct FlakyStorage {
        inner: MemoryStorage,
        failing: Arc<Mutex<HashSet<String>>>,
    }

    impl FlakyStorage {
        pub(crate) fn fail(&self, key: &str) {
            self.failing.lock().unwrap().insert(key.to_owned());
        }
    }

    impl Storage for FlakyStorage {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.read(key)
        }

        fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.failing.lock().unwrap().contains(key) {
                return Err(rejected(key));
            }
            self.inner.write(key, value)
        }
    }

    fn user(name: &str) -> User {
        User::from_input(
            crate::models::UserInput {
                name: name.to_string(),
                email: format!("{name}@example.com"),
                role: tiny_erp_core::UserRole::User,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut store = EntityStore::<User, _>::open(MemoryStorage::new());
        let a = store.insert(user("a")).unwrap();
        let b = store.insert(user("b")).unwrap();

        let ids: Vec<_> = store.list().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn test_remove_missing_keeps_list() {
        let storage = MemoryStorage::new();
        let mut store = EntityStore::<User, _>::open(storage.clone());
        store.insert(user("a")).unwrap();
        let before = store.list().to_vec();

        assert!(store.remove(UserId::generate()).unwrap().is_none());
        assert_eq!(store.list(), before.as_slice());
        assert!(storage.read("users").unwrap().is_some());
    }

    #[test]
    fn test_flaky_storage_fails_only_selected_keys() {
        let storage = FlakyStorage::default();
        let mut users = EntityStore::<User, _>::open(storage.clone());
        let mut sells = EntityStore::<Sell, _>::open(storage.clone());
        storage.fail("sells");

        assert!(users.insert(user("a")).is_ok());
        assert!(sells.remove(tiny_erp_core::SellId::generate()).is_err());
    }

    #[test]
    fn test_failed_write_leaves_list_untouched() {
        let mut store = EntityStore::<User, _>::open(ReadOnlyStorage);

        let result = store.insert(user("a"));

        assert!(matches!(result, Err(StoreError::Storage(_))));
        assert!(store.is_empty());
    }
}
