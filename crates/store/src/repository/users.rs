//! User repository.

use chrono::Utc;
use tracing::info;

use tiny_erp_core::UserId;

use super::EntityStore;
use crate::error::StoreError;
use crate::models::{User, UserInput};
use crate::storage::Storage;

/// CRUD access to the `users` list.
///
/// Users carry no `updatedAt`; an update replaces the fields and keeps the
/// creation timestamp.
#[derive(Debug)]
pub struct UserRepository<S> {
    store: EntityStore<User, S>,
}

impl<S: Storage> UserRepository<S> {
    pub fn open(storage: S) -> Self {
        Self {
            store: EntityStore::open(storage),
        }
    }

    #[must_use]
    pub fn list(&self) -> &[User] {
        self.store.list()
    }

    #[must_use]
    pub fn get(&self, id: UserId) -> Option<&User> {
        self.store.get(id)
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user list cannot be persisted.
    pub fn add(&mut self, input: UserInput) -> Result<User, StoreError> {
        let user = self.store.insert(User::from_input(input, Utc::now()))?;
        info!(user_id = %user.id, role = %user.role, "user created");
        Ok(user)
    }

    /// Replace the user's name, email and role.
    ///
    /// # Errors
    ///
    /// Returns an error if the user list cannot be persisted.
    pub fn update(&mut self, id: UserId, input: UserInput) -> Result<Option<User>, StoreError> {
        self.store.modify(id, |user| user.replace(input))
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user list cannot be persisted.
    pub fn delete(&mut self, id: UserId) -> Result<Option<User>, StoreError> {
        let removed = self.store.remove(id)?;
        if removed.is_some() {
            info!(user_id = %id, "user deleted");
        }
        Ok(removed)
    }

    pub fn reload(&mut self) {
        self.store.reload();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tiny_erp_core::UserRole;

    use super::*;
    use crate::storage::MemoryStorage;

    fn input(name: &str, role: UserRole) -> UserInput {
        UserInput {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role,
        }
    }

    #[test]
    fn test_update_keeps_created_at() {
        let mut repo = UserRepository::open(MemoryStorage::new());
        let user = repo.add(input("Ana", UserRole::User)).unwrap();

        let updated = repo
            .update(user.id, input("Ana", UserRole::Manager))
            .unwrap()
            .unwrap();

        assert_eq!(updated.role, UserRole::Manager);
        assert_eq!(updated.created_at, user.created_at);
        assert_eq!(repo.list(), &[updated]);
    }

    #[test]
    fn test_missing_user() {
        let mut repo = UserRepository::open(MemoryStorage::new());
        assert!(repo.get(UserId::generate()).is_none());
        assert!(
            repo.update(UserId::generate(), input("Bia", UserRole::Admin))
                .unwrap()
                .is_none()
        );
        assert!(repo.delete(UserId::generate()).unwrap().is_none());
    }
}
