//! Client repository.

use chrono::Utc;
use tracing::{debug, info};

use tiny_erp_core::{ClientId, ClientSegment};

use super::EntityStore;
use crate::error::StoreError;
use crate::models::{Client, ClientPatch, NewClient, SegmentCount, next_timestamp};
use crate::storage::Storage;

/// CRUD access to the `clients` list.
#[derive(Debug)]
pub struct ClientRepository<S> {
    store: EntityStore<Client, S>,
}

impl<S: Storage> ClientRepository<S> {
    /// Open the repository on `storage`.
    pub fn open(storage: S) -> Self {
        Self {
            store: EntityStore::open(storage),
        }
    }

    /// All clients in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Client] {
        self.store.list()
    }

    /// Find a client by ID.
    #[must_use]
    pub fn get(&self, id: ClientId) -> Option<&Client> {
        self.store.get(id)
    }

    /// Create a client with a fresh ID and timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if the client list cannot be persisted.
    pub fn add(&mut self, input: NewClient) -> Result<Client, StoreError> {
        let client = self.store.insert(Client::from_new(input, Utc::now()))?;
        info!(client_id = %client.id, segment = %client.segment, "client created");
        Ok(client)
    }

    /// Merge the fields present in `patch` into the client.
    ///
    /// Returns `None` if no client has that ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the client list cannot be persisted.
    pub fn update(&mut self, id: ClientId, patch: ClientPatch) -> Result<Option<Client>, StoreError> {
        let updated = self.store.modify(id, |client| {
            client.apply(patch);
            client.updated_at = next_timestamp(client.updated_at);
        })?;
        if updated.is_none() {
            debug!(client_id = %id, "update of unknown client ignored");
        }
        Ok(updated)
    }

    /// Delete a client. Sales referencing it are left as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if the client list cannot be persisted.
    pub fn delete(&mut self, id: ClientId) -> Result<Option<Client>, StoreError> {
        let removed = self.store.remove(id)?;
        if removed.is_some() {
            info!(client_id = %id, "client deleted");
        }
        Ok(removed)
    }

    /// Every segment, in fixed order, with its current client count.
    #[must_use]
    pub fn segments(&self) -> Vec<SegmentCount> {
        ClientSegment::ALL
            .into_iter()
            .map(|segment| SegmentCount {
                segment,
                count: self
                    .list()
                    .iter()
                    .filter(|client| client.segment == segment)
                    .count(),
            })
            .collect()
    }

    /// Re-read the list from storage.
    pub fn reload(&mut self) {
        self.store.reload();
    }
}
