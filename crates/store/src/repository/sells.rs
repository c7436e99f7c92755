//! Sale repository.
//!
//! Reads are public. Mutations are crate-private: they are only reachable
//! through [`SalesService`](crate::services::SalesService), which keeps product
//! stock in step with every sale.

use chrono::Utc;
use tracing::debug;

use tiny_erp_core::{ProductId, SellId};

use super::EntityStore;
use crate::error::StoreError;
use crate::models::{Sell, SellData, next_timestamp};
use crate::storage::Storage;

/// Access to the `sells` list.
#[derive(Debug)]
pub struct SellRepository<S> {
    store: EntityStore<Sell, S>,
}

impl<S: Storage> SellRepository<S> {
    pub fn open(storage: S) -> Self {
        Self {
            store: EntityStore::open(storage),
        }
    }

    #[must_use]
    pub fn list(&self) -> &[Sell] {
        self.store.list()
    }

    #[must_use]
    pub fn get(&self, id: SellId) -> Option<&Sell> {
        self.store.get(id)
    }

    /// Sales of one product.
    pub fn for_product(&self, product_id: ProductId) -> impl Iterator<Item = &Sell> {
        self.list()
            .iter()
            .filter(move |sell| sell.product_id == product_id)
    }

    pub(crate) fn add(&mut self, data: SellData) -> Result<Sell, StoreError> {
        self.store.insert(Sell::from_data(data, Utc::now()))
    }

    pub(crate) fn update(&mut self, id: SellId, data: SellData) -> Result<Option<Sell>, StoreError> {
        let updated = self.store.modify(id, |sell| {
            sell.replace(data);
            sell.updated_at = next_timestamp(sell.updated_at);
        })?;
        if updated.is_none() {
            debug!(sell_id = %id, "update of unknown sale ignored");
        }
        Ok(updated)
    }

    pub(crate) fn delete(&mut self, id: SellId) -> Result<Option<Sell>, StoreError> {
        self.store.remove(id)
    }

    pub fn reload(&mut self) {
        self.store.reload();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::MemoryStorage;

    fn data(product_id: ProductId, quantity: i64) -> SellData {
        SellData {
            name: "Mouse".to_string(),
            price: Decimal::from(quantity * 50),
            description: String::new(),
            quantity,
            product_id,
            client_id: None,
        }
    }

    #[test]
    fn test_crud_cycle() {
        let mut repo = SellRepository::open(MemoryStorage::new());
        let product_id = ProductId::generate();

        let sell = repo.add(data(product_id, 2)).unwrap();
        assert_eq!(repo.get(sell.id).unwrap().quantity, 2);

        let updated = repo.update(sell.id, data(product_id, 5)).unwrap().unwrap();
        assert_eq!(updated.quantity, 5);
        assert_eq!(updated.price, Decimal::from(250));
        assert!(updated.updated_at > sell.updated_at);

        assert!(repo.delete(sell.id).unwrap().is_some());
        assert!(repo.delete(sell.id).unwrap().is_none());
        assert!(repo.list().is_empty());
    }

    #[test]
    fn test_for_product() {
        let mut repo = SellRepository::open(MemoryStorage::new());
        let mouse = ProductId::generate();
        let pad = ProductId::generate();
        repo.add(data(mouse, 1)).unwrap();
        repo.add(data(pad, 1)).unwrap();
        repo.add(data(mouse, 3)).unwrap();

        let quantities: Vec<_> = repo.for_product(mouse).map(|s| s.quantity).collect();
        assert_eq!(quantities, vec![1, 3]);
    }
}
