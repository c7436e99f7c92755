//! Product repository.

use chrono::Utc;
use tracing::{debug, info};

use tiny_erp_core::ProductId;

use super::EntityStore;
use crate::error::StoreError;
use crate::models::{Product, ProductInput, next_timestamp};
use crate::storage::Storage;

/// CRUD access to the `products` list.
#[derive(Debug)]
pub struct ProductRepository<S> {
    store: EntityStore<Product, S>,
}

impl<S: Storage> ProductRepository<S> {
    pub fn open(storage: S) -> Self {
        Self {
            store: EntityStore::open(storage),
        }
    }

    #[must_use]
    pub fn list(&self) -> &[Product] {
        self.store.list()
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.store.get(id)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product list cannot be persisted.
    pub fn add(&mut self, input: ProductInput) -> Result<Product, StoreError> {
        let product = self.store.insert(Product::from_input(input, Utc::now()))?;
        info!(product_id = %product.id, stock = product.stock, "product created");
        Ok(product)
    }

    /// Replace every mutable field of the product.
    ///
    /// Returns `None` if no product has that ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the product list cannot be persisted.
    pub fn update(&mut self, id: ProductId, input: ProductInput) -> Result<Option<Product>, StoreError> {
        let updated = self.store.modify(id, |product| {
            product.replace(input);
            product.updated_at = next_timestamp(product.updated_at);
        })?;
        if updated.is_none() {
            debug!(product_id = %id, "update of unknown product ignored");
        }
        Ok(updated)
    }

    /// Overwrite the stock count only.
    ///
    /// # Errors
    ///
    /// Returns an error if the product list cannot be persisted.
    pub(crate) fn set_stock(&mut self, id: ProductId, stock: i64) -> Result<Option<Product>, StoreError> {
        self.store.modify(id, |product| {
            debug!(product_id = %id, from = product.stock, to = stock, "stock adjusted");
            product.stock = stock;
            product.updated_at = next_timestamp(product.updated_at);
        })
    }

    /// Delete a product. Sales referencing it are left as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if the product list cannot be persisted.
    pub fn delete(&mut self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let removed = self.store.remove(id)?;
        if removed.is_some() {
            info!(product_id = %id, "product deleted");
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
    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::MemoryStorage;

    fn keyboard() -> ProductInput {
        ProductInput {
            name: "Keyboard".to_string(),
            price: Decimal::new(19990, 2),
            description: "Mechanical".to_string(),
            stock: 10,
        }
    }

    #[test]
    fn test_add_and_get() {
        let mut repo = ProductRepository::open(MemoryStorage::new());
        let product = repo.add(keyboard()).unwrap();

        assert_eq!(repo.get(product.id), Some(&product));
        assert_eq!(product.stock_value(), Decimal::new(199_900, 2));
    }

    #[test]
    fn test_full_replacement() {
        let mut repo = ProductRepository::open(MemoryStorage::new());
        let product = repo.add(keyboard()).unwrap();

        let updated = repo
            .update(
                product.id,
                ProductInput {
                    name: "Keyboard TKL".to_string(),
                    description: String::new(),
                    stock: 4,
                    ..keyboard()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Keyboard TKL");
        assert_eq!(updated.description, "");
        assert_eq!(updated.stock, 4);
        assert!(updated.updated_at > product.updated_at);
    }

    #[test]
    fn test_set_stock_allows_negative() {
        let mut repo = ProductRepository::open(MemoryStorage::new());
        let product = repo.add(keyboard()).unwrap();

        let updated = repo.set_stock(product.id, -2).unwrap().unwrap();
        assert_eq!(updated.stock, -2);
        assert!(repo.set_stock(ProductId::generate(), 1).unwrap().is_none());
    }

    #[test]
    fn test_delete_unknown() {
        let mut repo = ProductRepository::open(MemoryStorage::new());
        repo.add(keyboard()).unwrap();

        assert!(repo.delete(ProductId::generate()).unwrap().is_none());
        assert_eq!(repo.list().len(), 1);
    }
}
