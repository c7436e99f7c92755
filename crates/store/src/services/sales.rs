//! Sales service keeping product stock in step with sales.
//!
//! Every sale mutation goes through [`SalesService`]:
//! 1. Creating a sale takes its quantity out of the product's stock
//! 2. Editing a sale applies the quantity difference (or moves the quantity
//!    between products when the product changes)
//! 3. Deleting a sale puts its quantity back
//!
//! Stock and sale live under different keys, so the writes are not atomic.
//! All new values are computed before the first write, and when a later write
//! fails the earlier stock writes are rolled back on a best effort basis.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use tiny_erp_core::{ProductId, SellId};

use crate::error::StoreError;
use crate::models::{Product, SaleInput, Sell, SellData};
use crate::repository::{ProductRepository, SellRepository};
use crate::storage::Storage;

/// Whether a sale may take a product's stock below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockPolicy {
    /// Refuse sales asking for more units than are available.
    #[default]
    Reject,
    /// Accept any quantity and let stock go negative.
    AllowNegative,
}

impl fmt::Display for StockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::AllowNegative => write!(f, "allow-negative"),
        }
    }
}

impl FromStr for StockPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(Self::Reject),
            "allow-negative" => Ok(Self::AllowNegative),
            _ => Err(format!("invalid stock policy: {s}")),
        }
    }
}

/// Errors that can occur while recording a sale.
#[derive(Debug, Error)]
pub enum SaleError {
    /// The referenced product does not exist.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// The requested quantity exceeds the available stock.
    #[error("quantity {requested} exceeds available stock {available}")]
    InsufficientStock {
        /// Units available to this sale.
        available: i64,
        /// Units requested.
        requested: i64,
    },

    /// Quantities must be positive.
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    /// The resulting stock or sale total does not fit its type.
    #[error("stock or sale total out of range")]
    Overflow,

    /// Persisting the change failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The only path for creating, editing and deleting sales.
pub struct SalesService<'a, S> {
    products: &'a mut ProductRepository<S>,
    sells: &'a mut SellRepository<S>,
    policy: StockPolicy,
}

impl<'a, S: Storage> SalesService<'a, S> {
    /// Create a sales service over the two repositories.
    pub const fn new(
        products: &'a mut ProductRepository<S>,
        sells: &'a mut SellRepository<S>,
        policy: StockPolicy,
    ) -> Self {
        Self {
            products,
            sells,
            policy,
        }
    }

    /// Record a sale and take its quantity out of the product's stock.
    ///
    /// The sale's name and total price are taken from the product.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity is not positive, the product does not
    /// exist, the stock policy refuses the quantity, the new stock or total
    /// is out of range, or persisting fails.
    #[instrument(skip(self, input), fields(product_id = %input.product_id, quantity = input.quantity))]
    pub fn create(&mut self, input: SaleInput) -> Result<Sell, SaleError> {
        ensure_positive(input.quantity)?;
        let product = self.product(input.product_id)?;
        self.check_stock(product.stock, input.quantity)?;
        let stock = take(product.stock, input.quantity)?;
        let data = sale_data(&product, input)?;

        self.products.set_stock(product.id, stock)?;

        let sell = match self.sells.add(data) {
            Ok(sell) => sell,
            Err(e) => {
                self.rollback(&[(product.id, product.stock)]);
                return Err(e.into());
            }
        };

        info!(sell_id = %sell.id, total = %sell.price, "sale created");
        Ok(sell)
    }

    /// Edit a sale and move the quantity difference through stock.
    ///
    /// Returns `None` if no sale has that ID.
    ///
    /// # Errors
    ///
    /// Same as [`SalesService::create`].
    #[instrument(skip(self, input), fields(quantity = input.quantity))]
    pub fn update(&mut self, id: SellId, input: SaleInput) -> Result<Option<Sell>, SaleError> {
        ensure_positive(input.quantity)?;
        let Some(existing) = self.sells.get(id).cloned() else {
            return Ok(None);
        };
        let product = self.product(input.product_id)?;

        // (product, stock before, stock after), computed before any write
        let mut changes = Vec::with_capacity(2);
        if existing.product_id == product.id {
            let available = give_back(product.stock, existing.quantity)?;
            self.check_stock(available, input.quantity)?;
            changes.push((product.id, product.stock, take(available, input.quantity)?));
        } else {
            self.check_stock(product.stock, input.quantity)?;
            changes.push((product.id, product.stock, take(product.stock, input.quantity)?));
            match self.products.get(existing.product_id).map(|p| p.stock) {
                Some(stock) => {
                    changes.push((
                        existing.product_id,
                        stock,
                        give_back(stock, existing.quantity)?,
                    ));
                }
                None => {
                    warn!(product_id = %existing.product_id, "previous product of sale no longer exists");
                }
            }
        }
        let data = sale_data(&product, input)?;

        let mut touched = Vec::with_capacity(changes.len());
        for (product_id, before, after) in changes {
            if let Err(e) = self.products.set_stock(product_id, after) {
                self.rollback(&touched);
                return Err(e.into());
            }
            touched.push((product_id, before));
        }

        match self.sells.update(id, data) {
            Ok(updated) => {
                info!(sell_id = %id, "sale updated");
                Ok(updated)
            }
            Err(e) => {
                self.rollback(&touched);
                Err(e.into())
            }
        }
    }

    /// Delete a sale and put its quantity back into the product's stock.
    ///
    /// Stock is restored first; if removing the sale then fails, the stock
    /// goes back to its previous value.
    ///
    /// Returns `None` if no sale has that ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the restored stock is out of range or persisting
    /// fails.
    #[instrument(skip(self))]
    pub fn delete(&mut self, id: SellId) -> Result<Option<Sell>, SaleError> {
        let Some(existing) = self.sells.get(id).cloned() else {
            return Ok(None);
        };

        let mut touched = Vec::with_capacity(1);
        match self.products.get(existing.product_id).map(|p| p.stock) {
            Some(stock) => {
                let restored = give_back(stock, existing.quantity)?;
                self.products.set_stock(existing.product_id, restored)?;
                touched.push((existing.product_id, stock));
            }
            None => {
                warn!(product_id = %existing.product_id, "product of deleted sale no longer exists");
            }
        }

        match self.sells.delete(id) {
            Ok(removed) => {
                info!(sell_id = %id, restored = existing.quantity, "sale deleted");
                Ok(removed)
            }
            Err(e) => {
                self.rollback(&touched);
                Err(e.into())
            }
        }
    }

    fn product(&self, id: ProductId) -> Result<Product, SaleError> {
        self.products
            .get(id)
            .cloned()
            .ok_or(SaleError::ProductNotFound(id))
    }

    const fn check_stock(&self, available: i64, requested: i64) -> Result<(), SaleError> {
        match self.policy {
            StockPolicy::Reject if requested > available => {
                Err(SaleError::InsufficientStock {
                    available,
                    requested,
                })
            }
            _ => Ok(()),
        }
    }

    fn rollback(&mut self, touched: &[(ProductId, i64)]) {
        for (product_id, stock) in touched.iter().rev() {
            if let Err(e) = self.products.set_stock(*product_id, *stock) {
                error!(product_id = %product_id, error = %e, "failed to roll back stock");
            }
        }
    }
}

const fn ensure_positive(quantity: i64) -> Result<(), SaleError> {
    if quantity > 0 {
        Ok(())
    } else {
        Err(SaleError::InvalidQuantity(quantity))
    }
}

fn take(stock: i64, quantity: i64) -> Result<i64, SaleError> {
    stock.checked_sub(quantity).ok_or(SaleError::Overflow)
}

fn give_back(stock: i64, quantity: i64) -> Result<i64, SaleError> {
    stock.checked_add(quantity).ok_or(SaleError::Overflow)
}

fn sale_data(product: &Product, input: SaleInput) -> Result<SellData, SaleError> {
    let price = product
        .price
        .checked_mul(Decimal::from(input.quantity))
        .ok_or(SaleError::Overflow)?;
    Ok(SellData {
        name: product.name.clone(),
        price,
        description: input.description,
        quantity: input.quantity,
        product_id: product.id,
        client_id: input.client_id,
    })
}
