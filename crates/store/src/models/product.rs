//! Product domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tiny_erp_core::ProductId;

/// A product kept in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Description shown in listings.
    pub description: String,
    /// Units on hand. Non-negative by convention only.
    pub stock: i64,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub(crate) fn from_input(input: ProductInput, now: DateTime<Utc>) -> Self {
        Self {
            id: ProductId::generate(),
            name: input.name,
            price: input.price,
            description: input.description,
            stock: input.stock,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn replace(&mut self, input: ProductInput) {
        self.name = input.name;
        self.price = input.price;
        self.description = input.description;
        self.stock = input.stock;
    }

    /// Value of the units on hand (`price × stock`), saturating at the
    /// `Decimal` bounds.
    #[must_use]
    pub fn stock_value(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.stock))
    }
}

/// All mutable product fields, used for both creation and full replacement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub stock: i64,
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            stock: product.stock,
        }
    }
}
