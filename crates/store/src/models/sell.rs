//! Sale ("sell") domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tiny_erp_core::{ClientId, ProductId, SellId};

/// A recorded sale of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sell {
    /// Unique sale ID.
    pub id: SellId,
    /// Product name at the time of the sale.
    pub name: String,
    /// Total price of the sale.
    pub price: Decimal,
    /// Free-form description.
    pub description: String,
    /// Units sold.
    pub quantity: i64,
    /// Product sold.
    pub product_id: ProductId,
    /// Buyer, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    /// When the sale was created.
    pub created_at: DateTime<Utc>,
    /// When the sale was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Sell {
    pub(crate) fn from_data(data: SellData, now: DateTime<Utc>) -> Self {
        Self {
            id: SellId::generate(),
            name: data.name,
            price: data.price,
            description: data.description,
            quantity: data.quantity,
            product_id: data.product_id,
            client_id: data.client_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn replace(&mut self, data: SellData) {
        self.name = data.name;
        self.price = data.price;
        self.description = data.description;
        self.quantity = data.quantity;
        self.product_id = data.product_id;
        self.client_id = data.client_id;
    }
}

/// Every mutable sale field, as written by the sales service.
#[derive(Debug, Clone)]
pub(crate) struct SellData {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub quantity: i64,
    pub product_id: ProductId,
    pub client_id: Option<ClientId>,
}

/// What a caller provides to record or edit a sale.
///
/// The product name and the total price are derived from the product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleInput {
    pub product_id: ProductId,
    pub quantity: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub client_id: Option<ClientId>,
}
