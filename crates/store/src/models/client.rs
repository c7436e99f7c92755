//! Client domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tiny_erp_core::{ClientId, ClientSegment, ProductId};

/// A client (customer) record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique client ID.
    pub id: ClientId,
    /// Person or company name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Segment used for grouping.
    pub segment: ClientSegment,
    /// Free-form label of the last purchase (usually a date).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_purchase: Option<String>,
    /// Birth date, for individual clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    /// Accumulated monetary value of the client.
    pub value: Decimal,
    /// Postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Product of interest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    /// Quantity of interest for `product_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// When the client was created.
    pub created_at: DateTime<Utc>,
    /// When the client was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub(crate) fn from_new(input: NewClient, now: DateTime<Utc>) -> Self {
        Self {
            id: ClientId::generate(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            segment: input.segment,
            last_purchase: input.last_purchase,
            birth_date: input.birth_date,
            value: input.value,
            address: input.address,
            notes: input.notes,
            product_id: input.product_id,
            quantity: input.quantity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the fields present in `patch` over this record.
    pub(crate) fn apply(&mut self, patch: ClientPatch) {
        let ClientPatch {
            name,
            email,
            phone,
            segment,
            last_purchase,
            birth_date,
            value,
            address,
            notes,
            product_id,
            quantity,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
        if let Some(segment) = segment {
            self.segment = segment;
        }
        if let Some(value) = value {
            self.value = value;
        }
        if last_purchase.is_some() {
            self.last_purchase = last_purchase;
        }
        if birth_date.is_some() {
            self.birth_date = birth_date;
        }
        if address.is_some() {
            self.address = address;
        }
        if notes.is_some() {
            self.notes = notes;
        }
        if product_id.is_some() {
            self.product_id = product_id;
        }
        if quantity.is_some() {
            self.quantity = quantity;
        }
    }
}

/// Input for creating a new client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub segment: ClientSegment,
    #[serde(default)]
    pub last_purchase: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    pub value: Decimal,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// Partial update for a client. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub segment: Option<ClientSegment>,
    pub last_purchase: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub value: Option<Decimal>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub product_id: Option<ProductId>,
    pub quantity: Option<i64>,
}

/// A client segment with the number of clients currently assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentCount {
    pub segment: ClientSegment,
    pub count: usize,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Client {
        Client::from_new(
            NewClient {
                name: "Acme".to_string(),
                email: "a@acme.com".to_string(),
                phone: "123".to_string(),
                ..NewClient::default()
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_apply_partial_patch() {
        let mut client = sample();
        client.apply(ClientPatch {
            phone: Some("555".to_string()),
            segment: Some(ClientSegment::Corporate),
            ..ClientPatch::default()
        });

        assert_eq!(client.name, "Acme");
        assert_eq!(client.phone, "555");
        assert_eq!(client.segment, ClientSegment::Corporate);
        assert!(client.notes.is_none());
    }

    #[test]
    fn test_json_shape() {
        let client = sample();
        let json = serde_json::to_value(&client).unwrap();

        assert_eq!(json["segment"], "retail");
        assert_eq!(json["value"], "0");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("lastPurchase").is_none());
    }
}
