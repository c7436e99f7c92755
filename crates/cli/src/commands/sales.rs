//! Sale commands. Every mutation goes through the sales service so product
//! stock follows.

use tracing::info;

use tiny_erp_core::{ClientId, ProductId, SellId};
use tiny_erp_store::{Erp, FileStorage, SaleInput, Sell};

use super::CommandError;

fn log_sale(erp: &Erp<FileStorage>, sell: &Sell) {
    info!(
        "  {} | {} x{} | {} | {}",
        sell.id,
        sell.name,
        sell.quantity,
        erp.format_currency(&sell.price),
        tiny_erp_store::filters::format_timestamp(sell.created_at)
    );
}

fn log_stock(erp: &Erp<FileStorage>, product_id: ProductId) {
    if let Some(product) = erp.products().get(product_id) {
        info!("Stock of {}: {}", product.name, product.stock);
    }
}

/// Record a sale.
///
/// # Errors
///
/// Returns an error if the product does not exist, the stock policy refuses
/// the quantity, or the write fails.
pub fn create(
    erp: &mut Erp<FileStorage>,
    product_id: ProductId,
    quantity: i64,
    client_id: Option<ClientId>,
    description: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let sell = erp.sales().create(SaleInput {
        product_id,
        quantity,
        description,
        client_id,
    })?;

    info!("Sale created! ID: {}", sell.id);
    log_sale(erp, &sell);
    log_stock(erp, product_id);
    Ok(())
}

/// List every sale.
pub fn list(erp: &Erp<FileStorage>) {
    let sells = erp.sells().list();
    info!("Sales ({})", sells.len());
    for sell in sells {
        log_sale(erp, sell);
    }
}

/// What to do with the buyer of an edited sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientChange {
    Keep,
    Set(ClientId),
    Clear,
}

/// Sale fields given on the command line. `None` keeps the current value.
pub struct SaleChanges {
    pub product_id: Option<ProductId>,
    pub quantity: Option<i64>,
    pub client: ClientChange,
    pub description: Option<String>,
}

impl SaleChanges {
    fn apply_to(self, current: &Sell) -> SaleInput {
        let client_id = match self.client {
            ClientChange::Keep => current.client_id,
            ClientChange::Set(id) => Some(id),
            ClientChange::Clear => None,
        };
        SaleInput {
            product_id: self.product_id.unwrap_or(current.product_id),
            quantity: self.quantity.unwrap_or(current.quantity),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
            client_id,
        }
    }
}

/// Edit a sale, keeping the current value of fields not given.
///
/// # Errors
///
/// Returns an error if the sale or product does not exist, the stock policy
/// refuses the new quantity, or the write fails.
pub fn update(
    erp: &mut Erp<FileStorage>,
    id: SellId,
    changes: SaleChanges,
) -> Result<(), Box<dyn std::error::Error>> {
    let current = erp
        .sells()
        .get(id)
        .ok_or_else(|| CommandError::not_found("Sale", id))?;

    let input = changes.apply_to(current);
    let previous_product = current.product_id;

    let sell = erp
        .sales()
        .update(id, input)?
        .ok_or_else(|| CommandError::not_found("Sale", id))?;

    info!("Sale updated!");
    log_sale(erp, &sell);
    if previous_product != sell.product_id {
        log_stock(erp, previous_product);
    }
    log_stock(erp, sell.product_id);
    Ok(())
}

/// Delete a sale and return its units to stock.
///
/// # Errors
///
/// Returns an error if the sale does not exist or the write fails.
pub fn delete(erp: &mut Erp<FileStorage>, id: SellId) -> Result<(), Box<dyn std::error::Error>> {
    let sell = erp
        .sales()
        .delete(id)?
        .ok_or_else(|| CommandError::not_found("Sale", id))?;

    info!("Sale deleted: {} x{}", sell.name, sell.quantity);
    log_stock(erp, sell.product_id);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    fn sale_with_buyer(client_id: ClientId) -> Sell {
        let now = Utc::now();
        Sell {
            id: SellId::generate(),
            name: "Mouse".to_string(),
            price: Decimal::from(100),
            description: "first".to_string(),
            quantity: 2,
            product_id: ProductId::generate(),
            client_id: Some(client_id),
            created_at: now,
            updated_at: now,
        }
    }

    fn changes(client: ClientChange) -> SaleChanges {
        SaleChanges {
            product_id: None,
            quantity: None,
            client,
            description: None,
        }
    }

    #[test]
    fn test_unchanged_fields_are_kept() {
        let buyer = ClientId::generate();
        let current = sale_with_buyer(buyer);

        let input = SaleChanges {
            quantity: Some(5),
            ..changes(ClientChange::Keep)
        }
        .apply_to(&current);

        assert_eq!(input.product_id, current.product_id);
        assert_eq!(input.quantity, 5);
        assert_eq!(input.description, "first");
        assert_eq!(input.client_id, Some(buyer));
    }

    #[test]
    fn test_buyer_can_be_replaced_or_removed() {
        let current = sale_with_buyer(ClientId::generate());
        let other = ClientId::generate();

        let replaced = changes(ClientChange::Set(other)).apply_to(&current);
        let cleared = changes(ClientChange::Clear).apply_to(&current);

        assert_eq!(replaced.client_id, Some(other));
        assert_eq!(cleared.client_id, None);
    }
}
