//! Product commands.

use tracing::{info, warn};

use tiny_erp_core::ProductId;
use tiny_erp_store::{Erp, FileStorage, ProductInput};

use super::{CommandError, amount_arg};

/// Add a product.
///
/// # Errors
///
/// Returns an error if the price is not a number or the write fails.
pub fn add(
    erp: &mut Erp<FileStorage>,
    name: String,
    price: &str,
    stock: i64,
    description: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let product = erp.products_mut().add(ProductInput {
        name,
        price: amount_arg(price)?,
        description,
        stock,
    })?;

    info!(
        "Product created! ID: {}, Price: {}, Stock: {}",
        product.id,
        erp.format_currency(&product.price),
        product.stock
    );
    Ok(())
}

/// List every product.
pub fn list(erp: &Erp<FileStorage>) {
    let products = erp.products().list();
    info!("Products ({})", products.len());
    for product in products {
        info!(
            "  {} | {} | {} | stock {}",
            product.id,
            product.name,
            erp.format_currency(&product.price),
            product.stock
        );
    }
}

/// Replace a product, keeping the current value of fields not given.
///
/// # Errors
///
/// Returns an error if the product does not exist, the price is not a
/// number, or the write fails.
pub fn update(
    erp: &mut Erp<FileStorage>,
    id: ProductId,
    name: Option<String>,
    price: Option<&str>,
    stock: Option<i64>,
    description: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let current = erp
        .products()
        .get(id)
        .ok_or_else(|| CommandError::not_found("Product", id))?;

    let mut input = ProductInput::from(current);
    if let Some(name) = name {
        input.name = name;
    }
    if let Some(price) = price {
        input.price = amount_arg(price)?;
    }
    if let Some(stock) = stock {
        input.stock = stock;
    }
    if let Some(description) = description {
        input.description = description;
    }

    let product = erp
        .products_mut()
        .update(id, input)?
        .ok_or_else(|| CommandError::not_found("Product", id))?;

    info!("Product updated! {} (stock {})", product.name, product.stock);
    Ok(())
}

/// Delete a product.
///
/// # Errors
///
/// Returns an error if the product does not exist or the write fails.
pub fn delete(erp: &mut Erp<FileStorage>, id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    let product = erp
        .products_mut()
        .delete(id)?
        .ok_or_else(|| CommandError::not_found("Product", id))?;

    let orphaned = erp.sells().for_product(id).count();
    if orphaned > 0 {
        warn!("{orphaned} sale(s) still reference the deleted product");
    }
    info!("Product deleted: {}", product.name);
    Ok(())
}
