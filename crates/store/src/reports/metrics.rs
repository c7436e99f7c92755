//! Totals and dashboard metrics.
//!
//! Sums saturate instead of overflowing.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Client, Product, Sell};

/// Sum of sale prices.
#[must_use]
pub fn sales_total<'a>(sells: impl IntoIterator<Item = &'a Sell>) -> Decimal {
    sum(sells.into_iter().map(|sell| sell.price))
}

/// Sum of `price × stock` over products.
#[must_use]
pub fn stock_value_total<'a>(products: impl IntoIterator<Item = &'a Product>) -> Decimal {
    sum(products.into_iter().map(Product::stock_value))
}

/// Sum of client values.
#[must_use]
pub fn client_value_total<'a>(clients: impl IntoIterator<Item = &'a Client>) -> Decimal {
    sum(clients.into_iter().map(|client| client.value))
}

pub(crate) fn sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

fn in_month(date: NaiveDate, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

/// Total of the sales created in the given month.
#[must_use]
pub fn monthly_sales_total(sells: &[Sell], year: i32, month: u32) -> Decimal {
    sales_total(
        sells
            .iter()
            .filter(|sell| in_month(sell.created_at.date_naive(), year, month)),
    )
}

/// Number of clients created in the given month.
#[must_use]
pub fn new_clients_in_month(clients: &[Client], year: i32, month: u32) -> usize {
    clients
        .iter()
        .filter(|client| in_month(client.created_at.date_naive(), year, month))
        .count()
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    /// Sales total of the current month.
    pub monthly_sales: Decimal,
    /// Clients created in the current month.
    pub new_clients: usize,
    /// Number of registered products.
    pub product_count: usize,
    /// Units on hand across all products.
    pub units_in_stock: i64,
}

impl DashboardMetrics {
    /// Compute the metrics for the month containing `today`.
    #[must_use]
    pub fn compute(clients: &[Client], products: &[Product], sells: &[Sell], today: NaiveDate) -> Self {
        Self {
            monthly_sales: monthly_sales_total(sells, today.year(), today.month()),
            new_clients: new_clients_in_month(clients, today.year(), today.month()),
            product_count: products.len(),
            units_in_stock: products
                .iter()
                .fold(0, |units: i64, p| units.saturating_add(p.stock)),
        }
    }
}
