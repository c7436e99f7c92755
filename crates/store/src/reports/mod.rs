//! Reports over the entity lists.
//!
//! Everything here is pure and recomputed on demand; nothing is persisted.
//!
//! # Report kinds
//!
//! - [`ReportKind::Sales`] - one row per sale, total of sale prices
//! - [`ReportKind::Stock`] - one row per product, total stock value
//! - [`ReportKind::Financial`] - one row per month with sales, total of sales
//! - [`ReportKind::Clients`] - one row per client, total client value
//!
//! The date range applies to each record's creation date. An invalid range is
//! rejected by [`DateRange::new`] before any filtering happens.

pub mod metrics;
pub mod range;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::{Client, Product, Sell};

pub use metrics::{
    DashboardMetrics, client_value_total, monthly_sales_total, new_clients_in_month, sales_total,
    stock_value_total,
};
pub use range::DateRange;

/// Errors in report parameters. The message is meant for the end user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

/// Available reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Sales,
    Stock,
    Financial,
    Clients,
}

impl ReportKind {
    pub const ALL: [Self; 4] = [Self::Sales, Self::Stock, Self::Financial, Self::Clients];

    /// Report title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Sales => "Sales report",
            Self::Stock => "Stock report",
            Self::Financial => "Financial report",
            Self::Clients => "Clients report",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sales => write!(f, "sales"),
            Self::Stock => write!(f, "stock"),
            Self::Financial => write!(f, "financial"),
            Self::Clients => write!(f, "clients"),
        }
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sales" => Ok(Self::Sales),
            "stock" => Ok(Self::Stock),
            "financial" => Ok(Self::Financial),
            "clients" => Ok(Self::Clients),
            _ => Err(format!("invalid report kind: {s}")),
        }
    }
}

/// One line of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Date the row refers to (creation date, or first day of the month).
    pub date: NaiveDate,
    /// Record ID, or `YYYY-MM` for monthly rows.
    pub reference: String,
    /// Human-readable description.
    pub description: String,
    /// Amount contributing to the total.
    pub amount: Decimal,
}

/// A generated report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub kind: ReportKind,
    pub range: DateRange,
    pub rows: Vec<ReportRow>,
    pub total: Decimal,
}

/// Build a report of `kind` over the records created inside `range`.
#[must_use]
pub fn generate(
    kind: ReportKind,
    range: &DateRange,
    clients: &[Client],
    products: &[Product],
    sells: &[Sell],
) -> Report {
    let rows = match kind {
        ReportKind::Sales => sales_rows(range, clients, sells),
        ReportKind::Stock => range
            .filter(products)
            .into_iter()
            .map(|product| ReportRow {
                date: product.created_at.date_naive(),
                reference: product.id.to_string(),
                description: format!("{} ({} in stock)", product.name, product.stock),
                amount: product.stock_value(),
            })
            .collect(),
        ReportKind::Financial => monthly_rows(range, sells),
        ReportKind::Clients => range
            .filter(clients)
            .into_iter()
            .map(|client| ReportRow {
                date: client.created_at.date_naive(),
                reference: client.id.to_string(),
                description: format!("{} [{}]", client.name, client.segment.label()),
                amount: client.value,
            })
            .collect(),
    };
    let total = metrics::sum(rows.iter().map(|row| row.amount));

    Report {
        kind,
        range: *range,
        rows,
        total,
    }
}

fn sales_rows(range: &DateRange, clients: &[Client], sells: &[Sell]) -> Vec<ReportRow> {
    range
        .filter(sells)
        .into_iter()
        .map(|sell| {
            let buyer = sell
                .client_id
                .and_then(|id| clients.iter().find(|client| client.id == id))
                .map_or("-", |client| client.name.as_str());
            ReportRow {
                date: sell.created_at.date_naive(),
                reference: sell.id.to_string(),
                description: format!("{} x{} - {buyer}", sell.name, sell.quantity),
                amount: sell.price,
            }
        })
        .collect()
}

fn monthly_rows(range: &DateRange, sells: &[Sell]) -> Vec<ReportRow> {
    let mut months: BTreeMap<(i32, u32), (Decimal, usize)> = BTreeMap::new();
    for sell in range.filter(sells) {
        let date = sell.created_at.date_naive();
        let entry = months
            .entry((date.year(), date.month()))
            .or_insert((Decimal::ZERO, 0));
        entry.0 = entry.0.saturating_add(sell.price);
        entry.1 += 1;
    }

    months
        .into_iter()
        .filter_map(|((year, month), (amount, count))| {
            let date = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(ReportRow {
                date,
                reference: format!("{year:04}-{month:02}"),
                description: format!("{count} sale(s)"),
                amount,
            })
        })
        .collect()
}
