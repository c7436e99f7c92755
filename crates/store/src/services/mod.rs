//! Application services spanning more than one repository.

pub mod sales;

pub use sales::{SaleError, SalesService, StockPolicy};
