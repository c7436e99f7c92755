//! Tiny ERP Store - persistent entity stores, sales service and reports.
//!
//! # Architecture
//!
//! - [`storage`] - The [`Storage`] trait, memory and file backends, and
//!   [`PersistentCell`], a value mirrored to one storage key
//! - [`repository`] - One list-backed store per entity kind (`clients`,
//!   `products`, `sells`, `users`)
//! - [`services`] - [`SalesService`], which keeps product stock in step with
//!   sales
//! - [`reports`] - Date-range filtering, totals and dashboard metrics
//! - [`filters`] - Currency and date formatting
//! - [`app`] - [`Erp`], which wires all of the above over one backend
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use tiny_erp_store::{Erp, MemoryStorage, ProductInput, SaleInput};
//!
//! let mut erp = Erp::open(MemoryStorage::new());
//! let product = erp
//!     .products_mut()
//!     .add(ProductInput {
//!         name: "Mouse".to_string(),
//!         price: Decimal::from(50),
//!         stock: 10,
//!         ..ProductInput::default()
//!     })
//!     .unwrap();
//!
//! erp.sales()
//!     .create(SaleInput {
//!         product_id: product.id,
//!         quantity: 3,
//!         description: String::new(),
//!         client_id: None,
//!     })
//!     .unwrap();
//!
//! assert_eq!(erp.products().get(product.id).unwrap().stock, 7);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod reports;
pub mod repository;
pub mod seed;
pub mod services;
pub mod storage;

pub use app::Erp;
pub use config::{ConfigError, ErpConfig, LogFormat};
pub use error::StoreError;
pub use models::{
    Client, ClientPatch, NewClient, Product, ProductInput, SaleInput, SegmentCount, Sell, User,
    UserInput,
};
pub use reports::{DashboardMetrics, DateRange, Report, ReportError, ReportKind, ReportRow};
pub use repository::{
    ClientRepository, Entity, EntityStore, ProductRepository, SellRepository, UserRepository,
};
pub use services::{SaleError, SalesService, StockPolicy};
pub use storage::{FileStorage, MemoryStorage, PersistentCell, Storage, StorageError};
