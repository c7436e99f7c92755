//! Application facade.
//!
//! [`Erp`] opens the four repositories over one shared backend and is what
//! the CLI (or any other front end) talks to. Sale mutations go through
//! [`Erp::sales`] so that stock always follows.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use tiny_erp_core::CurrencyCode;

use crate::config::ErpConfig;
use crate::filters::{ToAmount, format_currency};
use crate::reports::{self, DashboardMetrics, DateRange, Report, ReportError, ReportKind};
use crate::repository::{ClientRepository, ProductRepository, SellRepository, UserRepository};
use crate::services::{SalesService, StockPolicy};
use crate::storage::{FileStorage, Storage};

/// All entity stores over one storage backend.
#[derive(Debug)]
pub struct Erp<S> {
    clients: ClientRepository<Arc<S>>,
    products: ProductRepository<Arc<S>>,
    sells: SellRepository<Arc<S>>,
    users: UserRepository<Arc<S>>,
    policy: StockPolicy,
    currency: CurrencyCode,
}

impl<S: Storage> Erp<S> {
    /// Open every store on `storage` with the default policy and currency.
    pub fn open(storage: S) -> Self {
        let storage = Arc::new(storage);
        Self {
            clients: ClientRepository::open(Arc::clone(&storage)),
            products: ProductRepository::open(Arc::clone(&storage)),
            sells: SellRepository::open(Arc::clone(&storage)),
            users: UserRepository::open(storage),
            policy: StockPolicy::default(),
            currency: CurrencyCode::default(),
        }
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: StockPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> StockPolicy {
        self.policy
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    #[must_use]
    pub const fn clients(&self) -> &ClientRepository<Arc<S>> {
        &self.clients
    }

    pub const fn clients_mut(&mut self) -> &mut ClientRepository<Arc<S>> {
        &mut self.clients
    }

    #[must_use]
    pub const fn products(&self) -> &ProductRepository<Arc<S>> {
        &self.products
    }

    pub const fn products_mut(&mut self) -> &mut ProductRepository<Arc<S>> {
        &mut self.products
    }

    #[must_use]
    pub const fn sells(&self) -> &SellRepository<Arc<S>> {
        &self.sells
    }

    #[must_use]
    pub const fn users(&self) -> &UserRepository<Arc<S>> {
        &self.users
    }

    pub const fn users_mut(&mut self) -> &mut UserRepository<Arc<S>> {
        &mut self.users
    }

    /// Sales service bound to this instance's products and sales.
    pub const fn sales(&mut self) -> SalesService<'_, Arc<S>> {
        SalesService::new(&mut self.products, &mut self.sells, self.policy)
    }

    /// Re-read every store from the backend.
    pub fn reload(&mut self) {
        self.clients.reload();
        self.products.reload();
        self.sells.reload();
        self.users.reload();
    }

    /// Dashboard metrics for the month containing `today`.
    #[must_use]
    pub fn dashboard(&self, today: NaiveDate) -> DashboardMetrics {
        DashboardMetrics::compute(
            self.clients.list(),
            self.products.list(),
            self.sells.list(),
            today,
        )
    }

    /// Generate a report between two optional, inclusive dates.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidRange`] if `start` is after `end`; no
    /// filtering happens in that case.
    pub fn report(
        &self,
        kind: ReportKind,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Report, ReportError> {
        let range = DateRange::new(start, end)?;
        Ok(reports::generate(
            kind,
            &range,
            self.clients.list(),
            self.products.list(),
            self.sells.list(),
        ))
    }

    /// Format an amount in this instance's currency.
    pub fn format_currency<A: ToAmount + ?Sized>(&self, value: &A) -> String {
        format_currency(value, self.currency)
    }
}

impl Erp<FileStorage> {
    /// Open file-backed stores as described by `config`.
    #[must_use]
    pub fn from_config(config: &ErpConfig) -> Self {
        info!(
            data_dir = %config.data_dir.display(),
            policy = %config.stock_policy,
            currency = %config.currency,
            "Opening data directory"
        );
        Self::open(FileStorage::new(config.data_dir.clone()))
            .with_policy(config.stock_policy)
            .with_currency(config.currency)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::{NewClient, ProductInput, SaleInput};
    use crate::storage::MemoryStorage;

    #[test]
    fn test_stores_share_backend() {
        let storage = MemoryStorage::new();
        let mut erp = Erp::open(storage.clone());
        erp.clients_mut()
            .add(NewClient {
                name: "Acme".to_string(),
                ..NewClient::default()
            })
            .unwrap();
        erp.products_mut()
            .add(ProductInput {
                name: "Mouse".to_string(),
                price: Decimal::from(10),
                stock: 1,
                ..ProductInput::default()
            })
            .unwrap();

        let reopened = Erp::open(storage);
        assert_eq!(reopened.clients().list().len(), 1);
        assert_eq!(reopened.products().list().len(), 1);
    }

    #[test]
    fn test_sales_and_dashboard() {
        let mut erp = Erp::open(MemoryStorage::new());
        let product = erp
            .products_mut()
            .add(ProductInput {
                name: "Mouse".to_string(),
                price: Decimal::from(25),
                stock: 4,
                ..ProductInput::default()
            })
            .unwrap();

        erp.sales()
            .create(SaleInput {
                product_id: product.id,
                quantity: 2,
                description: String::new(),
                client_id: None,
            })
            .unwrap();

        let metrics = erp.dashboard(Utc::now().date_naive());
        assert_eq!(metrics.monthly_sales, Decimal::from(50));
        assert_eq!(metrics.units_in_stock, 2);
    }

    #[test]
    fn test_report_rejects_inverted_range() {
        let erp = Erp::open(MemoryStorage::new());
        let start = NaiveDate::from_ymd_opt(2025, 5, 1);
        let end = NaiveDate::from_ymd_opt(2025, 4, 1);

        let err = erp.report(ReportKind::Sales, start, end).unwrap_err();

        assert!(matches!(err, ReportError::InvalidRange { .. }));
    }

    #[test]
    fn test_format_currency_uses_configured_code() {
        let erp = Erp::open(MemoryStorage::new()).with_currency(CurrencyCode::USD);
        assert_eq!(erp.format_currency(&Decimal::from(1500)), "$1,500.00");
    }
}
