//! Integration tests for Tiny ERP.
//!
//! These exercise the file-backed store end to end: every test gets its own
//! temporary data directory, so they run in parallel without setup.
//!
//! ```bash
//! cargo test -p tiny-erp-integration-tests
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use tempfile::TempDir;

use tiny_erp_store::{Erp, ErpConfig, FileStorage, Product, ProductInput, StoreError};

/// A temporary data directory and an [`Erp`] opened on it.
pub struct TestContext {
    dir: TempDir,
    pub erp: Erp<FileStorage>,
}

impl TestContext {
    /// Create an empty data directory and open the stores on it.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let erp = Erp::from_config(&Self::config_for(dir.path()));
        Self { dir, erp }
    }

    /// Configuration pointing at `path` with every other setting at default.
    #[must_use]
    pub fn config_for(path: &Path) -> ErpConfig {
        ErpConfig {
            data_dir: path.to_path_buf(),
            ..ErpConfig::default()
        }
    }

    /// The data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the JSON file backing `key`.
    #[must_use]
    pub fn file(&self, key: &str) -> PathBuf {
        self.dir.path().join(format!("{key}.json"))
    }

    /// A second, independent instance over the same directory.
    #[must_use]
    pub fn reopen(&self) -> Erp<FileStorage> {
        Erp::from_config(&Self::config_for(self.dir.path()))
    }

    /// Add a product with the given name, unit price and stock.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn add_product(&mut self, name: &str, price: i64, stock: i64) -> Result<Product, StoreError> {
        self.erp.products_mut().add(ProductInput {
            name: name.to_string(),
            price: Decimal::from(price),
            description: String::new(),
            stock,
        })
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
