//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ERP_DATA_DIR` - Directory holding the JSON files (default: `./erp-data`)
//! - `ERP_CURRENCY` - Display currency: `BRL`, `USD`, `EUR`, `GBP` (default: `BRL`)
//! - `ERP_STOCK_POLICY` - `reject` or `allow-negative` (default: `reject`)
//! - `ERP_LOG_FORMAT` - `text` or `json` (default: `text`)
//!
//! A `.env` file in the working directory is loaded first if present.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use tiny_erp_core::CurrencyCode;

use crate::services::StockPolicy;

const DEFAULT_DATA_DIR: &str = "./erp-data";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("invalid log format: {s}")),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErpConfig {
    /// Directory holding one JSON file per entity kind
    pub data_dir: PathBuf,
    /// Currency used when formatting amounts
    pub currency: CurrencyCode,
    /// Whether sales may drive stock below zero
    pub stock_policy: StockPolicy,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ErpConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            currency: CurrencyCode::default(),
            stock_policy: StockPolicy::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl ErpConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unsupported value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unsupported value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup("ERP_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map_or(defaults.data_dir, PathBuf::from);
        let currency = parse_var(&lookup, "ERP_CURRENCY")?.unwrap_or(defaults.currency);
        let stock_policy =
            parse_var(&lookup, "ERP_STOCK_POLICY")?.unwrap_or(defaults.stock_policy);
        let log_format = parse_var(&lookup, "ERP_LOG_FORMAT")?.unwrap_or(defaults.log_format);

        Ok(Self {
            data_dir,
            currency,
            stock_policy,
            log_format,
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr<Err = String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e))
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ErpConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ErpConfig::default());
        assert_eq!(config.data_dir, PathBuf::from("./erp-data"));
    }

    #[test]
    fn test_overrides() {
        let config = ErpConfig::from_lookup(lookup(&[
            ("ERP_DATA_DIR", "/var/lib/erp"),
            ("ERP_CURRENCY", "usd"),
            ("ERP_STOCK_POLICY", "allow-negative"),
            ("ERP_LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/erp"));
        assert_eq!(config.currency, CurrencyCode::USD);
        assert_eq!(config.stock_policy, StockPolicy::AllowNegative);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_value() {
        let result = ErpConfig::from_lookup(lookup(&[("ERP_STOCK_POLICY", "sometimes")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "ERP_STOCK_POLICY"
        ));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config =
            ErpConfig::from_lookup(lookup(&[("ERP_DATA_DIR", " "), ("ERP_CURRENCY", "")])).unwrap();
        assert_eq!(config, ErpConfig::default());
    }
}
