//! Subcommand implementations.
//!
//! Every command opens nothing itself: it receives the [`tiny_erp_store::Erp`]
//! built from the configuration and reports through `tracing`.

pub mod clients;
pub mod dashboard;
pub mod products;
pub mod reports;
pub mod sales;
pub mod seed;
pub mod users;

use std::fmt::Display;

use rust_decimal::Decimal;
use thiserror::Error;

use tiny_erp_core::parse_amount;

/// Errors raised by command argument handling.
#[derive(Debug, Error)]
pub enum CommandError {
    /// No record with this ID.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// An amount argument could not be read.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl CommandError {
    pub fn not_found(kind: &'static str, id: impl Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Read a user-typed amount such as `1234.50` or `R$ 1.234,50`.
pub fn amount_arg(raw: &str) -> Result<Decimal, CommandError> {
    parse_amount(raw).ok_or_else(|| CommandError::InvalidAmount(raw.to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_arg() {
        assert_eq!(amount_arg("1234.5").unwrap(), Decimal::new(12345, 1));
        assert_eq!(amount_arg("R$ 1.234,50").unwrap(), Decimal::new(123_450, 2));
        assert!(amount_arg("abc").is_err());
    }
}
