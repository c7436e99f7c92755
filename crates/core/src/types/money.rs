//! Type-safe money representation using decimal arithmetic.
//!
//! Amounts are kept as [`Decimal`] and serialized as decimal strings
//! (`"1234.50"`). Formatting follows the conventions of the currency's home
//! locale: `R$ 1.234,50` for BRL, `$1,234.50` for USD.

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// An amount with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., reais, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display with exactly two decimals (e.g., `R$ 1.234,50`).
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let plain = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let (group_sep, decimal_sep) = self.currency_code.separators();
        let grouped = group_digits(int_part, group_sep);

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let symbol = self.currency_code.symbol();
        let gap = if self.currency_code.spaced_symbol() { " " } else { "" };

        format!("{sign}{symbol}{gap}{grouped}{decimal_sep}{frac_part}")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Currency symbol placed before the amount.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::BRL => "R$",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BRL => "BRL",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }

    /// `(grouping, decimal)` separators.
    #[must_use]
    pub const fn separators(self) -> (char, char) {
        match self {
            Self::BRL | Self::EUR => ('.', ','),
            Self::USD | Self::GBP => (',', '.'),
        }
    }

    const fn spaced_symbol(self) -> bool {
        matches!(self, Self::BRL | Self::EUR)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Self::BRL),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            _ => Err(format!("invalid currency code: {s}")),
        }
    }
}

/// Parse a user-entered amount leniently.
///
/// Currency symbols and spaces are ignored. When a comma is present it is the
/// decimal separator and dots are grouping (`"1.234,50"`); otherwise the dot
/// is the decimal separator (`"1234.50"`). Returns `None` for anything that
/// does not contain a number.
#[must_use]
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let kept: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    if !kept.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = if kept.contains(',') {
        kept.replace('.', "").replacen(',', ".", 1).replace(',', "")
    } else {
        kept
    };

    Decimal::from_str(&normalized).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_display_brl() {
        let money = Money::new(dec("1234.5"), CurrencyCode::BRL);
        assert_eq!(money.display(), "R$ 1.234,50");
    }

    #[test]
    fn test_display_usd() {
        let money = Money::new(dec("1234567.891"), CurrencyCode::USD);
        assert_eq!(money.display(), "$1,234,567.89");
    }

    #[test]
    fn test_display_small_and_zero() {
        assert_eq!(Money::new(Decimal::ZERO, CurrencyCode::BRL).display(), "R$ 0,00");
        assert_eq!(
            Money::new(dec("0.005"), CurrencyCode::BRL).display(),
            "R$ 0,01"
        );
        assert_eq!(
            Money::new(dec("999"), CurrencyCode::EUR).display(),
            "€ 999,00"
        );
    }

    #[test]
    fn test_display_negative() {
        let money = Money::new(dec("-12.3"), CurrencyCode::BRL);
        assert_eq!(money.display(), "-R$ 12,30");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1234.50"), Some(dec("1234.50")));
        assert_eq!(parse_amount("R$ 1.234,50"), Some(dec("1234.50")));
        assert_eq!(parse_amount("12,5"), Some(dec("12.5")));
        assert_eq!(parse_amount("-3"), Some(dec("-3")));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("brl".parse::<CurrencyCode>().unwrap(), CurrencyCode::BRL);
        assert_eq!("USD".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_serde_amount_as_string() {
        let money = Money::new(dec("10.50"), CurrencyCode::BRL);
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, r#"{"amount":"10.50","currency_code":"BRL"}"#);
    }
}
