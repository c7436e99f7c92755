//! Display filters for amounts and dates.
//!
//! These never fail: input that cannot be read as a number renders as the
//! zero amount (or an empty string for the input mask).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use tiny_erp_core::{CurrencyCode, Money, parse_amount};

/// Values that can be read as a monetary amount.
pub trait ToAmount {
    /// The amount, or `None` if the value is not numeric.
    fn to_amount(&self) -> Option<Decimal>;
}

impl ToAmount for str {
    fn to_amount(&self) -> Option<Decimal> {
        parse_amount(self)
    }
}

impl ToAmount for String {
    fn to_amount(&self) -> Option<Decimal> {
        parse_amount(self)
    }
}

impl ToAmount for Decimal {
    fn to_amount(&self) -> Option<Decimal> {
        Some(*self)
    }
}

impl ToAmount for f64 {
    fn to_amount(&self) -> Option<Decimal> {
        Decimal::try_from(*self).ok()
    }
}

impl ToAmount for i64 {
    fn to_amount(&self) -> Option<Decimal> {
        Some(Decimal::from(*self))
    }
}

/// Format a decimal string or number as a two-decimal currency string.
///
/// ```
/// use tiny_erp_core::CurrencyCode;
/// use tiny_erp_store::filters::format_currency;
///
/// assert_eq!(format_currency(&1234.5, CurrencyCode::BRL), "R$ 1.234,50");
/// assert_eq!(format_currency("abc", CurrencyCode::BRL), "R$ 0,00");
/// ```
pub fn format_currency<A: ToAmount + ?Sized>(value: &A, currency: CurrencyCode) -> String {
    let amount = value.to_amount().unwrap_or(Decimal::ZERO);
    Money::new(amount, currency).display()
}

/// Format raw keyboard input as a currency amount, for input masks.
///
/// Only the digits of `raw` are used. They are read as cents unless
/// `is_decimal` is set. Input without digits yields an empty string.
#[must_use]
pub fn format_currency_mask(raw: &str, is_decimal: bool, currency: CurrencyCode) -> String {
    let Some(value) = digits_value(raw) else {
        return String::new();
    };
    let amount = if is_decimal {
        value
    } else {
        value / Decimal::ONE_HUNDRED
    };
    Money::new(amount, currency).display()
}

/// Recover the plain decimal value from a masked currency string.
///
/// `"R$ 1.234,50"` becomes `"1234.5"`; input without digits becomes `"0"`.
#[must_use]
pub fn extract_numeric_value(formatted: &str) -> String {
    digits_value(formatted)
        .map_or(Decimal::ZERO, |value| value / Decimal::ONE_HUNDRED)
        .normalize()
        .to_string()
}

fn digits_value(raw: &str) -> Option<Decimal> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse::<Decimal>().unwrap_or(Decimal::ZERO))
}

/// Format a date as `dd/mm/yyyy`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format a timestamp's UTC date as `dd/mm/yyyy`.
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    format_date(timestamp.date_naive())
}
