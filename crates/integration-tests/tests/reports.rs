//! Reports and dashboard over stored data.

#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use tiny_erp_integration_tests::TestContext;
use tiny_erp_store::{ReportError, ReportKind, SaleInput};

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn record_sale(ctx: &mut TestContext, quantity: i64) {
    let product = ctx.add_product("Mouse", 50, 100).unwrap();
    ctx.erp
        .sales()
        .create(SaleInput {
            product_id: product.id,
            quantity,
            description: String::new(),
            client_id: None,
        })
        .unwrap();
}

#[test]
fn test_sales_report_today() {
    let mut ctx = TestContext::new();
    record_sale(&mut ctx, 2);
    record_sale(&mut ctx, 1);

    let report = ctx
        .erp
        .report(ReportKind::Sales, Some(today()), Some(today()))
        .unwrap();

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.total, Decimal::from(150));
    assert_eq!(ctx.erp.format_currency(&report.total), "R$ 150,00");
}

#[test]
fn test_range_before_any_data_is_empty() {
    let mut ctx = TestContext::new();
    record_sale(&mut ctx, 2);
    let long_ago = NaiveDate::from_ymd_opt(2000, 1, 1);

    let report = ctx
        .erp
        .report(ReportKind::Sales, long_ago, long_ago)
        .unwrap();

    assert!(report.rows.is_empty());
    assert_eq!(report.total, Decimal::ZERO);
}

#[test]
fn test_inverted_range_is_an_error() {
    let ctx = TestContext::new();
    let start = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();

    let err = ctx
        .erp
        .report(ReportKind::Financial, Some(start), Some(end))
        .unwrap_err();

    assert_eq!(err, ReportError::InvalidRange { start, end });
}

#[test]
fn test_stock_report_and_dashboard_agree() {
    let mut ctx = TestContext::new();
    record_sale(&mut ctx, 10);

    let stock = ctx.erp.report(ReportKind::Stock, None, None).unwrap();
    let metrics = ctx.erp.dashboard(today());

    assert_eq!(stock.total, Decimal::from(50 * 90));
    assert_eq!(metrics.units_in_stock, 90);
    assert_eq!(metrics.monthly_sales, Decimal::from(500));
    assert_eq!(metrics.product_count, 1);
}
