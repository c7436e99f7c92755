//! Report command.

use chrono::NaiveDate;
use tracing::info;

use tiny_erp_store::filters::format_date;
use tiny_erp_store::{Erp, FileStorage, ReportKind};

/// Generate and print a report.
///
/// # Errors
///
/// Returns an error if `from` is after `to`.
pub fn report(
    erp: &Erp<FileStorage>,
    kind: ReportKind,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = erp.report(kind, from, to)?;

    let bound = |date: Option<NaiveDate>| date.map_or_else(|| "-".to_owned(), format_date);
    info!("{}", kind.title());
    info!("Period: {} to {}", bound(report.range.start()), bound(report.range.end()));
    info!("");

    for row in &report.rows {
        info!(
            "  {} | {} | {} | {}",
            format_date(row.date),
            row.reference,
            row.description,
            erp.format_currency(&row.amount)
        );
    }

    info!("");
    info!("Rows: {}", report.rows.len());
    info!("Total: {}", erp.format_currency(&report.total));
    Ok(())
}
