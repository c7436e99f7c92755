//! Dashboard command.

use chrono::Utc;
use tracing::info;

use tiny_erp_store::{Erp, FileStorage};

/// Print this month's headline numbers.
pub fn show(erp: &Erp<FileStorage>) {
    let metrics = erp.dashboard(Utc::now().date_naive());

    info!("Dashboard");
    info!("=========");
    info!("Sales this month: {}", erp.format_currency(&metrics.monthly_sales));
    info!("New clients this month: {}", metrics.new_clients);
    info!("Products: {}", metrics.product_count);
    info!("Units in stock: {}", metrics.units_in_stock);
    info!("Clients by segment:");
    for entry in erp.clients().segments() {
        info!("  {}: {}", entry.segment.label(), entry.count);
    }
}
