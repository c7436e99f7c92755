//! Seed sample data.

use tracing::info;

use tiny_erp_store::seed::seed_clients;
use tiny_erp_store::{Erp, FileStorage};

/// Insert the sample clients if the client list is empty.
///
/// # Errors
///
/// Returns an error if writing the clients fails.
pub fn clients(erp: &mut Erp<FileStorage>) -> Result<(), Box<dyn std::error::Error>> {
    let inserted = seed_clients(erp.clients_mut())?;

    info!("Seeding complete!");
    info!("  Clients inserted: {inserted}");
    info!("  Clients total: {}", erp.clients().list().len());
    Ok(())
}
