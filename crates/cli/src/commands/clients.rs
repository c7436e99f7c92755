//! Client commands.

use chrono::NaiveDate;
use tracing::info;

use tiny_erp_core::{ClientId, ClientSegment};
use tiny_erp_store::{Client, ClientPatch, Erp, FileStorage, NewClient};

use super::{CommandError, amount_arg};

/// Client fields as given on the command line. `None` means not given.
pub struct ClientArgs {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub segment: Option<ClientSegment>,
    pub value: Option<String>,
    pub last_purchase: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl ClientArgs {
    fn into_patch(self) -> Result<ClientPatch, CommandError> {
        let value = self.value.as_deref().map(amount_arg).transpose()?;
        Ok(ClientPatch {
            name: self.name,
            email: self.email,
            phone: self.phone,
            segment: self.segment,
            last_purchase: self.last_purchase,
            birth_date: self.birth_date,
            value,
            address: self.address,
            notes: self.notes,
            product_id: None,
            quantity: None,
        })
    }
}

fn log_client(erp: &Erp<FileStorage>, client: &Client) {
    info!(
        "  {} | {} | {} | {} | {} | {}",
        client.id,
        client.name,
        client.email,
        client.phone,
        client.segment.label(),
        erp.format_currency(&client.value)
    );
}

/// Add a client.
///
/// # Errors
///
/// Returns an error if the value is not a number or the write fails.
pub fn add(erp: &mut Erp<FileStorage>, args: ClientArgs) -> Result<(), Box<dyn std::error::Error>> {
    let patch = args.into_patch()?;
    let input = NewClient {
        name: patch.name.unwrap_or_default(),
        email: patch.email.unwrap_or_default(),
        phone: patch.phone.unwrap_or_default(),
        segment: patch.segment.unwrap_or_default(),
        last_purchase: patch.last_purchase,
        birth_date: patch.birth_date,
        value: patch.value.unwrap_or_default(),
        address: patch.address,
        notes: patch.notes,
        product_id: None,
        quantity: None,
    };

    let client = erp.clients_mut().add(input)?;
    info!("Client created! ID: {}", client.id);
    Ok(())
}

/// List every client.
pub fn list(erp: &Erp<FileStorage>) {
    let clients = erp.clients().list();
    info!("Clients ({})", clients.len());
    for client in clients {
        log_client(erp, client);
    }
}

/// Apply the given fields to a client.
///
/// # Errors
///
/// Returns an error if the client does not exist, the value is not a number,
/// or the write fails.
pub fn update(
    erp: &mut Erp<FileStorage>,
    id: ClientId,
    args: ClientArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let patch = args.into_patch()?;
    let client = erp
        .clients_mut()
        .update(id, patch)?
        .ok_or_else(|| CommandError::not_found("Client", id))?;

    info!("Client updated!");
    log_client(erp, &client);
    Ok(())
}

/// Delete a client.
///
/// # Errors
///
/// Returns an error if the client does not exist or the write fails.
pub fn delete(erp: &mut Erp<FileStorage>, id: ClientId) -> Result<(), Box<dyn std::error::Error>> {
    let client = erp
        .clients_mut()
        .delete(id)?
        .ok_or_else(|| CommandError::not_found("Client", id))?;

    info!("Client deleted: {}", client.name);
    Ok(())
}

/// Show the number of clients per segment.
pub fn segments(erp: &Erp<FileStorage>) {
    info!("Clients by segment");
    for entry in erp.clients().segments() {
        info!("  {}: {}", entry.segment.label(), entry.count);
    }
}
