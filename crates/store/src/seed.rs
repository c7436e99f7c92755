//! Sample data for a fresh data directory.

use rust_decimal::Decimal;
use tracing::info;

use tiny_erp_core::ClientSegment;

use crate::error::StoreError;
use crate::models::NewClient;
use crate::repository::ClientRepository;
use crate::storage::Storage;

/// The five sample clients a new installation starts with.
#[must_use]
pub fn sample_clients() -> Vec<NewClient> {
    [
        (
            "Empresa ABC Ltda",
            "contato@abc.com",
            "(11) 9999-8888",
            ClientSegment::Corporate,
            "15/04/2025",
            12_500,
        ),
        (
            "Comércio XYZ",
            "contato@xyz.com",
            "(11) 7777-6666",
            ClientSegment::Retail,
            "10/04/2025",
            3_200,
        ),
        (
            "Distribuidora 123",
            "vendas@123.com",
            "(11) 5555-4444",
            ClientSegment::Wholesale,
            "05/04/2025",
            8_750,
        ),
        (
            "Loja FastShop",
            "atendimento@fastshop.com",
            "(11) 3333-2222",
            ClientSegment::Retail,
            "01/04/2025",
            2_100,
        ),
        (
            "Corporação Global",
            "contato@global.com",
            "(11) 1111-0000",
            ClientSegment::Corporate,
            "28/03/2025",
            15_800,
        ),
    ]
    .into_iter()
    .map(
        |(name, email, phone, segment, last_purchase, value)| NewClient {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            segment,
            last_purchase: Some(last_purchase.to_string()),
            value: Decimal::from(value),
            ..NewClient::default()
        },
    )
    .collect()
}

/// Add the sample clients if the repository is empty.
///
/// Returns the number of clients added (zero if any client already exists).
///
/// # Errors
///
/// Returns an error if persisting a client fails.
pub fn seed_clients<S: Storage>(repo: &mut ClientRepository<S>) -> Result<usize, StoreError> {
    if !repo.list().is_empty() {
        info!(existing = repo.list().len(), "Clients already present, skipping seed");
        return Ok(0);
    }

    let samples = sample_clients();
    let count = samples.len();
    for client in samples {
        repo.add(client)?;
    }
    info!(count, "Seeded sample clients");
    Ok(count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_seed_empty_repository() {
        let mut repo = ClientRepository::open(MemoryStorage::new());

        assert_eq!(seed_clients(&mut repo).unwrap(), 5);

        let segments = repo.segments();
        let count = |segment| {
            segments
                .iter()
                .find(|s| s.segment == segment)
                .map_or(0, |s| s.count)
        };
        assert_eq!(count(ClientSegment::Corporate), 2);
        assert_eq!(count(ClientSegment::Retail), 2);
        assert_eq!(count(ClientSegment::Wholesale), 1);
    }

    #[test]
    fn test_seed_is_skipped_when_clients_exist() {
        let mut repo = ClientRepository::open(MemoryStorage::new());
        repo.add(NewClient {
            name: "Acme".to_string(),
            ..NewClient::default()
        })
        .unwrap();

        assert_eq!(seed_clients(&mut repo).unwrap(), 0);
        assert_eq!(repo.list().len(), 1);
    }
}
