//! Error type shared by the cell and the entity repositories.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while persisting store state.
///
/// Reads never produce one of these: unreadable or corrupt stored values fall
/// back to the default and are only logged.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend rejected the write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The value could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
