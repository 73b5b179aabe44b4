use thiserror::Error;

/// Errors surfaced by the cart client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Failures of the persistence slot. These never reach cart callers: the
/// store logs them and carries on with its in-memory state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(String),
    #[error("Snapshot serialization error: {0}")]
    Serialization(String),
    #[error("Storage unavailable")]
    Unavailable,
}
