//! Storage error types.

use thiserror::Error;

/// Storage errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The durable collection could not be read or written.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// A draft or resolution violated the record invariants.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Failures at the durable storage boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PersistenceError {
    #[error("failed to read events: {0}")]
    Read(#[source] KvError),

    #[error("failed to write events: {0}")]
    Write(#[source] KvError),

    /// The stored value is not a valid event collection.
    #[error("stored events are corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("failed to encode events: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Errors raised by a [`KvStore`](crate::KvStore) backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KvError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The backend could not service the request (worker gone, injected fault, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
