//! CLI error types.

use crate::config::ConfigError;
use thiserror::Error;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// No event was found matching the given id prefix.
    #[error("no event found matching '{prefix}'")]
    EventNotFound { prefix: String },

    /// Multiple events match the given id prefix.
    ///
    /// The user should provide a longer prefix to disambiguate.
    #[error("multiple events match '{prefix}': {matches:?}")]
    AmbiguousEvent {
        prefix: String,
        matches: Vec<String>,
    },

    /// No data directory was given and none could be derived from the environment.
    #[error("cannot determine a data directory; pass --data-dir or set storage.data_dir")]
    NoDataDir,

    /// Configuration is invalid or missing required fields.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// An error occurred in the storage layer.
    #[error(transparent)]
    Storage(#[from] storage::Error),

    /// The storage backend could not be opened.
    #[error(transparent)]
    Backend(#[from] storage::KvError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the failure happened while saving, so retrying may help.
    pub fn is_write_failure(&self) -> bool {
        matches!(
            self,
            Error::Storage(storage::Error::Persistence(
                storage::PersistenceError::Write(_)
            ))
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
