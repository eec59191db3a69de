//! Report error types.

use thiserror::Error;

/// Report errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The report configuration is invalid.
    #[error("invalid report config: {0}")]
    Invalid(String),

    /// Failed to parse a report config file.
    #[error("failed to parse report config: {0}")]
    Parse(String),

    /// An I/O error occurred while reading the config.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
