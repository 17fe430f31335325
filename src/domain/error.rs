//! Error types for the list core.
//!
//! Errors only travel below the core boundary: storage backends and config
//! loading return [`Result`], while the controller-facing components log and
//! degrade to no-ops instead of surfacing failures to the presentation layer.

use thiserror::Error;

/// The error type for storage and configuration operations.
///
/// # Examples
///
/// ```
/// use listkeeper::ListkeeperError;
///
/// fn read_slot() -> Result<(), ListkeeperError> {
///     Err(ListkeeperError::Storage("slot unreadable".to_string()))
/// }
/// assert!(read_slot().is_err());
/// ```
#[derive(Debug, Error)]
pub enum ListkeeperError {
    /// Reading from or writing to a key-value backend failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration is malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ListkeeperError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// A specialized `Result` type for listkeeper operations.
pub type Result<T> = std::result::Result<T, ListkeeperError>;
