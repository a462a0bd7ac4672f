//! Error types shared across the service.

use thiserror::Error;

use crate::record::PlaceCategory;

/// A submitted record that cannot be stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `name` is missing or blank.
    #[error("name is required")]
    MissingName,

    /// A detail was supplied for a category that is not selected.
    #[error("detail given for unselected place category: {0}")]
    UnselectedDetail(PlaceCategory),
}

/// Errors raised by a record store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite failure.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored column could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored row holds a value that is not a valid record.
    #[error("Corrupt record {id}: {message}")]
    Corrupt { id: String, message: String },

    /// The blocking storage task did not complete.
    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Filesystem failure while preparing the database location.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the record service.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Invalid server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid PORT value: {value}")]
    InvalidPort { value: String },

    #[error("unknown SAINTS_STORE backend: {value} (expected \"sqlite\" or \"memory\")")]
    UnknownStore { value: String },
}

/// JSON body returned by the API on failure.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    /// Human-readable summary, shown to the user as-is.
    pub message: String,
    /// Underlying cause.
    pub error: String,
}
