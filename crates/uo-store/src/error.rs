//! Error types for persistence and interchange.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed uploaded data: missing column, unparsable cell, empty table.
    #[error("Data format error: {what}")]
    DataFormat { what: String },
}

impl StoreError {
    pub fn data_format(what: impl Into<String>) -> Self {
        Self::DataFormat { what: what.into() }
    }
}
