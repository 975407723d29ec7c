use crate::store::TableId;
use thiserror::Error;

/// Failures raised by a tabular store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Unknown table handle {0}")]
    UnknownTable(TableId),

    #[error("No cell at row {row}, column {col} in table '{table}'")]
    CellOutOfRange {
        table: String,
        row: usize,
        col: usize,
    },
}

/// Failures raised while handling one inbound submission.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Expected 4 fields, found {found}")]
    MalformedInput { found: usize },

    #[error("Amount '{raw}' is not numeric")]
    InvalidAmount { raw: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type RelayResult<T> = Result<T, RelayError>;
