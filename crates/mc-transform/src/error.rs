//! Error types for table transforms.

use thiserror::Error;

/// Errors raised by the normalization transforms.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A transform needs a column the input table does not have.
    #[error("{operation}: missing column '{column}'")]
    MissingColumn {
        operation: &'static str,
        column: String,
    },

    /// A grouping transform was given no key columns.
    #[error("{operation}: at least one key column is required")]
    EmptyKeys { operation: &'static str },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
