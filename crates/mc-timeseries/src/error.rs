//! Error types for period expansion.

use std::path::PathBuf;

use mc_ingest::IngestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeSeriesError {
    /// A required input file is absent from a period-map folder.
    #[error("missing input file: {path}")]
    MissingFile { path: PathBuf },

    /// A required column is absent.
    #[error("{table}: missing column '{column}'")]
    MissingColumn { table: &'static str, column: String },

    /// A cell that must hold an integer does not.
    #[error("{table}: column '{column}' value {value:?} is not an integer")]
    InvalidInteger {
        table: &'static str,
        column: String,
        value: Option<String>,
    },

    /// A representative period slot label without a numeric id.
    #[error("invalid representative period slot {slot:?}")]
    InvalidSlot { slot: String },

    /// Two representative blocks claim the same id.
    #[error("representative period {id} is listed more than once")]
    DuplicateSlot { id: i64 },

    /// The table height does not match `timesteps x periods`.
    #[error(
        "{table} has {actual} rows but {timesteps} timesteps x {periods} periods = {expected}"
    )]
    LengthMismatch {
        table: &'static str,
        timesteps: usize,
        periods: usize,
        expected: usize,
        actual: usize,
    },

    /// `Representative_Period.csv` lists a different number of slots than `Rep_Periods`.
    #[error("Representative_Period lists {actual} slots but Rep_Periods is {expected}")]
    SlotCountMismatch { expected: usize, actual: usize },

    /// Load-data settings reach past the end of the full-year series.
    #[error("Load_data settings occupy {rows} rows but the full-year series has {available}")]
    SettingsOverflow { rows: usize, available: usize },

    /// The period map references a representative period the series does not have.
    #[error("period map references unknown representative period {id}")]
    UnknownRepPeriod { id: i64 },

    /// Reading or writing a CSV file failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TimeSeriesError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TimeSeriesError>;
