use crate::types::timestamp::Timestamp;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read CSV file '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Failed to parse uploaded CSV data")]
    CsvParse(#[source] PolarsError),

    #[error("Failed to create output file '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to write CSV file '{0}'")]
    CsvWrite(PathBuf, #[source] PolarsError),

    #[error("Required column '{column}' not found (available columns: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Column '{column}' has type {dtype}, which cannot be used as a timestamp")]
    UnsupportedTimeColumn { column: String, dtype: String },

    #[error("Bound {bound} cannot be compared with the timestamps in column '{column}'")]
    BoundKindMismatch { column: String, bound: Timestamp },

    #[error("Bound {bound} is outside the supported date range for column '{column}'")]
    BoundOutOfRange { column: String, bound: Timestamp },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
