//! Reads climate CSV tables into Polars frames.

use crate::data::error::DataError;
use log::info;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

/// Number of rows Polars inspects to infer column types.
const INFER_SCHEMA_ROWS: usize = 1000;

fn read_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .map_parse_options(|options| options.with_try_parse_dates(true))
}

/// Loads a CSV file with a header row.
///
/// Columns that look like ISO dates are parsed into `Date`/`Datetime` columns.
///
/// # Errors
///
/// Returns [`DataError::CsvRead`] if the file cannot be opened or parsed.
pub fn load_csv(path: impl AsRef<Path>) -> Result<LazyFrame, DataError> {
    let path = path.as_ref();
    let df = read_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| DataError::CsvRead(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| DataError::CsvRead(path.to_path_buf(), e))?;

    info!(
        "Loaded {} rows x {} columns from {:?}",
        df.height(),
        df.width(),
        path
    );
    Ok(df.lazy())
}

/// Loads CSV content that is already in memory, e.g. an uploaded file.
///
/// # Errors
///
/// Returns [`DataError::CsvParse`] if the bytes are not valid CSV.
pub fn load_csv_bytes(bytes: Vec<u8>) -> Result<LazyFrame, DataError> {
    let size = bytes.len();
    let df = read_options()
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(DataError::CsvParse)?;

    info!(
        "Parsed {} bytes of CSV into {} rows x {} columns",
        size,
        df.height(),
        df.width()
    );
    Ok(df.lazy())
}
