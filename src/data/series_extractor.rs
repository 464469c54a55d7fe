//! Maps one named column of a climate table into a typed [`Series`].

use crate::data::error::DataError;
use crate::types::observation::Observation;
use crate::types::series::Series;
use crate::types::timestamp::Timestamp;
use bon::bon;
use chrono::NaiveDate;
use log::{info, warn};
use polars::prelude::*;

const TIME_ALIAS: &str = "__timestamp";
const VALUE_ALIAS: &str = "__value";

/// Days between 0001-01-01 (CE day 1) and the Unix epoch, which Polars dates count from.
const UNIX_EPOCH_CE_DAYS: i32 = 719_163;

/// The outcome of extracting a series from a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub series: Series,
    /// Rows skipped because the timestamp or the value was missing or unparseable.
    pub dropped_rows: usize,
}

/// Extracts a time column and a value column from a table into a [`Series`].
///
/// Column names are matched exactly; a missing column is reported as
/// [`DataError::MissingColumn`] together with the columns that do exist.
///
/// Supported timestamp columns are `Date`, `Datetime` (truncated to the day),
/// any integer type (used as ordinals, e.g. years) and strings holding either.
/// A string column takes its kind from the first parsable cell; cells of the other
/// kind are dropped like unparseable ones.
/// The value column is cast to `f64`. Rows where either cell is null or cannot be
/// parsed are dropped and counted. NaN and infinite values are kept as they are.
///
/// # Examples
///
/// ```
/// use climate_trend::{load_csv_bytes, SeriesExtractor};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let frame = load_csv_bytes(b"Years,CO2\n2020,414.2\n2021,416.4\n2022,\n".to_vec())?;
/// let extraction = SeriesExtractor::builder()
///     .time_column("Years")
///     .value_column("CO2")
///     .build()
///     .extract(frame)?;
///
/// assert_eq!(extraction.series.len(), 2);
/// assert_eq!(extraction.dropped_rows, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesExtractor {
    time_column: String,
    value_column: String,
    start: Option<Timestamp>,
    end: Option<Timestamp>,
}

#[bon]
impl SeriesExtractor {
    /// Creates an extractor.
    ///
    /// # Arguments
    ///
    /// * `.time_column(&str)`: **Required.** Column holding the timestamps.
    /// * `.value_column(&str)`: **Required.** Column holding the metric. Also used as the series name.
    /// * `.start(Timestamp)`: Optional. Inclusive lower bound on the timestamps.
    /// * `.end(Timestamp)`: Optional. Inclusive upper bound on the timestamps.
    ///
    /// For date columns an ordinal bound is read as a year: `start(2020)` keeps
    /// rows from 2020-01-01 and `end(2020)` keeps rows up to 2020-12-31.
    #[builder]
    pub fn new(
        #[builder(into)] time_column: String,
        #[builder(into)] value_column: String,
        #[builder(into)] start: Option<Timestamp>,
        #[builder(into)] end: Option<Timestamp>,
    ) -> Self {
        Self {
            time_column,
            value_column,
            start,
            end,
        }
    }
}

impl SeriesExtractor {
    pub fn time_column(&self) -> &str {
        &self.time_column
    }

    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    /// Extracts the configured columns of `frame` into a sorted [`Series`].
    ///
    /// # Errors
    ///
    /// * [`DataError::MissingColumn`] if either column does not exist.
    /// * [`DataError::UnsupportedTimeColumn`] if the time column has an unusable type.
    /// * [`DataError::BoundKindMismatch`] if a date bound is given for an ordinal column.
    /// * [`DataError::BoundOutOfRange`] if a year bound on a date column is not a valid year.
    /// * [`DataError::DataFrameProcessing`] if Polars fails to evaluate the frame.
    pub fn extract(&self, mut frame: LazyFrame) -> Result<Extraction, DataError> {
        let schema = frame.collect_schema()?;
        for column in [&self.time_column, &self.value_column] {
            if schema.get(column.as_str()).is_none() {
                return Err(DataError::MissingColumn {
                    column: column.clone(),
                    available: schema.iter_names().map(|name| name.to_string()).collect(),
                });
            }
        }

        let df = frame
            .select([
                col(self.time_column.as_str()).alias(TIME_ALIAS),
                col(self.value_column.as_str()).alias(VALUE_ALIAS),
            ])
            .collect()?;

        let timestamps = self.parse_timestamps(df.column(TIME_ALIAS)?)?;
        let values = df.column(VALUE_ALIAS)?.cast(&DataType::Float64)?;

        let total_rows = df.height();
        let observations: Vec<Observation> = timestamps
            .into_iter()
            .zip(values.f64()?)
            .filter_map(|(timestamp, value)| Some(Observation::new(timestamp?, value?)))
            .collect();
        let dropped_rows = total_rows - observations.len();
        if dropped_rows > 0 {
            warn!(
                "Dropped {} of {} rows with a missing or unparseable '{}' or '{}'",
                dropped_rows, total_rows, self.time_column, self.value_column
            );
        }

        let series = Series::new(self.value_column.as_str(), observations);
        let series = self.apply_bounds(series)?;
        info!(
            "Extracted {} observations of '{}' keyed by '{}'",
            series.len(),
            self.value_column,
            self.time_column
        );

        Ok(Extraction {
            series,
            dropped_rows,
        })
    }

    fn parse_timestamps(&self, column: &Column) -> Result<Vec<Option<Timestamp>>, DataError> {
        match column.dtype() {
            DataType::Date | DataType::Datetime(_, _) => {
                let days = column.cast(&DataType::Date)?.cast(&DataType::Int32)?;
                Ok(days
                    .i32()?
                    .into_iter()
                    .map(|day| day.and_then(date_from_epoch_days).map(Timestamp::Date))
                    .collect())
            }
            dtype if dtype.is_integer() => {
                let ordinals = column.cast(&DataType::Int64)?;
                Ok(ordinals
                    .i64()?
                    .into_iter()
                    .map(|ordinal| ordinal.map(Timestamp::Ordinal))
                    .collect())
            }
            DataType::String => {
                let parsed: Vec<Option<Timestamp>> = column
                    .str()?
                    .into_iter()
                    .map(|text| text.and_then(Timestamp::parse))
                    .collect();
                Ok(self.keep_one_kind(parsed))
            }
            other => Err(DataError::UnsupportedTimeColumn {
                column: self.time_column.clone(),
                dtype: other.to_string(),
            }),
        }
    }

    /// Nulls out cells whose kind differs from the first parsed cell, so that a
    /// text column yields either dates or ordinals, never both.
    fn keep_one_kind(&self, parsed: Vec<Option<Timestamp>>) -> Vec<Option<Timestamp>> {
        let Some(dated) = parsed.iter().flatten().next().map(Timestamp::is_date) else {
            return parsed;
        };
        let mut mixed = 0usize;
        let kept: Vec<Option<Timestamp>> = parsed
            .into_iter()
            .map(|timestamp| match timestamp {
                Some(timestamp) if timestamp.is_date() != dated => {
                    mixed += 1;
                    None
                }
                other => other,
            })
            .collect();
        if mixed > 0 {
            warn!(
                "Ignoring {} cells in column '{}' that are not {} like the first parsed cell",
                mixed,
                self.time_column,
                if dated { "dates" } else { "integers" }
            );
        }
        kept
    }

    fn apply_bounds(&self, series: Series) -> Result<Series, DataError> {
        if self.start.is_none() && self.end.is_none() {
            return Ok(series);
        }
        let dated = series.first().map_or(false, |first| first.timestamp.is_date());
        let start = self
            .start
            .map(|bound| self.resolve_bound(bound, dated, true))
            .transpose()?;
        let end = self
            .end
            .map(|bound| self.resolve_bound(bound, dated, false))
            .transpose()?;
        Ok(series.within(start, end))
    }

    /// Brings a bound to the same timestamp kind as the series.
    fn resolve_bound(&self, bound: Timestamp, dated: bool, is_start: bool) -> Result<Timestamp, DataError> {
        let out_of_range = || DataError::BoundOutOfRange {
            column: self.time_column.clone(),
            bound,
        };
        match (bound, dated) {
            (Timestamp::Ordinal(year), true) => {
                let year = i32::try_from(year).map_err(|_| out_of_range())?;
                let date = if is_start {
                    NaiveDate::from_ymd_opt(year, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(year, 12, 31)
                };
                date.map(Timestamp::Date).ok_or_else(out_of_range)
            }
            (Timestamp::Date(_), false) => Err(DataError::BoundKindMismatch {
                column: self.time_column.clone(),
                bound,
            }),
            _ => Ok(bound),
        }
    }
}

fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_CE_DAYS)?)
}
