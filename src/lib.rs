//! Project climate metrics forward with a naive linear trend.
//!
//! The crate loads tabular observations (CSV) with Polars, extracts one named
//! metric into a typed [`Series`], and extrapolates it with [`TrendProjector`]:
//! the last observed value plus the mean step-to-step change, once per future step.
//!
//! ```no_run
//! use climate_trend::{load_csv, SeriesExtractor, TrendProjector, write_projection_csv};
//!
//! # fn main() -> Result<(), climate_trend::ClimateTrendError> {
//! let frame = load_csv("climate.csv")?;
//! let extraction = SeriesExtractor::builder()
//!     .time_column("Years")
//!     .value_column("Temperature")
//!     .build()
//!     .extract(frame)?;
//!
//! let projection = TrendProjector::default().fit_and_project(&extraction.series, 10)?;
//! write_projection_csv(&projection, "climate_predictions.csv")?;
//! # Ok(())
//! # }
//! ```

mod data;
mod error;
mod forecast;
mod summary;
mod types;

pub use error::ClimateTrendError;

pub use types::cadence::Cadence;
pub use types::observation::Observation;
pub use types::projection::{ProjectedPoint, Projection};
pub use types::series::Series;
pub use types::timestamp::Timestamp;

pub use forecast::error::ForecastError;
pub use forecast::trend_projector::*;

pub use data::csv_loader::{load_csv, load_csv_bytes};
pub use data::error::DataError;
pub use data::export::write_projection_csv;
pub use data::series_extractor::{Extraction, SeriesExtractor};

pub use summary::SeriesSummary;
