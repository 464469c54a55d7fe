use crate::data::error::DataError;
use crate::forecast::error::ForecastError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateTrendError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error("Failed to serialize output")]
    Serialization(#[from] serde_json::Error),
}
