use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ForecastError {
    #[error("Forecast horizon must be a positive number of steps, got {0}")]
    InvalidHorizon(i64),

    #[error("Forecast horizon {requested} exceeds the configured maximum of {max} steps")]
    HorizonTooLarge { requested: i64, max: u32 },

    #[error("Not enough data to fit a trend: need at least {required} observations, found {found}")]
    InsufficientData { found: usize, required: usize },

    #[error("Observation {index} has a non-finite value ({value})")]
    InvalidValue { index: usize, value: f64 },

    #[error("Trend is not finite: differences between observations overflow")]
    NonFiniteTrend,

    #[error("Projected value at step {step} is not finite")]
    NonFinitePrediction { step: u32 },

    #[error("Timestamp of projected step {step} is out of range")]
    TimestampOverflow { step: u32 },
}
