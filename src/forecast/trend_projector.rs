//! The naive linear trend forecaster.
//!
//! Fits the mean of first differences of a series and extrapolates it from the
//! last observed value:
//!
//! ```text
//! d_i        = x_i - x_{i-1}            i = 1 .. n-1
//! mean_delta = (d_1 + ... + d_{n-1}) / (n - 1)
//! x̂_{n+k}    = x_n + mean_delta * k     k = 1 .. horizon
//! ```

use crate::forecast::error::ForecastError;
use crate::types::cadence::Cadence;
use crate::types::projection::{ProjectedPoint, Projection};
use crate::types::series::Series;
use crate::types::timestamp::Timestamp;
use bon::bon;
use log::{debug, info};

/// Largest horizon accepted unless configured otherwise.
pub const DEFAULT_MAX_HORIZON: u32 = 10_000;

/// Minimum number of observations needed to compute a difference.
pub const MIN_OBSERVATIONS: usize = 2;

/// Projects a series forward by its average step-to-step change.
///
/// The projector is plain configuration; fitting and projecting are pure functions
/// of their arguments, so one instance can be shared freely between threads.
///
/// # Examples
///
/// ```
/// use climate_trend::{Series, TrendProjector};
///
/// let series = Series::from_values("Temperature", &[10.0, 12.0, 14.0]);
/// let projection = TrendProjector::default().fit_and_project(&series, 2)?;
/// assert_eq!(projection.steps(), vec![(1, 16.0), (2, 18.0)]);
/// # Ok::<(), climate_trend::ForecastError>(())
/// ```
///
/// Configure with the builder:
///
/// ```
/// use climate_trend::{Cadence, TrendProjector};
///
/// let projector = TrendProjector::builder()
///     .max_horizon(365)
///     .cadence(Cadence::Daily)
///     .build();
/// assert_eq!(projector.max_horizon(), 365);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendProjector {
    max_horizon: u32,
    cadence: Option<Cadence>,
}

#[bon]
impl TrendProjector {
    /// Creates a projector.
    ///
    /// # Arguments
    ///
    /// * `.max_horizon(u32)`: Optional. Largest accepted horizon. Defaults to [`DEFAULT_MAX_HORIZON`].
    /// * `.cadence(Cadence)`: Optional. Cadence used to timestamp future steps. If not set it is
    ///   inferred from each series with [`Cadence::infer`].
    #[builder]
    pub fn new(max_horizon: Option<u32>, cadence: Option<Cadence>) -> Self {
        Self {
            max_horizon: max_horizon.unwrap_or(DEFAULT_MAX_HORIZON),
            cadence,
        }
    }
}

impl Default for TrendProjector {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TrendProjector {
    pub fn max_horizon(&self) -> u32 {
        self.max_horizon
    }

    pub fn cadence(&self) -> Option<Cadence> {
        self.cadence
    }

    /// Fits the trend of `series` without projecting it.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::InsufficientData`] if the series has fewer than two observations.
    /// * [`ForecastError::InvalidValue`] if any value is NaN or infinite.
    /// * [`ForecastError::NonFiniteTrend`] if the differences between values overflow.
    pub fn fit(&self, series: &Series) -> Result<TrendFit, ForecastError> {
        let observations = series.observations();
        let last = match observations {
            [.., _, last] => *last,
            _ => {
                return Err(ForecastError::InsufficientData {
                    found: observations.len(),
                    required: MIN_OBSERVATIONS,
                })
            }
        };

        if let Some((index, observation)) = observations
            .iter()
            .enumerate()
            .find(|(_, observation)| !observation.value.is_finite())
        {
            return Err(ForecastError::InvalidValue {
                index,
                value: observation.value,
            });
        }

        let delta_sum: f64 = observations
            .windows(2)
            .map(|pair| pair[1].value - pair[0].value)
            .sum();
        let mean_delta = delta_sum / (observations.len() - 1) as f64;
        if !mean_delta.is_finite() {
            return Err(ForecastError::NonFiniteTrend);
        }
        let cadence = self.cadence.unwrap_or_else(|| Cadence::infer(series));

        debug!(
            "Fitted trend for '{}' over {} observations: mean_delta={}, last_value={}, cadence={}",
            series.metric(),
            observations.len(),
            mean_delta,
            last.value,
            cadence
        );

        Ok(TrendFit {
            metric: series.metric().to_string(),
            mean_delta,
            last_value: last.value,
            last_timestamp: last.timestamp,
            cadence,
            max_horizon: self.max_horizon,
        })
    }

    /// Fits the trend of `series` and projects it `horizon` steps ahead.
    ///
    /// The horizon is validated before the series is looked at.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::InvalidHorizon`] if `horizon <= 0`.
    /// * [`ForecastError::HorizonTooLarge`] if `horizon` exceeds the configured maximum.
    /// * [`ForecastError::InsufficientData`] if the series has fewer than two observations.
    /// * [`ForecastError::InvalidValue`] if any value is NaN or infinite.
    /// * [`ForecastError::NonFiniteTrend`] if the differences between values overflow.
    /// * [`ForecastError::NonFinitePrediction`] if a projected value overflows.
    /// * [`ForecastError::TimestampOverflow`] if a future date cannot be represented.
    pub fn fit_and_project(&self, series: &Series, horizon: i64) -> Result<Projection, ForecastError> {
        let steps = validate_horizon(horizon, self.max_horizon)?;
        let projection = self.fit(series)?.project_steps(steps)?;
        info!(
            "Projected '{}' {} steps ahead from {} observations",
            projection.metric,
            steps,
            series.len()
        );
        Ok(projection)
    }
}

/// Fits and projects with a default [`TrendProjector`].
pub fn fit_and_project(series: &Series, horizon: i64) -> Result<Projection, ForecastError> {
    TrendProjector::default().fit_and_project(series, horizon)
}

/// A fitted trend, ready to be projected any number of steps ahead.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendFit {
    pub metric: String,
    /// Average change per step.
    pub mean_delta: f64,
    pub last_value: f64,
    pub last_timestamp: Timestamp,
    pub cadence: Cadence,
    max_horizon: u32,
}

impl TrendFit {
    /// Value predicted `step` steps after the last observation.
    pub fn predict(&self, step: u32) -> f64 {
        self.last_value + self.mean_delta * f64::from(step)
    }

    /// Projects the fitted trend `horizon` steps ahead.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::InvalidHorizon`] if `horizon <= 0`.
    /// * [`ForecastError::HorizonTooLarge`] if `horizon` exceeds the projector's maximum.
    /// * [`ForecastError::NonFinitePrediction`] if a projected value overflows.
    /// * [`ForecastError::TimestampOverflow`] if a future date cannot be represented.
    pub fn project(&self, horizon: i64) -> Result<Projection, ForecastError> {
        let steps = validate_horizon(horizon, self.max_horizon)?;
        self.project_steps(steps)
    }

    fn project_steps(&self, horizon: u32) -> Result<Projection, ForecastError> {
        let points = (1..=horizon)
            .map(|step| {
                let timestamp = self
                    .cadence
                    .advance(self.last_timestamp, step)
                    .ok_or(ForecastError::TimestampOverflow { step })?;
                let value = self.predict(step);
                if !value.is_finite() {
                    return Err(ForecastError::NonFinitePrediction { step });
                }
                Ok(ProjectedPoint {
                    step,
                    timestamp,
                    value,
                })
            })
            .collect::<Result<Vec<_>, ForecastError>>()?;

        Ok(Projection {
            metric: self.metric.clone(),
            mean_delta: self.mean_delta,
            last_value: self.last_value,
            points,
        })
    }
}

fn validate_horizon(horizon: i64, max: u32) -> Result<u32, ForecastError> {
    if horizon <= 0 {
        return Err(ForecastError::InvalidHorizon(horizon));
    }
    u32::try_from(horizon)
        .ok()
        .filter(|&steps| steps <= max)
        .ok_or(ForecastError::HorizonTooLarge {
            requested: horizon,
            max,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::observation::Observation;
    use chrono::NaiveDate;

    fn ordinal_series(points: &[(i64, f64)]) -> Series {
        Series::new(
            "Temperature",
            points
                .iter()
                .map(|&(ordinal, value)| Observation::new(ordinal, value))
                .collect(),
        )
    }

    #[test]
    fn test_linear_increase() -> Result<(), ForecastError> {
        let series = ordinal_series(&[(1, 10.0), (2, 12.0), (3, 14.0)]);
        let projection = fit_and_project(&series, 2)?;
        assert_eq!(projection.steps(), vec![(1, 16.0), (2, 18.0)]);
        assert_eq!(projection.mean_delta, 2.0);
        assert_eq!(projection.last_value, 14.0);
        Ok(())
    }

    #[test]
    fn test_flat_two_points() -> Result<(), ForecastError> {
        let series = ordinal_series(&[(1, 5.0), (2, 5.0)]);
        let projection = fit_and_project(&series, 3)?;
        assert_eq!(projection.steps(), vec![(1, 5.0), (2, 5.0), (3, 5.0)]);
        Ok(())
    }

    #[test]
    fn test_single_observation_is_insufficient() {
        let series = ordinal_series(&[(1, 100.0)]);
        assert_eq!(
            fit_and_project(&series, 5),
            Err(ForecastError::InsufficientData {
                found: 1,
                required: 2
            })
        );
    }

    #[test]
    fn test_empty_series_is_insufficient() {
        let series = Series::new("CO2", Vec::new());
        assert_eq!(
            fit_and_project(&series, 1),
            Err(ForecastError::InsufficientData {
                found: 0,
                required: 2
            })
        );
    }

    #[test]
    fn test_zero_and_negative_horizon() {
        let series = ordinal_series(&[(1, 1.0), (2, 2.0)]);
        assert_eq!(fit_and_project(&series, 0), Err(ForecastError::InvalidHorizon(0)));
        assert_eq!(fit_and_project(&series, -4), Err(ForecastError::InvalidHorizon(-4)));
    }

    #[test]
    fn test_horizon_checked_before_series() {
        let empty = Series::new("CO2", Vec::new());
        assert_eq!(fit_and_project(&empty, 0), Err(ForecastError::InvalidHorizon(0)));

        let with_nan = ordinal_series(&[(1, f64::NAN), (2, 1.0)]);
        assert_eq!(fit_and_project(&with_nan, -1), Err(ForecastError::InvalidHorizon(-1)));
    }

    #[test]
    fn test_mean_of_uneven_differences() -> Result<(), ForecastError> {
        let series = ordinal_series(&[(1, 3.0), (2, 1.0), (3, 7.0)]);
        let projection = fit_and_project(&series, 1)?;
        assert_eq!(projection.steps(), vec![(1, 9.0)]);
        assert_eq!(projection.mean_delta, 2.0);
        Ok(())
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let series = ordinal_series(&[(1, 1.0), (2, f64::INFINITY), (3, 2.0)]);
        assert_eq!(
            fit_and_project(&series, 2),
            Err(ForecastError::InvalidValue {
                index: 1,
                value: f64::INFINITY
            })
        );

        let series = ordinal_series(&[(1, 1.0), (2, 2.0), (3, f64::NAN)]);
        assert!(matches!(
            fit_and_project(&series, 2),
            Err(ForecastError::InvalidValue { index: 2, .. })
        ));
    }

    #[test]
    fn test_overflowing_differences_rejected() {
        let series = ordinal_series(&[(1, f64::MAX), (2, -f64::MAX), (3, f64::MAX)]);
        assert_eq!(fit_and_project(&series, 1), Err(ForecastError::NonFiniteTrend));

        assert_eq!(
            TrendProjector::default().fit(&series),
            Err(ForecastError::NonFiniteTrend)
        );
    }

    #[test]
    fn test_overflowing_prediction_rejected() {
        let series = ordinal_series(&[(1, 0.0), (2, f64::MAX)]);
        assert_eq!(
            fit_and_project(&series, 3),
            Err(ForecastError::NonFinitePrediction { step: 1 })
        );
    }

    #[test]
    fn test_horizon_length_and_step_order() -> Result<(), ForecastError> {
        let series = ordinal_series(&[(1, 0.5), (2, -1.25), (3, 4.0), (4, 3.5)]);
        for horizon in [1, 2, 7, 50] {
            let projection = fit_and_project(&series, horizon)?;
            assert_eq!(projection.horizon(), horizon as usize);
            let steps: Vec<u32> = projection.points.iter().map(|p| p.step).collect();
            assert_eq!(steps, (1..=horizon as u32).collect::<Vec<_>>());
        }
        Ok(())
    }

    #[test]
    fn test_linear_series_extrapolates_exactly() -> Result<(), ForecastError> {
        let slope = -0.25;
        let values: Vec<f64> = (0..20).map(|i| 100.0 + slope * f64::from(i)).collect();
        let series = Series::from_values("SeaLevel", &values);
        let last = values[values.len() - 1];

        let projection = fit_and_project(&series, 30)?;
        for point in &projection.points {
            assert_eq!(point.value, last + slope * f64::from(point.step));
        }
        Ok(())
    }

    #[test]
    fn test_deterministic_and_input_untouched() -> Result<(), ForecastError> {
        let series = ordinal_series(&[(1, 2.2), (2, 3.9), (3, 3.1), (4, 5.6)]);
        let before = series.clone();

        let first = fit_and_project(&series, 12)?;
        let second = fit_and_project(&series, 12)?;
        assert_eq!(first, second);
        assert_eq!(series, before);
        Ok(())
    }

    #[test]
    fn test_horizon_too_large() {
        let projector = TrendProjector::builder().max_horizon(10).build();
        let series = ordinal_series(&[(1, 1.0), (2, 2.0)]);
        assert_eq!(
            projector.fit_and_project(&series, 11),
            Err(ForecastError::HorizonTooLarge {
                requested: 11,
                max: 10
            })
        );
        assert!(projector.fit_and_project(&series, 10).is_ok());
        assert!(matches!(
            fit_and_project(&series, i64::MAX),
            Err(ForecastError::HorizonTooLarge { .. })
        ));
    }

    #[test]
    fn test_ordinal_timestamps_continue_from_last() -> Result<(), ForecastError> {
        let series = ordinal_series(&[(2018, 410.0), (2019, 411.5), (2020, 413.0)]);
        let projection = fit_and_project(&series, 2)?;
        let timestamps: Vec<Timestamp> = projection.points.iter().map(|p| p.timestamp).collect();
        assert_eq!(timestamps, vec![Timestamp::Ordinal(2021), Timestamp::Ordinal(2022)]);
        Ok(())
    }

    #[test]
    fn test_dated_projection_uses_inferred_cadence() -> Result<(), ForecastError> {
        let month = |m| NaiveDate::from_ymd_opt(2023, m, 1).unwrap();
        let series = Series::new(
            "tavg",
            (1..=4).map(|m| Observation::new(month(m), f64::from(m))).collect(),
        );

        let projection = fit_and_project(&series, 2)?;
        assert_eq!(projection.points[0].timestamp, Timestamp::Date(month(5)));
        assert_eq!(projection.points[1].timestamp, Timestamp::Date(month(6)));
        assert_eq!(projection.values().collect::<Vec<_>>(), vec![5.0, 6.0]);
        Ok(())
    }

    #[test]
    fn test_configured_cadence_overrides_inference() -> Result<(), ForecastError> {
        let day = |d| NaiveDate::from_ymd_opt(2023, 3, d).unwrap();
        let series = Series::new(
            "prcp",
            vec![Observation::new(day(1), 0.0), Observation::new(day(2), 1.0)],
        );
        let projector = TrendProjector::builder().cadence(Cadence::Weekly).build();

        let projection = projector.fit_and_project(&series, 1)?;
        assert_eq!(projection.points[0].timestamp, Timestamp::Date(day(9)));
        Ok(())
    }

    #[test]
    fn test_fit_then_project() -> Result<(), ForecastError> {
        let series = Series::from_values("Humidity", &[70.0, 68.0, 66.0]);
        let fit = TrendProjector::default().fit(&series)?;
        assert_eq!(fit.mean_delta, -2.0);
        assert_eq!(fit.predict(3), 60.0);
        assert_eq!(fit.project(0), Err(ForecastError::InvalidHorizon(0)));
        assert_eq!(fit.project(1)?.steps(), vec![(1, 64.0)]);
        Ok(())
    }
}
