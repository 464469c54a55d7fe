//! Descriptive statistics for a single series.

use crate::forecast::trend_projector::TrendProjector;
use crate::types::series::Series;
use crate::types::timestamp::Timestamp;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Summary statistics of a [`Series`].
///
/// NaN and infinite values are left out of the statistics and counted in
/// `non_finite`, so a summary can be shown for data the forecaster would reject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub metric: String,
    /// Number of observations, including non-finite ones.
    pub count: usize,
    pub non_finite: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1 denominator).
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub first: Timestamp,
    pub last: Timestamp,
    /// The trend the forecaster would fit. `None` if it would refuse the series.
    pub mean_delta: Option<f64>,
}

impl SeriesSummary {
    /// Summarises `series`. Returns `None` for an empty series.
    pub fn from_series(series: &Series) -> Option<SeriesSummary> {
        let first = series.first()?.timestamp;
        let last = series.last()?.timestamp;

        let finite: Vec<f64> = series.values().filter(|value| value.is_finite()).collect();
        let n = finite.len();

        let mean = (n > 0).then(|| finite.iter().sum::<f64>() / n as f64);
        let std_dev = mean.filter(|_| n > 1).map(|mean| {
            let squares: f64 = finite.iter().map(|value| (value - mean).powi(2)).sum();
            (squares / (n - 1) as f64).sqrt()
        });
        let min = finite.iter().copied().map(OrderedFloat).min().map(|value| value.0);
        let max = finite.iter().copied().map(OrderedFloat).max().map(|value| value.0);

        let mean_delta = TrendProjector::default()
            .fit(series)
            .ok()
            .map(|fit| fit.mean_delta);

        Some(SeriesSummary {
            metric: series.metric().to_string(),
            count: series.len(),
            non_finite: series.len() - n,
            mean,
            std_dev,
            min,
            max,
            first,
            last,
            mean_delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_basic() {
        let series = Series::from_values("Temperature", &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let summary = SeriesSummary::from_series(&series).unwrap();

        assert_eq!(summary.count, 8);
        assert_eq!(summary.mean, Some(5.0));
        assert_eq!(summary.min, Some(2.0));
        assert_eq!(summary.max, Some(9.0));
        assert!((summary.std_dev.unwrap() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(summary.mean_delta, Some(1.0));
        assert_eq!(summary.first, Timestamp::Ordinal(1));
        assert_eq!(summary.last, Timestamp::Ordinal(8));
    }

    #[test]
    fn test_summary_single_point() {
        let series = Series::from_values("CO2", &[415.0]);
        let summary = SeriesSummary::from_series(&series).unwrap();
        assert_eq!(summary.mean, Some(415.0));
        assert_eq!(summary.std_dev, None);
        assert_eq!(summary.mean_delta, None);
    }

    #[test]
    fn test_summary_skips_non_finite() {
        let series = Series::from_values("Humidity", &[60.0, f64::NAN, 70.0, f64::INFINITY]);
        let summary = SeriesSummary::from_series(&series).unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.non_finite, 2);
        assert_eq!(summary.mean, Some(65.0));
        assert_eq!(summary.max, Some(70.0));
        assert_eq!(summary.mean_delta, None);
    }

    #[test]
    fn test_summary_empty() {
        assert!(SeriesSummary::from_series(&Series::new("SeaLevel", Vec::new())).is_none());
    }
}
