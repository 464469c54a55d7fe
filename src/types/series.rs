//! Defines `Series`, the ordered observations of a single metric.

use crate::types::observation::Observation;
use crate::types::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// An ordered sequence of [`Observation`]s for one named metric.
///
/// Observations are kept sorted ascending by timestamp; [`Series::new`] sorts its
/// input (stably, so rows sharing a timestamp keep their original order). Gaps in
/// the timestamps are allowed and are not treated specially by the forecaster:
/// consecutive observations are consecutive steps.
///
/// A series is built fresh for every forecast request and is never mutated
/// afterwards. It may be empty; operations that need data report that themselves.
///
/// # Examples
///
/// ```
/// use climate_trend::{Observation, Series};
///
/// let series = Series::new(
///     "Temperature",
///     vec![Observation::new(2021, 14.2), Observation::new(2020, 13.9)],
/// );
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.values().collect::<Vec<_>>(), vec![13.9, 14.2]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSeries")]
pub struct Series {
    metric: String,
    observations: Vec<Observation>,
}

/// Deserialized form of a [`Series`], sorted on conversion.
#[derive(Deserialize)]
struct RawSeries {
    metric: String,
    observations: Vec<Observation>,
}

impl From<RawSeries> for Series {
    fn from(raw: RawSeries) -> Self {
        Series::new(raw.metric, raw.observations)
    }
}

impl Series {
    /// Creates a series, sorting the observations by timestamp.
    pub fn new(metric: impl Into<String>, mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|observation| observation.timestamp);
        Self {
            metric: metric.into(),
            observations,
        }
    }

    /// Creates a series from bare values, numbering them `1, 2, 3, ...`.
    pub fn from_values(metric: impl Into<String>, values: &[f64]) -> Self {
        let observations = (1..)
            .zip(values)
            .map(|(ordinal, &value)| Observation::new(Timestamp::Ordinal(ordinal), value))
            .collect();
        Self {
            metric: metric.into(),
            observations,
        }
    }

    /// The name of the measured metric (usually the source column name).
    pub fn metric(&self) -> &str {
        &self.metric
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|observation| observation.value)
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Returns a new series restricted to timestamps within `[start, end]` (inclusive).
    ///
    /// A missing bound leaves that side open.
    pub fn within(&self, start: Option<Timestamp>, end: Option<Timestamp>) -> Series {
        let observations = self
            .observations
            .iter()
            .filter(|observation| start.map_or(true, |start| observation.timestamp >= start))
            .filter(|observation| end.map_or(true, |end| observation.timestamp <= end))
            .copied()
            .collect();
        Self {
            metric: self.metric.clone(),
            observations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_new_sorts_stably() {
        let series = Series::new(
            "SeaLevel",
            vec![
                Observation::new(3, 30.0),
                Observation::new(1, 10.0),
                Observation::new(3, 31.0),
                Observation::new(2, 20.0),
            ],
        );
        assert_eq!(series.values().collect::<Vec<_>>(), vec![10.0, 20.0, 30.0, 31.0]);
        assert_eq!(series.metric(), "SeaLevel");
    }

    #[test]
    fn test_from_values_numbers_from_one() {
        let series = Series::from_values("co2", &[400.1, 401.3]);
        assert_eq!(series.first().map(|o| o.timestamp), Some(Timestamp::Ordinal(1)));
        assert_eq!(series.last().map(|o| o.timestamp), Some(Timestamp::Ordinal(2)));
    }

    #[test]
    fn test_within_bounds_inclusive() {
        let day = |d| NaiveDate::from_ymd_opt(2022, 8, d).unwrap();
        let series = Series::new(
            "tmax",
            (1..=10).map(|d| Observation::new(day(d), d as f64)).collect(),
        );

        let window = series.within(Some(day(3).into()), Some(day(5).into()));
        assert_eq!(window.values().collect::<Vec<_>>(), vec![3.0, 4.0, 5.0]);

        let open_end = series.within(Some(day(9).into()), None);
        assert_eq!(open_end.len(), 2);

        let empty = series.within(Some(day(11).into()), None);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_deserialize_sorts_observations() -> Result<(), serde_json::Error> {
        let json = r#"{
            "metric": "CO2",
            "observations": [
                {"timestamp": 2021, "value": 416.4},
                {"timestamp": 2019, "value": 411.4},
                {"timestamp": 2020, "value": 414.2}
            ]
        }"#;
        let series: Series = serde_json::from_str(json)?;
        assert_eq!(series.values().collect::<Vec<_>>(), vec![411.4, 414.2, 416.4]);
        assert_eq!(series.first().map(|o| o.timestamp), Some(Timestamp::Ordinal(2019)));

        let back: Series = serde_json::from_str(&serde_json::to_string(&series)?)?;
        assert_eq!(back, series);
        Ok(())
    }
}
