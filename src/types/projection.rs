//! Contains the `Projection` produced by [`crate::TrendProjector`].

use crate::types::timestamp::Timestamp;
use polars::prelude::{DataFrame, PolarsResult};
use serde::{Deserialize, Serialize};

/// One predicted future value.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    /// Steps ahead of the last observation, starting at 1.
    pub step: u32,
    /// The timestamp this step falls on, derived from the series cadence.
    pub timestamp: Timestamp,
    pub value: f64,
}

/// The forward projection of a series.
///
/// Holds the fitted trend (`mean_delta` per step, anchored at `last_value`) and
/// exactly `horizon` points with steps `1..=horizon` in order. A projection owns no
/// resources and is never modified after it is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub metric: String,
    pub mean_delta: f64,
    pub last_value: f64,
    pub points: Vec<ProjectedPoint>,
}

impl Projection {
    pub fn horizon(&self) -> usize {
        self.points.len()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|point| point.value)
    }

    /// `(step, value)` pairs, the minimal form of the projection.
    pub fn steps(&self) -> Vec<(u32, f64)> {
        self.points.iter().map(|point| (point.step, point.value)).collect()
    }

    /// Name of the value column used in tabular output: `<metric>_predicted`.
    pub fn value_column_name(&self) -> String {
        format!("{}_predicted", self.metric)
    }

    /// Converts the projection into a Polars `DataFrame`.
    ///
    /// Columns are `step` (u32), `timestamp` (string, `YYYY-MM-DD` or the ordinal)
    /// and `<metric>_predicted` (f64).
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let steps: Vec<u32> = self.points.iter().map(|point| point.step).collect();
        let timestamps: Vec<String> = self
            .points
            .iter()
            .map(|point| point.timestamp.to_string())
            .collect();
        let values: Vec<f64> = self.values().collect();
        let value_column = self.value_column_name();

        polars::df!(
            "step" => steps,
            "timestamp" => timestamps,
            value_column.as_str() => values,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Projection {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Projection {
            metric: "Humidity".to_string(),
            mean_delta: 0.5,
            last_value: 60.0,
            points: (1..=3)
                .map(|step| ProjectedPoint {
                    step,
                    timestamp: Timestamp::Date(start + chrono::Duration::days(i64::from(step))),
                    value: 60.0 + 0.5 * f64::from(step),
                })
                .collect(),
        }
    }

    #[test]
    fn test_to_dataframe_shape() -> Result<(), Box<dyn std::error::Error>> {
        let projection = sample();
        let df = projection.to_dataframe()?;

        assert_eq!(df.shape(), (3, 3));
        let values = df.column("Humidity_predicted")?.f64()?;
        assert_eq!(values.get(2), Some(61.5));
        let timestamps = df.column("timestamp")?.str()?;
        assert_eq!(timestamps.get(0), Some("2024-01-02"));
        Ok(())
    }

    #[test]
    fn test_steps_pairs() {
        assert_eq!(sample().steps(), vec![(1, 60.5), (2, 61.0), (3, 61.5)]);
    }
}
