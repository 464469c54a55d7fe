//! Defines the sampling cadence of a series, used to put dates on projected steps.

use crate::types::series::Series;
use crate::types::timestamp::Timestamp;
use chrono::{Days, Months};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The interval between two consecutive observations of a series.
///
/// The trend forecaster itself only counts steps; the cadence decides which
/// timestamp the `k`-th future step lands on. Ordinal timestamps always advance
/// by one per step regardless of cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    /// Plain positional steps. Date timestamps advance by one day.
    Steps,
    Daily,
    Weekly,
    Monthly,
    /// Twelve calendar months per step.
    Yearly,
}

impl Cadence {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Cadence::Steps => "steps",
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
            Cadence::Monthly => "monthly",
            Cadence::Yearly => "yearly",
        }
    }

    /// Returns the timestamp `steps` cadence intervals after `from`.
    ///
    /// Month arithmetic clamps to the last valid day (Jan 31 + 1 month is Feb 28/29).
    /// Returns `None` if the result is outside the representable range.
    pub fn advance(&self, from: Timestamp, steps: u32) -> Option<Timestamp> {
        match from {
            Timestamp::Ordinal(ordinal) => ordinal.checked_add(i64::from(steps)).map(Timestamp::Ordinal),
            Timestamp::Date(date) => {
                let next = match self {
                    Cadence::Steps | Cadence::Daily => date.checked_add_days(Days::new(u64::from(steps))),
                    Cadence::Weekly => date.checked_add_days(Days::new(u64::from(steps) * 7)),
                    Cadence::Monthly => date.checked_add_months(Months::new(steps)),
                    Cadence::Yearly => date.checked_add_months(Months::new(steps.checked_mul(12)?)),
                };
                next.map(Timestamp::Date)
            }
        }
    }

    /// Guesses the cadence of a series from the most common gap between dates.
    ///
    /// Ordinal and single-point series yield [`Cadence::Steps`]. Ties between gap
    /// lengths go to the shorter gap.
    pub fn infer(series: &Series) -> Cadence {
        let mut gaps: BTreeMap<i64, usize> = BTreeMap::new();
        for pair in series.observations().windows(2) {
            if let (Some(prev), Some(next)) = (pair[0].timestamp.as_date(), pair[1].timestamp.as_date()) {
                *gaps.entry((next - prev).num_days()).or_default() += 1;
            }
        }

        let Some((gap, _)) = gaps
            .into_iter()
            .max_by_key(|&(gap, count)| (count, Reverse(gap)))
        else {
            return Cadence::Steps;
        };

        match gap {
            7 => Cadence::Weekly,
            28..=31 => Cadence::Monthly,
            365 | 366 => Cadence::Yearly,
            _ => Cadence::Daily,
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Cadence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "steps" => Ok(Cadence::Steps),
            "daily" | "day" => Ok(Cadence::Daily),
            "weekly" | "week" => Ok(Cadence::Weekly),
            "monthly" | "month" => Ok(Cadence::Monthly),
            "yearly" | "year" | "annual" => Ok(Cadence::Yearly),
            other => Err(format!(
                "unknown cadence '{other}' (expected steps, daily, weekly, monthly or yearly)"
            )),
        }
    }
}
