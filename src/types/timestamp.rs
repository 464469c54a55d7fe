//! Defines the `Timestamp` type attached to every observation and projected point.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Date formats accepted when parsing a timestamp from text.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// The position of an observation in time.
///
/// Climate tables identify rows either by a calendar date (`2023-07-15`) or by an
/// integer ordinal such as a year number (`2023`) or a running index. A single
/// [`crate::Series`] only ever holds one kind.
///
/// Ordering is total: ordinals compare numerically, dates chronologically.
///
/// # Examples
///
/// ```
/// use climate_trend::Timestamp;
/// use chrono::NaiveDate;
///
/// assert_eq!("2021".parse::<Timestamp>(), Ok(Timestamp::Ordinal(2021)));
/// assert_eq!(
///     "2021-03-01".parse::<Timestamp>(),
///     Ok(Timestamp::Date(NaiveDate::from_ymd_opt(2021, 3, 1).unwrap()))
/// );
/// assert_eq!(Timestamp::Ordinal(7).to_string(), "7");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// An integer step, e.g. a year number or a row index.
    Ordinal(i64),
    /// A calendar date.
    Date(NaiveDate),
}

impl Timestamp {
    /// Parses an ordinal or a date in one of the accepted formats.
    ///
    /// Surrounding whitespace is ignored. Returns `None` if the text is neither.
    pub fn parse(text: &str) -> Option<Timestamp> {
        let text = text.trim();
        if let Ok(ordinal) = text.parse::<i64>() {
            return Some(Timestamp::Ordinal(ordinal));
        }
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
            .map(Timestamp::Date)
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Timestamp::Date(date) => Some(*date),
            Timestamp::Ordinal(_) => None,
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Timestamp::Date(_))
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Timestamp::Date(date)
    }
}

impl From<i64> for Timestamp {
    fn from(ordinal: i64) -> Self {
        Timestamp::Ordinal(ordinal)
    }
}

impl From<i32> for Timestamp {
    fn from(ordinal: i32) -> Self {
        Timestamp::Ordinal(i64::from(ordinal))
    }
}

impl FromStr for Timestamp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timestamp::parse(s).ok_or_else(|| {
            format!("'{s}' is neither an integer nor a date (expected YYYY-MM-DD or YYYY/MM/DD)")
        })
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Ordinal(ordinal) => write!(f, "{ordinal}"),
            Timestamp::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}
