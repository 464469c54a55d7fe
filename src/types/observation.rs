use crate::types::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// A single measured value of one metric at one point in time.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: Timestamp,
    pub value: f64,
}

impl Observation {
    pub fn new(timestamp: impl Into<Timestamp>, value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
        }
    }
}
