pub mod cadence;
pub mod observation;
pub mod projection;
pub mod series;
pub mod timestamp;
