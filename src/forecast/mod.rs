pub mod error;
pub mod trend_projector;
