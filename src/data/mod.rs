pub mod csv_loader;
pub mod error;
pub mod export;
pub mod series_extractor;
