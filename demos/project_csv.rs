//! Loads a daily temperature table, projects the next two weeks and exports them.
//!
//! cargo run --example project_csv

use climate_trend::{
    load_csv_bytes, write_projection_csv, ClimateTrendError, SeriesExtractor, SeriesSummary,
    TrendProjector,
};
use std::env;

const DAILY_CSV: &str = "\
date,tavg,tmin,tmax
2024-06-01,16.2,11.0,21.4
2024-06-02,17.0,11.8,22.1
2024-06-03,,12.1,22.9
2024-06-04,18.1,12.6,23.5
2024-06-05,18.4,13.0,24.0
2024-06-06,19.2,13.4,24.8
2024-06-07,19.0,13.9,24.3
";

fn main() -> Result<(), ClimateTrendError> {
    env_logger::init();

    let frame = load_csv_bytes(DAILY_CSV.as_bytes().to_vec())?;
    let extraction = SeriesExtractor::builder()
        .time_column("date")
        .value_column("tavg")
        .build()
        .extract(frame)?;
    println!(
        "Using {} rows ({} dropped)",
        extraction.series.len(),
        extraction.dropped_rows
    );

    if let Some(summary) = SeriesSummary::from_series(&extraction.series) {
        println!("{:#?}", summary);
    }

    let projection = TrendProjector::builder()
        .max_horizon(31)
        .build()
        .fit_and_project(&extraction.series, 14)?;
    for point in &projection.points {
        println!("{}  {:.2}", point.timestamp, point.value);
    }

    let output = env::temp_dir().join("tavg_predictions.csv");
    write_projection_csv(&projection, &output)?;
    println!("Predictions written to {}", output.display());
    Ok(())
}
