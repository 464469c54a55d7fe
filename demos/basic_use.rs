use climate_trend::{ClimateTrendError, Observation, Series, TrendProjector};

fn main() -> Result<(), ClimateTrendError> {
    // Global mean sea level change (mm) for a handful of years.
    let series = Series::new(
        "SeaLevel",
        vec![
            Observation::new(2016, 82.1),
            Observation::new(2017, 85.9),
            Observation::new(2018, 88.4),
            Observation::new(2019, 93.1),
            Observation::new(2020, 96.2),
        ],
    );

    let projection = TrendProjector::default().fit_and_project(&series, 5)?;

    println!(
        "Mean change per year: {:.2} mm (from {} observations)",
        projection.mean_delta,
        series.len()
    );
    for point in &projection.points {
        println!("{}: {:.1} mm", point.timestamp, point.value);
    }
    Ok(())
}
