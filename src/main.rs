//! CLI for climate-trend: summarise and project a metric from a climate CSV file.

use clap::{Args, Parser, Subcommand};
use climate_trend::{
    load_csv, write_projection_csv, Cadence, ClimateTrendError, Extraction, Projection,
    SeriesExtractor, SeriesSummary, Timestamp, TrendProjector,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "climate-trend")]
#[command(about = "Project climate metrics from a CSV file forward with a linear trend")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SeriesArgs {
    /// CSV file with a header row
    csv: PathBuf,

    /// Column holding dates (YYYY-MM-DD) or integer steps such as years
    #[arg(long)]
    time_column: String,

    /// Column holding the metric to analyse, e.g. Temperature or CO2
    #[arg(long)]
    value_column: String,

    /// Ignore rows before this timestamp (inclusive). A year is accepted for date columns.
    #[arg(long)]
    start: Option<Timestamp>,

    /// Ignore rows after this timestamp (inclusive). A year is accepted for date columns.
    #[arg(long)]
    end: Option<Timestamp>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit the mean step-to-step change and project it forward
    Forecast {
        #[command(flatten)]
        series: SeriesArgs,

        /// Number of future steps to predict
        #[arg(long, allow_negative_numbers = true)]
        horizon: i64,

        /// Step size used to date the predictions: steps, daily, weekly, monthly, yearly.
        /// Inferred from the data when omitted.
        #[arg(long)]
        cadence: Option<Cadence>,

        /// Refuse horizons longer than this
        #[arg(long)]
        max_horizon: Option<u32>,

        /// Also write the predictions to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the projection as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Descriptive statistics of the selected column
    Summary {
        #[command(flatten)]
        series: SeriesArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), ClimateTrendError> {
    match command {
        Commands::Forecast {
            series,
            horizon,
            cadence,
            max_horizon,
            output,
            json,
        } => {
            let extraction = extract(&series)?;
            let projector = TrendProjector::builder()
                .maybe_cadence(cadence)
                .maybe_max_horizon(max_horizon)
                .build();
            let projection = projector.fit_and_project(&extraction.series, horizon)?;

            if let Some(path) = output {
                write_projection_csv(&projection, &path)?;
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&projection)?);
            } else {
                print_projection(&projection, &extraction);
            }
        }
        Commands::Summary { series, json } => {
            let extraction = extract(&series)?;
            let Some(summary) = SeriesSummary::from_series(&extraction.series) else {
                eprintln!(
                    "No usable rows in column '{}' ({} dropped)",
                    series.value_column, extraction.dropped_rows
                );
                return Ok(());
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary, extraction.dropped_rows);
            }
        }
    }
    Ok(())
}

fn extract(args: &SeriesArgs) -> Result<Extraction, ClimateTrendError> {
    let frame = load_csv(&args.csv)?;
    let extraction = SeriesExtractor::builder()
        .time_column(args.time_column.as_str())
        .value_column(args.value_column.as_str())
        .maybe_start(args.start)
        .maybe_end(args.end)
        .build()
        .extract(frame)?;
    Ok(extraction)
}

fn print_projection(projection: &Projection, extraction: &Extraction) {
    println!(
        "{}: {} observations, last value {}, mean change per step {:.4}",
        projection.metric,
        extraction.series.len(),
        projection.last_value,
        projection.mean_delta
    );
    println!("{:>6}  {:<12}  {:>14}", "step", "timestamp", "predicted");
    for point in &projection.points {
        println!(
            "{:>6}  {:<12}  {:>14.4}",
            point.step,
            point.timestamp.to_string(),
            point.value
        );
    }
}

fn print_summary(summary: &SeriesSummary, dropped_rows: usize) {
    let show = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"));

    println!("metric       {}", summary.metric);
    println!("range        {} .. {}", summary.first, summary.last);
    println!("count        {}", summary.count);
    println!("non-finite   {}", summary.non_finite);
    println!("dropped rows {}", dropped_rows);
    println!("mean         {}", show(summary.mean));
    println!("std          {}", show(summary.std_dev));
    println!("min          {}", show(summary.min));
    println!("max          {}", show(summary.max));
    println!("mean delta   {}", show(summary.mean_delta));
}
