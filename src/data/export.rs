use crate::data::error::DataError;
use crate::types::projection::Projection;
use log::info;
use polars::prelude::{CsvWriter, SerWriter};
use std::fs::File;
use std::path::Path;

/// Writes a projection as CSV with a header row.
///
/// The columns are those of [`Projection::to_dataframe`]. An existing file is overwritten.
pub fn write_projection_csv(projection: &Projection, path: impl AsRef<Path>) -> Result<(), DataError> {
    let path = path.as_ref();
    let mut df = projection.to_dataframe()?;
    let mut file = File::create(path).map_err(|e| DataError::Io(path.to_path_buf(), e))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| DataError::CsvWrite(path.to_path_buf(), e))?;

    info!(
        "Wrote {} projected '{}' values to {:?}",
        projection.horizon(),
        projection.metric,
        path
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::csv_loader::load_csv;
    use crate::forecast::trend_projector::fit_and_project;
    use crate::types::series::Series;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_read_back() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("climate_predictions.csv");

        let series = Series::from_values("Temperature", &[14.0, 14.5, 15.0]);
        let projection = fit_and_project(&series, 4)?;
        write_projection_csv(&projection, &path)?;

        let df = load_csv(&path)?.collect()?;
        assert_eq!(df.shape(), (4, 3));
        let predicted = df.column("Temperature_predicted")?.f64()?;
        assert_eq!(predicted.get(0), Some(15.5));
        assert_eq!(predicted.get(3), Some(17.0));
        let timestamps = df.column("timestamp")?.i64()?;
        assert_eq!(timestamps.get(0), Some(4));
        Ok(())
    }

    #[test]
    fn test_unwritable_path() -> Result<(), Box<dyn std::error::Error>> {
        let series = Series::from_values("CO2", &[1.0, 2.0]);
        let projection = fit_and_project(&series, 1)?;
        let result = write_projection_csv(&projection, "/definitely/not/here/out.csv");
        assert!(matches!(result, Err(DataError::Io(_, _))));
        Ok(())
    }
}
