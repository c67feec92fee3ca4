use monolithos::dataset::{DatasetReader, DatasetWriter};
use monolithos::error::PipelineError;
use monolithos::forecast::run_models;
use monolithos::models::{NumericColumn, Observation, HEADER};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn wind_row(time: &str, wind_speed: f64) -> Observation {
    Observation {
        wind_speed: Some(wind_speed),
        ..Observation::new(time, "openmeteo")
    }
}

#[test]
fn test_two_row_wind_scenario() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.csv");

    let rows = vec![
        wind_row("2020-01-01T00:00", 10.0),
        wind_row("2020-01-01T01:00", 20.0),
    ];
    DatasetWriter::new(&path).append(&rows).unwrap();

    let dataset = DatasetReader::new(&path).read().unwrap();
    let report = run_models(&dataset);
    let wind = report.column(NumericColumn::WindSpeed).unwrap();

    assert_eq!(wind.mean, Some(15.0));
    let quantiles = wind.quantiles.unwrap();
    assert_eq!((quantiles.q25, quantiles.q50, quantiles.q75), (12.5, 15.0, 17.5));
    assert_eq!(wind.ensemble, Some(15.0));
    // Series length 2 is below the sequence model's minimum of 3.
    assert_eq!(wind.extrapolated, None);

    // Every other column saw no data.
    let temp = report.column(NumericColumn::Temp).unwrap();
    assert_eq!(temp.mean, None);
    assert_eq!(temp.ensemble, None);
}

#[test]
fn test_round_trip_preserves_values_and_gaps() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.csv");

    let mut full = Observation::new("2020-01-01T00:00", "openmeteo");
    for (i, &column) in NumericColumn::ALL.iter().enumerate() {
        full.set_value(column, Some(i as f64 + 0.25));
    }
    let sparse = Observation {
        temp: Some(-2.5),
        ..Observation::new("2020-01-01T00:00", "wunderground")
    };

    let written = vec![full, sparse];
    DatasetWriter::new(&path).write_all(&written).unwrap();
    let read_back = DatasetReader::new(&path).read().unwrap().observations;

    assert_eq!(read_back, written);
}

#[test]
fn test_header_only_dataset_trains_without_crash() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.csv");

    // A run where every provider failed still leaves a readable dataset.
    DatasetWriter::new(&path).append(&[]).unwrap();

    let dataset = DatasetReader::new(&path).read().unwrap();
    assert!(dataset.is_empty());

    let report = run_models(&dataset);
    for column in &report.columns {
        assert_eq!(column.mean, None);
        assert!(column.quantiles.is_none());
        assert_eq!(column.ensemble, None);
        assert_eq!(column.extrapolated, None);
    }

    let rendered = report.to_string();
    assert!(rendered.contains("wind_speed: undefined"));
    assert!(rendered.contains("wind_speed: not available"));
}

#[test]
fn test_recollection_does_not_duplicate_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.csv");
    let writer = DatasetWriter::new(&path);

    let batch = vec![
        wind_row("2020-01-01T00:00", 10.0),
        wind_row("2020-01-01T01:00", 20.0),
    ];

    assert_eq!(writer.append(&batch).unwrap(), 2);
    assert_eq!(writer.append(&batch).unwrap(), 0);

    let dataset = DatasetReader::new(&path).read().unwrap();
    assert_eq!(dataset.len(), 2);
}

#[test]
fn test_foreign_header_is_rejected_up_front() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "timestamp,speed,origin\n2020-01-01T00:00,10,nowhere\n").unwrap();

    let err = DatasetReader::new(&path).read().unwrap_err();
    assert!(matches!(err, PipelineError::HeaderMismatch { .. }));
}

#[test]
fn test_written_header_matches_schema() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.csv");

    DatasetWriter::new(&path)
        .write_all(&[wind_row("2020-01-01T00:00", 10.0)])
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let first_line = content.lines().next().unwrap();
    assert_eq!(first_line, HEADER.join(","));
}
