//! The ride dataset: one [`TripRecord`] per CSV row.
//!
//! Column order on disk is `start_lat, start_lon, end_lat, end_lon,
//! hour_of_day, vehicle_type, trip_distance, duration_min, fare`.

use std::fs::{self, File};
use std::path::Path;

use serde::{Deserialize, Serialize};

use quote_core::{Coordinate, FeatureSchema, VehicleClass};

use crate::error::TrainingError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
    pub hour_of_day: u8,
    pub vehicle_type: VehicleClass,
    pub trip_distance: f64,
    pub duration_min: f64,
    pub fare: u32,
}

impl TripRecord {
    pub fn pickup(&self) -> Coordinate {
        Coordinate::new(self.start_lat, self.start_lon)
    }

    pub fn drop(&self) -> Coordinate {
        Coordinate::new(self.end_lat, self.end_lon)
    }
}

/// Read every row of a dataset CSV. An empty file is an error.
pub fn read_trips(path: impl AsRef<Path>) -> Result<Vec<TripRecord>, TrainingError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;
    let records = reader
        .deserialize::<TripRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    if records.is_empty() {
        return Err(TrainingError::EmptyDataset(path.display().to_string()));
    }
    Ok(records)
}

/// Write rows with a header line, creating the parent directory if needed.
pub fn write_trips(path: impl AsRef<Path>, records: &[TripRecord]) -> Result<(), TrainingError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Feature matrix and duration targets, laid out by `schema`.
pub fn encode_features(
    records: &[TripRecord],
    schema: &FeatureSchema,
) -> (Vec<Vec<f64>>, Vec<f64>) {
    records
        .iter()
        .map(|r| {
            (
                schema.encode(r.hour_of_day, r.trip_distance, r.vehicle_type),
                r.duration_min,
            )
        })
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(vehicle: VehicleClass) -> TripRecord {
        TripRecord {
            start_lat: 13.3401,
            start_lon: 74.7422,
            end_lat: 13.3555,
            end_lon: 74.7610,
            hour_of_day: 18,
            vehicle_type: vehicle,
            trip_distance: 2.69,
            duration_min: 7.4,
            fare: 123,
        }
    }

    #[test]
    fn writes_the_dataset_header() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data").join("rides.csv");
        write_trips(&path, &[record(VehicleClass::Suv)]).expect("write");

        let text = fs::read_to_string(&path).expect("read");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("start_lat,start_lon,end_lat,end_lon,hour_of_day,vehicle_type,trip_distance,duration_min,fare")
        );
        assert!(lines.next().expect("row").contains(",SUV,"));
    }

    #[test]
    fn reads_back_written_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("rides.csv");
        let rows = vec![record(VehicleClass::Bike), record(VehicleClass::Sedan)];
        write_trips(&path, &rows).expect("write");
        assert_eq!(read_trips(&path).expect("read"), rows);
    }

    #[test]
    fn header_only_file_is_empty_dataset() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.csv");
        fs::write(
            &path,
            "start_lat,start_lon,end_lat,end_lon,hour_of_day,vehicle_type,trip_distance,duration_min,fare\n",
        )
        .expect("header");
        assert!(matches!(read_trips(&path), Err(TrainingError::EmptyDataset(_))));
    }

    #[test]
    fn encodes_through_schema() {
        let schema = FeatureSchema::canonical();
        let (x, y) = encode_features(&[record(VehicleClass::Auto)], &schema);
        assert_eq!(x[0], vec![18.0, 2.69, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(y, vec![7.4]);
    }
}
