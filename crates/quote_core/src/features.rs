//! Model input layout.
//!
//! The trainer writes the ordered column list next to the fitted model. At
//! load time that list is parsed back into a [`FeatureSchema`], which knows
//! the position of every numeric column and of the one-hot column of each
//! vehicle class. Rows for inference are always built through the schema,
//! so the training-time and inference-time layouts cannot drift apart.

use std::collections::HashSet;

use crate::error::SchemaError;
use crate::vehicle::VehicleClass;

pub const HOUR_COLUMN: &str = "hour_of_day";
pub const DISTANCE_COLUMN: &str = "trip_distance";
pub const VEHICLE_COLUMN_PREFIX: &str = "vehicle_type_";

pub fn vehicle_column(vehicle: VehicleClass) -> String {
    format!("{VEHICLE_COLUMN_PREFIX}{}", vehicle.name())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<String>,
    hour_index: usize,
    distance_index: usize,
    /// Column position of each vehicle's indicator, indexed by [`VehicleClass::index`].
    vehicle_indices: [usize; VehicleClass::COUNT],
}

impl FeatureSchema {
    /// The layout produced at training time: numeric columns first, then one
    /// indicator per vehicle class sorted by class name.
    pub fn canonical() -> Self {
        let mut vehicles: Vec<VehicleClass> = VehicleClass::ALL.to_vec();
        vehicles.sort_by_key(|v| v.name());

        let mut columns = vec![HOUR_COLUMN.to_string(), DISTANCE_COLUMN.to_string()];
        columns.extend(vehicles.into_iter().map(vehicle_column));

        // The canonical list is valid by construction.
        match Self::from_columns(columns) {
            Ok(schema) => schema,
            Err(err) => unreachable!("canonical feature columns are invalid: {err}"),
        }
    }

    /// Build a schema from a persisted column list. Every known column must
    /// appear exactly once and nothing else may appear.
    pub fn from_columns(columns: Vec<String>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::with_capacity(columns.len());
        let mut hour_index = None;
        let mut distance_index = None;
        let mut vehicle_indices = [None; VehicleClass::COUNT];

        for (position, column) in columns.iter().enumerate() {
            if !seen.insert(column.as_str()) {
                return Err(SchemaError::DuplicateColumn(column.clone()));
            }
            if column == HOUR_COLUMN {
                hour_index = Some(position);
            } else if column == DISTANCE_COLUMN {
                distance_index = Some(position);
            } else if let Some(vehicle) = column
                .strip_prefix(VEHICLE_COLUMN_PREFIX)
                .and_then(|name| name.parse::<VehicleClass>().ok())
            {
                vehicle_indices[vehicle.index()] = Some(position);
            } else {
                return Err(SchemaError::UnknownColumn(column.clone()));
            }
        }

        let hour_index =
            hour_index.ok_or_else(|| SchemaError::MissingColumn(HOUR_COLUMN.to_string()))?;
        let distance_index = distance_index
            .ok_or_else(|| SchemaError::MissingColumn(DISTANCE_COLUMN.to_string()))?;

        let mut resolved = [0usize; VehicleClass::COUNT];
        for vehicle in VehicleClass::ALL {
            resolved[vehicle.index()] = vehicle_indices[vehicle.index()]
                .ok_or_else(|| SchemaError::MissingColumn(vehicle_column(vehicle)))?;
        }

        Ok(Self {
            columns,
            hour_index,
            distance_index,
            vehicle_indices: resolved,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Feature row for one (hour, distance, vehicle) combination.
    pub fn encode(&self, hour: u8, distance_km: f64, vehicle: VehicleClass) -> Vec<f64> {
        let mut row = vec![0.0; self.columns.len()];
        self.encode_into(&mut row, hour, distance_km, vehicle);
        row
    }

    /// Fill a pre-sized row in place. `row.len()` must equal [`Self::len`].
    pub fn encode_into(&self, row: &mut [f64], hour: u8, distance_km: f64, vehicle: VehicleClass) {
        debug_assert_eq!(row.len(), self.columns.len());
        row.fill(0.0);
        row[self.hour_index] = f64::from(hour);
        row[self.distance_index] = distance_km;
        row[self.vehicle_indices[vehicle.index()]] = 1.0;
    }
}
