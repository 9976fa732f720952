//! Test helpers shared by unit tests, integration tests and benchmarks.
//!
//! The stub regressor gives a deterministic ETA without a trained model, so
//! engine behaviour can be checked in isolation from forest fitting.

use crate::engine::QuoteEngine;
use crate::error::ModelError;
use crate::features::FeatureSchema;
use crate::geo::Coordinate;
use crate::model::{EtaRegressor, ForestConfig, RandomForest, TrainedModel};
use crate::vehicle::VehicleClass;

/// Pickup near the centre of the service area.
pub const TEST_PICKUP: Coordinate = Coordinate {
    lat: 13.34,
    lon: 74.748,
};

/// Drop roughly 1.35 km from [`TEST_PICKUP`].
pub const TEST_DROP: Coordinate = Coordinate {
    lat: 13.35,
    lon: 74.755,
};

/// Drop whose offset from [`TEST_PICKUP`] is twice that of [`TEST_DROP`].
pub const TEST_DROP_DOUBLED: Coordinate = Coordinate {
    lat: 13.36,
    lon: 74.762,
};

/// Predicts `distance / typical speed` in minutes for the class whose
/// one-hot column is set, plus a fixed pickup overhead.
///
/// Expects rows laid out by [`FeatureSchema::canonical`].
#[derive(Debug, Clone)]
pub struct SpeedTableRegressor {
    schema: FeatureSchema,
    overhead_min: f64,
}

impl Default for SpeedTableRegressor {
    fn default() -> Self {
        Self {
            schema: FeatureSchema::canonical(),
            overhead_min: 2.0,
        }
    }
}

impl EtaRegressor for SpeedTableRegressor {
    fn n_features(&self) -> usize {
        self.schema.len()
    }

    fn predict_row(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.schema.len() {
            return Err(ModelError::FeatureCountMismatch {
                expected: self.schema.len(),
                actual: row.len(),
            });
        }
        // Canonical layout: hour, distance, then one column per class in name order.
        let distance = row[1];
        let mut by_name = VehicleClass::ALL;
        by_name.sort_by_key(|v| v.name());
        let vehicle = by_name
            .iter()
            .zip(&row[2..])
            .find(|(_, flag)| **flag == 1.0)
            .map(|(v, _)| *v)
            .unwrap_or(VehicleClass::Mini);
        Ok(self.overhead_min + distance / vehicle.typical_speed_kmh() * 60.0)
    }
}

/// An engine backed by [`SpeedTableRegressor`].
pub fn stub_engine() -> QuoteEngine {
    let model = TrainedModel::new(SpeedTableRegressor::default(), FeatureSchema::canonical())
        .expect("stub regressor matches the canonical schema");
    QuoteEngine::new(model)
}

/// Synthetic training rows: ETA grows with distance and is slower at rush hour.
pub fn synthetic_training_set(n_rows: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
    let schema = FeatureSchema::canonical();
    let mut x = Vec::with_capacity(n_rows);
    let mut y = Vec::with_capacity(n_rows);
    for i in 0..n_rows {
        let vehicle = VehicleClass::ALL[i % VehicleClass::COUNT];
        let hour = (i % 24) as u8;
        let distance = 0.5 + (i % 17) as f64 * 0.4;
        let rush = if (9..=11).contains(&hour) || (17..=21).contains(&hour) {
            1.5
        } else {
            1.0
        };
        x.push(schema.encode(hour, distance, vehicle));
        y.push(distance / vehicle.typical_speed_kmh() * 60.0 * rush);
    }
    (x, y)
}

/// A small forest fitted on [`synthetic_training_set`].
pub fn small_forest(seed: u64) -> RandomForest {
    let (x, y) = synthetic_training_set(600);
    let config = ForestConfig::default()
        .with_n_estimators(16)
        .with_max_depth(Some(10))
        .with_min_samples_leaf(2)
        .with_seed(seed);
    RandomForest::fit(&x, &y, &config).expect("synthetic training set is valid")
}
