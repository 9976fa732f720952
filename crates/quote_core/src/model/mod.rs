//! ETA regression model: the regressor seam, the random forest behind it,
//! and the on-disk artifacts the trainer writes and the server loads.

pub mod forest;
pub mod tree;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ModelError;
use crate::features::FeatureSchema;
use crate::vehicle::VehicleClass;

pub use forest::{ForestConfig, RandomForest};
pub use tree::{RegressionTree, TreeConfig};

pub const MODEL_FILE_NAME: &str = "eta_model.bin";
pub const COLUMNS_FILE_NAME: &str = "model_columns.json";
const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

/// Anything that can turn a feature row into a predicted trip duration.
///
/// Implementations must be `Send + Sync` so one loaded model can serve
/// every request.
pub trait EtaRegressor: Send + Sync {
    /// Width of the feature rows this regressor accepts.
    fn n_features(&self) -> usize;

    /// Predicted duration in minutes for one feature row.
    fn predict_row(&self, row: &[f64]) -> Result<f64, ModelError>;
}

/// A regressor paired with the column layout it was trained on.
pub struct TrainedModel {
    regressor: Box<dyn EtaRegressor>,
    schema: FeatureSchema,
}

impl fmt::Debug for TrainedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainedModel")
            .field("columns", &self.schema.columns())
            .finish_non_exhaustive()
    }
}

impl TrainedModel {
    /// Pair a regressor with its schema; the widths must agree.
    pub fn new<R>(regressor: R, schema: FeatureSchema) -> Result<Self, ModelError>
    where
        R: EtaRegressor + 'static,
    {
        Self::from_boxed(Box::new(regressor), schema)
    }

    pub fn from_boxed(
        regressor: Box<dyn EtaRegressor>,
        schema: FeatureSchema,
    ) -> Result<Self, ModelError> {
        if regressor.n_features() != schema.len() {
            return Err(ModelError::FeatureCountMismatch {
                expected: regressor.n_features(),
                actual: schema.len(),
            });
        }
        Ok(Self { regressor, schema })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Predicted trip duration in minutes.
    pub fn predict_eta(
        &self,
        hour: u8,
        distance_km: f64,
        vehicle: VehicleClass,
    ) -> Result<f64, ModelError> {
        let row = self.schema.encode(hour, distance_km, vehicle);
        self.regressor.predict_row(&row)
    }
}

/// Locations of the fitted model and its column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model_path: PathBuf,
    pub columns_path: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_ARTIFACT_DIR)
    }
}

impl ArtifactPaths {
    /// Standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model_path: dir.join(MODEL_FILE_NAME),
            columns_path: dir.join(COLUMNS_FILE_NAME),
        }
    }
}

/// Write the forest (bincode) and the column list (JSON).
pub fn save_artifacts(
    forest: &RandomForest,
    schema: &FeatureSchema,
    paths: &ArtifactPaths,
) -> Result<(), ModelError> {
    if forest.n_features() != schema.len() {
        return Err(ModelError::FeatureCountMismatch {
            expected: forest.n_features(),
            actual: schema.len(),
        });
    }
    for path in [&paths.model_path, &paths.columns_path] {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&paths.model_path, bincode::serialize(forest)?)?;
    fs::write(
        &paths.columns_path,
        serde_json::to_vec_pretty(schema.columns())?,
    )?;
    Ok(())
}

pub fn load_forest(path: impl AsRef<Path>) -> Result<RandomForest, ModelError> {
    let data = fs::read(path)?;
    let forest: RandomForest = bincode::deserialize(&data)?;
    forest.validate()?;
    Ok(forest)
}

pub fn load_columns(path: impl AsRef<Path>) -> Result<Vec<String>, ModelError> {
    let data = fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

/// Load both artifacts and check that they describe the same layout.
pub fn load_trained_model(paths: &ArtifactPaths) -> Result<TrainedModel, ModelError> {
    let forest = load_forest(&paths.model_path)?;
    let schema = FeatureSchema::from_columns(load_columns(&paths.columns_path)?)?;
    TrainedModel::new(forest, schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantRegressor {
        width: usize,
    }

    impl EtaRegressor for ConstantRegressor {
        fn n_features(&self) -> usize {
            self.width
        }

        fn predict_row(&self, _row: &[f64]) -> Result<f64, ModelError> {
            Ok(7.0)
        }
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let err = TrainedModel::new(ConstantRegressor { width: 3 }, FeatureSchema::canonical())
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::FeatureCountMismatch {
                expected: 3,
                actual: 7
            }
        ));
    }

    #[test]
    fn predicts_through_schema() {
        let model = TrainedModel::new(ConstantRegressor { width: 7 }, FeatureSchema::canonical())
            .expect("model");
        assert_eq!(model.predict_eta(10, 2.0, VehicleClass::Mini).expect("eta"), 7.0);
    }

    #[test]
    fn artifact_paths_use_standard_names() {
        let paths = ArtifactPaths::in_dir("models");
        assert_eq!(paths.model_path, Path::new("models").join("eta_model.bin"));
        assert_eq!(paths.columns_path, Path::new("models").join("model_columns.json"));
    }

    #[test]
    fn missing_artifacts_report_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_trained_model(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, ModelError::Io(_)));
    }
}
