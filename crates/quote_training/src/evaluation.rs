//! Held-out evaluation of a persisted model.
//!
//! Recomputes the training split, predicts the test rows with the loaded
//! model and produces the data behind the accuracy scatter and the feature
//! importance chart.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use quote_core::model::{load_columns, load_forest};
use quote_core::{ArtifactPaths, EtaRegressor, FeatureSchema, RandomForest, VehicleClass};

use crate::dataset::{read_trips, TripRecord};
use crate::error::TrainingError;
use crate::export;
use crate::metrics::RegressionMetrics;
use crate::split::TrainTestSplit;
use crate::trainer::{ranked_importances, FeatureImportance, TrainerConfig};

pub const PREDICTIONS_CSV: &str = "predictions.csv";
pub const PREDICTIONS_PARQUET: &str = "predictions.parquet";
pub const IMPORTANCE_CSV: &str = "feature_importance.csv";
pub const REPORT_JSON: &str = "evaluation.json";

/// Actual vs predicted duration for one test row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub row_index: usize,
    pub hour_of_day: u8,
    pub vehicle_type: VehicleClass,
    pub trip_distance: f64,
    pub actual_min: f64,
    pub predicted_min: f64,
}

impl PredictionRecord {
    pub fn error_min(&self) -> f64 {
        self.predicted_min - self.actual_min
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub metrics: RegressionMetrics,
    pub feature_importances: Vec<FeatureImportance>,
    #[serde(skip)]
    pub predictions: Vec<PredictionRecord>,
}

/// Score `forest` on the test split of `records`, encoding rows with `schema`.
///
/// `test_fraction` and `split_seed` must be the values the forest was trained
/// with, otherwise training rows leak into the test set.
pub fn evaluate(
    records: &[TripRecord],
    forest: &RandomForest,
    schema: &FeatureSchema,
    test_fraction: f64,
    split_seed: u64,
) -> Result<EvaluationReport, TrainingError> {
    let split = TrainTestSplit::shuffled(records.len(), test_fraction, split_seed);
    let mut predictions = Vec::with_capacity(split.test.len());
    for &i in &split.test {
        let record = &records[i];
        let row = schema.encode(record.hour_of_day, record.trip_distance, record.vehicle_type);
        predictions.push(PredictionRecord {
            row_index: i,
            hour_of_day: record.hour_of_day,
            vehicle_type: record.vehicle_type,
            trip_distance: record.trip_distance,
            actual_min: record.duration_min,
            predicted_min: forest.predict_row(&row)?,
        });
    }

    let actual: Vec<f64> = predictions.iter().map(|p| p.actual_min).collect();
    let predicted: Vec<f64> = predictions.iter().map(|p| p.predicted_min).collect();
    let Some(metrics) = RegressionMetrics::compute(&actual, &predicted) else {
        return Err(TrainingError::TooFewRows {
            rows: records.len(),
            min: 2,
        });
    };

    Ok(EvaluationReport {
        metrics,
        feature_importances: ranked_importances(forest, schema),
        predictions,
    })
}

/// Files written by [`evaluate_from_artifacts`].
#[derive(Debug, Clone)]
pub struct EvaluationOutputs {
    pub predictions_csv: PathBuf,
    pub predictions_parquet: PathBuf,
    pub importance_csv: PathBuf,
    pub report_json: PathBuf,
}

impl EvaluationOutputs {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            predictions_csv: dir.join(PREDICTIONS_CSV),
            predictions_parquet: dir.join(PREDICTIONS_PARQUET),
            importance_csv: dir.join(IMPORTANCE_CSV),
            report_json: dir.join(REPORT_JSON),
        }
    }
}

/// Load the dataset and persisted model, evaluate, and export the results
/// into `out_dir`. The split is recomputed from `trainer`'s split settings.
pub fn evaluate_from_artifacts(
    data_path: impl AsRef<Path>,
    artifacts: &ArtifactPaths,
    out_dir: impl AsRef<Path>,
    trainer: &TrainerConfig,
) -> Result<EvaluationReport, TrainingError> {
    let records = read_trips(data_path)?;
    let forest = load_forest(&artifacts.model_path)?;
    let schema = FeatureSchema::from_columns(load_columns(&artifacts.columns_path)?)
        .map_err(quote_core::ModelError::from)?;

    let report = evaluate(&records, &forest, &schema, trainer.test_fraction, trainer.split_seed)?;

    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;
    let outputs = EvaluationOutputs::in_dir(out_dir);
    write_outputs(&report, &outputs).map_err(|err| TrainingError::Export(err.to_string()))?;

    info!(
        test_rows = report.metrics.samples,
        mae = report.metrics.mae,
        r2 = report.metrics.r2,
        out_dir = %out_dir.display(),
        "exported evaluation data"
    );
    Ok(report)
}

fn write_outputs(
    report: &EvaluationReport,
    outputs: &EvaluationOutputs,
) -> Result<(), Box<dyn std::error::Error>> {
    export::export_predictions_to_csv(&report.predictions, &outputs.predictions_csv)?;
    export::export_predictions_to_parquet(&report.predictions, &outputs.predictions_parquet)?;
    export::export_importances_to_csv(&report.feature_importances, &outputs.importance_csv)?;
    export::export_report_to_json(report, &outputs.report_json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate_trips, GeneratorConfig};
    use crate::trainer::train;
    use quote_core::ForestConfig;

    fn evaluate_like(
        records: &[TripRecord],
        forest: &RandomForest,
        config: &TrainerConfig,
    ) -> EvaluationReport {
        evaluate(
            records,
            forest,
            &FeatureSchema::canonical(),
            config.test_fraction,
            config.split_seed,
        )
        .expect("eval")
    }

    #[test]
    fn evaluation_matches_training_metrics() {
        let records = generate_trips(&GeneratorConfig::default().with_samples(600).with_seed(8));
        let config = TrainerConfig::default()
            .with_forest(ForestConfig::default().with_n_estimators(6))
            .with_progress(false);
        let (forest, trained) = train(&records, &config).expect("train");

        let evaluated = evaluate_like(&records, &forest, &config);
        assert_eq!(evaluated.predictions.len(), trained.test_rows);
        assert!((evaluated.metrics.mae - trained.metrics.mae).abs() < 1e-9);
        assert!((evaluated.metrics.r2 - trained.metrics.r2).abs() < 1e-9);
    }

    #[test]
    fn custom_test_fraction_is_reproduced() {
        let records = generate_trips(&GeneratorConfig::default().with_samples(400).with_seed(3));
        let config = TrainerConfig::default()
            .with_forest(ForestConfig::default().with_n_estimators(4))
            .with_test_fraction(0.25)
            .with_split_seed(9)
            .with_progress(false);
        let (forest, trained) = train(&records, &config).expect("train");
        assert_eq!(trained.test_rows, 100);

        let evaluated = evaluate_like(&records, &forest, &config);
        assert_eq!(evaluated.predictions.len(), 100);
        assert!((evaluated.metrics.mae - trained.metrics.mae).abs() < 1e-9);
    }
}
