//! Offline training job: dataset → forest → metrics → artifacts.

use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::info;

use quote_core::model::save_artifacts;
use quote_core::{ArtifactPaths, FeatureSchema, ForestConfig, RandomForest};

use crate::dataset::{encode_features, read_trips, TripRecord};
use crate::error::TrainingError;
use crate::metrics::RegressionMetrics;
use crate::split::{TrainTestSplit, DEFAULT_SPLIT_SEED, DEFAULT_TEST_FRACTION};

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} trees ({eta})";

#[derive(Debug, Clone)]
pub struct TrainerConfig {
    pub forest: ForestConfig,
    pub test_fraction: f64,
    pub split_seed: u64,
    pub show_progress: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            forest: ForestConfig::default(),
            test_fraction: DEFAULT_TEST_FRACTION,
            split_seed: DEFAULT_SPLIT_SEED,
            show_progress: true,
        }
    }
}

impl TrainerConfig {
    pub fn with_forest(mut self, forest: ForestConfig) -> Self {
        self.forest = forest;
        self
    }

    pub fn with_test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    pub fn with_split_seed(mut self, seed: u64) -> Self {
        self.split_seed = seed;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// Importance of one feature column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Importances paired with column names, most important first.
pub fn ranked_importances(forest: &RandomForest, schema: &FeatureSchema) -> Vec<FeatureImportance> {
    let mut ranked: Vec<FeatureImportance> = schema
        .columns()
        .iter()
        .zip(forest.feature_importances())
        .map(|(feature, &importance)| FeatureImportance {
            feature: feature.clone(),
            importance,
        })
        .collect();
    ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    ranked
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub train_rows: usize,
    pub test_rows: usize,
    pub n_trees: usize,
    pub metrics: RegressionMetrics,
    pub feature_importances: Vec<FeatureImportance>,
    pub model_path: Option<PathBuf>,
    pub elapsed_secs: f64,
}

/// Split `records`, fit the forest on the train rows and score it on the
/// test rows.
pub fn train(
    records: &[TripRecord],
    config: &TrainerConfig,
) -> Result<(RandomForest, TrainingReport), TrainingError> {
    let started = Instant::now();
    let schema = FeatureSchema::canonical();
    let split = TrainTestSplit::shuffled(records.len(), config.test_fraction, config.split_seed);
    if split.train.is_empty() || split.test.is_empty() {
        return Err(TrainingError::TooFewRows {
            rows: records.len(),
            min: 2,
        });
    }

    let train_set = TrainTestSplit::select(records, &split.train);
    let test_set = TrainTestSplit::select(records, &split.test);
    let (x_train, y_train) = encode_features(&train_set, &schema);
    let (x_test, y_test) = encode_features(&test_set, &schema);
    info!(
        train_rows = x_train.len(),
        test_rows = x_test.len(),
        trees = config.forest.n_estimators,
        max_depth = ?config.forest.max_depth,
        "training random forest"
    );

    let progress = if config.show_progress {
        let bar = ProgressBar::new(config.forest.n_estimators as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(PROGRESS_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let forest = RandomForest::fit_with_progress(&x_train, &y_train, &config.forest, || {
        progress.inc(1)
    })?;
    progress.finish_and_clear();

    let predicted: Vec<f64> = x_test.iter().map(|row| forest.predict(row)).collect();
    let metrics = RegressionMetrics::compute(&y_test, &predicted).ok_or(TrainingError::TooFewRows {
        rows: records.len(),
        min: 2,
    })?;
    info!(
        mae = metrics.mae,
        rmse = metrics.rmse,
        r2 = metrics.r2,
        mape_pct = metrics.mape,
        "model evaluation"
    );

    let report = TrainingReport {
        train_rows: x_train.len(),
        test_rows: x_test.len(),
        n_trees: forest.n_trees(),
        metrics,
        feature_importances: ranked_importances(&forest, &schema),
        model_path: None,
        elapsed_secs: started.elapsed().as_secs_f64(),
    };
    Ok((forest, report))
}

/// Read the dataset, train, and write the model artifacts.
pub fn train_from_csv(
    data_path: impl AsRef<Path>,
    artifacts: &ArtifactPaths,
    config: &TrainerConfig,
) -> Result<TrainingReport, TrainingError> {
    let data_path = data_path.as_ref();
    info!(data = %data_path.display(), "loading dataset");
    let records = read_trips(data_path)?;

    let (forest, mut report) = train(&records, config)?;
    save_artifacts(&forest, &FeatureSchema::canonical(), artifacts)?;
    info!(
        model = %artifacts.model_path.display(),
        columns = %artifacts.columns_path.display(),
        "saved model artifacts"
    );
    report.model_path = Some(artifacts.model_path.clone());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate_trips, GeneratorConfig};

    fn quick_config() -> TrainerConfig {
        TrainerConfig::default()
            .with_forest(ForestConfig::default().with_n_estimators(10).with_max_depth(Some(8)))
            .with_progress(false)
    }

    #[test]
    fn trains_a_useful_model() {
        let records = generate_trips(&GeneratorConfig::default().with_samples(1_500).with_seed(42));
        let (forest, report) = train(&records, &quick_config()).expect("train");
        assert_eq!(report.train_rows, 1_200);
        assert_eq!(report.test_rows, 300);
        assert_eq!(forest.n_trees(), 10);
        assert!(report.metrics.r2 > 0.3, "r2 {}", report.metrics.r2);
        assert_eq!(report.feature_importances[0].feature, "trip_distance");
    }

    #[test]
    fn one_row_is_too_few() {
        let records = generate_trips(&GeneratorConfig::default().with_samples(1).with_seed(1));
        assert!(matches!(
            train(&records, &quick_config()),
            Err(TrainingError::TooFewRows { rows: 1, .. })
        ));
    }
}
