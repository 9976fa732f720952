//! Offline jobs around the quote engine: synthetic data, training and
//! evaluation.
//!
//! ```no_run
//! use quote_core::ArtifactPaths;
//! use quote_training::{generate_trips, train_from_csv, write_trips, GeneratorConfig, TrainerConfig};
//!
//! let trips = generate_trips(&GeneratorConfig::default().with_seed(42));
//! write_trips("data/rides_dataset.csv", &trips).unwrap();
//! let report = train_from_csv(
//!     "data/rides_dataset.csv",
//!     &ArtifactPaths::in_dir("artifacts"),
//!     &TrainerConfig::default(),
//! )
//! .unwrap();
//! println!("R2 = {:.2}", report.metrics.r2);
//! ```
//!
//! - [`dataset`]: the CSV ride dataset
//! - [`generator`]: synthetic ride generation
//! - [`split`]: seeded train/test split
//! - [`trainer`]: forest fitting and artifact persistence
//! - [`metrics`]: MAE, RMSE, R² and MAPE
//! - [`evaluation`]: held-out evaluation of a persisted model
//! - [`export`]: CSV, JSON and Parquet writers for evaluation data

pub mod dataset;
pub mod distributions;
pub mod error;
pub mod evaluation;
pub mod export;
pub mod generator;
pub mod metrics;
pub mod split;
pub mod trainer;

pub use dataset::{encode_features, read_trips, write_trips, TripRecord};
pub use error::TrainingError;
pub use evaluation::{
    evaluate, evaluate_from_artifacts, EvaluationOutputs, EvaluationReport, PredictionRecord,
};
pub use generator::{generate_trips, GeneratorConfig};
pub use metrics::RegressionMetrics;
pub use split::TrainTestSplit;
pub use trainer::{train, train_from_csv, FeatureImportance, TrainerConfig, TrainingReport};

/// Install the `tracing` subscriber used by the binaries. `RUST_LOG`
/// overrides the default `info` level.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
