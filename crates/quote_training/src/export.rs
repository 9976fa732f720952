//! Evaluation export.
//!
//! Writes the inputs of the accuracy scatter and the feature importance
//! chart as data files: predictions to CSV and Parquet, importances to CSV,
//! and the metrics summary to JSON.

use std::path::Path;

use crate::evaluation::{EvaluationReport, PredictionRecord};
use crate::trainer::FeatureImportance;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/parquet.rs"]
mod parquet;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Export per-row predictions to CSV.
///
/// Columns: `row_index, hour_of_day, vehicle_type, trip_distance,
/// actual_min, predicted_min, error_min`.
///
/// # Errors
///
/// Returns an error if `predictions` is empty or the file cannot be written.
pub fn export_predictions_to_csv(
    predictions: &[PredictionRecord],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(predictions)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_predictions_impl(predictions, file)
}

/// Export per-row predictions to Parquet with the same columns as the CSV.
///
/// # Errors
///
/// Returns an error if `predictions` is empty or Parquet writing fails.
pub fn export_predictions_to_parquet(
    predictions: &[PredictionRecord],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(predictions)?;
    let file = writer_utils::create_output_file(path)?;
    parquet::export_predictions_impl(predictions, file)
}

/// Export feature importances to CSV (`feature, importance`), in the order given.
pub fn export_importances_to_csv(
    importances: &[FeatureImportance],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(importances)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_importances_impl(importances, file)
}

/// Export metrics and importances as pretty-printed JSON.
pub fn export_report_to_json(
    report: &EvaluationReport,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_report_impl(report, file)
}
