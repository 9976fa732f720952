use std::fs;

use quote_core::test_helpers::{TEST_DROP, TEST_PICKUP};
use quote_core::{ArtifactPaths, ForestConfig, QuoteEngine, RankingPreference, TripRequest};
use quote_training::{
    evaluate_from_artifacts, generate_trips, read_trips, train_from_csv, write_trips,
    EvaluationOutputs, GeneratorConfig, TrainerConfig, TrainingError,
};

fn quick_trainer() -> TrainerConfig {
    TrainerConfig::default()
        .with_forest(ForestConfig::default().with_n_estimators(12).with_max_depth(Some(10)))
        .with_progress(false)
}

#[test]
fn generate_train_serve_evaluate() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_path = dir.path().join("data").join("rides_dataset.csv");
    let artifacts = ArtifactPaths::in_dir(dir.path().join("artifacts"));
    let eval_dir = dir.path().join("evaluation");

    let trips = generate_trips(&GeneratorConfig::default().with_samples(1_000).with_seed(42));
    write_trips(&data_path, &trips).expect("write dataset");
    assert_eq!(read_trips(&data_path).expect("read dataset").len(), 1_000);

    let report = train_from_csv(&data_path, &artifacts, &quick_trainer()).expect("train");
    assert_eq!(report.train_rows, 800);
    assert_eq!(report.test_rows, 200);
    assert_eq!(report.model_path.as_deref(), Some(artifacts.model_path.as_path()));
    assert!(artifacts.model_path.exists());
    assert!(artifacts.columns_path.exists());

    let engine = QuoteEngine::from_artifacts(&artifacts);
    assert!(engine.is_ready());
    let request = TripRequest::new(TEST_PICKUP, TEST_DROP, 18)
        .with_preference(RankingPreference::Fastest);
    let ranked = engine.rank(&request).expect("ranked");
    assert_eq!(ranked.len(), 3);
    assert!(ranked.windows(2).all(|w| w[0].eta <= w[1].eta));

    let evaluation = evaluate_from_artifacts(&data_path, &artifacts, &eval_dir, &quick_trainer())
        .expect("evaluate");
    assert_eq!(evaluation.predictions.len(), 200);
    assert!((evaluation.metrics.mae - report.metrics.mae).abs() < 1e-9);

    let outputs = EvaluationOutputs::in_dir(&eval_dir);
    let predictions = fs::read_to_string(&outputs.predictions_csv).expect("predictions.csv");
    assert!(predictions.starts_with(
        "row_index,hour_of_day,vehicle_type,trip_distance,actual_min,predicted_min,error_min"
    ));
    assert_eq!(predictions.lines().count(), 201);
    assert!(fs::metadata(&outputs.predictions_parquet).expect("parquet").len() > 0);

    let importances = fs::read_to_string(&outputs.importance_csv).expect("importances");
    assert_eq!(importances.lines().count(), 8);

    let text = fs::read_to_string(&outputs.report_json).expect("json");
    let json: serde_json::Value = serde_json::from_str(&text).expect("parse");
    assert!(json["metrics"]["r2"].is_number());
    assert_eq!(json["feature_importances"].as_array().map(Vec::len), Some(7));
}

#[test]
fn training_on_missing_dataset_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = train_from_csv(
        dir.path().join("missing.csv"),
        &ArtifactPaths::in_dir(dir.path()),
        &quick_trainer(),
    )
    .unwrap_err();
    assert!(matches!(err, TrainingError::Csv(_)));
}

#[test]
fn evaluation_without_model_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_path = dir.path().join("rides.csv");
    let trips = generate_trips(&GeneratorConfig::default().with_samples(50).with_seed(2));
    write_trips(&data_path, &trips).expect("write");

    let err = evaluate_from_artifacts(
        &data_path,
        &ArtifactPaths::in_dir(dir.path()),
        dir.path(),
        &TrainerConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, TrainingError::Model(_)));
}
