//! Evaluate the persisted model and export the plot data.
//!
//! Run with: cargo run -p quote_training --bin evaluate_model

use std::path::PathBuf;

use clap::Parser;

use quote_core::ArtifactPaths;
use quote_training::split::{DEFAULT_SPLIT_SEED, DEFAULT_TEST_FRACTION};
use quote_training::{evaluate_from_artifacts, init_tracing, TrainerConfig};

#[derive(Parser)]
#[command(name = "evaluate_model", about = "Evaluate the ETA model on the held-out split")]
struct Args {
    #[arg(long, env = "QUOTE_DATA_PATH", default_value = "data/rides_dataset.csv")]
    data: PathBuf,
    #[arg(long, env = "QUOTE_MODEL_DIR", default_value = "artifacts")]
    model_dir: PathBuf,
    /// Directory for the prediction, importance and report files
    #[arg(long, default_value = "artifacts/evaluation")]
    out_dir: PathBuf,
    /// Test fraction the model was trained with
    #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
    test_fraction: f64,
    /// Split seed the model was trained with
    #[arg(long, default_value_t = DEFAULT_SPLIT_SEED)]
    split_seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let trainer = TrainerConfig::default()
        .with_test_fraction(args.test_fraction)
        .with_split_seed(args.split_seed);
    let report = evaluate_from_artifacts(
        &args.data,
        &ArtifactPaths::in_dir(&args.model_dir),
        &args.out_dir,
        &trainer,
    )?;

    println!("Test rows: {}", report.metrics.samples);
    println!("MAE:  {:.2} min", report.metrics.mae);
    println!("R2:   {:.2}", report.metrics.r2);
    println!("\nFeature importance:");
    for item in &report.feature_importances {
        println!("  {:<20} {:.4}", item.feature, item.importance);
    }
    Ok(())
}
