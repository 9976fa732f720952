//! Train the ETA forest and write `eta_model.bin` / `model_columns.json`.
//!
//! Run with: cargo run --release -p quote_training --bin train_model

use std::path::PathBuf;

use clap::Parser;

use quote_core::{ArtifactPaths, ForestConfig};
use quote_training::split::{DEFAULT_SPLIT_SEED, DEFAULT_TEST_FRACTION};
use quote_training::{init_tracing, train_from_csv, TrainerConfig};

#[derive(Parser)]
#[command(name = "train_model", about = "Train the ETA random forest")]
struct Args {
    /// Dataset CSV produced by generate_data
    #[arg(long, env = "QUOTE_DATA_PATH", default_value = "data/rides_dataset.csv")]
    data: PathBuf,
    /// Directory for the model artifacts
    #[arg(long, env = "QUOTE_MODEL_DIR", default_value = "artifacts")]
    out_dir: PathBuf,
    #[arg(long, default_value_t = 250)]
    trees: usize,
    /// Maximum tree depth; 0 means unlimited
    #[arg(long, default_value_t = 15)]
    max_depth: usize,
    #[arg(long, default_value_t = 5)]
    min_samples_leaf: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Share of rows held out for testing
    #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
    test_fraction: f64,
    #[arg(long, default_value_t = DEFAULT_SPLIT_SEED)]
    split_seed: u64,
    /// Hide the progress bar
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let forest = ForestConfig::default()
        .with_n_estimators(args.trees)
        .with_max_depth((args.max_depth > 0).then_some(args.max_depth))
        .with_min_samples_leaf(args.min_samples_leaf)
        .with_seed(args.seed);
    let config = TrainerConfig::default()
        .with_forest(forest)
        .with_test_fraction(args.test_fraction)
        .with_split_seed(args.split_seed)
        .with_progress(!args.quiet);

    let report = train_from_csv(&args.data, &ArtifactPaths::in_dir(&args.out_dir), &config)?;

    println!("\n--- Model Evaluation ---");
    println!("MAE:  {:.2} min", report.metrics.mae);
    println!("RMSE: {:.2} min", report.metrics.rmse);
    println!("R2:   {:.2}", report.metrics.r2);
    println!("MAPE: {:.2}%", report.metrics.mape);
    println!(
        "\nTrained {} trees on {} rows in {:.1}s; artifacts in {}",
        report.n_trees,
        report.train_rows,
        report.elapsed_secs,
        args.out_dir.display()
    );
    Ok(())
}
