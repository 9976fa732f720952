//! Generate the synthetic ride dataset.
//!
//! Run with: cargo run -p quote_training --bin generate_data -- --samples 10000

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use quote_training::{generate_trips, init_tracing, write_trips, GeneratorConfig};

#[derive(Parser)]
#[command(name = "generate_data", about = "Generate synthetic rides for the ETA model")]
struct Args {
    /// Number of rides to generate
    #[arg(long, default_value_t = 10_000)]
    samples: usize,
    /// Output CSV path
    #[arg(long, env = "QUOTE_DATA_PATH", default_value = "data/rides_dataset.csv")]
    out: PathBuf,
    /// RNG seed; omit for a different dataset on every run
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let mut config = GeneratorConfig::default().with_samples(args.samples);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let trips = generate_trips(&config);
    write_trips(&args.out, &trips)?;
    info!(rows = trips.len(), path = %args.out.display(), "saved dataset");
    Ok(())
}
