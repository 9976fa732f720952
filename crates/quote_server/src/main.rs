use std::path::PathBuf;

use chrono::Timelike;
use clap::{Parser, Subcommand};

use quote_core::{ArtifactPaths, Coordinate, QuoteEngine, RankingPreference, TripRequest};
use quote_server::config::{DEFAULT_BIND, DEFAULT_CORS_ORIGINS};
use quote_server::console::{console_report, DEFAULT_DROP_LON, DEFAULT_PICKUP_LON};
use quote_server::{init_tracing, serve, ServerConfig};

#[derive(Parser)]
#[command(
    name = "quote_server",
    about = "Ride quote service: HTTP API and terminal console"
)]
struct Cli {
    /// Directory containing eta_model.bin and model_columns.json
    #[arg(long, global = true, env = "QUOTE_MODEL_DIR", default_value = "artifacts")]
    model_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTML console and the JSON API
    Serve {
        #[arg(long, env = "QUOTE_BIND", default_value = DEFAULT_BIND)]
        bind: String,
        /// Allowed browser origins, comma separated
        #[arg(
            long,
            env = "QUOTE_CORS_ORIGINS",
            value_delimiter = ',',
            default_values_t = DEFAULT_CORS_ORIGINS.map(String::from)
        )]
        cors_origins: Vec<String>,
    },
    /// Print a one-off ranked quote
    Console {
        #[arg(long, default_value_t = 13.34)]
        pickup_lat: f64,
        #[arg(long, default_value_t = DEFAULT_PICKUP_LON)]
        pickup_lon: f64,
        #[arg(long, default_value_t = 13.35)]
        drop_lat: f64,
        #[arg(long, default_value_t = DEFAULT_DROP_LON)]
        drop_lon: f64,
        /// Hour of day (0-23); defaults to the current local hour
        #[arg(long)]
        hour: Option<u8>,
        /// cheapest | balanced | fastest (or 1 | 2 | 3)
        #[arg(long, default_value = "balanced")]
        preference: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, cors_origins } => {
            let config = ServerConfig::default()
                .with_bind(bind)
                .with_model_dir(cli.model_dir)
                .with_cors_origins(cors_origins);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(serve(config))?;
        }
        Commands::Console {
            pickup_lat,
            pickup_lon,
            drop_lat,
            drop_lon,
            hour,
            preference,
        } => {
            let engine = QuoteEngine::from_artifacts(&ArtifactPaths::in_dir(&cli.model_dir));
            let hour = hour.unwrap_or_else(|| chrono::Local::now().hour() as u8);
            let request = TripRequest::new(
                Coordinate::new(pickup_lat, pickup_lon),
                Coordinate::new(drop_lat, drop_lon),
                hour,
            )
            .with_preference(RankingPreference::parse_lenient(&preference));
            println!("{}", console_report(&engine, &request)?);
        }
    }
    Ok(())
}
