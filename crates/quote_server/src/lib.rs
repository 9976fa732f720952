//! HTTP and console front ends for the quote engine.
//!
//! - [`routes`]: axum router (`/`, `/test`, `/predict_ride`, `/health`)
//! - [`html`]: the console page and its results section
//! - [`console`]: terminal table output
//! - [`config`]: bind address, model directory and CORS origins

pub mod config;
pub mod console;
pub mod error;
pub mod html;
pub mod routes;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError};
pub use routes::{router, AppState};

use std::future::Future;
use std::io;

use tracing::{error, info};

use quote_core::QuoteEngine;

/// Install the `tracing` subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load the model, bind, and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let engine = QuoteEngine::from_artifacts(&config.artifact_paths());
    let app = router(AppState::new(engine), config.cors_layer()?);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind.clone(),
            source,
        })?;
    info!("Listening on http://{}", config.bind);
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown(tokio::signal::ctrl_c()))
        .await?;
    Ok(())
}

/// Resolves once `signal` fires. If the signal handler cannot be installed
/// the server keeps running instead of shutting down on the spot.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            error!(error = %err, "failed to listen for shutdown signal; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
