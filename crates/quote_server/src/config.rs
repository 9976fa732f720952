use std::path::PathBuf;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use quote_core::ArtifactPaths;

use crate::error::ServerError;

pub const DEFAULT_BIND: &str = "127.0.0.1:8001";
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub model_dir: PathBuf,
    /// Browser origins allowed to call the JSON API.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            model_dir: PathBuf::from("artifacts"),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl ServerConfig {
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }

    pub fn with_model_dir(mut self, model_dir: impl Into<PathBuf>) -> Self {
        self.model_dir = model_dir.into();
        self
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::in_dir(&self.model_dir)
    }

    /// CORS for the configured origins, with credentials allowed.
    pub fn cors_layer(&self) -> Result<CorsLayer, ServerError> {
        let origins = self
            .cors_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| ServerError::InvalidOrigin(origin.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
            .allow_credentials(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_allow_the_dev_frontend() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "127.0.0.1:8001");
        assert_eq!(config.cors_origins.len(), 2);
        assert!(config.cors_layer().is_ok());
        assert_eq!(
            config.artifact_paths().model_path,
            PathBuf::from("artifacts").join("eta_model.bin")
        );
    }

    #[test]
    fn rejects_unprintable_origin() {
        let config = ServerConfig::default().with_cors_origins(vec!["http://bad\norigin".into()]);
        assert!(matches!(config.cors_layer(), Err(ServerError::InvalidOrigin(_))));
    }
}
