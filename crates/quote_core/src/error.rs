use thiserror::Error;

/// Mismatch between a persisted column list and the feature layout the
/// engine knows how to fill.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("model columns are missing `{0}`")]
    MissingColumn(String),
    #[error("model columns contain unknown column `{0}`")]
    UnknownColumn(String),
    #[error("model columns contain `{0}` more than once")]
    DuplicateColumn(String),
}

/// Errors raised while fitting, saving or loading a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode model: {0}")]
    Decode(#[from] bincode::Error),
    #[error("failed to read model columns: {0}")]
    Columns(#[from] serde_json::Error),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("feature row has {actual} values but the model expects {expected}")]
    FeatureCountMismatch { expected: usize, actual: usize },
    #[error("{rows} feature rows but {targets} targets")]
    LengthMismatch { rows: usize, targets: usize },
    #[error("cannot fit a model without training rows")]
    EmptyTrainingSet,
    #[error("model artifact is corrupt: {0}")]
    Corrupt(String),
    #[error("invalid model configuration: {0}")]
    InvalidConfig(String),
}

/// Errors returned by [`crate::QuoteEngine`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    #[error("Model is not loaded: {0}")]
    ModelUnavailable(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("prediction failed: {0}")]
    Inference(String),
}
