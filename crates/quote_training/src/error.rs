use thiserror::Error;

use quote_core::ModelError;

/// Errors raised by the offline jobs: dataset I/O, training and evaluation.
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("dataset CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset {0} has no rows")]
    EmptyDataset(String),
    #[error("need at least {min} rows to split into train and test sets, got {rows}")]
    TooFewRows { rows: usize, min: usize },
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("export failed: {0}")]
    Export(String),
}
