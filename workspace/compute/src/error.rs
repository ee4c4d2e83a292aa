use thiserror::Error;

use crate::predictor::PredictionError;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// A database read or write failed
    #[error("Query failed: {0}")]
    Query(#[from] sea_orm::DbErr),

    /// The model could not score the supplied features
    #[error("Model inference failed: {0}")]
    Inference(#[from] PredictionError),

    /// The model file could not be loaded or is inconsistent
    #[error("Invalid model: {0}")]
    Model(String),
}

impl ComputeError {
    /// Stable machine-readable code for API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ComputeError::Query(_) => "QUERY_FAILED",
            ComputeError::Inference(_) => "INFERENCE_FAILED",
            ComputeError::Model(_) => "MODEL_UNAVAILABLE",
        }
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
