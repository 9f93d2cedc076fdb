use thiserror::Error;

/// Failures of a forecast producer.
///
/// Callers should treat every variant as an upstream-dependency problem,
/// distinct from bad decision parameters.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("invalid forecast request: {0}")]
    InvalidInput(String),

    #[error("not enough history to fit a model: {0}")]
    InsufficientHistory(String),

    #[error("forecast model unavailable: {0}")]
    Unavailable(String),

    #[error("inference failed: {0}")]
    InferenceFailed(String),

    #[error("model artifact error: {0}")]
    Artifact(String),

    #[error("sales history error: {0}")]
    History(String),
}
