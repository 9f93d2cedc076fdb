use thiserror::Error;

/// Caller-input failures of the decision engine.
///
/// Both variants are client errors: the computation is pure, so retrying the
/// same inputs cannot succeed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecisionError {
    #[error("forecast horizon too short: need {required} day(s), got {available}")]
    InsufficientForecastHorizon { required: usize, available: usize },

    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
}

impl DecisionError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field, for `InvalidParameter`.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DecisionError::InvalidParameter { field, .. } => Some(field),
            DecisionError::InsufficientForecastHorizon { .. } => None,
        }
    }
}
