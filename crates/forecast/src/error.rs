use stockcast_core::DomainError;
use thiserror::Error;

/// Failure of a forecast request.
///
/// Both variants are permanent conditions of the request itself; retrying the
/// same input yields the same error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    /// Fewer than two distinct dates survived aggregation.
    #[error("insufficient data: need at least 2 distinct dates, got {points}")]
    InsufficientData { points: usize },

    #[error("invalid forecast input: {0}")]
    InvalidInput(String),
}

impl ForecastError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<DomainError> for ForecastError {
    fn from(value: DomainError) -> Self {
        Self::InvalidInput(value.to_string())
    }
}
