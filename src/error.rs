//! Error types shared by every ficha operation.

use thiserror::Error;

/// Errors raised while loading or mutating fichas.
///
/// All variants are turned into a single error notification by the
/// controller; none of them are fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FichaError {
    /// Draft is incomplete; detected locally, nothing was sent
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Transport failure or non-success status from the server
    #[error("Network error: {0}")]
    Network(String),

    /// Response body does not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A previous request for the same target has not resolved yet
    #[error("A request for {0} is already in progress")]
    RequestInFlight(String),
}

impl FichaError {
    pub fn missing_fields(fields: &[&str]) -> Self {
        FichaError::Validation(format!("missing required field(s): {}", fields.join(", ")))
    }
}

impl From<reqwest::Error> for FichaError {
    fn from(e: reqwest::Error) -> Self {
        FichaError::Network(e.to_string())
    }
}
