//! Error types for the middleware chain

use thiserror::Error;

/// Result type alias for middleware chain operations
pub type Result<T> = std::result::Result<T, GateError>;

/// Main error type for the middleware chain
///
/// Per-request failures are converted into responses inside the middleware
/// that detects them; this aggregate covers construction and configuration
/// paths, and lets embedding code carry any middleware error as one type.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("Authentication error: {0}")]
    Auth(#[from] crate::middleware::AuthError),

    #[error("Parameter error: {0}")]
    Parameter(#[from] crate::middleware::ParameterError),

    #[error("Pagination error: {0}")]
    Pagination(#[from] crate::middleware::PaginationError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for GateError {
    fn from(err: config::ConfigError) -> Self {
        GateError::Config(err.to_string())
    }
}
