//! Server-level error types
//!
//! Errors raised during startup and the serve loop. Request-level errors
//! use [`crate::utils::AppError`] instead.

use thiserror::Error;

/// Errors that can stop the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type for server operations
pub type Result<T> = std::result::Result<T, ServerError>;
