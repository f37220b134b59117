//! Utility module - shared helpers and types
//!
//! # Contents
//!
//! - [`AppError`] / [`AppResult`] - request-level error type and result alias
//! - [`ApiResponse`] - JSON response envelope
//! - logging and validation helpers

pub mod error;
pub mod logger;
pub mod request_log;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult};
pub use request_log::log_request;
