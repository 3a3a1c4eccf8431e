// --- File: crates/commerce_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by the commerce crates.
///
/// Payment-method crates extend it by implementing `From<SpecificError> for CommerceError`.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// The processor refused a state transition
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for CommerceError {
    fn status_code(&self) -> u16 {
        match self {
            CommerceError::HttpError(_) => 500,
            CommerceError::ParseError(_) => 400,
            CommerceError::ConfigError(_) => 500,
            CommerceError::ValidationError(_) => 400,
            CommerceError::ExternalServiceError { .. } => 502,
            CommerceError::ConflictError(_) => 409,
            CommerceError::NotFoundError(_) => 404,
            CommerceError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for CommerceError {
    fn from(err: reqwest::Error) -> Self {
        CommerceError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(err: serde_json::Error) -> Self {
        CommerceError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> CommerceError {
    CommerceError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> CommerceError {
    CommerceError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> CommerceError {
    CommerceError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> CommerceError {
    CommerceError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> CommerceError {
    CommerceError::InternalError(message.to_string())
}
