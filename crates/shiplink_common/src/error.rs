// --- File: crates/shiplink_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Shiplink errors.
///
/// Provider crates define their own error enums and implement
/// `From<ProviderError> for ShiplinkError` so the HTTP layer can render them uniformly.
#[derive(Error, Debug)]
pub enum ShiplinkError {
    /// Transport-level failure of an outbound HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Required input was missing or malformed
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error reported by an external service, with the status it answered with
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        status_code: Option<u16>,
        message: String,
    },

    /// The request conflicts with what the upstream offers (e.g. no matching rate)
    #[error("Conflict: {0}")]
    ConflictError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for ShiplinkError {
    fn status_code(&self) -> u16 {
        match self {
            ShiplinkError::HttpError(_) => 502,
            ShiplinkError::ParseError(_) => 502,
            ShiplinkError::ConfigError(_) => 500,
            ShiplinkError::AuthError(_) => 401,
            ShiplinkError::ValidationError(_) => 400,
            // Pass client-side upstream statuses through, everything else is a bad gateway.
            ShiplinkError::ExternalServiceError { status_code, .. } => match status_code {
                Some(code) if (400..500).contains(code) => *code,
                _ => 502,
            },
            ShiplinkError::ConflictError(_) => 409,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for ShiplinkError {
    fn from(err: reqwest::Error) -> Self {
        ShiplinkError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for ShiplinkError {
    fn from(err: serde_json::Error) -> Self {
        ShiplinkError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> ShiplinkError {
    ShiplinkError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> ShiplinkError {
    ShiplinkError::ValidationError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> ShiplinkError {
    ShiplinkError::ConflictError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(
    service_name: &str,
    status_code: Option<u16>,
    message: T,
) -> ShiplinkError {
    ShiplinkError::ExternalServiceError {
        service_name: service_name.to_string(),
        status_code,
        message: message.to_string(),
    }
}
