// --- File: crates/shiplink_shippo/src/error.rs ---
use shiplink_common::{
    config_error, conflict, external_service_error, validation_error, HttpStatusCode,
    ShiplinkError,
};
use thiserror::Error;

/// Shippo-specific error types.
#[derive(Error, Debug)]
pub enum ShippoError {
    /// Transport failure talking to the Shippo API
    #[error("Shippo API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Non-2xx answer from the Shippo API
    #[error("Shippo API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Failed to parse Shippo API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or malformed Shippo configuration
    #[error("Shippo configuration error: {0}")]
    ConfigError(String),

    /// Required input missing or malformed
    #[error("Invalid fulfillment input: {0}")]
    ValidationError(String),

    /// The created shipment has no rate for the requested carrier account and service level
    #[error("Matching rate not found in Shippo response (carrier account: {carrier_account}, service level: {service_level})")]
    NoMatchingRate {
        carrier_account: String,
        service_level: String,
    },

    /// Label purchase did not end in SUCCESS
    #[error("Shippo transaction failed: {0}")]
    TransactionFailed(String),
}

impl From<ShippoError> for ShiplinkError {
    fn from(err: ShippoError) -> Self {
        match err {
            ShippoError::RequestError(e) => ShiplinkError::HttpError(format!("Shippo request error: {}", e)),
            ShippoError::ApiError { status_code, message } => {
                external_service_error("Shippo API", Some(status_code), message)
            }
            ShippoError::ParseError(e) => ShiplinkError::ParseError(format!("Shippo response parse error: {}", e)),
            ShippoError::ConfigError(msg) => config_error(format!("Shippo: {}", msg)),
            ShippoError::ValidationError(msg) => validation_error(msg),
            e @ ShippoError::NoMatchingRate { .. } => conflict(e),
            ShippoError::TransactionFailed(msg) => {
                external_service_error("Shippo transaction", None, msg)
            }
        }
    }
}

impl HttpStatusCode for ShippoError {
    fn status_code(&self) -> u16 {
        match self {
            ShippoError::RequestError(_) => 502,
            ShippoError::ApiError { status_code, .. } if (400..500).contains(status_code) => *status_code,
            ShippoError::ApiError { .. } => 502,
            ShippoError::ParseError(_) => 502,
            ShippoError::ConfigError(_) => 500,
            ShippoError::ValidationError(_) => 400,
            ShippoError::NoMatchingRate { .. } => 409,
            ShippoError::TransactionFailed(_) => 502,
        }
    }
}
