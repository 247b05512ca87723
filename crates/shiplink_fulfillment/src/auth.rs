// --- File: crates/shiplink_fulfillment/src/auth.rs ---

use axum::{
    body::Body as AxumBody,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use constant_time_eq::constant_time_eq; // For secure string comparison
use shiplink_common::ShiplinkError;
use shiplink_config::AppConfig;
use std::sync::Arc;
use tracing::{debug, error, warn};

// The auth middleware only needs the config to read the shared secret.
#[derive(Clone)]
pub struct FulfillmentAuthState {
    pub config: Arc<AppConfig>,
}

pub const INTERNAL_AUTH_HEADER: &str = "X-Internal-Auth-Secret";

/// Axum middleware authenticating host requests.
/// Checks for the shared secret in the `X-Internal-Auth-Secret` header.
pub async fn fulfillment_auth_middleware(
    State(auth_state): State<Arc<FulfillmentAuthState>>,
    req: Request<AxumBody>,
    next: Next,
) -> Response {
    // An unresolved `secret_from_env` marker leaves an empty string behind.
    let expected_secret = match auth_state
        .config
        .fulfillment
        .as_ref()
        .and_then(|f_cfg| f_cfg.shared_secret.as_deref())
        .filter(|secret| !secret.is_empty())
    {
        Some(secret) => secret,
        None => {
            error!("Fulfillment shared secret not configured");
            return ShiplinkError::ConfigError(
                "Server configuration error for fulfillment auth.".to_string(),
            )
            .into_response();
        }
    };

    let provided_secret = req
        .headers()
        .get(INTERNAL_AUTH_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided_secret {
        Some(provided) if constant_time_eq(provided.as_bytes(), expected_secret.as_bytes()) => {
            debug!(path = %req.uri().path(), "fulfillment request authenticated");
            next.run(req).await
        }
        Some(_) => {
            warn!("Fulfillment request: invalid secret provided");
            ShiplinkError::AuthError("Invalid credentials.".to_string()).into_response()
        }
        None => {
            warn!("Fulfillment request: missing '{}' header", INTERNAL_AUTH_HEADER);
            ShiplinkError::AuthError(format!("Missing {} header.", INTERNAL_AUTH_HEADER))
                .into_response()
        }
    }
}
