// --- File: crates/shiplink_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{HttpStatusCode, ShiplinkError};

pub mod client;

/// Extension trait for ShiplinkError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for ShiplinkError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

impl IntoResponse for ShiplinkError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Converts a `Result<T, E>` to a `Result<Json<T>, ShiplinkError>`, mapping the error
/// through `From`. Handlers return this directly.
pub fn map_json_error<T, E>(result: Result<T, E>) -> Result<Json<T>, ShiplinkError>
where
    T: serde::Serialize,
    ShiplinkError: From<E>,
{
    result.map(Json).map_err(ShiplinkError::from)
}
