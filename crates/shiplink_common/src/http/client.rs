// --- File: crates/shiplink_common/src/http/client.rs ---
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Creates a new HTTP client for an upstream API.
///
/// # Arguments
///
/// * `timeout_secs` - Overall request timeout; `None` leaves requests unbounded
/// * `follow_redirects` - Whether the client should follow redirects
pub fn create_client(timeout_secs: Option<u64>, follow_redirects: bool) -> Result<Client, ReqwestError> {
    let mut builder = Client::builder().redirect(if follow_redirects {
        reqwest::redirect::Policy::default()
    } else {
        reqwest::redirect::Policy::none()
    });
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}
