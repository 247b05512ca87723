// --- File: crates/shiplink_shippo/src/client.rs ---
//! Minimal Shippo REST client.
//!
//! One method per endpoint the provider needs. Every call is a single request:
//! no retry, no caching, errors are returned as they come.

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shiplink_common::create_client;
use shiplink_config::ShippoConfig;
use tracing::debug;

use crate::error::ShippoError;
use crate::models::{
    CarrierAccount, Paginated, Shipment, ShipmentCreateRequest, Transaction,
    TransactionCreateRequest,
};

/// Checks the credential and turns it into the `Authorization` header value.
fn auth_header(api_key: &str) -> Result<HeaderValue, ShippoError> {
    if api_key.trim().is_empty() {
        return Err(ShippoError::ConfigError("api_key is missing".to_string()));
    }
    if api_key.chars().any(|c| !c.is_ascii_graphic()) {
        return Err(ShippoError::ConfigError(
            "api_key is malformed (whitespace, control or non-ASCII characters)".to_string(),
        ));
    }
    let mut value = HeaderValue::from_str(&format!("ShippoToken {}", api_key))
        .map_err(|e| ShippoError::ConfigError(format!("api_key is malformed: {}", e)))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Shippo API client. Cheap to share; holds no mutable state.
pub struct ShippoClient {
    http: Client,
    base_url: String,
    auth: HeaderValue,
}

impl ShippoClient {
    /// Build a client from the Shippo config section. Fails on a missing or malformed key.
    pub fn new(config: &ShippoConfig) -> Result<Self, ShippoError> {
        let auth = auth_header(&config.api_key)?;

        let base_url = config.api_base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ShippoError::ConfigError("api_base_url is empty".to_string()));
        }

        let http = create_client(config.request_timeout_secs, true)
            .map_err(|e| ShippoError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url, auth })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends an authenticated request and decodes a 2xx JSON body.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ShippoError> {
        let response = request
            .header(AUTHORIZATION, self.auth.clone())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ShippoError::ApiError {
                status_code: status.as_u16(),
                message: body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// `GET /carrier_accounts/?results=<page_size>`
    pub async fn list_carrier_accounts(
        &self,
        page_size: u32,
    ) -> Result<Paginated<CarrierAccount>, ShippoError> {
        debug!(page_size, "listing Shippo carrier accounts");
        let request = self
            .http
            .get(self.url("/carrier_accounts/"))
            .query(&[("results", page_size)]);
        self.send(request).await
    }

    /// `POST /shipments/`
    pub async fn create_shipment(
        &self,
        shipment: &ShipmentCreateRequest,
    ) -> Result<Shipment, ShippoError> {
        debug!(
            parcels = shipment.parcels.len(),
            carrier_accounts = ?shipment.carrier_accounts,
            "creating Shippo shipment"
        );
        let request = self.http.post(self.url("/shipments/")).json(shipment);
        self.send(request).await
    }

    /// `GET /shipments/<id>`
    pub async fn get_shipment(&self, shipment_id: &str) -> Result<Shipment, ShippoError> {
        debug!(shipment_id, "fetching Shippo shipment");
        let request = self.http.get(self.url(&format!("/shipments/{}", shipment_id)));
        self.send(request).await
    }

    /// `POST /transactions/` (buys a label for a rate)
    pub async fn create_transaction(
        &self,
        transaction: &TransactionCreateRequest,
    ) -> Result<Transaction, ShippoError> {
        debug!(rate = %transaction.rate, "creating Shippo transaction");
        let request = self.http.post(self.url("/transactions/")).json(transaction);
        self.send(request).await
    }
}
