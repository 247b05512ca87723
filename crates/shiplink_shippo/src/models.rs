// --- File: crates/shiplink_shippo/src/models.rs ---

// Shippo REST wire types (partial, only fields we need).
// https://docs.goshippo.com/shippoapi/public-api/

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// Shippo sends `null` for some empty lists.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Paginated list envelope (`{ next, previous, results }`).
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paginated<T> {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub results: Vec<T>,
}

/// A carrier account registered with Shippo.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CarrierAccount {
    pub object_id: String,
    #[serde(default)]
    pub carrier: Option<String>,      // e.g. "usps"
    #[serde(default)]
    pub carrier_name: Option<String>, // e.g. "USPS"
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub test: Option<bool>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    #[serde(rename = "cm")]
    Centimeter,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassUnit {
    #[serde(rename = "g")]
    Gram,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Parcel {
    pub length: String,
    pub width: String,
    pub height: String,
    pub distance_unit: DistanceUnit,
    pub weight: String,
    pub mass_unit: MassUnit,
}

#[derive(Serialize, Debug, Clone)]
pub struct ShipmentCreateRequest {
    pub address_from: Address,
    pub address_to: Address,
    pub parcels: Vec<Parcel>,
    pub carrier_accounts: Vec<String>,
    /// Rates are returned in the creation response when false.
    #[serde(rename = "async")]
    pub is_async: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ServiceLevel {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// A priced quote for one carrier account and service level.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Rate {
    pub object_id: String,
    /// Decimal string on the wire ("12.50"); kept raw so odd values can be coerced.
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub carrier_account: Option<String>,
    #[serde(default)]
    pub servicelevel: Option<ServiceLevel>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Shipment {
    pub object_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub rates: Vec<Rate>,
}

#[derive(Serialize, Debug, Clone)]
pub struct TransactionCreateRequest {
    pub rate: String,
    pub label_file_type: String,
    /// Wait for the label instead of polling.
    #[serde(rename = "async")]
    pub is_async: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Waiting,
    Queued,
    Success,
    Error,
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct TransactionMessage {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// A label purchase.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Transaction {
    pub object_id: String,
    #[serde(default)]
    pub status: Option<TransactionStatus>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub tracking_url_provider: Option<String>,
    #[serde(default)]
    pub label_url: Option<String>,
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub messages: Vec<TransactionMessage>,
}
