// --- File: crates/shiplink_common/src/models.rs ---

// Shapes exchanged with the commerce host. Field names follow the host's
// snake_case JSON so payloads pass through without renaming.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque key/value blob the host attaches to options and fulfillments.
pub type DataMap = Map<String, Value>;

/// Returns `data[key]` when it is a non-empty string.
pub fn data_str<'a>(data: &'a DataMap, key: &str) -> Option<&'a str> {
    data.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

// --- Fulfillment options ---

/// Provider specific part of a fulfillment option.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FulfillmentOptionData {
    pub carrier_account_id: Option<String>,
    /// Not known when listing accounts; always null for now.
    pub service_level_token: Option<String>,
}

/// One selectable fulfillment option, as listed to the host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FulfillmentOption {
    #[cfg_attr(feature = "openapi", schema(example = "b741b99f95e841639b54272834bc478c"))]
    pub id: String,
    #[cfg_attr(feature = "openapi", schema(example = "USPS default"))]
    pub name: String,
    pub description: String,
    pub provider_id: String,
    pub data: FulfillmentOptionData,
}

/// Prospective shipping option handed to the capability check.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateShippingOption {
    pub name: Option<String>,
    pub price_type: Option<String>,
    pub provider_id: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub data: DataMap,
}

// --- Addresses ---

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StockLocationAddress {
    pub company: Option<String>,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub phone: Option<String>,
}

/// Warehouse / stock location a parcel ships from.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StockLocation {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<StockLocationAddress>,
}

/// Customer shipping address (flat).
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ShippingAddress {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub phone: Option<String>,
}

// --- Cart ---

/// Physical dimensions of a product variant, in cm and g.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProductVariant {
    pub id: Option<String>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CartLineItem {
    pub id: Option<String>,
    pub quantity: Option<f64>,
    pub variant: Option<ProductVariant>,
}

/// Pricing context the host passes to price calculation.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalculatePriceContext {
    pub from_location: Option<StockLocation>,
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub items: Vec<CartLineItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalculatedShippingOptionPrice {
    #[cfg_attr(feature = "openapi", schema(example = 12.5))]
    pub calculated_amount: f64,
    pub is_calculated_price_tax_inclusive: bool,
}

// --- Validation ---

/// Data echoed back after validating a fulfillment option.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ValidatedFulfillmentData {
    pub carrier_id: String,
    pub carrier_service_code: Option<String>,
}

// --- Fulfillment creation ---

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FulfillmentItem {
    pub title: Option<String>,
    pub sku: Option<String>,
    pub quantity: Option<f64>,
    pub line_item_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FulfillmentOrder {
    pub id: Option<String>,
    pub email: Option<String>,
    pub shipping_address: Option<ShippingAddress>,
}

/// The partial fulfillment record the host has created so far.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FulfillmentRecord {
    pub id: Option<String>,
    pub location_id: Option<String>,
    pub location: Option<StockLocation>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FulfillmentLabel {
    pub tracking_number: Option<String>,
    pub tracking_url: Option<String>,
    pub label_url: Option<String>,
}

/// Outcome of a label purchase, stored by the host on the fulfillment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateFulfillmentResult {
    pub tracking_number: Option<String>,
    pub tracking_url: Option<String>,
    pub label_url: Option<String>,
    pub external_id: String,
    pub labels: Vec<FulfillmentLabel>,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub data: DataMap,
}
