// --- File: crates/shiplink_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Parcel dimensions ---
// Values are sent to Shippo verbatim, so they stay strings.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ParcelDimensions {
    pub length: String, // cm
    pub width: String,  // cm
    pub height: String, // cm
    pub weight: String, // g
}

impl ParcelDimensions {
    /// Fallback used per missing variant dimension when quoting a cart.
    ///
    /// The same literal is used for the length fields and the mass field.
    /// Override it per field in config if "5 g" is not what you want.
    pub fn cart_fallback() -> Self {
        Self {
            length: "5".to_string(),
            width: "5".to_string(),
            height: "5".to_string(),
            weight: "5".to_string(),
        }
    }

    /// Parcel used for label purchases, where no per-item dimensions are known.
    pub fn label_default() -> Self {
        Self {
            length: "10".to_string(),
            width: "6".to_string(),
            height: "4".to_string(),
            weight: "500".to_string(),
        }
    }
}

// --- Origin address ---
// Used for label purchases when the fulfillment carries no stock location.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct OriginAddressConfig {
    pub name: Option<String>,
    pub company: Option<String>,
    pub street1: String,
    pub street2: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub zip: String,
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

fn default_api_base_url() -> String {
    "https://api.goshippo.com".to_string()
}

fn default_page_size() -> u32 {
    200
}

fn default_true() -> bool {
    true
}

fn default_label_file_type() -> String {
    "PDF".to_string()
}

// --- Shippo Config ---
// api_key is normally "secret_from_env" in the config file and resolved from SHIPPO_API_KEY.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ShippoConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_page_size")]
    pub carrier_account_page_size: u32,
    /// Round-trip check of the carrier id against the account listing during validation.
    #[serde(default = "default_true")]
    pub verify_carrier_accounts: bool,
    #[serde(default = "default_label_file_type")]
    pub label_file_type: String,
    /// No client-side timeout unless set.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "ParcelDimensions::cart_fallback")]
    pub default_parcel: ParcelDimensions,
    #[serde(default = "ParcelDimensions::label_default")]
    pub label_parcel: ParcelDimensions,
    #[serde(default)]
    pub origin: Option<OriginAddressConfig>,
}

impl ShippoConfig {
    /// Shippo settings with every option at its default and the given credential.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: default_api_base_url(),
            carrier_account_page_size: default_page_size(),
            verify_carrier_accounts: true,
            label_file_type: default_label_file_type(),
            request_timeout_secs: None,
            default_parcel: ParcelDimensions::cart_fallback(),
            label_parcel: ParcelDimensions::label_default(),
            origin: None,
        }
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FulfillmentConfig {
    pub shared_secret: Option<String> // Secret key loaded from env var: FULFILLMENT_SHARED_SECRET
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_shippo: bool,
    #[serde(default)]
    pub use_fulfillment: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub shippo: Option<ShippoConfig>,
    #[serde(default)]
    pub fulfillment: Option<FulfillmentConfig>,
}
