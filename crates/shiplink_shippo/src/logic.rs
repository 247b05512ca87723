// --- File: crates/shiplink_shippo/src/logic.rs ---

// Pure reshaping between host payloads and Shippo payloads. Nothing in here
// talks to the network; service.rs sequences these around ShippoClient calls.

use serde_json::{json, Value};
use shiplink_common::models::{
    data_str, CalculatePriceContext, CalculatedShippingOptionPrice, CartLineItem,
    CreateFulfillmentResult, DataMap, FulfillmentLabel, FulfillmentOption, FulfillmentOptionData,
    FulfillmentOrder, ShippingAddress, StockLocation, ValidatedFulfillmentData,
};
use shiplink_config::{OriginAddressConfig, ParcelDimensions};
use tracing::warn;

use crate::error::ShippoError;
use crate::models::{
    Address, CarrierAccount, DistanceUnit, MassUnit, Parcel, Rate, Shipment,
    ShipmentCreateRequest, Transaction, TransactionStatus,
};

/// Identifier the host registers this provider under.
pub const PROVIDER_IDENTIFIER: &str = "shippo";

// --- Fulfillment options ---

/// Display name: "<carrier name> <account metadata>".
fn option_name(account: &CarrierAccount) -> String {
    let carrier = account
        .carrier_name
        .as_deref()
        .or(account.carrier.as_deref())
        .unwrap_or_default();
    let metadata = account.metadata.as_deref().unwrap_or_default();
    format!("{} {}", carrier, metadata).trim().to_string()
}

/// Maps one carrier account to one fulfillment option.
pub fn carrier_account_to_option(account: CarrierAccount) -> FulfillmentOption {
    let name = option_name(&account);
    FulfillmentOption {
        id: account.object_id.clone(),
        name,
        description: String::new(),
        provider_id: account.object_id,
        data: FulfillmentOptionData {
            carrier_account_id: account.account_id,
            service_level_token: None,
        },
    }
}

// --- Addresses ---

fn full_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let name = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!name.is_empty()).then_some(name)
}

/// Origin address from a stock location and its nested address.
pub fn origin_address(location: &StockLocation) -> Result<Address, ShippoError> {
    let address = location.address.as_ref().ok_or_else(|| {
        ShippoError::ValidationError("Origin location has no address.".to_string())
    })?;
    Ok(Address {
        name: location.name.clone(),
        company: address.company.clone(),
        street1: address.address_1.clone(),
        street2: address.address_2.clone(),
        city: address.city.clone(),
        state: address.province.clone(),
        zip: address.postal_code.clone(),
        country: address.country_code.clone(),
        phone: address.phone.clone(),
        email: None,
    })
}

/// Origin address from the configured sender.
pub fn configured_origin(origin: &OriginAddressConfig) -> Address {
    Address {
        name: origin.name.clone(),
        company: origin.company.clone(),
        street1: Some(origin.street1.clone()),
        street2: origin.street2.clone(),
        city: Some(origin.city.clone()),
        state: origin.state.clone(),
        zip: Some(origin.zip.clone()),
        country: Some(origin.country.clone()),
        phone: origin.phone.clone(),
        email: origin.email.clone(),
    }
}

/// Destination address from the customer's flat shipping address.
pub fn destination_address(address: &ShippingAddress) -> Address {
    Address {
        name: full_name(address.first_name.as_deref(), address.last_name.as_deref()),
        company: address.company.clone(),
        street1: address.address_1.clone(),
        street2: address.address_2.clone(),
        city: address.city.clone(),
        state: address.province.clone(),
        zip: address.postal_code.clone(),
        country: address.country_code.clone(),
        phone: address.phone.clone(),
        email: None,
    }
}

// --- Parcels ---

fn dimension(value: Option<f64>, fallback: &str, field: &'static str, item_id: Option<&str>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => {
            warn!(field, fallback, item_id, "variant dimension missing, using configured fallback");
            fallback.to_string()
        }
    }
}

/// One parcel for a cart line item; missing variant dimensions use `fallback`.
pub fn parcel_for_item(item: &CartLineItem, fallback: &ParcelDimensions) -> Parcel {
    let variant = item.variant.as_ref();
    let item_id = item.id.as_deref();
    Parcel {
        length: dimension(variant.and_then(|v| v.length), &fallback.length, "length", item_id),
        width: dimension(variant.and_then(|v| v.width), &fallback.width, "width", item_id),
        height: dimension(variant.and_then(|v| v.height), &fallback.height, "height", item_id),
        distance_unit: DistanceUnit::Centimeter,
        weight: dimension(variant.and_then(|v| v.weight), &fallback.weight, "weight", item_id),
        mass_unit: MassUnit::Gram,
    }
}

/// A parcel with fixed dimensions.
pub fn parcel_from_dimensions(dimensions: &ParcelDimensions) -> Parcel {
    Parcel {
        length: dimensions.length.clone(),
        width: dimensions.width.clone(),
        height: dimensions.height.clone(),
        distance_unit: DistanceUnit::Centimeter,
        weight: dimensions.weight.clone(),
        mass_unit: MassUnit::Gram,
    }
}

// --- Price calculation ---

/// Previously created shipment referenced by `data.shipment_id`, if any.
pub fn shipment_id(data: &DataMap) -> Result<Option<&str>, ShippoError> {
    match data_str(data, "shipment_id") {
        None => Ok(None),
        Some(id) if id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') => Ok(Some(id)),
        Some(id) => Err(ShippoError::ValidationError(format!("Invalid shipment_id: {}", id))),
    }
}

/// Builds the quote request for a cart: both addresses, one parcel per item, the option's carrier account.
pub fn build_quote_request(
    option_data: &DataMap,
    context: &CalculatePriceContext,
    fallback: &ParcelDimensions,
) -> Result<ShipmentCreateRequest, ShippoError> {
    let (Some(from), Some(to)) = (context.from_location.as_ref(), context.shipping_address.as_ref()) else {
        return Err(ShippoError::ValidationError(
            "From and To addresses are required for calculating shipping rates.".to_string(),
        ));
    };
    let carrier_account = data_str(option_data, "provider_id").ok_or_else(|| {
        ShippoError::ValidationError("Missing provider_id (carrier account) in option data.".to_string())
    })?;
    if context.items.is_empty() {
        return Err(ShippoError::ValidationError(
            "At least one line item is required for calculating shipping rates.".to_string(),
        ));
    }

    Ok(ShipmentCreateRequest {
        address_from: origin_address(from)?,
        address_to: destination_address(to),
        parcels: context
            .items
            .iter()
            .map(|item| parcel_for_item(item, fallback))
            .collect(),
        carrier_accounts: vec![carrier_account.to_string()],
        is_async: false,
    })
}

/// Numeric value of a rate amount; anything absent or non-numeric counts as 0.
pub fn rate_amount(rate: &Rate) -> f64 {
    let amount = match rate.amount.as_ref() {
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };
    amount.filter(|a| a.is_finite()).unwrap_or(0.0)
}

/// The first quoted rate is authoritative; no carrier/service matching here.
pub fn quoted_price(shipment: &Shipment) -> CalculatedShippingOptionPrice {
    CalculatedShippingOptionPrice {
        calculated_amount: shipment.rates.first().map(rate_amount).unwrap_or(0.0),
        is_calculated_price_tax_inclusive: false,
    }
}

// --- Validation ---

/// Carrier id and service code from option data.
///
/// The carrier id (`provider_id`) must be a non-empty string. The service code is
/// read from `carrier_service_code`, falling back to `data.service_level_token`,
/// and is not required.
pub fn carrier_selection(option_data: &DataMap) -> Result<ValidatedFulfillmentData, ShippoError> {
    let carrier_id = data_str(option_data, "provider_id").ok_or_else(|| {
        ShippoError::ValidationError("Invalid or missing carrier_id in fulfillment option data.".to_string())
    })?;

    let carrier_service_code = data_str(option_data, "carrier_service_code")
        .or_else(|| {
            option_data
                .get("data")
                .and_then(Value::as_object)
                .and_then(|nested| data_str(nested, "service_level_token"))
        })
        .map(str::to_string);

    Ok(ValidatedFulfillmentData {
        carrier_id: carrier_id.to_string(),
        carrier_service_code,
    })
}

// --- Label purchase ---

/// What a label purchase needs from the host: carrier, service level and recipient.
pub struct LabelTarget<'a> {
    pub carrier_id: &'a str,
    pub service_level: &'a str,
    pub ship_to: &'a ShippingAddress,
}

pub fn label_target<'a>(
    data: &'a DataMap,
    order: Option<&'a FulfillmentOrder>,
) -> Result<LabelTarget<'a>, ShippoError> {
    let ship_to = order.and_then(|o| o.shipping_address.as_ref());
    match (ship_to, data_str(data, "carrier_id"), data_str(data, "carrier_service_code")) {
        (Some(ship_to), Some(carrier_id), Some(service_level)) => Ok(LabelTarget {
            carrier_id,
            service_level,
            ship_to,
        }),
        _ => Err(ShippoError::ValidationError(
            "Missing shipping address or carrier information".to_string(),
        )),
    }
}

/// The rate quoted for exactly this carrier account and service level token.
pub fn select_rate<'a>(
    rates: &'a [Rate],
    carrier_account: &str,
    service_level: &str,
) -> Result<&'a Rate, ShippoError> {
    rates
        .iter()
        .find(|rate| {
            rate.carrier_account.as_deref() == Some(carrier_account)
                && rate
                    .servicelevel
                    .as_ref()
                    .and_then(|s| s.token.as_deref())
                    == Some(service_level)
        })
        .ok_or_else(|| ShippoError::NoMatchingRate {
            carrier_account: carrier_account.to_string(),
            service_level: service_level.to_string(),
        })
}

/// Turns a finished label purchase into the host's fulfillment result.
pub fn fulfillment_result(
    transaction: Transaction,
    rate: &Rate,
    shipment_id: &str,
) -> Result<CreateFulfillmentResult, ShippoError> {
    if transaction.status != Some(TransactionStatus::Success) {
        let reason = transaction
            .messages
            .iter()
            .find_map(|m| m.text.clone())
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(ShippoError::TransactionFailed(reason));
    }

    let data = json!({
        "shippo_transaction_id": transaction.object_id,
        "shippo_shipment_id": shipment_id,
        "carrier": rate.provider,
        "service": rate.servicelevel.as_ref().and_then(|s| s.name.clone()),
    });

    Ok(CreateFulfillmentResult {
        labels: vec![FulfillmentLabel {
            tracking_number: transaction.tracking_number.clone(),
            tracking_url: transaction.tracking_url_provider.clone(),
            label_url: transaction.label_url.clone(),
        }],
        tracking_number: transaction.tracking_number,
        tracking_url: transaction.tracking_url_provider,
        label_url: transaction.label_url,
        external_id: transaction.object_id,
        data: data.as_object().cloned().unwrap_or_default(),
    })
}
