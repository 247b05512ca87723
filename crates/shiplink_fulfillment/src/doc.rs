// --- File: crates/shiplink_fulfillment/src/doc.rs ---

// Only compile this module if the 'openapi' feature is enabled
#![cfg(feature = "openapi")]
// Allow dead code for the dummy functions used by utoipa macros
#![allow(dead_code)]

use crate::handlers::{
    CalculatePriceRequest, CanCalculateResponse, CreateFulfillmentRequest, IdentifierResponse,
    ValidateFulfillmentDataRequest,
};
use shiplink_common::models::{
    CalculatePriceContext, CalculatedShippingOptionPrice, CartLineItem, CreateFulfillmentResult,
    CreateShippingOption, FulfillmentItem, FulfillmentLabel, FulfillmentOption,
    FulfillmentOptionData, FulfillmentOrder, FulfillmentRecord, ProductVariant, ShippingAddress,
    StockLocation, StockLocationAddress, ValidatedFulfillmentData,
};
use utoipa::OpenApi;

// The handlers are generic over the provider, so paths are documented on these stand-ins.

#[utoipa::path(
    get,
    path = "/fulfillment/identifier",
    params(
        ("X-Internal-Auth-Secret" = String, Header, description = "Shared secret for internal API authentication.")
    ),
    responses(
        (status = 200, description = "Provider identifier", body = IdentifierResponse),
        (status = 401, description = "Unauthorized - Missing or invalid internal auth secret")
    ),
    tag = "Fulfillment"
)]
fn doc_get_identifier() {}

#[utoipa::path(
    get,
    path = "/fulfillment/options",
    params(
        ("X-Internal-Auth-Secret" = String, Header, description = "Shared secret for internal API authentication.")
    ),
    responses(
        (status = 200, description = "One option per Shippo carrier account", body = [FulfillmentOption]),
        (status = 401, description = "Unauthorized - Missing or invalid internal auth secret"),
        (status = 502, description = "Shippo API unreachable or returned an error")
    ),
    tag = "Fulfillment"
)]
fn doc_get_fulfillment_options() {}

#[utoipa::path(
    post,
    path = "/fulfillment/can-calculate",
    request_body = CreateShippingOption,
    params(
        ("X-Internal-Auth-Secret" = String, Header, description = "Shared secret for internal API authentication.")
    ),
    responses(
        (status = 200, description = "Whether the provider prices this option", body = CanCalculateResponse),
        (status = 401, description = "Unauthorized - Missing or invalid internal auth secret")
    ),
    tag = "Fulfillment"
)]
fn doc_can_calculate() {}

#[utoipa::path(
    post,
    path = "/fulfillment/calculate-price",
    request_body(
        content = CalculatePriceRequest,
        description = "Option data, cart data and pricing context",
        example = json!({
            "option_data": { "provider_id": "b741b99f95e841639b54272834bc478c" },
            "data": {},
            "context": {
                "from_location": {
                    "name": "Main warehouse",
                    "address": { "address_1": "215 Clayton St.", "city": "San Francisco", "province": "CA", "postal_code": "94117", "country_code": "US" }
                },
                "shipping_address": {
                    "first_name": "Mr", "last_name": "Hippo", "address_1": "965 Mission St.",
                    "city": "San Francisco", "province": "CA", "postal_code": "94105", "country_code": "US"
                },
                "items": [{ "id": "item_1", "quantity": 1, "variant": { "length": 20, "width": 15, "height": 10, "weight": 400 } }]
            }
        })
    ),
    params(
        ("X-Internal-Auth-Secret" = String, Header, description = "Shared secret for internal API authentication.")
    ),
    responses(
        (status = 200, description = "Price of the first quoted rate", body = CalculatedShippingOptionPrice),
        (status = 400, description = "Bad Request - Missing addresses, carrier account or items"),
        (status = 401, description = "Unauthorized - Missing or invalid internal auth secret"),
        (status = 502, description = "Shippo API unreachable or returned an error")
    ),
    tag = "Fulfillment"
)]
fn doc_calculate_price() {}

#[utoipa::path(
    post,
    path = "/fulfillment/validate",
    request_body = ValidateFulfillmentDataRequest,
    params(
        ("X-Internal-Auth-Secret" = String, Header, description = "Shared secret for internal API authentication.")
    ),
    responses(
        (status = 200, description = "Carrier id and service code to store on the option", body = ValidatedFulfillmentData),
        (status = 400, description = "Bad Request - Missing or unknown carrier id"),
        (status = 401, description = "Unauthorized - Missing or invalid internal auth secret")
    ),
    tag = "Fulfillment"
)]
fn doc_validate_fulfillment_data() {}

#[utoipa::path(
    post,
    path = "/fulfillment/create",
    request_body = CreateFulfillmentRequest,
    params(
        ("X-Internal-Auth-Secret" = String, Header, description = "Shared secret for internal API authentication.")
    ),
    responses(
        (status = 200, description = "Label purchased", body = CreateFulfillmentResult),
        (status = 400, description = "Bad Request - Missing shipping address, carrier or origin"),
        (status = 401, description = "Unauthorized - Missing or invalid internal auth secret"),
        (status = 409, description = "No rate for the requested carrier account and service level"),
        (status = 502, description = "Shippo API error or failed label purchase")
    ),
    tag = "Fulfillment"
)]
fn doc_create_fulfillment() {}

// --- Main OpenAPI Definition for the Fulfillment Service ---
#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_identifier,
        doc_get_fulfillment_options,
        doc_can_calculate,
        doc_calculate_price,
        doc_validate_fulfillment_data,
        doc_create_fulfillment
    ),
    components(
        schemas(
            IdentifierResponse,
            CanCalculateResponse,
            CalculatePriceRequest,
            ValidateFulfillmentDataRequest,
            CreateFulfillmentRequest,
            FulfillmentOption,
            FulfillmentOptionData,
            CreateShippingOption,
            CalculatePriceContext,
            StockLocation,
            StockLocationAddress,
            ShippingAddress,
            CartLineItem,
            ProductVariant,
            CalculatedShippingOptionPrice,
            ValidatedFulfillmentData,
            FulfillmentItem,
            FulfillmentOrder,
            FulfillmentRecord,
            FulfillmentLabel,
            CreateFulfillmentResult
        )
    ),
    tags(
        (name = "Fulfillment", description = "Shipping fulfillment provider API")
    )
)]
pub struct FulfillmentApiDoc;
