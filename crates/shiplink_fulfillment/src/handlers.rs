// --- File: crates/shiplink_fulfillment/src/handlers.rs ---

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use shiplink_common::models::{
    CalculatePriceContext, CalculatedShippingOptionPrice, CreateFulfillmentResult,
    CreateShippingOption, DataMap, FulfillmentItem, FulfillmentOption, FulfillmentOrder,
    FulfillmentRecord, ValidatedFulfillmentData,
};
use shiplink_common::{log_result, map_json_error, FulfillmentProviderService, ShiplinkError};
use std::sync::Arc;
use tracing::debug;

// --- State for Fulfillment Handlers ---
pub struct FulfillmentState<P> {
    pub provider: Arc<P>,
}

// --- Request / Response bodies ---

#[derive(Serialize, Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IdentifierResponse {
    #[cfg_attr(feature = "openapi", schema(example = "shippo"))]
    pub identifier: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CanCalculateResponse {
    pub can_calculate: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalculatePriceRequest {
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub option_data: DataMap,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub data: DataMap,
    #[serde(default)]
    pub context: CalculatePriceContext,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ValidateFulfillmentDataRequest {
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub option_data: DataMap,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub data: DataMap,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub context: DataMap,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateFulfillmentRequest {
    /// Validated option data (`carrier_id`, `carrier_service_code`).
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub data: DataMap,
    #[serde(default)]
    pub items: Vec<FulfillmentItem>,
    #[serde(default)]
    pub order: Option<FulfillmentOrder>,
    #[serde(default)]
    pub fulfillment: FulfillmentRecord,
}

// --- Handlers ---

pub async fn handle_get_identifier<P>(
    State(state): State<Arc<FulfillmentState<P>>>,
) -> Json<IdentifierResponse>
where
    P: FulfillmentProviderService + 'static,
{
    Json(IdentifierResponse {
        identifier: state.provider.identifier().to_string(),
    })
}

pub async fn handle_get_fulfillment_options<P>(
    State(state): State<Arc<FulfillmentState<P>>>,
) -> Result<Json<Vec<FulfillmentOption>>, ShiplinkError>
where
    P: FulfillmentProviderService + 'static,
    ShiplinkError: From<P::Error>,
{
    let result = state.provider.get_fulfillment_options().await;
    map_json_error(log_result(
        result,
        "Fulfillment options listed",
        "Failed to list fulfillment options",
    ))
}

pub async fn handle_can_calculate<P>(
    State(state): State<Arc<FulfillmentState<P>>>,
    Json(option): Json<CreateShippingOption>,
) -> Result<Json<CanCalculateResponse>, ShiplinkError>
where
    P: FulfillmentProviderService + 'static,
    ShiplinkError: From<P::Error>,
{
    let can_calculate = state.provider.can_calculate(option).await?;
    Ok(Json(CanCalculateResponse { can_calculate }))
}

pub async fn handle_calculate_price<P>(
    State(state): State<Arc<FulfillmentState<P>>>,
    Json(payload): Json<CalculatePriceRequest>,
) -> Result<Json<CalculatedShippingOptionPrice>, ShiplinkError>
where
    P: FulfillmentProviderService + 'static,
    ShiplinkError: From<P::Error>,
{
    debug!(items = payload.context.items.len(), "calculate price request");
    let result = state
        .provider
        .calculate_price(payload.option_data, payload.data, payload.context)
        .await;
    map_json_error(log_result(
        result,
        "Shipping price calculated",
        "Failed to calculate shipping price",
    ))
}

pub async fn handle_validate_fulfillment_data<P>(
    State(state): State<Arc<FulfillmentState<P>>>,
    Json(payload): Json<ValidateFulfillmentDataRequest>,
) -> Result<Json<ValidatedFulfillmentData>, ShiplinkError>
where
    P: FulfillmentProviderService + 'static,
    ShiplinkError: From<P::Error>,
{
    let result = state
        .provider
        .validate_fulfillment_data(payload.option_data, payload.data, payload.context)
        .await;
    map_json_error(log_result(
        result,
        "Fulfillment data validated",
        "Fulfillment data rejected",
    ))
}

pub async fn handle_create_fulfillment<P>(
    State(state): State<Arc<FulfillmentState<P>>>,
    Json(payload): Json<CreateFulfillmentRequest>,
) -> Result<Json<CreateFulfillmentResult>, ShiplinkError>
where
    P: FulfillmentProviderService + 'static,
    ShiplinkError: From<P::Error>,
{
    let result = state
        .provider
        .create_fulfillment(payload.data, payload.items, payload.order, payload.fulfillment)
        .await;
    map_json_error(log_result(
        result,
        "Fulfillment created",
        "Failed to create fulfillment",
    ))
}
