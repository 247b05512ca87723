// --- File: crates/shiplink_fulfillment/tests/routes_tests.rs ---
// Router behaviour with an in-memory provider standing in for Shippo.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use shiplink_common::models::{
    CalculatePriceContext, CalculatedShippingOptionPrice, CreateFulfillmentResult,
    CreateShippingOption, DataMap, FulfillmentItem, FulfillmentOption, FulfillmentOptionData,
    FulfillmentOrder, FulfillmentRecord, ValidatedFulfillmentData,
};
use shiplink_common::{conflict, validation_error, BoxFuture, FulfillmentProviderService, ShiplinkError};
use shiplink_config::{AppConfig, FulfillmentConfig, ServerConfig};
use shiplink_fulfillment::routes;
use std::sync::Arc;
use tower::ServiceExt;

const SECRET: &str = "test_shared_secret";

struct FakeProvider;

impl FulfillmentProviderService for FakeProvider {
    type Error = ShiplinkError;

    fn identifier(&self) -> &'static str {
        "fake"
    }

    fn get_fulfillment_options(&self) -> BoxFuture<'_, Vec<FulfillmentOption>, Self::Error> {
        Box::pin(async {
            Ok(vec![FulfillmentOption {
                id: "ca_1".to_string(),
                name: "USPS default".to_string(),
                description: String::new(),
                provider_id: "ca_1".to_string(),
                data: FulfillmentOptionData {
                    carrier_account_id: Some("acct_1".to_string()),
                    service_level_token: None,
                },
            }])
        })
    }

    fn can_calculate(&self, _option: CreateShippingOption) -> BoxFuture<'_, bool, Self::Error> {
        Box::pin(async { Ok(true) })
    }

    fn calculate_price(
        &self,
        _option_data: DataMap,
        _data: DataMap,
        context: CalculatePriceContext,
    ) -> BoxFuture<'_, CalculatedShippingOptionPrice, Self::Error> {
        Box::pin(async move {
            if context.shipping_address.is_none() {
                return Err(validation_error("From and To addresses are required"));
            }
            Ok(CalculatedShippingOptionPrice {
                calculated_amount: 12.5,
                is_calculated_price_tax_inclusive: false,
            })
        })
    }

    fn validate_fulfillment_data(
        &self,
        option_data: DataMap,
        _data: DataMap,
        _context: DataMap,
    ) -> BoxFuture<'_, ValidatedFulfillmentData, Self::Error> {
        Box::pin(async move {
            match option_data.get("provider_id").and_then(Value::as_str) {
                Some(id) if !id.is_empty() => Ok(ValidatedFulfillmentData {
                    carrier_id: id.to_string(),
                    carrier_service_code: None,
                }),
                _ => Err(validation_error("Invalid or missing carrier_id")),
            }
        })
    }

    fn create_fulfillment(
        &self,
        _data: DataMap,
        _items: Vec<FulfillmentItem>,
        _order: Option<FulfillmentOrder>,
        _fulfillment: FulfillmentRecord,
    ) -> BoxFuture<'_, CreateFulfillmentResult, Self::Error> {
        Box::pin(async { Err(conflict("Matching rate not found")) })
    }
}

fn config_with_secret(secret: Option<&str>) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8086,
        },
        use_shippo: false,
        use_fulfillment: true,
        shippo: None,
        fulfillment: Some(FulfillmentConfig {
            shared_secret: secret.map(str::to_string),
        }),
    })
}

fn app() -> Router {
    routes(config_with_secret(Some(SECRET)), Arc::new(FakeProvider))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn authed_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("X-Internal-Auth-Secret", SECRET)
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_missing_secret_header_is_unauthorized() {
    let response = app()
        .oneshot(Request::builder().uri("/fulfillment/options").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], 401);
}

#[tokio::test]
async fn test_wrong_secret_is_unauthorized() {
    let request = Request::builder()
        .uri("/fulfillment/identifier")
        .header("X-Internal-Auth-Secret", "nope")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unconfigured_secret_is_server_error() {
    for secret in [None, Some("")] {
        let request = Request::builder()
            .uri("/fulfillment/identifier")
            .header("X-Internal-Auth-Secret", "")
            .body(Body::empty())
            .unwrap();
        let response = routes(config_with_secret(secret), Arc::new(FakeProvider))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[tokio::test]
async fn test_identifier_route() {
    let request = Request::builder()
        .uri("/fulfillment/identifier")
        .header("X-Internal-Auth-Secret", SECRET)
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "identifier": "fake" }));
}

#[tokio::test]
async fn test_options_route_returns_provider_options() {
    let request = Request::builder()
        .uri("/fulfillment/options")
        .header("X-Internal-Auth-Secret", SECRET)
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body[0]["id"], "ca_1");
    assert_eq!(body[0]["provider_id"], "ca_1");
    assert_eq!(body[0]["data"]["carrier_account_id"], "acct_1");
    assert_eq!(body[0]["data"]["service_level_token"], Value::Null);
}

#[tokio::test]
async fn test_can_calculate_route() {
    let response = app()
        .oneshot(authed_post("/fulfillment/can-calculate", json!({ "name": "Standard", "data": {} })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "can_calculate": true }));
}

#[tokio::test]
async fn test_calculate_price_route() {
    let payload = json!({
        "option_data": { "provider_id": "ca_1" },
        "context": {
            "shipping_address": { "first_name": "Mr", "last_name": "Hippo", "country_code": "US" },
            "items": [{ "id": "item_1" }]
        }
    });
    let response = app()
        .oneshot(authed_post("/fulfillment/calculate-price", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["calculated_amount"], 12.5);
    assert_eq!(body["is_calculated_price_tax_inclusive"], false);
}

#[tokio::test]
async fn test_calculate_price_validation_error_is_bad_request() {
    let response = app()
        .oneshot(authed_post("/fulfillment/calculate-price", json!({ "option_data": {} })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], 400);
    assert!(body["error"]["message"].as_str().unwrap().contains("addresses"));
}

#[tokio::test]
async fn test_validate_route() {
    let ok = app()
        .oneshot(authed_post("/fulfillment/validate", json!({ "option_data": { "provider_id": "ca_1" } })))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(body_json(ok).await["carrier_id"], "ca_1");

    let rejected = app()
        .oneshot(authed_post("/fulfillment/validate", json!({ "option_data": { "provider_id": "" } })))
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_route_renders_conflict() {
    let payload = json!({
        "data": { "carrier_id": "ca_1", "carrier_service_code": "usps_priority" },
        "items": [],
        "order": { "shipping_address": { "country_code": "US" } },
        "fulfillment": {}
    });
    let response = app()
        .oneshot(authed_post("/fulfillment/create", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
