// --- File: crates/shiplink_fulfillment/src/routes.rs ---

use crate::auth::{fulfillment_auth_middleware, FulfillmentAuthState};
use crate::handlers::{
    handle_calculate_price, handle_can_calculate, handle_create_fulfillment,
    handle_get_fulfillment_options, handle_get_identifier, handle_validate_fulfillment_data,
    FulfillmentState,
};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use shiplink_common::{FulfillmentProviderService, ShiplinkError};
use shiplink_config::AppConfig;
use std::sync::Arc;
use tracing::info;

/// Creates a router with every provider operation, guarded by the shared-secret middleware.
pub fn routes<P>(config: Arc<AppConfig>, provider: Arc<P>) -> Router
where
    P: FulfillmentProviderService + 'static,
    ShiplinkError: From<P::Error>,
{
    info!(
        "💡 Fulfillment: adding routes for provider '{}'",
        provider.identifier()
    );

    let handler_state = Arc::new(FulfillmentState { provider });
    let auth_middleware_state = Arc::new(FulfillmentAuthState { config });

    Router::new()
        .route("/fulfillment/identifier", get(handle_get_identifier::<P>))
        .route("/fulfillment/options", get(handle_get_fulfillment_options::<P>))
        .route("/fulfillment/can-calculate", post(handle_can_calculate::<P>))
        .route("/fulfillment/calculate-price", post(handle_calculate_price::<P>))
        .route("/fulfillment/validate", post(handle_validate_fulfillment_data::<P>))
        .route("/fulfillment/create", post(handle_create_fulfillment::<P>))
        .layer(middleware::from_fn_with_state(
            auth_middleware_state,
            fulfillment_auth_middleware,
        ))
        .with_state(handler_state)
}
