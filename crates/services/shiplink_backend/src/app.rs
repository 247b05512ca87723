// --- File: crates/services/shiplink_backend/src/app.rs ---
//! Router assembly.
//!
//! Constructs the enabled providers from configuration and nests their routes
//! under `/api`. Provider construction errors are returned, so a bad Shippo
//! credential stops the process before it binds a port.

use axum::{routing::get, Router};
use shiplink_common::{config_error, ShiplinkError};
use shiplink_config::AppConfig;
use shiplink_shippo::ShippoProviderService;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub fn build_app(config: Arc<AppConfig>) -> Result<Router, ShiplinkError> {
    let mut router = Router::new().route("/", get(|| async { "Welcome to Shiplink API!" }));

    if config.use_shippo {
        let shippo_config = config
            .shippo
            .as_ref()
            .ok_or_else(|| config_error("use_shippo is set but the [shippo] section is missing"))?;
        let provider = Arc::new(ShippoProviderService::new(shippo_config)?);

        if config.use_fulfillment {
            router = router.merge(shiplink_fulfillment::routes(config.clone(), provider));
        } else {
            warn!("Shippo provider configured but use_fulfillment is off; no routes exposed");
        }
    } else {
        info!("Shippo provider disabled");
    }

    let mut app = Router::new().nest("/api", router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use shiplink_fulfillment::doc::FulfillmentApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Shiplink API",
                version = "0.1.0",
                description = "Shipping fulfillment provider API",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(FulfillmentApiDoc::openapi());
        info!("📖 Adding Swagger UI at /api/docs");
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    app = app.layer(TraceLayer::new_for_http());
    Ok(app)
}
