// --- File: crates/shiplink_fulfillment/src/lib.rs ---

pub mod auth;     // Shared-secret authentication
pub mod handlers; // Axum handlers, generic over the provider
pub mod routes;   // Axum router definition for this crate
#[cfg(feature = "openapi")]
pub mod doc;      // OpenAPI documentation specific to the fulfillment API

// Re-export the routes function to be used by the main backend service
pub use routes::routes;
pub use handlers::FulfillmentState;
