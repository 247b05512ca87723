// --- File: crates/shiplink_common/src/lib.rs ---

pub mod error;     // Error handling
pub mod http;      // HTTP utilities
pub mod logging;   // Logging utilities
pub mod models;    // Host-facing data shapes
pub mod services;  // Provider contract

// Re-export error types and utilities for easier access
pub use error::{
    ShiplinkError,
    HttpStatusCode,
    config_error,
    validation_error,
    conflict,
    external_service_error,
};

pub use http::{
    IntoHttpResponse,
    map_json_error,
    client::create_client,
};

pub use logging::{init, init_with_level, log_error, log_result};

pub use services::{BoxFuture, FulfillmentProviderService};
