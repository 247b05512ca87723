// --- File: crates/shiplink_shippo/src/lib.rs ---

pub mod client;
pub mod error;
pub mod logic;
pub mod models;
pub mod service;
#[cfg(test)]
mod logic_test;

pub use client::ShippoClient;
pub use error::ShippoError; // Re-export the error type
pub use service::ShippoProviderService; // Re-export the provider
