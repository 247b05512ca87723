// --- File: crates/shiplink_common/src/services.rs ---
//! The provider contract the commerce host drives.
//!
//! A fulfillment provider is any type implementing [`FulfillmentProviderService`].
//! The HTTP surface in `shiplink_fulfillment` is generic over this trait, so a
//! provider can be exercised without a network by swapping in a fake.

use std::future::Future;
use std::pin::Pin;

use crate::models::{
    CalculatePriceContext, CalculatedShippingOptionPrice, CreateFulfillmentResult,
    CreateShippingOption, DataMap, FulfillmentItem, FulfillmentOption, FulfillmentOrder,
    FulfillmentRecord, ValidatedFulfillmentData,
};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Capability set of a shipping fulfillment provider.
///
/// Every operation is a stateless request/response cycle; implementations hold no
/// mutable state and must be safe to share behind an `Arc`.
pub trait FulfillmentProviderService: Send + Sync {
    /// Error type returned by provider operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fixed identifier the host registers this provider under.
    fn identifier(&self) -> &'static str;

    /// List the options a merchant can attach to shipping options.
    fn get_fulfillment_options(&self) -> BoxFuture<'_, Vec<FulfillmentOption>, Self::Error>;

    /// Whether this provider can price the given shipping option.
    fn can_calculate(&self, option: CreateShippingOption) -> BoxFuture<'_, bool, Self::Error>;

    /// Quote a shipping price for a cart.
    fn calculate_price(
        &self,
        option_data: DataMap,
        data: DataMap,
        context: CalculatePriceContext,
    ) -> BoxFuture<'_, CalculatedShippingOptionPrice, Self::Error>;

    /// Validate the data of a fulfillment option before it is stored.
    fn validate_fulfillment_data(
        &self,
        option_data: DataMap,
        data: DataMap,
        context: DataMap,
    ) -> BoxFuture<'_, ValidatedFulfillmentData, Self::Error>;

    /// Create the fulfillment upstream (buy the label).
    fn create_fulfillment(
        &self,
        data: DataMap,
        items: Vec<FulfillmentItem>,
        order: Option<FulfillmentOrder>,
        fulfillment: FulfillmentRecord,
    ) -> BoxFuture<'_, CreateFulfillmentResult, Self::Error>;
}
