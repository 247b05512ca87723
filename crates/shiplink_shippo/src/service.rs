// --- File: crates/shiplink_shippo/src/service.rs ---
use shiplink_common::models::{
    CalculatePriceContext, CalculatedShippingOptionPrice, CreateFulfillmentResult,
    CreateShippingOption, DataMap, FulfillmentItem, FulfillmentOption, FulfillmentOrder,
    FulfillmentRecord, ValidatedFulfillmentData,
};
use shiplink_common::services::{BoxFuture, FulfillmentProviderService};
use shiplink_config::ShippoConfig;
use tracing::{debug, info, warn};

use crate::client::ShippoClient;
use crate::error::ShippoError;
use crate::logic::{
    build_quote_request, carrier_account_to_option, carrier_selection, configured_origin,
    destination_address, fulfillment_result, label_target, origin_address,
    parcel_from_dimensions, quoted_price, select_rate, shipment_id, PROVIDER_IDENTIFIER,
};
use crate::models::{ShipmentCreateRequest, TransactionCreateRequest};

/// Shippo fulfillment provider
pub struct ShippoProviderService {
    client: ShippoClient,
    config: ShippoConfig,
}

impl ShippoProviderService {
    pub const IDENTIFIER: &'static str = PROVIDER_IDENTIFIER;

    /// Create the provider. Fails fast when the API key is missing or malformed.
    pub fn new(config: &ShippoConfig) -> Result<Self, ShippoError> {
        let client = ShippoClient::new(config)?;
        info!(base_url = %config.api_base_url, "Shippo provider initialized");
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Create the provider with defaults for everything but the key.
    pub fn from_api_key(api_key: impl Into<String>) -> Result<Self, ShippoError> {
        Self::new(&ShippoConfig::with_api_key(api_key))
    }
}

impl FulfillmentProviderService for ShippoProviderService {
    type Error = ShippoError;

    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn get_fulfillment_options(&self) -> BoxFuture<'_, Vec<FulfillmentOption>, Self::Error> {
        Box::pin(async move {
            let page = self
                .client
                .list_carrier_accounts(self.config.carrier_account_page_size)
                .await?;
            if page.next.is_some() {
                debug!("more carrier accounts available than the configured page size");
            }
            let options: Vec<FulfillmentOption> = page
                .results
                .into_iter()
                .map(carrier_account_to_option)
                .collect();
            info!(count = options.len(), "listed Shippo fulfillment options");
            Ok(options)
        })
    }

    fn can_calculate(&self, _option: CreateShippingOption) -> BoxFuture<'_, bool, Self::Error> {
        Box::pin(async { Ok(true) })
    }

    fn calculate_price(
        &self,
        option_data: DataMap,
        data: DataMap,
        context: CalculatePriceContext,
    ) -> BoxFuture<'_, CalculatedShippingOptionPrice, Self::Error> {
        Box::pin(async move {
            let shipment = match shipment_id(&data)? {
                Some(id) => self.client.get_shipment(id).await?,
                None => {
                    let request =
                        build_quote_request(&option_data, &context, &self.config.default_parcel)?;
                    self.client.create_shipment(&request).await?
                }
            };

            let price = quoted_price(&shipment);
            debug!(
                shipment_id = %shipment.object_id,
                rates = shipment.rates.len(),
                amount = price.calculated_amount,
                "calculated Shippo price"
            );
            Ok(price)
        })
    }

    fn validate_fulfillment_data(
        &self,
        option_data: DataMap,
        _data: DataMap,
        _context: DataMap,
    ) -> BoxFuture<'_, ValidatedFulfillmentData, Self::Error> {
        Box::pin(async move {
            let validated = carrier_selection(&option_data)?;

            if self.config.verify_carrier_accounts {
                let accounts = self
                    .client
                    .list_carrier_accounts(self.config.carrier_account_page_size)
                    .await?;
                let known = accounts
                    .results
                    .iter()
                    .any(|account| account.object_id == validated.carrier_id);
                if !known {
                    warn!(carrier_id = %validated.carrier_id, "carrier account not found on Shippo");
                    return Err(ShippoError::ValidationError(
                        "Provided carrier_id is not recognized.".to_string(),
                    ));
                }
            }

            Ok(validated)
        })
    }

    fn create_fulfillment(
        &self,
        data: DataMap,
        _items: Vec<FulfillmentItem>,
        order: Option<FulfillmentOrder>,
        fulfillment: FulfillmentRecord,
    ) -> BoxFuture<'_, CreateFulfillmentResult, Self::Error> {
        Box::pin(async move {
            let target = label_target(&data, order.as_ref())?;

            let address_from = match (fulfillment.location.as_ref(), self.config.origin.as_ref()) {
                (Some(location), _) => origin_address(location)?,
                (None, Some(origin)) => configured_origin(origin),
                (None, None) => {
                    return Err(ShippoError::ValidationError(
                        "No origin address: fulfillment has no location and no origin is configured"
                            .to_string(),
                    ))
                }
            };

            let shipment = self
                .client
                .create_shipment(&ShipmentCreateRequest {
                    address_from,
                    address_to: destination_address(target.ship_to),
                    parcels: vec![parcel_from_dimensions(&self.config.label_parcel)],
                    carrier_accounts: vec![target.carrier_id.to_string()],
                    is_async: false,
                })
                .await?;

            let rate = select_rate(&shipment.rates, target.carrier_id, target.service_level)?;

            let transaction = self
                .client
                .create_transaction(&TransactionCreateRequest {
                    rate: rate.object_id.clone(),
                    label_file_type: self.config.label_file_type.clone(),
                    is_async: false,
                    metadata: Some(format!("shipment {}", shipment.object_id)),
                })
                .await?;

            let result = fulfillment_result(transaction, rate, &shipment.object_id)?;
            info!(
                external_id = %result.external_id,
                tracking_number = ?result.tracking_number,
                "Shippo label purchased"
            );
            Ok(result)
        })
    }
}
