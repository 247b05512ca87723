#[cfg(test)]
mod tests {
    use crate::error::ShippoError;
    use crate::logic::*;
    use crate::models::{CarrierAccount, Rate, ServiceLevel, Shipment, Transaction, TransactionMessage, TransactionStatus};
    use serde_json::{json, Value};
    use shiplink_common::models::{
        CalculatePriceContext, CartLineItem, DataMap, FulfillmentOrder, ProductVariant,
        ShippingAddress, StockLocation, StockLocationAddress,
    };
    use shiplink_config::ParcelDimensions;

    fn map(value: Value) -> DataMap {
        value.as_object().cloned().unwrap()
    }

    fn rate(id: &str, account: &str, token: &str, amount: Value) -> Rate {
        Rate {
            object_id: id.to_string(),
            amount: Some(amount),
            currency: Some("USD".to_string()),
            provider: Some("USPS".to_string()),
            carrier_account: Some(account.to_string()),
            servicelevel: Some(ServiceLevel {
                name: Some(format!("{} service", token)),
                token: Some(token.to_string()),
            }),
        }
    }

    fn warehouse() -> StockLocation {
        StockLocation {
            id: Some("sloc_1".to_string()),
            name: Some("Main warehouse".to_string()),
            address: Some(StockLocationAddress {
                address_1: Some("215 Clayton St.".to_string()),
                city: Some("San Francisco".to_string()),
                province: Some("CA".to_string()),
                postal_code: Some("94117".to_string()),
                country_code: Some("US".to_string()),
                ..Default::default()
            }),
        }
    }

    fn customer() -> ShippingAddress {
        ShippingAddress {
            first_name: Some("Mr".to_string()),
            last_name: Some("Hippo".to_string()),
            address_1: Some("965 Mission St.".to_string()),
            city: Some("San Francisco".to_string()),
            province: Some("CA".to_string()),
            postal_code: Some("94105".to_string()),
            country_code: Some("US".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_option_name_uses_carrier_name_and_metadata() {
        let option = carrier_account_to_option(CarrierAccount {
            object_id: "ca_1".to_string(),
            carrier: Some("usps".to_string()),
            carrier_name: Some("USPS".to_string()),
            account_id: Some("acct_1".to_string()),
            metadata: Some("default".to_string()),
            active: Some(true),
            test: Some(true),
        });

        assert_eq!(option.id, "ca_1");
        assert_eq!(option.provider_id, "ca_1");
        assert_eq!(option.name, "USPS default");
        assert_eq!(option.data.carrier_account_id.as_deref(), Some("acct_1"));
        assert_eq!(option.data.service_level_token, None);
    }

    #[test]
    fn test_option_name_falls_back_to_carrier_and_trims() {
        let option = carrier_account_to_option(CarrierAccount {
            object_id: "ca_2".to_string(),
            carrier: Some("ups".to_string()),
            carrier_name: None,
            account_id: None,
            metadata: None,
            active: None,
            test: None,
        });
        assert_eq!(option.name, "ups");
    }

    #[test]
    fn test_destination_name_joins_first_and_last() {
        let address = destination_address(&customer());
        assert_eq!(address.name.as_deref(), Some("Mr Hippo"));
        assert_eq!(address.street1.as_deref(), Some("965 Mission St."));
        assert_eq!(address.state.as_deref(), Some("CA"));

        let nameless = destination_address(&ShippingAddress::default());
        assert_eq!(nameless.name, None);
    }

    #[test]
    fn test_origin_requires_nested_address() {
        let location = StockLocation {
            address: None,
            ..warehouse()
        };
        assert!(matches!(origin_address(&location), Err(ShippoError::ValidationError(_))));

        let origin = origin_address(&warehouse()).unwrap();
        assert_eq!(origin.name.as_deref(), Some("Main warehouse"));
        assert_eq!(origin.zip.as_deref(), Some("94117"));
    }

    #[test]
    fn test_parcel_uses_variant_dimensions_and_fallback() {
        let item = CartLineItem {
            id: Some("item_1".to_string()),
            quantity: Some(1.0),
            variant: Some(ProductVariant {
                length: Some(20.0),
                width: Some(12.5),
                height: None,
                weight: Some(300.0),
                ..Default::default()
            }),
        };
        let parcel = parcel_for_item(&item, &ParcelDimensions::cart_fallback());
        assert_eq!(parcel.length, "20");
        assert_eq!(parcel.width, "12.5");
        assert_eq!(parcel.height, "5");
        assert_eq!(parcel.weight, "300");

        let bare = parcel_for_item(&CartLineItem::default(), &ParcelDimensions::cart_fallback());
        assert_eq!(
            (bare.length.as_str(), bare.width.as_str(), bare.height.as_str(), bare.weight.as_str()),
            ("5", "5", "5", "5")
        );
    }

    #[test]
    fn test_parcel_units_serialize_as_cm_and_g() {
        let parcel = parcel_from_dimensions(&ParcelDimensions::label_default());
        let json = serde_json::to_value(&parcel).unwrap();
        assert_eq!(json["distance_unit"], "cm");
        assert_eq!(json["mass_unit"], "g");
        assert_eq!(json["length"], "10");
        assert_eq!(json["weight"], "500");
    }

    #[test]
    fn test_quote_request_needs_both_addresses() {
        let context = CalculatePriceContext {
            from_location: Some(warehouse()),
            shipping_address: None,
            items: vec![CartLineItem::default()],
        };
        let result = build_quote_request(
            &map(json!({ "provider_id": "ca_1" })),
            &context,
            &ParcelDimensions::cart_fallback(),
        );
        assert!(matches!(result, Err(ShippoError::ValidationError(_))));
    }

    #[test]
    fn test_quote_request_rejects_empty_cart() {
        let context = CalculatePriceContext {
            from_location: Some(warehouse()),
            shipping_address: Some(customer()),
            items: vec![],
        };
        let result = build_quote_request(
            &map(json!({ "provider_id": "ca_1" })),
            &context,
            &ParcelDimensions::cart_fallback(),
        );
        assert!(matches!(result, Err(ShippoError::ValidationError(_))));
    }

    #[test]
    fn test_quote_request_has_one_parcel_per_item() {
        let context = CalculatePriceContext {
            from_location: Some(warehouse()),
            shipping_address: Some(customer()),
            items: vec![CartLineItem::default(), CartLineItem::default(), CartLineItem::default()],
        };
        let request = build_quote_request(
            &map(json!({ "provider_id": "ca_1" })),
            &context,
            &ParcelDimensions::cart_fallback(),
        )
        .unwrap();
        assert_eq!(request.parcels.len(), 3);
        assert_eq!(request.carrier_accounts, vec!["ca_1".to_string()]);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["async"], false);
    }

    #[test]
    fn test_shipment_id_rejects_path_characters() {
        assert_eq!(shipment_id(&map(json!({}))).unwrap(), None);
        assert_eq!(shipment_id(&map(json!({ "shipment_id": "shp_1" }))).unwrap(), Some("shp_1"));
        assert!(shipment_id(&map(json!({ "shipment_id": "../x" }))).is_err());
    }

    #[test]
    fn test_rate_amount_coercion() {
        assert_eq!(rate_amount(&rate("r", "a", "t", json!("12.50"))), 12.5);
        assert_eq!(rate_amount(&rate("r", "a", "t", json!(7))), 7.0);
        assert_eq!(rate_amount(&rate("r", "a", "t", json!("abc"))), 0.0);
        assert_eq!(rate_amount(&rate("r", "a", "t", Value::Null)), 0.0);
    }

    #[test]
    fn test_quoted_price_takes_first_rate() {
        let shipment = Shipment {
            object_id: "shp_1".to_string(),
            status: Some("SUCCESS".to_string()),
            rates: vec![
                rate("r1", "a", "t", json!("12.50")),
                rate("r2", "a", "t", json!("3.00")),
            ],
        };
        let price = quoted_price(&shipment);
        assert_eq!(price.calculated_amount, 12.5);
        assert!(!price.is_calculated_price_tax_inclusive);

        let empty = Shipment { rates: vec![], ..shipment };
        assert_eq!(quoted_price(&empty).calculated_amount, 0.0);
    }

    #[test]
    fn test_carrier_selection() {
        let validated = carrier_selection(&map(json!({
            "provider_id": "ca_1",
            "carrier_service_code": "usps_priority"
        })))
        .unwrap();
        assert_eq!(validated.carrier_id, "ca_1");
        assert_eq!(validated.carrier_service_code.as_deref(), Some("usps_priority"));

        let nested = carrier_selection(&map(json!({
            "provider_id": "ca_1",
            "data": { "service_level_token": "ups_ground" }
        })))
        .unwrap();
        assert_eq!(nested.carrier_service_code.as_deref(), Some("ups_ground"));

        let without_code = carrier_selection(&map(json!({ "provider_id": "ca_1" }))).unwrap();
        assert_eq!(without_code.carrier_service_code, None);

        assert!(carrier_selection(&map(json!({ "provider_id": "" }))).is_err());
        assert!(carrier_selection(&map(json!({ "provider_id": 42 }))).is_err());
    }

    #[test]
    fn test_label_target_requires_address_and_carrier() {
        let data = map(json!({ "carrier_id": "ca_1", "carrier_service_code": "usps_priority" }));
        let order = FulfillmentOrder {
            shipping_address: Some(customer()),
            ..Default::default()
        };
        let target = label_target(&data, Some(&order)).unwrap();
        assert_eq!(target.carrier_id, "ca_1");
        assert_eq!(target.service_level, "usps_priority");

        assert!(label_target(&data, None).is_err());
        let no_code = map(json!({ "carrier_id": "ca_1" }));
        assert!(label_target(&no_code, Some(&order)).is_err());
    }

    #[test]
    fn test_select_rate_matches_account_and_token() {
        let rates = vec![
            rate("r1", "A", "x", json!("1")),
            rate("r2", "B", "x", json!("2")),
            rate("r3", "B", "y", json!("3")),
        ];
        assert_eq!(select_rate(&rates, "B", "y").unwrap().object_id, "r3");
        assert!(matches!(
            select_rate(&rates, "C", "x"),
            Err(ShippoError::NoMatchingRate { .. })
        ));
    }

    #[test]
    fn test_fulfillment_result_on_success() {
        let chosen = rate("r3", "B", "y", json!("3"));
        let transaction = Transaction {
            object_id: "tx_1".to_string(),
            status: Some(TransactionStatus::Success),
            tracking_number: Some("9400".to_string()),
            tracking_url_provider: Some("https://track/9400".to_string()),
            label_url: Some("https://label/9400.pdf".to_string()),
            messages: vec![],
        };
        let result = fulfillment_result(transaction, &chosen, "shp_1").unwrap();
        assert_eq!(result.external_id, "tx_1");
        assert_eq!(result.tracking_url.as_deref(), Some("https://track/9400"));
        assert_eq!(result.labels.len(), 1);
        assert_eq!(result.labels[0].label_url.as_deref(), Some("https://label/9400.pdf"));
        assert_eq!(result.data["shippo_shipment_id"], "shp_1");
        assert_eq!(result.data["carrier"], "USPS");
        assert_eq!(result.data["service"], "y service");
    }

    #[test]
    fn test_fulfillment_result_on_failure() {
        let chosen = rate("r3", "B", "y", json!("3"));
        let failed = Transaction {
            object_id: "tx_2".to_string(),
            status: Some(TransactionStatus::Error),
            tracking_number: None,
            tracking_url_provider: None,
            label_url: None,
            messages: vec![TransactionMessage {
                text: Some("Address invalid".to_string()),
                ..Default::default()
            }],
        };
        match fulfillment_result(failed.clone(), &chosen, "shp_1") {
            Err(ShippoError::TransactionFailed(msg)) => assert_eq!(msg, "Address invalid"),
            other => panic!("unexpected: {:?}", other.map(|r| r.external_id)),
        }

        let silent = Transaction { messages: vec![], ..failed };
        match fulfillment_result(silent, &chosen, "shp_1") {
            Err(ShippoError::TransactionFailed(msg)) => assert_eq!(msg, "Unknown error"),
            other => panic!("unexpected: {:?}", other.map(|r| r.external_id)),
        }
    }
}
