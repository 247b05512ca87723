#[cfg(test)]
mod tests {
    use crate::{apply_env_overrides_from_marker, AppConfig, ParcelDimensions, SECRET_MARKER};
    use serde_json::json;

    fn config_with_key(api_key: &str) -> AppConfig {
        serde_json::from_value(json!({
            "server": { "host": "127.0.0.1", "port": 8086 },
            "use_shippo": true,
            "shippo": { "api_key": api_key }
        }))
        .expect("valid config")
    }

    #[test]
    fn shippo_section_falls_back_to_defaults() {
        let config = config_with_key("shippo_test_abc");
        let shippo = config.shippo.expect("shippo section");

        assert_eq!(shippo.api_base_url, "https://api.goshippo.com");
        assert_eq!(shippo.carrier_account_page_size, 200);
        assert!(shippo.verify_carrier_accounts);
        assert_eq!(shippo.label_file_type, "PDF");
        assert_eq!(shippo.request_timeout_secs, None);
        assert_eq!(shippo.default_parcel, ParcelDimensions::cart_fallback());
        assert_eq!(shippo.label_parcel, ParcelDimensions::label_default());
        assert!(shippo.origin.is_none());
        assert!(!config.use_fulfillment);
        assert!(config.fulfillment.is_none());
    }

    #[test]
    fn secret_marker_is_resolved_from_environment() {
        std::env::set_var("SHIPPO_API_KEY", "shippo_test_from_env");

        let config = apply_env_overrides_from_marker(config_with_key(SECRET_MARKER)).unwrap();

        assert_eq!(config.shippo.unwrap().api_key, "shippo_test_from_env");
    }

    #[test]
    fn unresolved_secret_marker_becomes_empty() {
        let mut config = config_with_key("plain");
        config.fulfillment = Some(crate::FulfillmentConfig {
            shared_secret: Some(SECRET_MARKER.to_string()),
        });
        std::env::remove_var("FULFILLMENT_SHARED_SECRET");

        let config = apply_env_overrides_from_marker(config).unwrap();

        assert_eq!(config.fulfillment.unwrap().shared_secret.as_deref(), Some(""));
        assert_eq!(config.shippo.unwrap().api_key, "plain");
    }

    #[test]
    fn cart_fallback_keeps_inherited_literal() {
        let fallback = ParcelDimensions::cart_fallback();
        assert_eq!(fallback.length, "5");
        assert_eq!(fallback.weight, "5");
    }
}
