use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::binance::connector::BinanceConnector;

/// Create a Binance connector over reqwest with default transport settings
pub fn build_connector(
    config: &ExchangeConfig,
) -> Result<BinanceConnector<ReqwestRest>, ExchangeError> {
    build_connector_with_config(config, RestClientConfig::new("binance".to_string()))
}

/// Create a Binance connector over reqwest with custom transport settings
pub fn build_connector_with_config(
    config: &ExchangeConfig,
    rest_config: RestClientConfig,
) -> Result<BinanceConnector<ReqwestRest>, ExchangeError> {
    let rest = RestClientBuilder::new(rest_config).build()?;
    Ok(BinanceConnector::new(rest, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{MAINNET_BASE_URL, TESTNET_BASE_URL};

    #[test]
    fn test_build_connector_without_credentials() {
        let connector = build_connector(&ExchangeConfig::public_only()).unwrap();
        assert!(!connector.can_authenticate());
        assert_eq!(connector.base_url(), MAINNET_BASE_URL);
    }

    #[test]
    fn test_build_connector_with_credentials() {
        let config =
            ExchangeConfig::new("test_key".to_string(), "test_secret".to_string()).testnet(true);
        let connector = build_connector(&config).unwrap();
        assert!(connector.can_authenticate());
        assert_eq!(connector.base_url(), TESTNET_BASE_URL);
    }

    #[test]
    fn test_build_connector_with_transport_settings() {
        let rest_config = RestClientConfig::new("binance".to_string())
            .with_timeout(5)
            .with_user_agent("test-agent/1.0".to_string());
        let connector =
            build_connector_with_config(&ExchangeConfig::public_only(), rest_config).unwrap();
        assert_eq!(connector.rest().transport().config().timeout_seconds, 5);
    }
}
