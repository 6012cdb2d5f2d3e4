pub mod account;
pub mod market_data;
pub mod trading;

use crate::core::{
    config::ExchangeConfig,
    errors::ExchangeError,
    kernel::{Clock, HmacSigner, RestClient, Signer, SystemClock},
    traits::ExchangeConnector,
};
use crate::exchanges::binance::{requests::Timestamped, rest::BinanceRestClient};
use std::sync::Arc;

/// Binance spot connector with an injected transport.
///
/// Holds nothing but immutable state, so one instance can serve any number of
/// concurrent calls.
pub struct BinanceConnector<R: RestClient> {
    rest: BinanceRestClient<R>,
    clock: Arc<dyn Clock>,
}

impl<R: RestClient> BinanceConnector<R> {
    /// Create a connector from a transport and configuration.
    ///
    /// Signed endpoints are only available when the configuration
    /// carries both an API key and a secret key.
    pub fn new(rest: R, config: &ExchangeConfig) -> Self {
        let signer: Option<Arc<dyn Signer>> = if config.has_credentials() {
            Some(Arc::new(HmacSigner::new(
                config.api_key().to_string(),
                config.secret_key().as_bytes(),
            )))
        } else {
            None
        };

        Self::from_parts(
            BinanceRestClient::new(rest, config.resolved_base_url(), signer),
            Arc::new(SystemClock),
        )
    }

    pub fn from_parts(rest: BinanceRestClient<R>, clock: Arc<dyn Clock>) -> Self {
        Self { rest, clock }
    }

    /// Replace the timestamp source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn rest(&self) -> &BinanceRestClient<R> {
        &self.rest
    }

    pub fn base_url(&self) -> &str {
        self.rest.base_url()
    }

    pub fn can_authenticate(&self) -> bool {
        self.rest.has_signer()
    }

    /// Current epoch-millisecond time from the connector's clock
    pub fn timestamp(&self) -> Result<u64, ExchangeError> {
        self.clock.now_millis()
    }

    /// Set `request`'s timestamp to now
    pub fn stamp<T: Timestamped>(&self, mut request: T) -> Result<T, ExchangeError> {
        request.set_timestamp(self.timestamp()?);
        Ok(request)
    }
}

impl<R: RestClient> std::fmt::Debug for BinanceConnector<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceConnector")
            .field("rest", &self.rest)
            .finish_non_exhaustive()
    }
}

impl<R: RestClient> ExchangeConnector for BinanceConnector<R> {}
