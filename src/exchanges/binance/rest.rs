use crate::core::errors::ExchangeError;
use crate::core::kernel::{
    decode_response, EndpointSecurity, RequestParams, RestClient, RestRequest, Signer,
};
use crate::exchanges::binance::requests::{
    AccountRequest, AllOrdersRequest, AvgPriceRequest, MyTradesRequest, OrderRequest,
    TickerPriceRequest,
};
use crate::exchanges::binance::types::{
    AccountInfo, AveragePrice, ExchangeInfo, Order, Pong, ServerTime, TickerPrice, Trade,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::instrument;

/// Every REST endpoint the client talks to, with its path and security level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Ping,
    ServerTime,
    ExchangeInfo,
    AvgPrice,
    TickerPrice,
    Account,
    MyTrades,
    AllOrders,
    Order,
}

impl Endpoint {
    pub const ALL: [Self; 9] = [
        Self::Ping,
        Self::ServerTime,
        Self::ExchangeInfo,
        Self::AvgPrice,
        Self::TickerPrice,
        Self::Account,
        Self::MyTrades,
        Self::AllOrders,
        Self::Order,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Ping => "/api/v3/ping",
            Self::ServerTime => "/api/v3/time",
            Self::ExchangeInfo => "/api/v3/exchangeInfo",
            Self::AvgPrice => "/api/v3/avgPrice",
            Self::TickerPrice => "/api/v3/ticker/price",
            Self::Account => "/api/v3/account",
            Self::MyTrades => "/api/v3/myTrades",
            Self::AllOrders => "/api/v3/allOrders",
            Self::Order => "/api/v3/order",
        }
    }

    pub const fn security(self) -> EndpointSecurity {
        match self {
            Self::Ping | Self::ServerTime | Self::ExchangeInfo => EndpointSecurity::Public,
            Self::AvgPrice | Self::TickerPrice => EndpointSecurity::ApiKey,
            Self::Account | Self::MyTrades | Self::AllOrders | Self::Order => {
                EndpointSecurity::Signed
            }
        }
    }

    /// All endpoints in this client are queries, including `order`
    pub fn method(self) -> Method {
        Method::GET
    }
}

/// Thin typed wrapper around `RestClient` for the Binance spot API
pub struct BinanceRestClient<R: RestClient> {
    client: R,
    base_url: String,
    signer: Option<Arc<dyn Signer>>,
}

impl<R: RestClient> BinanceRestClient<R> {
    pub fn new(client: R, base_url: String, signer: Option<Arc<dyn Signer>>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            signer,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_signer(&self) -> bool {
        self.signer.is_some()
    }

    pub fn transport(&self) -> &R {
        &self.client
    }

    /// Validate, encode and sign `request` for `endpoint` without sending it
    pub fn build_request<P: RequestParams>(
        &self,
        endpoint: Endpoint,
        request: &P,
    ) -> Result<RestRequest, ExchangeError> {
        request.validate()?;
        let params = request.encode();

        RestRequest::build(
            endpoint.method(),
            &self.base_url,
            endpoint.path(),
            endpoint.security(),
            &params,
            self.signer.as_deref(),
        )
    }

    /// Full round trip: build, send once, decode through the shared mapper
    #[instrument(skip(self, request), fields(exchange = "binance", endpoint = endpoint.path()))]
    pub async fn call<T, P>(&self, endpoint: Endpoint, request: &P) -> Result<T, ExchangeError>
    where
        T: DeserializeOwned,
        P: RequestParams,
    {
        let rest_request = self.build_request(endpoint, request)?;
        let response = self.client.send(rest_request).await?;
        decode_response(&response)
    }

    pub async fn ping(&self) -> Result<Pong, ExchangeError> {
        self.call(Endpoint::Ping, &()).await
    }

    pub async fn get_server_time(&self) -> Result<ServerTime, ExchangeError> {
        self.call(Endpoint::ServerTime, &()).await
    }

    pub async fn get_exchange_info(&self) -> Result<ExchangeInfo, ExchangeError> {
        self.call(Endpoint::ExchangeInfo, &()).await
    }

    pub async fn get_avg_price(
        &self,
        request: &AvgPriceRequest,
    ) -> Result<AveragePrice, ExchangeError> {
        self.call(Endpoint::AvgPrice, request).await
    }

    pub async fn get_ticker_price(
        &self,
        request: &TickerPriceRequest,
    ) -> Result<TickerPrice, ExchangeError> {
        self.call(Endpoint::TickerPrice, request).await
    }

    pub async fn get_account_info(
        &self,
        request: &AccountRequest,
    ) -> Result<AccountInfo, ExchangeError> {
        self.call(Endpoint::Account, request).await
    }

    pub async fn get_my_trades(
        &self,
        request: &MyTradesRequest,
    ) -> Result<Vec<Trade>, ExchangeError> {
        self.call(Endpoint::MyTrades, request).await
    }

    pub async fn get_all_orders(
        &self,
        request: &AllOrdersRequest,
    ) -> Result<Vec<Order>, ExchangeError> {
        self.call(Endpoint::AllOrders, request).await
    }

    pub async fn get_order(&self, request: &OrderRequest) -> Result<Order, ExchangeError> {
        self.call(Endpoint::Order, request).await
    }
}

impl<R: RestClient> std::fmt::Debug for BinanceRestClient<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceRestClient")
            .field("base_url", &self.base_url)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}
