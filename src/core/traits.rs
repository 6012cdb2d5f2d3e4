use crate::core::errors::ExchangeError;
use crate::exchanges::binance::{
    requests::{
        AccountRequest, AllOrdersRequest, AvgPriceRequest, MyTradesRequest, OrderRequest,
        TickerPriceRequest,
    },
    types::{
        AccountInfo as AccountSnapshot, AveragePrice, ExchangeInfo, Order, ServerTime,
        TickerPrice, Trade,
    },
};
use async_trait::async_trait;

#[async_trait]
pub trait MarketDataSource {
    /// Connectivity check
    async fn ping(&self) -> Result<(), ExchangeError>;

    async fn server_time(&self) -> Result<ServerTime, ExchangeError>;

    /// Trading rules, rate limits and symbol metadata
    async fn exchange_info(&self) -> Result<ExchangeInfo, ExchangeError>;

    async fn average_price(&self, request: AvgPriceRequest)
        -> Result<AveragePrice, ExchangeError>;

    async fn ticker_price(&self, request: TickerPriceRequest)
        -> Result<TickerPrice, ExchangeError>;
}

#[async_trait]
pub trait AccountInfo {
    async fn account(&self, request: AccountRequest) -> Result<AccountSnapshot, ExchangeError>;

    /// Completed trades of the account for one symbol
    async fn my_trades(&self, request: MyTradesRequest) -> Result<Vec<Trade>, ExchangeError>;
}

/// Read-only order lookups; placing and cancelling orders is not offered.
#[async_trait]
pub trait OrderQuery {
    async fn all_orders(&self, request: AllOrdersRequest) -> Result<Vec<Order>, ExchangeError>;

    async fn order(&self, request: OrderRequest) -> Result<Order, ExchangeError>;
}

// Convenience bound for code that needs every endpoint group
pub trait ExchangeConnector: MarketDataSource + AccountInfo + OrderQuery {}
