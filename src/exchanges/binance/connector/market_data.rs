use super::BinanceConnector;
use crate::core::{errors::ExchangeError, kernel::RestClient, traits::MarketDataSource};
use crate::exchanges::binance::{
    requests::{AvgPriceRequest, TickerPriceRequest},
    types::{AveragePrice, ExchangeInfo, ServerTime, TickerPrice},
};
use async_trait::async_trait;
use tracing::instrument;

#[async_trait]
impl<R: RestClient> MarketDataSource for BinanceConnector<R> {
    #[instrument(skip(self), fields(exchange = "binance"))]
    async fn ping(&self) -> Result<(), ExchangeError> {
        self.rest.ping().await.map(|_| ())
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    async fn server_time(&self) -> Result<ServerTime, ExchangeError> {
        self.rest.get_server_time().await
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    async fn exchange_info(&self) -> Result<ExchangeInfo, ExchangeError> {
        self.rest.get_exchange_info().await
    }

    #[instrument(skip(self, request), fields(exchange = "binance", symbol = %request.symbol))]
    async fn average_price(
        &self,
        request: AvgPriceRequest,
    ) -> Result<AveragePrice, ExchangeError> {
        self.rest.get_avg_price(&request).await
    }

    #[instrument(skip(self, request), fields(exchange = "binance", symbol = %request.symbol))]
    async fn ticker_price(
        &self,
        request: TickerPriceRequest,
    ) -> Result<TickerPrice, ExchangeError> {
        self.rest.get_ticker_price(&request).await
    }
}
