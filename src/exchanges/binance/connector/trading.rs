use super::BinanceConnector;
use crate::core::{errors::ExchangeError, kernel::RestClient, traits::OrderQuery};
use crate::exchanges::binance::{
    requests::{AllOrdersRequest, OrderRequest},
    types::Order,
};
use async_trait::async_trait;
use tracing::instrument;

#[async_trait]
impl<R: RestClient> OrderQuery for BinanceConnector<R> {
    #[instrument(skip(self, request), fields(exchange = "binance", symbol = %request.symbol))]
    async fn all_orders(&self, request: AllOrdersRequest) -> Result<Vec<Order>, ExchangeError> {
        self.rest.get_all_orders(&request).await
    }

    #[instrument(
        skip(self, request),
        fields(exchange = "binance", symbol = %request.symbol, order_id = ?request.order_id)
    )]
    async fn order(&self, request: OrderRequest) -> Result<Order, ExchangeError> {
        self.rest.get_order(&request).await
    }
}
