use super::BinanceConnector;
use crate::core::{errors::ExchangeError, kernel::RestClient, traits::AccountInfo};
use crate::exchanges::binance::{
    requests::{AccountRequest, MyTradesRequest},
    types::{AccountInfo as AccountSnapshot, Trade},
};
use async_trait::async_trait;
use tracing::instrument;

/// Signed account endpoints for Binance spot
#[async_trait]
impl<R: RestClient> AccountInfo for BinanceConnector<R> {
    #[instrument(skip(self, request), fields(exchange = "binance"))]
    async fn account(&self, request: AccountRequest) -> Result<AccountSnapshot, ExchangeError> {
        self.rest.get_account_info(&request).await
    }

    #[instrument(skip(self, request), fields(exchange = "binance", symbol = %request.symbol))]
    async fn my_trades(&self, request: MyTradesRequest) -> Result<Vec<Trade>, ExchangeError> {
        self.rest.get_my_trades(&request).await
    }
}
