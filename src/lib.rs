pub mod core;
pub mod exchanges;

pub use crate::core::{
    config::ExchangeConfig,
    errors::{ErrorKind, ExchangeError, ValidationError},
    traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderQuery},
};
pub use exchanges::binance::{build_connector, BinanceConnector};
