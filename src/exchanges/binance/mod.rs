pub mod builder;
pub mod connector;
pub mod requests;
pub mod rest;
pub mod types;

// Re-export main types for easier importing
pub use builder::{build_connector, build_connector_with_config};
pub use connector::BinanceConnector;
pub use requests::{
    AccountRequest, AllOrdersRequest, AvgPriceRequest, MyTradesRequest, OrderRequest,
    TickerPriceRequest, Timestamped,
};
pub use rest::{BinanceRestClient, Endpoint};
pub use types::{
    AccountInfo, AveragePrice, Balance, ExchangeInfo, Order, Pong, RateLimit, ServerTime,
    SymbolInfo, TickerPrice, Trade,
};
