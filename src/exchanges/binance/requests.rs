use crate::core::errors::ValidationError;
use crate::core::kernel::{ParamSet, RequestParams};

/// Largest `recvWindow` the exchange accepts, in milliseconds
pub const MAX_RECV_WINDOW: u64 = 60_000;
/// Largest page size for trade and order listings
pub const MAX_LIMIT: u32 = 1000;

fn require_non_empty(name: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingParameter(name));
    }
    Ok(())
}

fn require_timestamp(timestamp: Option<u64>) -> Result<(), ValidationError> {
    match timestamp {
        Some(ts) if ts > 0 => Ok(()),
        _ => Err(ValidationError::MissingParameter("timestamp")),
    }
}

fn check_recv_window(recv_window: Option<u64>) -> Result<(), ValidationError> {
    match recv_window {
        Some(window) if window == 0 || window > MAX_RECV_WINDOW => {
            Err(ValidationError::RecvWindowOutOfRange(window))
        }
        _ => Ok(()),
    }
}

fn check_limit(limit: Option<u32>) -> Result<(), ValidationError> {
    match limit {
        Some(value) if value == 0 || value > MAX_LIMIT => Err(ValidationError::LimitOutOfRange {
            value,
            max: MAX_LIMIT,
        }),
        _ => Ok(()),
    }
}

fn check_time_range(start: Option<u64>, end: Option<u64>) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => {
            Err(ValidationError::InvalidTimeRange { start, end })
        }
        _ => Ok(()),
    }
}

/// Request models that carry a `timestamp` and must be signed
pub trait Timestamped {
    fn set_timestamp(&mut self, timestamp: u64);
    fn timestamp(&self) -> Option<u64>;
}

macro_rules! impl_timestamped {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Timestamped for $ty {
                fn set_timestamp(&mut self, timestamp: u64) {
                    self.timestamp = Some(timestamp);
                }

                fn timestamp(&self) -> Option<u64> {
                    self.timestamp
                }
            }
        )+
    };
}

impl_timestamped!(MyTradesRequest, AccountRequest, AllOrdersRequest, OrderRequest);

/// `GET /api/v3/myTrades` - trades of the account for one symbol
///
/// | name       | mandatory | notes                                   |
/// |------------|-----------|-----------------------------------------|
/// | symbol     | yes       |                                         |
/// | orderId    | no        | only trades of this order               |
/// | startTime  | no        |                                         |
/// | endTime    | no        |                                         |
/// | fromId     | no        | trade id to fetch from, default recent  |
/// | limit      | no        | default 500, max 1000                   |
/// | recvWindow | no        | at most 60000                           |
/// | timestamp  | yes       |                                         |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MyTradesRequest {
    pub symbol: String,
    pub order_id: Option<u64>,
    pub start_time: Option<u64>,
    pub end_time: Option<u64>,
    pub from_id: Option<u64>,
    pub limit: Option<u32>,
    pub recv_window: Option<u64>,
    pub timestamp: Option<u64>,
}

impl MyTradesRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn with_order_id(mut self, order_id: u64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn with_start_time(mut self, start_time: u64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn with_end_time(mut self, end_time: u64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn with_from_id(mut self, from_id: u64) -> Self {
        self.from_id = Some(from_id);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl RequestParams for MyTradesRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("symbol", &self.symbol)?;
        check_limit(self.limit)?;
        check_time_range(self.start_time, self.end_time)?;
        check_recv_window(self.recv_window)?;
        require_timestamp(self.timestamp)
    }

    fn encode(&self) -> ParamSet {
        let mut params = ParamSet::new();
        params
            .insert("symbol", &self.symbol)
            .insert_opt("orderId", self.order_id)
            .insert_opt("startTime", self.start_time)
            .insert_opt("endTime", self.end_time)
            .insert_opt("fromId", self.from_id)
            .insert_opt("limit", self.limit)
            .insert_opt("recvWindow", self.recv_window)
            .insert_opt("timestamp", self.timestamp);
        params
    }
}

/// `GET /api/v3/account` - balances and permissions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountRequest {
    /// Leave out assets whose free and locked amounts are both zero
    pub omit_zero_balances: Option<bool>,
    pub recv_window: Option<u64>,
    pub timestamp: Option<u64>,
}

impl AccountRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_omit_zero_balances(mut self, omit: bool) -> Self {
        self.omit_zero_balances = Some(omit);
        self
    }

    pub fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl RequestParams for AccountRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_recv_window(self.recv_window)?;
        require_timestamp(self.timestamp)
    }

    fn encode(&self) -> ParamSet {
        let mut params = ParamSet::new();
        params
            .insert_opt("omitZeroBalances", self.omit_zero_balances)
            .insert_opt("recvWindow", self.recv_window)
            .insert_opt("timestamp", self.timestamp);
        params
    }
}

/// `GET /api/v3/allOrders` - every order of the account for one symbol
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllOrdersRequest {
    pub symbol: String,
    /// Orders with an id >= this one; otherwise the most recent orders
    pub order_id: Option<u64>,
    pub start_time: Option<u64>,
    pub end_time: Option<u64>,
    pub limit: Option<u32>,
    pub recv_window: Option<u64>,
    pub timestamp: Option<u64>,
}

impl AllOrdersRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn with_order_id(mut self, order_id: u64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn with_start_time(mut self, start_time: u64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn with_end_time(mut self, end_time: u64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl RequestParams for AllOrdersRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("symbol", &self.symbol)?;
        check_limit(self.limit)?;
        check_time_range(self.start_time, self.end_time)?;
        check_recv_window(self.recv_window)?;
        require_timestamp(self.timestamp)
    }

    fn encode(&self) -> ParamSet {
        let mut params = ParamSet::new();
        params
            .insert("symbol", &self.symbol)
            .insert_opt("orderId", self.order_id)
            .insert_opt("startTime", self.start_time)
            .insert_opt("endTime", self.end_time)
            .insert_opt("limit", self.limit)
            .insert_opt("recvWindow", self.recv_window)
            .insert_opt("timestamp", self.timestamp);
        params
    }
}

/// `GET /api/v3/order` - one order, by exchange id or client id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderRequest {
    pub symbol: String,
    pub order_id: Option<u64>,
    pub orig_client_order_id: Option<String>,
    pub recv_window: Option<u64>,
    pub timestamp: Option<u64>,
}

impl OrderRequest {
    pub fn by_order_id(symbol: impl Into<String>, order_id: u64) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: Some(order_id),
            ..Self::default()
        }
    }

    pub fn by_client_order_id(
        symbol: impl Into<String>,
        orig_client_order_id: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            orig_client_order_id: Some(orig_client_order_id.into()),
            ..Self::default()
        }
    }

    pub fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl RequestParams for OrderRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("symbol", &self.symbol)?;
        let has_client_id = self
            .orig_client_order_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty());
        if self.order_id.is_none() && !has_client_id {
            return Err(ValidationError::MissingParameter(
                "orderId or origClientOrderId",
            ));
        }
        check_recv_window(self.recv_window)?;
        require_timestamp(self.timestamp)
    }

    fn encode(&self) -> ParamSet {
        let mut params = ParamSet::new();
        params
            .insert("symbol", &self.symbol)
            .insert_opt("orderId", self.order_id)
            .insert_opt("origClientOrderId", self.orig_client_order_id.as_deref())
            .insert_opt("recvWindow", self.recv_window)
            .insert_opt("timestamp", self.timestamp);
        params
    }
}

/// `GET /api/v3/avgPrice`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvgPriceRequest {
    pub symbol: String,
}

impl AvgPriceRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl RequestParams for AvgPriceRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("symbol", &self.symbol)
    }

    fn encode(&self) -> ParamSet {
        let mut params = ParamSet::new();
        params.insert("symbol", &self.symbol);
        params
    }
}

/// `GET /api/v3/ticker/price`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerPriceRequest {
    pub symbol: String,
}

impl TickerPriceRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl RequestParams for TickerPriceRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("symbol", &self.symbol)
    }

    fn encode(&self) -> ParamSet {
        let mut params = ParamSet::new();
        params.insert("symbol", &self.symbol);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: u64 = 1_700_000_000_000;

    #[test]
    fn test_my_trades_valid() {
        let request = MyTradesRequest::new("BTCUSDT").with_timestamp(TS);
        assert_eq!(request.validate(), Ok(()));
        assert_eq!(
            request.encode().to_query_string(),
            "symbol=BTCUSDT&timestamp=1700000000000"
        );
    }

    #[test]
    fn test_my_trades_encodes_only_present_fields() {
        let request = MyTradesRequest::new("BTCUSDT")
            .with_from_id(42)
            .with_limit(100)
            .with_recv_window(5000)
            .with_timestamp(TS);

        let params = request.encode();
        assert_eq!(params.get("fromId"), Some("42"));
        assert_eq!(params.get("limit"), Some("100"));
        assert_eq!(params.get("recvWindow"), Some("5000"));
        assert!(!params.contains("startTime"));
        assert!(!params.contains("endTime"));
        assert!(!params.contains("orderId"));
        assert_eq!(
            params.to_query_string(),
            "fromId=42&limit=100&recvWindow=5000&symbol=BTCUSDT&timestamp=1700000000000"
        );
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let request = AllOrdersRequest::new("ETHBTC")
            .with_start_time(TS - 1000)
            .with_end_time(TS)
            .with_limit(10)
            .with_timestamp(TS);

        let first = request.encode().to_query_string();
        for _ in 0..10 {
            assert_eq!(request.clone().encode().to_query_string(), first);
        }
    }

    #[test]
    fn test_empty_symbol_rejected() {
        let request = MyTradesRequest::new("").with_timestamp(TS);
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingParameter("symbol"))
        );

        let request = AllOrdersRequest::new("   ").with_timestamp(TS);
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingParameter("symbol"))
        );

        assert!(AvgPriceRequest::new("").validate().is_err());
        assert!(TickerPriceRequest::new("").validate().is_err());
    }

    #[test]
    fn test_missing_timestamp_rejected() {
        assert_eq!(
            MyTradesRequest::new("BTCUSDT").validate(),
            Err(ValidationError::MissingParameter("timestamp"))
        );
        assert_eq!(
            AccountRequest::new().with_timestamp(0).validate(),
            Err(ValidationError::MissingParameter("timestamp"))
        );
    }

    #[test]
    fn test_recv_window_bounds() {
        let base = AccountRequest::new().with_timestamp(TS);

        assert_eq!(base.clone().with_recv_window(1).validate(), Ok(()));
        assert_eq!(base.clone().with_recv_window(60_000).validate(), Ok(()));
        assert_eq!(
            base.clone().with_recv_window(60_001).validate(),
            Err(ValidationError::RecvWindowOutOfRange(60_001))
        );
        assert_eq!(
            base.clone().with_recv_window(70_000).validate(),
            Err(ValidationError::RecvWindowOutOfRange(70_000))
        );
        assert_eq!(
            base.with_recv_window(0).validate(),
            Err(ValidationError::RecvWindowOutOfRange(0))
        );
    }

    #[test]
    fn test_limit_bounds() {
        let request = AllOrdersRequest::new("BTCUSDT").with_timestamp(TS);
        assert!(request.clone().with_limit(1000).validate().is_ok());
        assert_eq!(
            request.clone().with_limit(1001).validate(),
            Err(ValidationError::LimitOutOfRange {
                value: 1001,
                max: MAX_LIMIT
            })
        );
        assert!(request.with_limit(0).validate().is_err());
    }

    #[test]
    fn test_inverted_time_range_rejected() {
        let request = MyTradesRequest::new("BTCUSDT")
            .with_start_time(TS)
            .with_end_time(TS - 1)
            .with_timestamp(TS);
        assert_eq!(
            request.validate(),
            Err(ValidationError::InvalidTimeRange {
                start: TS,
                end: TS - 1
            })
        );
    }

    #[test]
    fn test_order_needs_an_id() {
        let request = OrderRequest {
            symbol: "BTCUSDT".to_string(),
            timestamp: Some(TS),
            ..OrderRequest::default()
        };
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingParameter(
                "orderId or origClientOrderId"
            ))
        );

        let request = OrderRequest::by_client_order_id("BTCUSDT", "").with_timestamp(TS);
        assert!(request.validate().is_err());

        let request = OrderRequest::by_client_order_id("BTCUSDT", "abc").with_timestamp(TS);
        assert_eq!(request.validate(), Ok(()));
        assert_eq!(request.encode().get("origClientOrderId"), Some("abc"));

        let request = OrderRequest::by_order_id("BTCUSDT", 7).with_timestamp(TS);
        assert_eq!(request.validate(), Ok(()));
        assert_eq!(request.encode().get("orderId"), Some("7"));
    }

    #[test]
    fn test_account_encoding() {
        let request = AccountRequest::new()
            .with_omit_zero_balances(true)
            .with_timestamp(TS);
        assert_eq!(
            request.encode().to_query_string(),
            "omitZeroBalances=true&timestamp=1700000000000"
        );
    }

    #[test]
    fn test_timestamped_sets_timestamp() {
        let mut request = MyTradesRequest::new("BTCUSDT");
        assert_eq!(request.timestamp(), None);
        request.set_timestamp(TS);
        assert_eq!(Timestamped::timestamp(&request), Some(TS));
        assert!(request.validate().is_ok());
    }
}
