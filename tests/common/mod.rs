//! Shared fixtures for the connector tests

#![allow(dead_code)]

use async_trait::async_trait;
use binance_spot_rest::core::config::ExchangeConfig;
use binance_spot_rest::core::errors::ExchangeError;
use binance_spot_rest::core::kernel::{Clock, RawResponse, RestClient, RestRequest};
use binance_spot_rest::BinanceConnector;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_API_KEY: &str = "test_api_key";
pub const TEST_SECRET_KEY: &str = "test_secret_key";
pub const TEST_TIMESTAMP: u64 = 1_700_000_000_000;

/// Epoch-ms clock frozen at one instant
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> Result<u64, ExchangeError> {
        Ok(self.0)
    }
}

enum Reply {
    Response(RawResponse),
    NetworkFailure(String),
}

struct Recorder {
    reply: Reply,
    calls: AtomicUsize,
    requests: Mutex<Vec<RestRequest>>,
}

/// In-memory transport that answers every request the same way and keeps
/// what it was sent.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<Recorder>,
}

impl MockTransport {
    fn with_reply(reply: Reply) -> Self {
        Self {
            inner: Arc::new(Recorder {
                reply,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn respond(status: u16, body: &str) -> Self {
        Self::with_reply(Reply::Response(RawResponse::new(status, body)))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_reply(Reply::NetworkFailure(message.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RestRequest> {
        self.inner.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RestRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl RestClient for MockTransport {
    async fn send(&self, request: RestRequest) -> Result<RawResponse, ExchangeError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.requests.lock().unwrap().push(request);
        match &self.inner.reply {
            Reply::Response(response) => Ok(response.clone()),
            Reply::NetworkFailure(message) => Err(ExchangeError::NetworkError(message.clone())),
        }
    }
}

/// Route the crate's spans and events to the test harness output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

pub fn test_config() -> ExchangeConfig {
    ExchangeConfig::new(TEST_API_KEY.to_string(), TEST_SECRET_KEY.to_string())
        .base_url("https://api.test.local".to_string())
}

/// Connector over `transport`, with credentials and a frozen clock
pub fn connector(transport: &MockTransport) -> BinanceConnector<MockTransport> {
    init_tracing();
    BinanceConnector::new(transport.clone(), &test_config())
        .with_clock(Arc::new(FixedClock(TEST_TIMESTAMP)))
}
