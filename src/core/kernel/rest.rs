use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::ParamSet;
use crate::core::kernel::signer::Signer;
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::{instrument, trace};

pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// How much authentication an endpoint demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSecurity {
    /// No header, no signature
    Public,
    /// API key header when credentials exist, unsigned query
    ApiKey,
    /// API key header and a `signature` parameter over the whole query
    Signed,
}

impl EndpointSecurity {
    pub const fn sends_api_key(self) -> bool {
        matches!(self, Self::ApiKey | Self::Signed)
    }

    pub const fn requires_signature(self) -> bool {
        matches!(self, Self::Signed)
    }
}

/// Fully built, dispatchable HTTP request.
///
/// All parameters travel in the query string; there is never a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRequest {
    pub method: Method,
    pub path: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl RestRequest {
    /// Assemble `base_url + path + '?' + query`, appending `signature` last
    /// for signed endpoints and the API key header for authenticated ones.
    ///
    /// Only signed endpoints fail without a signer; `ApiKey` endpoints are
    /// then sent without the header.
    pub fn build(
        method: Method,
        base_url: &str,
        path: &str,
        security: EndpointSecurity,
        params: &ParamSet,
        signer: Option<&dyn Signer>,
    ) -> Result<Self, ExchangeError> {
        let mut query = params.to_query_string();
        let mut headers = Vec::new();

        if security.requires_signature() && signer.is_none() {
            return Err(ExchangeError::AuthError(format!(
                "{} requires API credentials",
                path
            )));
        }

        if let Some(signer) = signer.filter(|_| security.sends_api_key()) {
            headers.push((API_KEY_HEADER.to_string(), signer.api_key().to_string()));

            if security.requires_signature() {
                let signature = signer.sign(&query)?;
                if !query.is_empty() {
                    query.push('&');
                }
                query.push_str("signature=");
                query.push_str(&signature);
            }
        }

        let url = if query.is_empty() {
            format!("{}{}", base_url, path)
        } else {
            format!("{}{}?{}", base_url, path, query)
        };

        Ok(Self {
            method,
            path: path.to_string(),
            url,
            headers,
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Query string without the leading '?'
    pub fn query(&self) -> Option<&str> {
        self.url.split_once('?').map(|(_, q)| q)
    }
}

/// Status and body exactly as the server sent them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// HTTP transport.
///
/// Implementations send the request once and hand back whatever the server
/// answered. Connection reuse, TLS and timeouts belong here; interpreting the
/// status does not.
#[async_trait]
pub trait RestClient: Send + Sync {
    async fn send(&self, request: RestRequest) -> Result<RawResponse, ExchangeError>;
}

/// Configuration for the reqwest transport
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Exchange name for tracing
    pub exchange_name: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(exchange_name: String) -> Self {
        Self {
            exchange_name,
            timeout_seconds: 30,
            user_agent: concat!("binance-spot-rest/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

pub struct RestClientBuilder {
    config: RestClientConfig,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| ExchangeError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(ReqwestRest {
            client,
            config: self.config,
        })
    }
}

/// `RestClient` over reqwest
#[derive(Clone, Debug)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
}

impl ReqwestRest {
    pub fn new(exchange_name: String) -> Result<Self, ExchangeError> {
        RestClientBuilder::new(RestClientConfig::new(exchange_name)).build()
    }

    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    // url is not recorded, it carries the signature
    #[instrument(skip(self, request), fields(exchange = %self.config.exchange_name, method = %request.method, path = %request.path))]
    async fn send(&self, request: RestRequest) -> Result<RawResponse, ExchangeError> {
        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        trace!(status, body_len = body.len(), "response received");

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::signer::HmacSigner;

    fn params() -> ParamSet {
        let mut params = ParamSet::new();
        params
            .insert("symbol", "BTCUSDT")
            .insert("timestamp", 1_700_000_000_000_u64);
        params
    }

    #[test]
    fn test_public_request_has_no_header_and_no_signature() {
        let request = RestRequest::build(
            Method::GET,
            "https://api.binance.com",
            "/api/v3/ping",
            EndpointSecurity::Public,
            &ParamSet::new(),
            None,
        )
        .unwrap();

        assert_eq!(request.url, "https://api.binance.com/api/v3/ping");
        assert!(request.headers.is_empty());
        assert_eq!(request.query(), None);
    }

    #[test]
    fn test_signed_request_appends_signature_last() {
        let signer = HmacSigner::new("api-key".to_string(), "secret");
        let request = RestRequest::build(
            Method::GET,
            "https://api.binance.com",
            "/api/v3/myTrades",
            EndpointSecurity::Signed,
            &params(),
            Some(&signer),
        )
        .unwrap();

        let query = request.query().unwrap();
        let (signed_part, signature) = query.rsplit_once("&signature=").unwrap();
        assert_eq!(signed_part, "symbol=BTCUSDT&timestamp=1700000000000");
        assert_eq!(signature, signer.sign(signed_part).unwrap());
        assert_eq!(request.header(API_KEY_HEADER), Some("api-key"));
        assert_eq!(request.method, Method::GET);
    }

    #[test]
    fn test_api_key_request_is_not_signed() {
        let signer = HmacSigner::new("api-key".to_string(), "secret");
        let mut params = ParamSet::new();
        params.insert("symbol", "BTCUSDT");

        let request = RestRequest::build(
            Method::GET,
            "https://api.binance.com",
            "/api/v3/avgPrice",
            EndpointSecurity::ApiKey,
            &params,
            Some(&signer),
        )
        .unwrap();

        assert_eq!(request.query(), Some("symbol=BTCUSDT"));
        assert_eq!(request.header("x-mbx-apikey"), Some("api-key"));
    }

    #[test]
    fn test_authenticated_request_without_signer_fails() {
        let result = RestRequest::build(
            Method::GET,
            "https://api.binance.com",
            "/api/v3/account",
            EndpointSecurity::Signed,
            &params(),
            None,
        );
        assert!(matches!(result, Err(ExchangeError::AuthError(_))));
    }

    #[test]
    fn test_api_key_request_without_signer_is_sent_bare() {
        let mut params = ParamSet::new();
        params.insert("symbol", "BNBBTC");
        let request = RestRequest::build(
            Method::GET,
            "https://api.binance.com",
            "/api/v3/avgPrice",
            EndpointSecurity::ApiKey,
            &params,
            None,
        )
        .unwrap();

        assert_eq!(request.url, "https://api.binance.com/api/v3/avgPrice?symbol=BNBBTC");
        assert!(request.header(API_KEY_HEADER).is_none());
    }

    #[test]
    fn test_raw_response_success_range() {
        assert!(RawResponse::new(200, "{}").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(400, "").is_success());
        assert!(!RawResponse::new(503, "").is_success());
    }
}
