use thiserror::Error;

/// Local precondition failures of a request model.
///
/// Raised before anything is encoded, signed or sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing mandatory parameter: {0}")]
    MissingParameter(&'static str),

    #[error("recvWindow must be in 1..=60000, got {0}")]
    RecvWindowOutOfRange(u64),

    #[error("limit must be in 1..={max}, got {value}")]
    LimitOutOfRange { value: u32, max: u32 },

    #[error("startTime {start} is after endTime {end}")]
    InvalidTimeRange { start: u64, end: u64 },
}

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] ValidationError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error: {code} - {message} (HTTP {status})")]
    ApiError {
        status: u16,
        code: i64,
        message: String,
    },

    #[error("Failed to decode response (HTTP {status}): {source}")]
    DecodeError {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("Other error: {0}")]
    Other(String),
}

/// Coarse classification of an [`ExchangeError`], for callers that branch on
/// the failure kind rather than the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Transport,
    Exchange,
    Decode,
    Auth,
    Config,
    Other,
}

impl ExchangeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameters(_) => ErrorKind::Validation,
            Self::HttpError(_) | Self::NetworkError(_) => ErrorKind::Transport,
            Self::ApiError { .. } => ErrorKind::Exchange,
            Self::DecodeError { .. } => ErrorKind::Decode,
            Self::AuthError(_) => ErrorKind::Auth,
            Self::ConfigError(_) => ErrorKind::Config,
            Self::Other(_) => ErrorKind::Other,
        }
    }

    /// Exchange-defined error code, if the exchange reported one.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}
