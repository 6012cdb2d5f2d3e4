use crate::core::errors::ExchangeError;
use crate::core::kernel::rest::RawResponse;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Error payload the exchange sends with a non-2xx status
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}

/// Turn a raw response into the operation's typed result.
///
/// Every operation goes through here so that a non-2xx status is never
/// decoded as a success value. A body that fits neither shape becomes
/// [`ExchangeError::DecodeError`].
pub fn decode_response<T: DeserializeOwned>(response: &RawResponse) -> Result<T, ExchangeError> {
    let status = response.status;

    if response.is_success() {
        return serde_json::from_slice(&response.body)
            .map_err(|source| ExchangeError::DecodeError { status, source });
    }

    let error: ApiErrorBody = serde_json::from_slice(&response.body)
        .map_err(|source| ExchangeError::DecodeError { status, source })?;

    Err(ExchangeError::ApiError {
        status,
        code: error.code,
        message: error.msg,
    })
}
