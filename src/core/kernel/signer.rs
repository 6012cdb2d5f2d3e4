use crate::core::errors::ExchangeError;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Request authentication.
///
/// The API key travels as a header; the secret only ever keys the MAC.
pub trait Signer: Send + Sync {
    /// Public API key sent with authenticated requests
    fn api_key(&self) -> &str;

    /// Sign the exact query string that will be transmitted
    fn sign(&self, query_string: &str) -> Result<String, ExchangeError>;
}

/// HMAC-SHA256 signer with lowercase hex output
pub struct HmacSigner {
    api_key: String,
    secret_key: Secret<Vec<u8>>,
}

impl HmacSigner {
    pub fn new(api_key: String, secret_key: impl Into<Vec<u8>>) -> Self {
        Self {
            api_key,
            secret_key: Secret::new(secret_key.into()),
        }
    }
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

impl Signer for HmacSigner {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn sign(&self, query_string: &str) -> Result<String, ExchangeError> {
        sign(self.secret_key.expose_secret(), query_string)
    }
}

/// HMAC-SHA256 of `payload` keyed by `secret`, rendered as lowercase hex.
pub fn sign(secret: &[u8], payload: &str) -> Result<String, ExchangeError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| ExchangeError::AuthError(format!("Invalid secret key: {}", e)))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
