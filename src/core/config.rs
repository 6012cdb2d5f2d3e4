use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

pub const MAINNET_BASE_URL: &str = "https://api.binance.com";
pub const TESTNET_BASE_URL: &str = "https://testnet.binance.vision";

/// Credentials and endpoint selection for a Binance spot client.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    pub api_key: Secret<String>,
    pub secret_key: Secret<String>,
    pub testnet: bool,
    pub base_url: Option<String>,
}

// Secrets never leave the process through serialization
impl Serialize for ExchangeConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ExchangeConfig", 4)?;
        state.serialize_field("api_key", "[REDACTED]")?;
        state.serialize_field("secret_key", "[REDACTED]")?;
        state.serialize_field("testnet", &self.testnet)?;
        state.serialize_field("base_url", &self.base_url)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for ExchangeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ExchangeConfigHelper {
            api_key: String,
            secret_key: String,
            #[serde(default)]
            testnet: bool,
            base_url: Option<String>,
        }

        let helper = ExchangeConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            api_key: Secret::new(helper.api_key),
            secret_key: Secret::new(helper.secret_key),
            testnet: helper.testnet,
            base_url: helper.base_url,
        })
    }
}

impl ExchangeConfig {
    #[must_use]
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
            testnet: false,
            base_url: None,
        }
    }

    /// Configuration for public endpoints only.
    #[must_use]
    pub fn public_only() -> Self {
        Self::new(String::new(), String::new())
    }

    /// Read configuration from the environment.
    ///
    /// - `{PREFIX}_API_KEY` (required)
    /// - `{PREFIX}_SECRET_KEY` (required)
    /// - `{PREFIX}_TESTNET` (optional, defaults to false)
    /// - `{PREFIX}_BASE_URL` (optional)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let api_key_var = format!("{}_API_KEY", prefix);
        let secret_key_var = format!("{}_SECRET_KEY", prefix);

        let api_key = env::var(&api_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(api_key_var))?;
        let secret_key = env::var(&secret_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(secret_key_var))?;

        let testnet = match env::var(format!("{}_TESTNET", prefix)) {
            Ok(raw) => raw.parse::<bool>().map_err(|_| {
                ConfigError::InvalidConfiguration(format!(
                    "{}_TESTNET must be true or false, got '{}'",
                    prefix, raw
                ))
            })?,
            Err(_) => false,
        };

        Ok(Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
            testnet,
            base_url: env::var(format!("{}_BASE_URL", prefix)).ok(),
        })
    }

    /// Load a `.env` file (if present) and then read from the environment.
    ///
    /// **Security Warning**: never commit .env files to version control.
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && !self.secret_key.expose_secret().is_empty()
    }

    #[must_use]
    pub const fn testnet(mut self, testnet: bool) -> Self {
        self.testnet = testnet;
        self
    }

    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Base URL requests are sent to, without a trailing slash.
    ///
    /// An explicit `base_url` wins over the testnet flag.
    pub fn resolved_base_url(&self) -> String {
        let url = match (&self.base_url, self.testnet) {
            (Some(url), _) => url.as_str(),
            (None, true) => TESTNET_BASE_URL,
            (None, false) => MAINNET_BASE_URL,
        };
        url.trim_end_matches('/').to_string()
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Get secret key (use carefully - exposes secret)
    pub fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_resolution() {
        let config = ExchangeConfig::new("k".to_string(), "s".to_string());
        assert_eq!(config.resolved_base_url(), MAINNET_BASE_URL);

        let config = config.testnet(true);
        assert_eq!(config.resolved_base_url(), TESTNET_BASE_URL);

        let config = config.base_url("http://127.0.0.1:8080/".to_string());
        assert_eq!(config.resolved_base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_serialize_redacts_secrets() {
        let config = ExchangeConfig::new("my-key".to_string(), "my-secret".to_string());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("my-key"));
        assert!(!json.contains("my-secret"));
        assert!(json.contains("[REDACTED]"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ExchangeConfig::new("my-key".to_string(), "my-secret".to_string());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("my-secret"));
    }

    #[test]
    fn test_public_only_has_no_credentials() {
        assert!(!ExchangeConfig::public_only().has_credentials());
        assert!(ExchangeConfig::new("k".to_string(), "s".to_string()).has_credentials());
    }

    #[test]
    fn test_missing_env_variable() {
        let result = ExchangeConfig::from_env("BINANCE_SPOT_REST_UNSET_PREFIX");
        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvironmentVariable(var)) if var == "BINANCE_SPOT_REST_UNSET_PREFIX_API_KEY"
        ));
    }
}
