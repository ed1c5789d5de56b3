//! Environment-backed configuration.
//!
//! Everything except the provider token has a default. Override with `SIMRANK_*`
//! environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_EMBEDDING_MODEL, DEFAULT_PORT, DEFAULT_PROVIDER_BASE_URL,
    DEFAULT_PROVIDER_TIMEOUT_SECS,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SIMRANK_*` overrides on top of defaults.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Bearer token sent to the embedding provider. Required.
    pub provider_token: String,

    /// Provider base URL; `/embeddings` is appended per call.
    pub provider_base_url: String,

    /// Embedding model identifier.
    pub embedding_model: String,

    /// Per-call provider timeout. Default: 60 seconds.
    pub provider_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("bind_addr", &self.bind_addr)
            .field("provider_token", &"<redacted>")
            .field("provider_base_url", &self.provider_base_url)
            .field("embedding_model", &self.embedding_model)
            .field("provider_timeout", &self.provider_timeout)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            provider_token: String::new(),
            provider_base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub const ENV_PORT: &'static str = "SIMRANK_PORT";
    pub const ENV_BIND_ADDR: &'static str = "SIMRANK_BIND_ADDR";
    pub const ENV_PROVIDER_TOKEN: &'static str = "SIMRANK_PROVIDER_TOKEN";
    /// Legacy token variable, read when [`Self::ENV_PROVIDER_TOKEN`] is unset.
    pub const ENV_LEGACY_TOKEN: &'static str = "AIPIPE_TOKEN";
    pub const ENV_PROVIDER_URL: &'static str = "SIMRANK_PROVIDER_URL";
    pub const ENV_EMBEDDING_MODEL: &'static str = "SIMRANK_EMBEDDING_MODEL";
    pub const ENV_PROVIDER_TIMEOUT: &'static str = "SIMRANK_PROVIDER_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// Fails if no provider token is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let provider_token = Self::parse_token_from_env()?;
        let provider_base_url =
            Self::parse_string_from_env(Self::ENV_PROVIDER_URL, defaults.provider_base_url);
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let provider_timeout = Self::parse_timeout_from_env(defaults.provider_timeout)?;

        Ok(Self {
            port,
            bind_addr,
            provider_token,
            provider_base_url,
            embedding_model,
            provider_timeout,
        })
    }

    /// Checks the invariants `from_env` cannot express on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider_token.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_PROVIDER_TOKEN,
            });
        }

        let url = self.provider_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidProviderUrl {
                value: self.provider_base_url.clone(),
            });
        }

        if self.embedding_model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        if self.provider_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                value: self.provider_timeout.as_secs().to_string(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Full URL of the provider embeddings endpoint.
    pub fn embeddings_url(&self) -> String {
        format!(
            "{}/embeddings",
            self.provider_base_url.trim().trim_end_matches('/')
        )
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_token_from_env() -> Result<String, ConfigError> {
        Self::parse_non_empty_from_env(Self::ENV_PROVIDER_TOKEN)
            .or_else(|| Self::parse_non_empty_from_env(Self::ENV_LEGACY_TOKEN))
            .ok_or(ConfigError::MissingEnvVar {
                name: Self::ENV_PROVIDER_TOKEN,
            })
    }

    fn parse_timeout_from_env(default: Duration) -> Result<Duration, ConfigError> {
        match env::var(Self::ENV_PROVIDER_TIMEOUT) {
            Ok(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
                _ => Err(ConfigError::InvalidTimeout { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_non_empty_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        Self::parse_non_empty_from_env(var_name).unwrap_or(default)
    }
}
