//! Client configuration.

use serde::{Deserialize, Serialize};
use url::Url;

/// Default GraphQL endpoint for a locally running review API.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3030/local/graphql";

/// Upper bound on `max-query-retries`.
pub const MAX_QUERY_RETRIES: u32 = 5;

/// Configuration for [`crate::ReviewClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClientConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Transport-level retries for read queries. Mutations are never retried.
    /// At most [`MAX_QUERY_RETRIES`].
    pub max_query_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
            max_query_retries: 3,
        }
    }
}

impl ClientConfig {
    /// Configuration pointed at `endpoint` with default timeouts.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Parse and check the endpoint.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: format!("unsupported scheme {:?}", url.scheme()),
            });
        }
        Ok(url)
    }

    /// Check the numeric settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.max_query_retries > MAX_QUERY_RETRIES {
            return Err(ConfigError::TooManyRetries {
                value: self.max_query_retries,
                max: MAX_QUERY_RETRIES,
            });
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("zero timeout is not allowed")]
    ZeroTimeout,

    #[error("max-query-retries {value} exceeds the limit of {max}")]
    TooManyRetries { value: u32, max: u32 },
}
