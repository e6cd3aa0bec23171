//! # CLI Configuration
//!
//! One YAML file holds the review API settings and the feature flags:
//!
//! ```yaml
//! api:
//!   endpoint: https://api.example.gov/graphql
//!   timeout-secs: 30
//!   max-query-retries: 3
//! flags:
//!   withdraw: true
//!   undo-withdraw: false
//!   release-to-state: true
//! ```
//!
//! Every key is optional. The file itself is optional too; without one the
//! defaults apply, and `MCR_API_ENDPOINT` can still override the endpoint.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mcr_client::ClientConfig;
use mcr_state::FeatureFlags;

/// Environment variable that overrides `api.endpoint`.
pub const ENDPOINT_ENV: &str = "MCR_API_ENDPOINT";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ClientConfig,
    pub flags: FeatureFlags,
}

impl Config {
    /// Parse a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("invalid configuration")
    }

    /// Load from `path`, or use defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                Self::from_yaml(&text)
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => Self::default(),
        };
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                tracing::debug!(%endpoint, "endpoint overridden from {ENDPOINT_ENV}");
                config.api.endpoint = endpoint.trim().to_string();
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let cfg = Config::from_yaml("flags:\n  undo-withdraw: true\n").unwrap();
        assert!(cfg.flags.undo_withdraw);
        assert!(cfg.flags.withdraw);
        assert!(cfg.flags.release_to_state);
        assert_eq!(cfg.api, ClientConfig::default());
    }

    #[test]
    fn api_section_parses() {
        let cfg = Config::from_yaml(
            "api:\n  endpoint: https://api.example.gov/graphql\n  timeout-secs: 10\n",
        )
        .unwrap();
        assert_eq!(cfg.api.endpoint, "https://api.example.gov/graphql");
        assert_eq!(cfg.api.timeout_secs, 10);
        assert_eq!(cfg.api.max_query_retries, 3);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(Config::from_yaml("flags: [1, 2").is_err());
    }
}
