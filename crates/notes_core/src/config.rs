//! Client configuration with environment overrides.
//!
//! # Responsibility
//! - Provide the fixed backend defaults.
//! - Apply trimmed, non-empty environment overrides at startup.
//!
//! # Invariants
//! - The token value itself is never stored here, only the variable name.
//! - `endpoint_url()` accepts only `http`/`https` URLs.

use reqwest::Url;
use std::time::Duration;

/// Hosted GraphQL endpoint used when no override is configured.
pub const DEFAULT_ENDPOINT: &str = "https://graphql.fauna.com/graphql";
/// Environment variable holding the bearer token.
pub const DEFAULT_TOKEN_ENV_VAR: &str = "NOTES_CLIENT_KEY";
/// Environment variable overriding the endpoint.
pub const ENDPOINT_ENV_VAR: &str = "NOTES_GRAPHQL_ENDPOINT";
/// Environment variable overriding the request timeout, in whole seconds.
pub const TIMEOUT_ENV_VAR: &str = "NOTES_REQUEST_TIMEOUT_SECS";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid endpoint `{value}`: {reason}")]
    InvalidEndpoint { value: String, reason: String },
    #[error("invalid request timeout `{0}`; expected a positive number of seconds")]
    InvalidTimeout(String),
    #[error("token environment variable name cannot be empty")]
    EmptyTokenVar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    /// Name of the variable the auth link reads on every request.
    pub token_env_var: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token_env_var: DEFAULT_TOKEN_ENV_VAR.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Builds configuration from process environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(endpoint) = non_empty(lookup(ENDPOINT_ENV_VAR)) {
            config.endpoint = endpoint;
        }
        if let Some(raw) = non_empty(lookup(TIMEOUT_ENV_VAR)) {
            config.request_timeout = match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            };
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token_env_var.trim().is_empty() {
            return Err(ConfigError::EmptyTokenVar);
        }
        self.endpoint_url().map(|_| ())
    }

    /// Parses the endpoint into a URL.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(self.endpoint.trim()).map_err(|err| ConfigError::InvalidEndpoint {
            value: self.endpoint.clone(),
            reason: err.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidEndpoint {
                value: self.endpoint.clone(),
                reason: format!("unsupported scheme `{other}`"),
            }),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{ClientConfig, ConfigError, DEFAULT_ENDPOINT, ENDPOINT_ENV_VAR, TIMEOUT_ENV_VAR};
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_hosted_endpoint() {
        let config = ClientConfig::from_lookup(lookup(&[])).expect("defaults are valid");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.token_env_var, "NOTES_CLIENT_KEY");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides_are_trimmed_and_blank_values_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENDPOINT_ENV_VAR, "  http://localhost:8084/graphql "),
            (TIMEOUT_ENV_VAR, "   "),
        ]))
        .expect("override is valid");
        assert_eq!(config.endpoint, "http://localhost:8084/graphql");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn rejects_non_http_endpoint_and_bad_timeout() {
        let endpoint = ClientConfig::from_lookup(lookup(&[(ENDPOINT_ENV_VAR, "ftp://x/graphql")]))
            .expect_err("ftp endpoint must fail");
        assert!(matches!(endpoint, ConfigError::InvalidEndpoint { .. }));

        let timeout = ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV_VAR, "0")]))
            .expect_err("zero timeout must fail");
        assert_eq!(timeout, ConfigError::InvalidTimeout("0".to_string()));
    }
}
