//! Bearer-token auth decorator for the request pipeline.
//!
//! # Responsibility
//! - Resolve the current token from process configuration per request.
//! - Inject `Authorization` before delegating to the inner transport.
//!
//! # Invariants
//! - The token is re-read on every request; rotation needs no restart.
//! - A missing or empty token yields an empty header value, never no header.
//! - Token values are never logged.

use super::transport::{GraphQlRequest, Transport, TransportError};
use log::debug;
use reqwest::header::{HeaderValue, InvalidHeaderValue, AUTHORIZATION};
use serde_json::Value;

/// Environment-backed bearer token lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSource {
    env_var: String,
}

impl TokenSource {
    pub fn from_env_var(env_var: impl Into<String>) -> Self {
        Self {
            env_var: env_var.into(),
        }
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    /// Reads the token now. Unset, empty and non-UTF-8 values are `None`.
    pub fn current(&self) -> Option<String> {
        std::env::var(&self.env_var)
            .ok()
            .filter(|token| !token.is_empty())
    }
}

/// Formats the `Authorization` header value for an optional token.
pub fn authorization_value(token: Option<&str>) -> String {
    match token {
        Some(token) if !token.is_empty() => format!("Bearer {token}"),
        _ => String::new(),
    }
}

/// Pipeline stage that adds `Authorization` and forwards to `inner`.
#[derive(Debug, Clone)]
pub struct AuthLink<T> {
    tokens: TokenSource,
    inner: T,
}

impl<T: Transport> AuthLink<T> {
    pub fn new(tokens: TokenSource, inner: T) -> Self {
        Self { tokens, inner }
    }

    pub fn tokens(&self) -> &TokenSource {
        &self.tokens
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Builds the header for the token configured at this instant.
    pub fn authorization_header(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let token = self.tokens.current();
        let mut value = HeaderValue::from_str(&authorization_value(token.as_deref()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl<T: Transport> Transport for AuthLink<T> {
    async fn send(&self, mut request: GraphQlRequest) -> Result<Value, TransportError> {
        let header = self.authorization_header()?;
        debug!(
            "event=auth_header module=auth status=ok operation={} token_present={}",
            request.operation_name,
            !header.is_empty()
        );
        request.headers.insert(AUTHORIZATION, header);
        self.inner.send(request).await
    }
}
