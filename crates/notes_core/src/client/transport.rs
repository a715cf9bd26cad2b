//! GraphQL-over-HTTP transport contract and reqwest implementation.
//!
//! # Responsibility
//! - Define the request pipeline seam (`Transport`) shared by the HTTP
//!   transport, the auth decorator and test doubles.
//! - POST JSON bodies to the backend endpoint and return the raw JSON reply.
//!
//! # Invariants
//! - Transports never retry; one call issues at most one HTTP request.
//! - Header values marked sensitive are never logged.

use log::{debug, error};
use reqwest::header::{HeaderMap, InvalidHeaderValue};
use reqwest::Url;
use serde_json::Value;
use std::future::Future;
use std::time::{Duration, Instant};

const USER_AGENT: &str = concat!("notes_core/", env!("CARGO_PKG_VERSION"));
const MAX_ERROR_BODY_CHARS: usize = 200;

/// One outgoing GraphQL request travelling through the pipeline.
#[derive(Debug, Clone)]
pub struct GraphQlRequest {
    /// Operation name, used for diagnostics only.
    pub operation_name: &'static str,
    /// Headers added by pipeline stages.
    pub headers: HeaderMap,
    /// JSON body: `{query, variables, operationName}`.
    pub body: Value,
}

impl GraphQlRequest {
    pub fn new(operation_name: &'static str, body: Value) -> Self {
        Self {
            operation_name,
            headers: HeaderMap::new(),
            body,
        }
    }
}

/// Transport-level failure for one request.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend answered HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response body is not valid JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("authorization header value is invalid: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

/// Request pipeline stage.
///
/// Implementations either perform the request or decorate it and delegate to
/// an inner transport.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: GraphQlRequest,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

/// reqwest-backed transport bound to one endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Builds an HTTP client with the given per-request timeout.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(TransportError::Build)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: GraphQlRequest) -> Result<Value, TransportError> {
        let started_at = Instant::now();
        let operation = request.operation_name;
        debug!("event=http_request module=transport status=start operation={operation}");

        let response = match self
            .http
            .post(self.endpoint.clone())
            .headers(request.headers)
            .json(&request.body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!(
                    "event=http_request module=transport status=error operation={} duration_ms={} error_code=send_failed error={}",
                    operation,
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            error!(
                "event=http_request module=transport status=error operation={} duration_ms={} error_code=http_status http_status={}",
                operation,
                started_at.elapsed().as_millis(),
                status.as_u16()
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        debug!(
            "event=http_request module=transport status=ok operation={} duration_ms={} http_status={}",
            operation,
            started_at.elapsed().as_millis(),
            status.as_u16()
        );
        Ok(serde_json::from_str(&text)?)
    }
}

fn truncate_body(body: &str) -> String {
    let normalized = body.replace(['\n', '\r'], " ");
    let mut truncated = normalized
        .chars()
        .take(MAX_ERROR_BODY_CHARS)
        .collect::<String>();
    if normalized.chars().count() > MAX_ERROR_BODY_CHARS {
        truncated.push_str("...");
    }
    truncated
}
