//! One-time client assembly.
//!
//! # Responsibility
//! - Validate the registry, then build transport, auth link, cache and client
//!   in that order.
//! - Mark the process as bootstrapped exactly once and hand the client back
//!   for explicit injection into the UI root.
//!
//! # Invariants
//! - At most one successful bootstrap per process.
//! - A failed bootstrap leaves the process un-bootstrapped.

use super::auth::{AuthLink, TokenSource};
use super::cache::InMemoryCache;
use super::transport::{HttpTransport, Transport, TransportError};
use super::Client;
use crate::config::{ClientConfig, ConfigError};
use crate::query::{QueryRegistry, RegistryError};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::sync::Arc;

static BOOTSTRAP_STATE: OnceCell<BootstrapStatus> = OnceCell::new();

/// Production pipeline: auth decorator around the HTTP transport.
pub type NotesPipeline = AuthLink<HttpTransport>;
/// Shared client handle injected into the UI root.
pub type ClientHandle<T = NotesPipeline> = Arc<Client<T>>;

/// Metadata recorded by the successful bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapStatus {
    pub endpoint: String,
    pub token_env_var: String,
}

/// Startup-fatal bootstrap failure.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("client already bootstrapped for `{endpoint}`; refusing to create a second handle")]
    AlreadyBootstrapped { endpoint: String },
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build transport: {0}")]
    Transport(#[source] TransportError),
}

/// Builds the process-wide client for the configured HTTP endpoint.
///
/// # Errors
/// - `AlreadyBootstrapped` on any call after a successful bootstrap.
/// - `Registry`/`Config`/`Transport` when assembly fails.
pub fn bootstrap(config: &ClientConfig) -> Result<ClientHandle, BootstrapError> {
    let endpoint = config.endpoint_url()?;
    let transport = HttpTransport::new(endpoint, config.request_timeout)
        .map_err(BootstrapError::Transport)?;
    bootstrap_with_transport(config, transport)
}

/// Builds the process-wide client around a caller-provided transport.
///
/// Shares the once-per-process guard with `bootstrap`; the transport is
/// wrapped in the auth link before the client is assembled.
pub fn bootstrap_with_transport<T: Transport>(
    config: &ClientConfig,
    transport: T,
) -> Result<ClientHandle<AuthLink<T>>, BootstrapError> {
    ensure_not_bootstrapped()?;
    config.validate()?;
    let registry = match QueryRegistry::load() {
        Ok(registry) => registry,
        Err(err) => {
            error!(
                "event=client_bootstrap module=bootstrap status=error error_code=invalid_registry error={}",
                err
            );
            return Err(err.into());
        }
    };

    let pipeline = AuthLink::new(
        TokenSource::from_env_var(config.token_env_var.trim()),
        transport,
    );
    let client = Arc::new(Client::new(pipeline, InMemoryCache::new(), registry));

    let status = BootstrapStatus {
        endpoint: config.endpoint.trim().to_string(),
        token_env_var: config.token_env_var.trim().to_string(),
    };
    if let Err(rejected) = BOOTSTRAP_STATE.set(status) {
        return Err(already_bootstrapped(&rejected.endpoint));
    }

    info!(
        "event=client_bootstrap module=bootstrap status=ok endpoint={} token_env_var={} operations={}",
        config.endpoint.trim(),
        config.token_env_var.trim(),
        client.registry().len()
    );
    Ok(client)
}

/// Returns bootstrap metadata, or `None` before a successful bootstrap.
pub fn bootstrap_status() -> Option<BootstrapStatus> {
    BOOTSTRAP_STATE.get().cloned()
}

fn ensure_not_bootstrapped() -> Result<(), BootstrapError> {
    match BOOTSTRAP_STATE.get() {
        Some(state) => Err(already_bootstrapped(&state.endpoint)),
        None => Ok(()),
    }
}

fn already_bootstrapped(attempted: &str) -> BootstrapError {
    let endpoint = BOOTSTRAP_STATE
        .get()
        .map(|state| state.endpoint.clone())
        .unwrap_or_else(|| attempted.to_string());
    error!(
        "event=client_bootstrap module=bootstrap status=error error_code=already_bootstrapped endpoint={}",
        endpoint
    );
    BootstrapError::AlreadyBootstrapped { endpoint }
}
