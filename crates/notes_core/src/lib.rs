//! Core client logic for the notes front end.
//! Holds the validated GraphQL operation registry and the one-time
//! assembly of the authenticated, cached client handle.

pub mod client;
pub mod config;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;

pub use client::auth::{authorization_value, AuthLink, TokenSource};
pub use client::bootstrap::{
    bootstrap, bootstrap_status, bootstrap_with_transport, BootstrapError, BootstrapStatus,
    ClientHandle, NotesPipeline,
};
pub use client::cache::{CacheKey, CacheStats, FetchPolicy, InMemoryCache};
pub use client::transport::{GraphQlRequest, HttpTransport, Transport, TransportError};
pub use client::{Client, RequestError};
pub use config::{ClientConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LogSink, LoggingError};
pub use model::note::{Note, NoteId, NoteRef};
pub use query::{Operation, OperationKind, QueryDefinition, QueryRegistry, RegistryError};
pub use service::note_service::{NoteService, NoteServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
