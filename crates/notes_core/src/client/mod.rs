//! GraphQL client: auth-decorated transport pipeline plus result cache.
//!
//! # Responsibility
//! - Execute registry operations with caller-supplied variables.
//! - Apply fetch policy, cache writes and mutation-driven eviction.
//! - Surface transport and backend failures as `RequestError` results.
//!
//! # Invariants
//! - Only operations present in the validated registry are sent.
//! - Mutations always reach the network and evict cached query results.
//! - Failed requests, including undecodable payloads, are never cached and
//!   never retried.

pub mod auth;
pub mod bootstrap;
pub mod cache;
pub mod transport;

use crate::query::{Operation, OperationKind, QueryDefinition, QueryRegistry};
use cache::{CacheKey, FetchPolicy, InMemoryCache};
use graphql_client::{QueryBody, Response};
use log::{debug, error, warn};
use serde_json::Value;
use std::time::Instant;
use transport::{GraphQlRequest, Transport, TransportError};

/// Per-request error returned to the immediate caller.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("operation `{0}` is not part of the validated registry")]
    UnregisteredOperation(&'static str),
    #[error("failed to encode variables for `{operation}`: {source}")]
    EncodeVariables {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("failed to decode `{operation}` response: {source}")]
    DecodeResponse {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("backend rejected `{operation}`: {}", .messages.join("; "))]
    GraphQl {
        operation: &'static str,
        messages: Vec<String>,
    },
    #[error("`{0}` returned no data")]
    MissingData(&'static str),
}

/// Client handle combining the request pipeline, cache and registry.
///
/// Handles come from `bootstrap`; other components cannot assemble one.
///
/// ```compile_fail
/// use notes_core::{Client, HttpTransport, InMemoryCache, QueryRegistry};
///
/// fn second_handle(transport: HttpTransport, registry: QueryRegistry) -> Client<HttpTransport> {
///     Client::new(transport, InMemoryCache::new(), registry)
/// }
/// ```
#[derive(Debug)]
pub struct Client<T> {
    pipeline: T,
    cache: InMemoryCache,
    registry: QueryRegistry,
}

impl<T: Transport> Client<T> {
    pub(crate) fn new(pipeline: T, cache: InMemoryCache, registry: QueryRegistry) -> Self {
        Self {
            pipeline,
            cache,
            registry,
        }
    }

    /// Assembles a client outside the process-wide bootstrap guard.
    ///
    /// Test harnesses only; application code goes through `bootstrap`.
    #[doc(hidden)]
    pub fn detached(pipeline: T, cache: InMemoryCache, registry: QueryRegistry) -> Self {
        Self::new(pipeline, cache, registry)
    }

    pub fn pipeline(&self) -> &T {
        &self.pipeline
    }

    pub fn cache(&self) -> &InMemoryCache {
        &self.cache
    }

    pub fn registry(&self) -> &QueryRegistry {
        &self.registry
    }

    /// Executes `O` with the default fetch policy.
    pub async fn execute<O: Operation>(
        &self,
        variables: &O::Variables,
    ) -> Result<O::Data, RequestError> {
        self.execute_with_policy::<O>(variables, FetchPolicy::default())
            .await
    }

    /// Executes `O` with an explicit fetch policy.
    ///
    /// The policy only affects queries; mutations always hit the network.
    pub async fn execute_with_policy<O: Operation>(
        &self,
        variables: &O::Variables,
        policy: FetchPolicy,
    ) -> Result<O::Data, RequestError> {
        let definition = O::definition();
        if !self.registry.contains(definition) {
            return Err(RequestError::UnregisteredOperation(definition.name));
        }

        let variables =
            serde_json::to_value(variables).map_err(|source| RequestError::EncodeVariables {
                operation: definition.name,
                source,
            })?;
        let key = CacheKey::new(definition.name, &variables);
        let is_query = definition.kind == OperationKind::Query;

        if is_query && policy == FetchPolicy::CacheFirst {
            if let Some(data) = self.cache.read(&key) {
                debug!(
                    "event=graphql_execute module=client status=ok source=cache operation={}",
                    definition.name
                );
                return decode_data::<O>(definition, data);
            }
        }

        let data = self.fetch(definition, variables).await?;
        let decoded = decode_data::<O>(definition, data.clone())?;
        match definition.kind {
            OperationKind::Query if policy != FetchPolicy::NoCache => {
                // Why: a query sent before a concurrent mutation can land here after
                // that mutation's eviction. Independent requests carry no ordering;
                // the next mutation or a NetworkOnly refresh replaces the entry.
                self.cache.write(key, data);
            }
            OperationKind::Query => {}
            OperationKind::Mutation => {
                let evicted = self.cache.evict_all();
                debug!(
                    "event=cache_evict module=client status=ok operation={} evicted={}",
                    definition.name, evicted
                );
            }
        }
        Ok(decoded)
    }

    async fn fetch(
        &self,
        definition: &'static QueryDefinition,
        variables: Value,
    ) -> Result<Value, RequestError> {
        let started_at = Instant::now();
        let body = QueryBody {
            variables,
            query: definition.document,
            operation_name: definition.name,
        };
        let body = serde_json::to_value(&body).map_err(|source| RequestError::EncodeVariables {
            operation: definition.name,
            source,
        })?;

        let payload = match self
            .pipeline
            .send(GraphQlRequest::new(definition.name, body))
            .await
        {
            Ok(payload) => payload,
            Err(err) => {
                error!(
                    "event=graphql_execute module=client status=error source=network operation={} duration_ms={} error_code=transport error={}",
                    definition.name,
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        let response: Response<Value> =
            serde_json::from_value(payload).map_err(|source| RequestError::DecodeResponse {
                operation: definition.name,
                source,
            })?;

        if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
            let messages = errors
                .into_iter()
                .map(|err| err.message)
                .collect::<Vec<_>>();
            warn!(
                "event=graphql_execute module=client status=error source=network operation={} duration_ms={} error_code=graphql_errors errors={}",
                definition.name,
                started_at.elapsed().as_millis(),
                messages.len()
            );
            return Err(RequestError::GraphQl {
                operation: definition.name,
                messages,
            });
        }

        let data = response
            .data
            .ok_or(RequestError::MissingData(definition.name))?;
        debug!(
            "event=graphql_execute module=client status=ok source=network operation={} duration_ms={}",
            definition.name,
            started_at.elapsed().as_millis()
        );
        Ok(data)
    }
}

fn decode_data<O: Operation>(
    definition: &QueryDefinition,
    data: Value,
) -> Result<O::Data, RequestError> {
    serde_json::from_value(data).map_err(|source| RequestError::DecodeResponse {
        operation: definition.name,
        source,
    })
}
