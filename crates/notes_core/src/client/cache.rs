//! In-memory result cache keyed by operation name and variables.
//!
//! # Responsibility
//! - Store decoded-ready `data` payloads of successful queries.
//! - Provide whole-cache eviction after mutations.
//!
//! # Invariants
//! - Keys compare serialized variables, so equal variable values share one entry.
//! - The lock is held for a single read or write, never across `.await`.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// How a query consults the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Serve from cache when present, otherwise fetch and store.
    #[default]
    CacheFirst,
    /// Always fetch, then refresh the cache entry.
    NetworkOnly,
    /// Always fetch and leave the cache untouched.
    NoCache,
}

/// Identity of one cached result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation: &'static str,
    variables: String,
}

impl CacheKey {
    pub fn new(operation: &'static str, variables: &Value) -> Self {
        Self {
            operation,
            variables: variables.to_string(),
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

/// Point-in-time cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<CacheKey, Value>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the cached payload and records a hit or miss.
    pub fn read(&self, key: &CacheKey) -> Option<Value> {
        let found = self.entries().get(key).cloned();
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    pub fn write(&self, key: CacheKey, data: Value) {
        self.entries().insert(key, data);
    }

    /// Drops every entry and returns how many were removed.
    pub fn evict_all(&self) -> usize {
        let mut entries = self.entries();
        let evicted = entries.len();
        entries.clear();
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    // Entries are plain JSON; a panic elsewhere cannot leave them half-written.
    fn entries(&self) -> MutexGuard<'_, HashMap<CacheKey, Value>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
