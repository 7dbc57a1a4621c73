//! Opaque query-result cache.
//!
//! Watched queries and cache-aware one-shot queries read and write this
//! store. It is deliberately minimal: get/set/invalidate over normalized
//! payloads, keyed by operation name and canonical variables. Anything
//! smarter (entity normalization, eviction) belongs to an external cache
//! and is out of scope here.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::api::operations::Operation;

/// Cache key: operation name plus canonical variables rendering.
///
/// `serde_json` keeps object maps sorted, so two structurally equal
/// variable sets render to the same key regardless of construction order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Builds the key for one operation invocation.
    #[must_use]
    pub fn new(operation: Operation, variables: Option<&Value>) -> Self {
        let variables = variables
            .map(ToString::to_string)
            .unwrap_or_else(|| "null".to_string());
        Self(format!("{}:{variables}", operation.name()))
    }
}

/// In-process store of raw query payloads.
///
/// # Thread Safety
///
/// Interior mutex; share via `Arc`.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<CacheKey, Value>>,
}

impl QueryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached payload for the key, if any.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<Value> {
        self.entries.lock().expect("query cache lock").get(key).cloned()
    }

    /// Stores a payload, replacing any previous entry for the key.
    pub fn set(&self, key: CacheKey, value: Value) {
        self.entries.lock().expect("query cache lock").insert(key, value);
    }

    /// Removes the entry for the key, if any.
    pub fn invalidate(&self, key: &CacheKey) {
        self.entries.lock().expect("query cache lock").remove(key);
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.lock().expect("query cache lock").clear();
    }
}
