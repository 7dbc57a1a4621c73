//! Per-call request options.

/// How a query interacts with the cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Serve a cache hit without touching the network; fetch on a miss.
    CacheFirst,
    /// Emit any cached result immediately, then fetch and emit the network
    /// result. The default for watched queries.
    #[default]
    CacheAndNetwork,
    /// Always fetch; never read the cache.
    NetworkOnly,
}

/// Options applied to a single request or watched-query subscription.
///
/// Created per call; the operation definition itself is immutable and
/// shared.
///
/// # Example
///
/// ```rust
/// use saleor_api::api::{FetchPolicy, QueryOptions};
///
/// let options = QueryOptions::default().fetch_policy(FetchPolicy::NetworkOnly).tries(3);
/// assert_eq!(options.tries, 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryOptions {
    /// Cache interaction policy. Ignored for mutations.
    pub fetch_policy: FetchPolicy,
    /// Number of attempts for transient transport failures (1 = no retries).
    pub tries: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            fetch_policy: FetchPolicy::default(),
            tries: 1,
        }
    }
}

impl QueryOptions {
    /// Sets the fetch policy.
    #[must_use]
    pub const fn fetch_policy(mut self, fetch_policy: FetchPolicy) -> Self {
        self.fetch_policy = fetch_policy;
        self
    }

    /// Sets the retry budget.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = tries;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = QueryOptions::default();
        assert_eq!(options.fetch_policy, FetchPolicy::CacheAndNetwork);
        assert_eq!(options.tries, 1);
    }

    #[test]
    fn test_builder_style_setters() {
        let options = QueryOptions::default()
            .fetch_policy(FetchPolicy::CacheFirst)
            .tries(5);

        assert_eq!(options.fetch_policy, FetchPolicy::CacheFirst);
        assert_eq!(options.tries, 5);
    }
}
