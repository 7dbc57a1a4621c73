//! Configuration types for the Saleor API client.
//!
//! This module provides the core configuration types used to initialize
//! the client for communication with a Saleor GraphQL backend.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`SaleorConfig`]: The main configuration struct holding all client settings
//! - [`SaleorConfigBuilder`]: A builder for constructing [`SaleorConfig`] instances
//! - [`ApiEndpoint`]: A validated GraphQL endpoint URL newtype
//!
//! # Example
//!
//! ```rust
//! use saleor_api::{SaleorConfig, ApiEndpoint};
//!
//! let config = SaleorConfig::builder()
//!     .endpoint(ApiEndpoint::new("https://demo.saleor.io/graphql/").unwrap())
//!     .user_agent_prefix("MyStorefront/1.0")
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::ApiEndpoint;

use crate::error::ConfigError;

/// Configuration for the Saleor API client.
///
/// This struct holds all configuration needed for client operations: the
/// GraphQL endpoint, an optional User-Agent prefix, and the default retry
/// budget for transient transport failures.
///
/// # Thread Safety
///
/// `SaleorConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use saleor_api::{SaleorConfig, ApiEndpoint};
///
/// let config = SaleorConfig::builder()
///     .endpoint(ApiEndpoint::new("https://demo.saleor.io/graphql/").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.endpoint().as_ref(), "https://demo.saleor.io/graphql/");
/// ```
#[derive(Clone, Debug)]
pub struct SaleorConfig {
    endpoint: ApiEndpoint,
    user_agent_prefix: Option<String>,
    tries: u32,
}

// Verify SaleorConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SaleorConfig>();
};

impl SaleorConfig {
    /// Creates a new builder for constructing a `SaleorConfig`.
    #[must_use]
    pub fn builder() -> SaleorConfigBuilder {
        SaleorConfigBuilder::new()
    }

    /// Returns the GraphQL endpoint requests are sent to.
    #[must_use]
    pub const fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    /// Returns the configured User-Agent prefix, if any.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the default number of attempts per request.
    ///
    /// A value of 1 means no automatic retries. Per-call options can
    /// override this for individual requests.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }
}

/// Builder for constructing [`SaleorConfig`] instances.
///
/// Provides a fluent API for building configuration with optional parameters.
///
/// # Example
///
/// ```rust
/// use saleor_api::{SaleorConfig, ApiEndpoint};
///
/// let config = SaleorConfig::builder()
///     .endpoint(ApiEndpoint::new("https://demo.saleor.io/graphql/").unwrap())
///     .tries(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.tries(), 3);
/// ```
#[derive(Debug, Default)]
pub struct SaleorConfigBuilder {
    endpoint: Option<ApiEndpoint>,
    user_agent_prefix: Option<String>,
    tries: Option<u32>,
}

impl SaleorConfigBuilder {
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the GraphQL endpoint. Required.
    #[must_use]
    pub fn endpoint(mut self, endpoint: ApiEndpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets a prefix for the User-Agent header sent with every request.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the default number of attempts per request (default: 1, no retries).
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if the endpoint was
    /// not set.
    pub fn build(self) -> Result<SaleorConfig, ConfigError> {
        let endpoint = self
            .endpoint
            .ok_or(ConfigError::MissingRequiredField { field: "endpoint" })?;

        Ok(SaleorConfig {
            endpoint,
            user_agent_prefix: self.user_agent_prefix,
            tries: self.tries.unwrap_or(1).max(1),
        })
    }
}
