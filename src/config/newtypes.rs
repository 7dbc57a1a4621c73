//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Saleor GraphQL endpoint URL.
///
/// This newtype ensures the endpoint is a non-empty absolute URL with an
/// `http` or `https` scheme, and provides type safety to prevent accidental
/// misuse of raw strings.
///
/// # Serialization
///
/// `ApiEndpoint` serializes to and deserializes from the URL string:
///
/// ```rust
/// use saleor_api::ApiEndpoint;
///
/// let endpoint = ApiEndpoint::new("https://demo.saleor.io/graphql/").unwrap();
/// let json = serde_json::to_string(&endpoint).unwrap();
/// assert_eq!(json, r#""https://demo.saleor.io/graphql/""#);
/// ```
///
/// # Example
///
/// ```rust
/// use saleor_api::ApiEndpoint;
///
/// let endpoint = ApiEndpoint::new("https://demo.saleor.io/graphql/").unwrap();
/// assert_eq!(endpoint.as_ref(), "https://demo.saleor.io/graphql/");
///
/// // Missing scheme is rejected
/// assert!(ApiEndpoint::new("demo.saleor.io/graphql/").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiEndpoint(String);

impl ApiEndpoint {
    /// Creates a new validated API endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyEndpoint`] if the URL is empty, or
    /// [`ConfigError::InvalidEndpoint`] if it lacks an `http`/`https` scheme
    /// or a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        if url.is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }

        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));
        match rest {
            Some(rest) if !rest.is_empty() && !rest.starts_with('/') => Ok(Self(url)),
            _ => Err(ConfigError::InvalidEndpoint { url }),
        }
    }
}

impl AsRef<str> for ApiEndpoint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ApiEndpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ApiEndpoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let url = String::deserialize(deserializer)?;
        Self::new(url).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_accepts_https_url() {
        let endpoint = ApiEndpoint::new("https://demo.saleor.io/graphql/").unwrap();
        assert_eq!(endpoint.as_ref(), "https://demo.saleor.io/graphql/");
    }

    #[test]
    fn test_endpoint_accepts_http_url() {
        let endpoint = ApiEndpoint::new("http://localhost:8000/graphql/").unwrap();
        assert_eq!(endpoint.as_ref(), "http://localhost:8000/graphql/");
    }

    #[test]
    fn test_endpoint_rejects_empty() {
        assert!(matches!(
            ApiEndpoint::new(""),
            Err(ConfigError::EmptyEndpoint)
        ));
    }

    #[test]
    fn test_endpoint_rejects_missing_scheme() {
        assert!(matches!(
            ApiEndpoint::new("demo.saleor.io/graphql/"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_endpoint_rejects_scheme_without_host() {
        assert!(matches!(
            ApiEndpoint::new("https://"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            ApiEndpoint::new("https:///graphql/"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_endpoint_display_matches_input() {
        let endpoint = ApiEndpoint::new("https://demo.saleor.io/graphql/").unwrap();
        assert_eq!(endpoint.to_string(), "https://demo.saleor.io/graphql/");
    }

    #[test]
    fn test_endpoint_serde_round_trip() {
        let endpoint = ApiEndpoint::new("https://demo.saleor.io/graphql/").unwrap();
        let json = serde_json::to_string(&endpoint).unwrap();
        let back: ApiEndpoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, endpoint);
    }

    #[test]
    fn test_endpoint_deserialize_rejects_invalid() {
        let result: Result<ApiEndpoint, _> = serde_json::from_str(r#""no-scheme""#);
        assert!(result.is_err());
    }
}
