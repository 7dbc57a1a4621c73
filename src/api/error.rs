//! Unified error types surfaced by the dispatch layer.
//!
//! Two distinct error channels feed into these types:
//!
//! - **Transport errors**: protocol-level failures reported in the GraphQL
//!   response's top-level `errors` list
//! - **Domain errors**: business-rule validation failures embedded inside
//!   an otherwise-successful payload
//!
//! [`UnifiedError`] merges both for delivery to callers, always carrying
//! the raw domain errors in `extra_info` so field-level detail can be
//! recovered. [`ApiError`] is the dispatch layer's result error: execution
//! failures (network, retry exhaustion) bypass normalization and arrive as
//! [`ApiError::Request`]; normalized failures arrive as
//! [`ApiError::Response`].

use thiserror::Error;

use crate::clients::graphql::{DomainError, TransportError};
use crate::clients::GraphqlError;

/// The normalized error delivered to callers.
///
/// Merges transport-level and domain-level failures into one shape.
/// `extra_info` always holds the raw domain errors (possibly empty), so a
/// caller needing field-level detail can recover it.
///
/// # Example
///
/// ```rust
/// use saleor_api::api::UnifiedError;
/// use saleor_api::clients::graphql::DomainError;
///
/// let error = UnifiedError {
///     graphql_errors: vec![],
///     extra_info: vec![DomainError {
///         field: Some("password".to_string()),
///         message: "Invalid credentials".to_string(),
///     }],
/// };
///
/// assert_eq!(error.to_string(), "Invalid credentials");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnifiedError {
    /// Protocol-level error entries from the response.
    pub graphql_errors: Vec<TransportError>,
    /// The raw domain errors found embedded in the payload.
    pub extra_info: Vec<DomainError>,
}

impl UnifiedError {
    /// Creates an error from the two channels.
    #[must_use]
    pub const fn new(graphql_errors: Vec<TransportError>, extra_info: Vec<DomainError>) -> Self {
        Self {
            graphql_errors,
            extra_info,
        }
    }

    /// Creates an error carrying only domain errors.
    #[must_use]
    pub const fn from_domain(extra_info: Vec<DomainError>) -> Self {
        Self {
            graphql_errors: Vec::new(),
            extra_info,
        }
    }

    /// Returns `true` if neither channel holds an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graphql_errors.is_empty() && self.extra_info.is_empty()
    }
}

impl std::error::Error for UnifiedError {}

impl std::fmt::Display for UnifiedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut messages = self
            .graphql_errors
            .iter()
            .map(|error| error.message.as_str())
            .chain(self.extra_info.iter().map(|error| error.message.as_str()));

        match messages.next() {
            None => f.write_str("Unknown error"),
            Some(first) => {
                f.write_str(first)?;
                for message in messages {
                    write!(f, "; {message}")?;
                }
                Ok(())
            }
        }
    }
}

/// Error type for dispatch-layer operations.
///
/// Callers branch on this, never on the raw transport/domain shapes
/// directly.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself failed before a usable response existed
    /// (network failure, retry exhaustion, undecodable body). These bypass
    /// normalization entirely.
    #[error(transparent)]
    Request(#[from] GraphqlError),

    /// The backend answered, and the normalized outcome is an error.
    #[error(transparent)]
    Response(#[from] UnifiedError),

    /// The watched-query worker behind this handle is gone.
    #[error("watched query subscription is closed")]
    SubscriptionClosed,
}

impl ApiError {
    /// Returns the unified error, if this is a normalized response error.
    #[must_use]
    pub const fn unified(&self) -> Option<&UnifiedError> {
        match self {
            Self::Response(error) => Some(error),
            Self::Request(_) | Self::SubscriptionClosed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain_error(field: Option<&str>, message: &str) -> DomainError {
        DomainError {
            field: field.map(String::from),
            message: message.to_string(),
        }
    }

    fn transport_error(message: &str) -> TransportError {
        TransportError {
            message: message.to_string(),
            path: None,
            extensions: None,
        }
    }

    #[test]
    fn test_display_joins_all_messages() {
        let error = UnifiedError::new(
            vec![transport_error("transport failed")],
            vec![domain_error(Some("email"), "Invalid email")],
        );

        assert_eq!(error.to_string(), "transport failed; Invalid email");
    }

    #[test]
    fn test_display_with_no_messages() {
        let error = UnifiedError::default();
        assert_eq!(error.to_string(), "Unknown error");
    }

    #[test]
    fn test_is_empty() {
        assert!(UnifiedError::default().is_empty());
        assert!(!UnifiedError::from_domain(vec![domain_error(None, "x")]).is_empty());
    }

    #[test]
    fn test_api_error_unified_accessor() {
        let error = ApiError::Response(UnifiedError::from_domain(vec![domain_error(
            Some("password"),
            "Invalid credentials",
        )]));

        let unified = error.unified().unwrap();
        assert_eq!(unified.extra_info[0].field.as_deref(), Some("password"));

        let serde_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let request_error = ApiError::Request(GraphqlError::Decode(serde_error));
        assert!(request_error.unified().is_none());
    }

    #[test]
    fn test_api_error_implements_std_error() {
        let error: &dyn std::error::Error =
            &ApiError::Response(UnifiedError::from_domain(vec![domain_error(None, "x")]));
        let _ = error;
    }
}
